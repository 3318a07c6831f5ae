//! Integration tests: congruences generated from presentation fixtures.
//!
//! Each fixture in tests/fixtures/ has:
//! - presentation.json or presentation.toml: kind, generators, pairs
//! - expect.json: parent size, class count, non-trivial class sizes in
//!   class order, and membership checks

use semicong_kernel::{
    ClassCount, CongruenceKind, FiniteSemigroup, PairOrbit, Presentation, TriState, Word, toy,
};
use serde_json::Value;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(name: &str) -> (Presentation, Value) {
    let dir = fixtures_dir().join(name);
    let path = ["presentation.json", "presentation.toml"]
        .iter()
        .map(|file| dir.join(file))
        .find(|path| path.exists())
        .unwrap_or_else(|| panic!("no presentation in {}", dir.display()));
    let presentation = Presentation::load(&path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()));

    let expect_path = dir.join("expect.json");
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));
    let expected: Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));
    (presentation, expected)
}

fn word(value: &Value) -> Word {
    serde_json::from_value(value.clone()).expect("word is an array of letters")
}

fn run_fixture(name: &str) {
    let (presentation, expected) = load_fixture(name);
    let parent = presentation.semigroup().expect("fixture generators are valid");
    assert_eq!(
        Some(parent.size() as u64),
        expected["size"].as_u64(),
        "{name}: parent size"
    );

    let mut cong = PairOrbit::congruence(presentation.kind, &parent).unwrap();
    presentation.add_pairs_to(&mut cong).unwrap();

    let nr_classes = expected["nr_classes"].as_u64().unwrap() as usize;
    assert_eq!(
        cong.nr_classes(),
        Ok(ClassCount::Finite(nr_classes)),
        "{name}: class count"
    );

    let sizes: Vec<u64> = cong
        .non_trivial_classes()
        .unwrap()
        .map(|class| class.len() as u64)
        .collect();
    let expected_sizes: Vec<u64> =
        serde_json::from_value(expected["non_trivial_class_sizes"].clone())
            .expect("sizes are integers");
    assert_eq!(sizes, expected_sizes, "{name}: non-trivial class sizes");

    for check in expected["contains"].as_array().unwrap() {
        let (u, v) = (word(&check[0]), word(&check[1]));
        let related = check[2].as_bool().unwrap();
        assert_eq!(cong.contains(&u, &v), Ok(related), "{name}: {u:?} ~ {v:?}");
        assert_eq!(cong.const_contains(&u, &v), TriState::from(related));
    }
}

#[test]
fn t5_two_sided() {
    run_fixture("t5_two_sided");
}

#[test]
fn t5_left() {
    run_fixture("t5_left");
}

#[test]
fn t5_right() {
    run_fixture("t5_right");
}

#[test]
fn klein_generators() {
    run_fixture("klein_generators");
}

#[test]
fn cyclic_left() {
    run_fixture("cyclic_left");
}

#[test]
fn classes_partition_the_parent() {
    let parent = toy::t5_pair();
    for kind in [CongruenceKind::Left, CongruenceKind::Right, CongruenceKind::TwoSided] {
        let mut cong = PairOrbit::congruence(kind, &parent).unwrap();
        cong.add_pair([0, 1, 0, 0, 0, 1, 1, 0, 0], [1, 0, 0, 0, 1]).unwrap();
        let ClassCount::Finite(n) = cong.nr_classes().unwrap() else {
            panic!("finite parent, finite classes");
        };
        let in_non_trivial: usize = cong.non_trivial_classes().unwrap().map(Vec::len).sum();
        let singletons = n - cong.nr_non_trivial_classes().unwrap();
        assert_eq!(in_non_trivial + singletons, parent.size(), "{kind}");
    }
}

#[test]
fn every_class_index_is_in_range() {
    let parent = toy::t5_pair();
    let mut cong = PairOrbit::congruence(CongruenceKind::Right, &parent).unwrap();
    cong.add_pair([0, 1, 0, 0, 0, 1, 1, 0, 0], [1, 0, 0, 0, 1]).unwrap();
    let n = cong.nr_classes().unwrap().finite().unwrap();
    for pos in 0..parent.size() {
        let index = cong.word_to_class_index(parent.factorisation(pos)).unwrap();
        assert!(index < n);
    }
}

#[test]
fn two_sided_quotient_has_one_element_per_class() {
    let parent = toy::t5_pair();
    let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &parent).unwrap();
    cong.add_pair([0, 1, 0, 0, 0, 1, 1, 0, 0], [1, 0, 0, 0, 1]).unwrap();
    let quotient = cong.quotient_semigroup().unwrap();
    assert_eq!(quotient.size(), 21);
    assert_eq!(quotient.nr_generators(), 2);
    assert!(quotient.equal_to(&[0, 0, 0, 1], &[0, 0, 1, 0, 0]));
    assert!(!quotient.equal_to(&[0], &[1]));
}

#[test]
fn presentation_round_trips_through_toml() {
    let (presentation, _) = load_fixture("klein_generators");
    let text = toml::to_string(&presentation).unwrap();
    assert_eq!(Presentation::from_toml(&text).unwrap(), presentation);
}
