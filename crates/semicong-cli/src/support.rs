use semicong_kernel::{
    Congruence, CongruenceError, PairOrbit, Presentation, TransformationSemigroup, Word,
    format_word, parse_word,
};
use serde_json::Value;
use std::path::Path;

pub type FileCongruence<'p> = Congruence<'p, PairOrbit<'p, TransformationSemigroup>>;

pub fn or_exit<T>(result: Result<T, CongruenceError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn load_presentation_or_exit(file: &str) -> Presentation {
    or_exit(Presentation::load(Path::new(file)))
}

pub fn semigroup_or_exit(presentation: &Presentation) -> TransformationSemigroup {
    or_exit(presentation.semigroup())
}

/// The congruence a presentation describes, over its enumerated parent.
pub fn congruence_or_exit<'p>(
    presentation: &Presentation,
    parent: &'p TransformationSemigroup,
) -> FileCongruence<'p> {
    let mut cong = or_exit(PairOrbit::congruence(presentation.kind, parent));
    or_exit(presentation.add_pairs_to(&mut cong));
    tracing::debug!(
        kind = %presentation.kind,
        kept_pairs = cong.nr_generating_pairs(),
        file_pairs = presentation.pairs.len(),
        "congruence ready"
    );
    cong
}

pub fn parse_word_or_exit(s: &str) -> Word {
    parse_word(s).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn print_json(payload: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn format_words(words: &[Word]) -> String {
    let rendered: Vec<String> = words.iter().map(|w| format_word(w)).collect();
    rendered.join(" ")
}
