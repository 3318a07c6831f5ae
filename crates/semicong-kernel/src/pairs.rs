//! Congruences on a finite parent by orbits of pairs.
//!
//! The congruence generated by a set of pairs on a finite semigroup is
//! found with a union-find over the parent's elements: every pair that
//! merges two classes is queued, and each queued pair is multiplied by
//! every generator on the side(s) the congruence is compatible with.
//! Pairs that do not merge anything need no further multiplication, so
//! the orbit stays small.
//!
//! Pairs added after a completed run are folded into the existing
//! union-find on the next run.

use crate::congruence::{ClassCount, Congruence, Strategy};
use crate::error::CongruenceError;
use crate::kind::CongruenceKind;
use crate::runner::Runner;
use crate::semigroup::{CayleyGraph, FiniteSemigroup, same_semigroup};
use crate::word::{ClassIndex, Letter, Word};
use std::collections::VecDeque;

/// Disjoint sets over `0..n`; the smaller index is kept as root.
#[derive(Debug, Clone, Default)]
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `x` and `y`. Returns false if already merged.
    fn union(&mut self, x: usize, y: usize) -> bool {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }
        let (root, child) = if rx < ry { (rx, ry) } else { (ry, rx) };
        self.parent[child] = root;
        true
    }
}

/// Class of every parent element after a completed run.
#[derive(Debug, Clone)]
struct Classes {
    index: Vec<ClassIndex>,
    count: usize,
}

/// A [`Strategy`] for congruences on a fully enumerated finite parent.
#[derive(Debug)]
pub struct PairOrbit<'p, G> {
    parent: &'p G,
    kind: CongruenceKind,
    forest: UnionFind,
    pending: Vec<(usize, usize)>,
    queue: VecDeque<(usize, usize)>,
    classes: Option<Classes>,
}

impl<'p, G: CayleyGraph> PairOrbit<'p, G> {
    fn new(parent: &'p G) -> Self {
        Self {
            parent,
            kind: CongruenceKind::default(),
            forest: UnionFind::default(),
            pending: Vec::new(),
            queue: VecDeque::new(),
            classes: None,
        }
    }

    /// A congruence over `parent`, with alphabet and parent already set.
    ///
    /// The only way to build a `PairOrbit`, so the strategy and the
    /// congruence always share one parent.
    pub fn congruence(
        kind: CongruenceKind,
        parent: &'p G,
    ) -> Result<Congruence<'p, Self>, CongruenceError> {
        let mut cong = Congruence::new(kind, Self::new(parent));
        cong.set_nr_generators(parent.nr_generators())?;
        cong.set_parent_semigroup(parent);
        Ok(cong)
    }

    fn position(&self, word: &[Letter]) -> Result<usize, CongruenceError> {
        self.parent
            .position(word)
            .ok_or_else(|| CongruenceError::NotInParent {
                word: word.to_vec(),
            })
    }

    fn merge(&mut self, x: usize, y: usize) {
        if self.forest.union(x, y) {
            self.queue.push_back((x, y));
        }
    }

    fn finished_classes(&self, runner: &Runner) -> Result<&Classes, CongruenceError> {
        match &self.classes {
            Some(classes) if runner.finished() => Ok(classes),
            _ => Err(CongruenceError::Interrupted {
                reason: runner.stop_reason().unwrap_or("not finished").to_string(),
            }),
        }
    }

    fn number_classes(&mut self) -> Classes {
        let n = self.forest.len();
        let mut class_of_root: Vec<Option<ClassIndex>> = vec![None; n];
        let mut count = 0;
        let mut index = Vec::with_capacity(n);
        for pos in 0..n {
            let root = self.forest.find(pos);
            let class = *class_of_root[root].get_or_insert_with(|| {
                count += 1;
                count - 1
            });
            index.push(class);
        }
        Classes { index, count }
    }
}

impl<G: CayleyGraph> Strategy for PairOrbit<'_, G> {
    fn set_kind_impl(&mut self, kind: CongruenceKind) {
        self.kind = kind;
    }

    fn add_pair_impl(&mut self, u: &[Letter], v: &[Letter]) -> Result<(), CongruenceError> {
        let seed = (self.position(u)?, self.position(v)?);
        self.pending.push(seed);
        self.classes = None;
        Ok(())
    }

    fn set_parent_impl(&mut self, parent: &dyn FiniteSemigroup) {
        assert!(
            same_semigroup(self.parent, parent),
            "the pair orbit enumerates a different parent semigroup"
        );
    }

    fn run_impl(&mut self, runner: &mut Runner) -> Result<(), CongruenceError> {
        if runner.finished() || runner.dead() {
            return Ok(());
        }
        if self.forest.len() != self.parent.size() {
            self.forest = UnionFind::new(self.parent.size());
        }

        for (x, y) in std::mem::take(&mut self.pending) {
            self.merge(x, y);
        }

        let parent = self.parent;
        let k = parent.nr_generators();
        let mut steps: usize = 0;
        while let Some((x, y)) = self.queue.pop_front() {
            for letter in 0..k {
                if self.kind.acts_on_right() {
                    self.merge(parent.right(x, letter), parent.right(y, letter));
                }
                if self.kind.acts_on_left() {
                    self.merge(parent.left(x, letter), parent.left(y, letter));
                }
            }
            steps += 1;
            if runner.report() {
                tracing::debug!(steps, queued = self.queue.len(), "pair orbit in progress");
            }
            if runner.stopped() {
                return Ok(());
            }
        }

        let classes = self.number_classes();
        tracing::debug!(
            kind = %self.kind,
            size = parent.size(),
            nr_classes = classes.count,
            steps,
            "pair orbit finished"
        );
        self.classes = Some(classes);
        runner.set_finished(true);
        Ok(())
    }

    fn word_to_class_index(
        &mut self,
        word: &[Letter],
        runner: &mut Runner,
    ) -> Result<ClassIndex, CongruenceError> {
        self.run_impl(runner)?;
        let pos = self.position(word)?;
        Ok(self.finished_classes(runner)?.index[pos])
    }

    fn const_word_to_class_index(&self, word: &[Letter]) -> Option<ClassIndex> {
        let classes = self.classes.as_ref()?;
        let pos = self.parent.position(word)?;
        Some(classes.index[pos])
    }

    fn nr_classes(&mut self, runner: &mut Runner) -> Result<ClassCount, CongruenceError> {
        self.run_impl(runner)?;
        Ok(ClassCount::Finite(self.finished_classes(runner)?.count))
    }

    fn quotient_impl(
        &mut self,
        runner: &mut Runner,
    ) -> Result<Box<dyn FiniteSemigroup>, CongruenceError> {
        self.run_impl(runner)?;
        let classes = self.finished_classes(runner)?;
        Ok(Box::new(QuotientSemigroup::from_classes(
            self.parent,
            &classes.index,
            classes.count,
        )))
    }

    fn is_quotient_obviously_finite(&self) -> bool {
        true
    }
}

/// The semigroup of classes of a two-sided congruence on a finite parent.
///
/// Element `c` is class `c`; its factorisation is the factorisation of
/// the first parent element in the class.
#[derive(Debug, Clone)]
pub struct QuotientSemigroup {
    generator_classes: Vec<ClassIndex>,
    words: Vec<Word>,
    right: Vec<Vec<ClassIndex>>,
    left: Vec<Vec<ClassIndex>>,
}

impl QuotientSemigroup {
    fn from_classes<G: CayleyGraph>(parent: &G, index: &[ClassIndex], count: usize) -> Self {
        let mut first: Vec<Option<usize>> = vec![None; count];
        for (pos, &class) in index.iter().enumerate() {
            first[class].get_or_insert(pos);
        }
        let representatives: Vec<usize> = first.into_iter().flatten().collect();
        let k = parent.nr_generators();

        Self {
            generator_classes: (0..k)
                .map(|l| index[parent.generator_position(l)])
                .collect(),
            words: representatives
                .iter()
                .map(|&pos| parent.factorisation(pos))
                .collect(),
            right: representatives
                .iter()
                .map(|&pos| (0..k).map(|l| index[parent.right(pos, l)]).collect())
                .collect(),
            left: representatives
                .iter()
                .map(|&pos| (0..k).map(|l| index[parent.left(pos, l)]).collect())
                .collect(),
        }
    }
}

impl FiniteSemigroup for QuotientSemigroup {
    fn size(&self) -> usize {
        self.words.len()
    }

    fn nr_generators(&self) -> usize {
        self.generator_classes.len()
    }

    fn equal_to(&self, u: &[Letter], v: &[Letter]) -> bool {
        match (self.position(u), self.position(v)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    fn factorisation(&self, pos: usize) -> Word {
        self.words[pos].clone()
    }
}

impl CayleyGraph for QuotientSemigroup {
    fn generator_position(&self, letter: Letter) -> usize {
        self.generator_classes[letter]
    }

    fn right(&self, pos: usize, letter: Letter) -> usize {
        self.right[pos][letter]
    }

    fn left(&self, pos: usize, letter: Letter) -> usize {
        self.left[pos][letter]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TriState;
    use crate::toy;
    use std::time::Duration;

    #[test]
    fn union_find_keeps_smallest_root() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(3, 1));
        assert!(uf.union(4, 3));
        assert!(!uf.union(1, 4));
        assert_eq!(uf.find(4), 1);
        assert_eq!(uf.find(0), 0);
    }

    #[test]
    fn trivial_congruence_has_one_class_per_element() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        assert_eq!(cong.nr_classes(), Ok(ClassCount::Finite(4)));
        assert_eq!(cong.nr_non_trivial_classes(), Ok(0));
        assert!(cong.finished());
    }

    #[test]
    fn identifying_the_generators_of_klein_four() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        cong.add_pair([0], [1]).unwrap();
        assert_eq!(cong.nr_classes(), Ok(ClassCount::Finite(2)));
        assert_eq!(cong.contains([0], [1]), Ok(true));
        assert_eq!(cong.contains([0, 0], [0, 1]), Ok(true));
        assert_eq!(cong.contains([0], [0, 0]), Ok(false));
        assert_eq!(cong.word_to_class_index([0]), Ok(0));
        assert_eq!(cong.word_to_class_index([1, 1]), Ok(1));

        let classes: Vec<Vec<Word>> = cong.non_trivial_classes().unwrap().cloned().collect();
        assert_eq!(classes, vec![vec![vec![0], vec![1]], vec![vec![0, 0], vec![0, 1]]]);
    }

    #[test]
    fn empty_word_is_not_an_element() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        assert_eq!(
            cong.word_to_class_index(Word::new()),
            Err(CongruenceError::NotInParent { word: vec![] })
        );
    }

    #[test]
    fn pair_outside_the_parent_is_rejected() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        assert_eq!(
            cong.add_pair(Word::new(), [0]),
            Err(CongruenceError::NotInParent { word: vec![] })
        );
        assert_eq!(cong.nr_generating_pairs(), 0);
        assert_eq!(cong.contains([0], [1]), Ok(false));
        assert_eq!(cong.nr_classes(), Ok(ClassCount::Finite(4)));

        cong.add_pair([0], [1]).unwrap();
        assert_eq!(cong.contains([0], [1]), Ok(true));
    }

    #[test]
    #[should_panic(expected = "different parent semigroup")]
    fn strategy_and_congruence_share_the_parent() {
        let klein = toy::klein_four();
        let other = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        cong.kill();
        cong.set_parent_semigroup(&other);
    }

    #[test]
    fn const_queries_wait_for_a_finished_run() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        cong.add_pair([0], [1]).unwrap();
        assert_eq!(cong.const_word_to_class_index([0]), None);
        assert_eq!(cong.const_contains([0], [1]), TriState::Unknown);

        cong.run().unwrap();
        assert_eq!(cong.const_contains([0], [1]), TriState::True);
        assert_eq!(cong.const_contains([0], [0, 0]), TriState::False);
    }

    #[test]
    fn pairs_added_later_extend_the_orbit() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        cong.add_pair([0], [1]).unwrap();
        assert_eq!(cong.nr_classes(), Ok(ClassCount::Finite(2)));

        cong.add_pair([0], [0, 0]).unwrap();
        assert!(!cong.finished());
        assert_eq!(cong.const_word_to_class_index([0]), None);
        assert_eq!(cong.nr_classes(), Ok(ClassCount::Finite(1)));
        assert_eq!(cong.nr_non_trivial_classes(), Ok(1));
    }

    #[test]
    fn zero_budget_leaves_work_pending() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        cong.add_pair([0], [1]).unwrap();
        cong.run_for(Duration::ZERO).unwrap();
        assert!(!cong.finished());
        assert_eq!(cong.const_contains([0], [1]), TriState::Unknown);

        cong.run().unwrap();
        assert!(cong.finished());
        assert_eq!(cong.nr_classes(), Ok(ClassCount::Finite(2)));
    }

    #[test]
    fn killed_orbit_is_interrupted() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        cong.add_pair([0], [1]).unwrap();
        cong.kill_handle().kill();
        assert_eq!(
            cong.nr_classes(),
            Err(CongruenceError::Interrupted {
                reason: "killed".to_string()
            })
        );
    }

    #[test]
    fn quotient_of_klein_four_is_cyclic_of_order_two() {
        let klein = toy::klein_four();
        let mut cong = PairOrbit::congruence(CongruenceKind::TwoSided, &klein).unwrap();
        assert!(cong.is_quotient_obviously_finite());
        cong.add_pair([0], [1]).unwrap();

        let q = cong.quotient_semigroup().unwrap();
        assert_eq!(q.size(), 2);
        assert_eq!(q.nr_generators(), 2);
        assert!(q.equal_to(&[0], &[1]));
        assert!(q.equal_to(&[0, 0], &[1, 0]));
        assert!(!q.equal_to(&[0], &[0, 0]));
        assert_eq!(q.factorisation(0), vec![0]);
        assert_eq!(q.factorisation(1), vec![0, 0]);
    }
}
