//! The congruence base: pair bookkeeping over a pluggable strategy.
//!
//! A [`Congruence`] owns everything every enumeration algorithm needs in
//! common: the alphabet size, the generating pairs, the optional parent
//! semigroup, the quotient, and the non-trivial classes. Computing class
//! indices is delegated to a [`Strategy`].
//!
//! ```text
//! Congruence<S>
//!   ├── generating pairs      (append-only, insertion order)
//!   ├── parent                (borrowed, set once)
//!   ├── quotient              Absent | Borrowed(parent) | Owned(built by S)
//!   ├── non-trivial classes   (generation-stamped cache)
//!   ├── Runner                (finished / dead / time budget)
//!   └── S: Strategy           (word -> class index)
//! ```
//!
//! Every call that changes what the congruence is bumps a generation
//! counter; cached derivations are stamped with the generation they were
//! built at and rebuilt when the stamps disagree.

use crate::error::CongruenceError;
use crate::kind::{CongruenceKind, TriState};
use crate::runner::{KillHandle, Runner};
use crate::semigroup::{FiniteSemigroup, same_semigroup};
use crate::word::{ClassIndex, Letter, Relation, Word, format_word};
use std::time::Duration;

/// Number of classes of a congruence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassCount {
    Finite(usize),
    Infinite,
}

impl ClassCount {
    pub fn finite(self) -> Option<usize> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Infinite => None,
        }
    }
}

impl std::fmt::Display for ClassCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Infinite => write!(f, "infinite"),
        }
    }
}

/// The hooks an enumeration algorithm implements.
///
/// The base validates words before calling any hook, so strategies may
/// assume every letter is in range.
pub trait Strategy {
    /// Called once, when the congruence is created.
    fn set_kind_impl(&mut self, kind: CongruenceKind) {
        let _ = kind;
    }

    /// Called once, when the alphabet size is fixed.
    fn set_nr_generators_impl(&mut self, n: usize) {
        let _ = n;
    }

    /// Called for every generating pair the base is about to keep.
    ///
    /// An error rejects the pair and leaves the congruence unchanged.
    fn add_pair_impl(&mut self, u: &[Letter], v: &[Letter]) -> Result<(), CongruenceError>;

    /// Called when a parent semigroup is attached.
    fn set_parent_impl(&mut self, parent: &dyn FiniteSemigroup) {
        let _ = parent;
    }

    /// Make progress until finished or until `runner` says stop.
    fn run_impl(&mut self, runner: &mut Runner) -> Result<(), CongruenceError> {
        let _ = runner;
        Ok(())
    }

    /// The class index of `word`. May run the enumeration to completion.
    fn word_to_class_index(
        &mut self,
        word: &[Letter],
        runner: &mut Runner,
    ) -> Result<ClassIndex, CongruenceError>;

    /// The class index of `word` from work already done, never blocking.
    fn const_word_to_class_index(&self, word: &[Letter]) -> Option<ClassIndex> {
        let _ = word;
        None
    }

    /// The number of classes. May run the enumeration to completion.
    fn nr_classes(&mut self, runner: &mut Runner) -> Result<ClassCount, CongruenceError>;

    /// Build the quotient semigroup. Only called for two-sided congruences.
    fn quotient_impl(
        &mut self,
        runner: &mut Runner,
    ) -> Result<Box<dyn FiniteSemigroup>, CongruenceError>;

    /// Cheap test that the quotient is finite.
    fn is_quotient_obviously_finite(&self) -> bool {
        false
    }

    /// Cheap test that the quotient is infinite.
    fn is_quotient_obviously_infinite(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
struct Stamped<T> {
    generation: u64,
    value: T,
}

enum Quotient<'p> {
    Absent,
    /// No pairs yet: the quotient is the parent itself.
    Borrowed(&'p dyn FiniteSemigroup),
    Owned(Stamped<Box<dyn FiniteSemigroup>>),
}

/// A left, right, or two-sided congruence over a generating alphabet.
pub struct Congruence<'p, S> {
    kind: CongruenceKind,
    nr_generators: Option<usize>,
    generating_pairs: Vec<Relation>,
    parent: Option<&'p dyn FiniteSemigroup>,
    quotient: Quotient<'p>,
    non_trivial_classes: Option<Stamped<Vec<Vec<Word>>>>,
    generation: u64,
    runner: Runner,
    strategy: S,
}

impl<'p, S: Strategy> Congruence<'p, S> {
    pub fn new(kind: CongruenceKind, mut strategy: S) -> Self {
        strategy.set_kind_impl(kind);
        Self {
            kind,
            nr_generators: None,
            generating_pairs: Vec::new(),
            parent: None,
            quotient: Quotient::Absent,
            non_trivial_classes: None,
            generation: 0,
            runner: Runner::new(),
            strategy,
        }
    }

    pub fn kind(&self) -> CongruenceKind {
        self.kind
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    // ── Alphabet ────────────────────────────────────────────────────────

    /// The alphabet size, if fixed.
    pub fn nr_generators(&self) -> Option<usize> {
        self.nr_generators
    }

    /// Fix the alphabet size. Fails if it is already fixed.
    pub fn set_nr_generators(&mut self, n: usize) -> Result<(), CongruenceError> {
        if self.nr_generators.is_some() {
            return Err(CongruenceError::AlreadyConfigured);
        }
        tracing::debug!(nr_generators = n, kind = %self.kind, "alphabet fixed");
        self.nr_generators = Some(n);
        self.strategy.set_nr_generators_impl(n);
        Ok(())
    }

    // ── Validation ──────────────────────────────────────────────────────

    /// Whether `letter` is in range.
    pub fn validate_letter(&self, letter: Letter) -> Result<bool, CongruenceError> {
        let n = self.nr_generators.ok_or(CongruenceError::NotConfigured)?;
        Ok(letter < n)
    }

    /// Fail with the first out-of-range letter of `word`.
    pub fn validate_word(&self, word: &[Letter]) -> Result<(), CongruenceError> {
        let n = self.nr_generators.ok_or(CongruenceError::NotConfigured)?;
        match word.iter().find(|&&l| l >= n) {
            Some(&letter) => Err(CongruenceError::InvalidLetter {
                letter,
                word: word.to_vec(),
                nr_generators: n,
            }),
            None => Ok(()),
        }
    }

    pub fn validate_relation(&self, u: &[Letter], v: &[Letter]) -> Result<(), CongruenceError> {
        self.validate_word(u)?;
        self.validate_word(v)
    }

    // ── Generating pairs ────────────────────────────────────────────────

    /// Declare `u` and `v` related.
    ///
    /// Pairs of identical words, and pairs the parent already identifies,
    /// are dropped. Everything else is kept in order, duplicates included.
    pub fn add_pair(
        &mut self,
        u: impl AsRef<[Letter]>,
        v: impl AsRef<[Letter]>,
    ) -> Result<(), CongruenceError> {
        let (u, v) = (u.as_ref(), v.as_ref());
        self.validate_relation(u, v)?;
        if u == v {
            tracing::trace!(word = %format_word(u), "skipping reflexive pair");
            return Ok(());
        }
        if let Some(parent) = self.parent {
            if parent.equal_to(u, v) {
                tracing::trace!(
                    lhs = %format_word(u),
                    rhs = %format_word(v),
                    "skipping pair already equal in the parent"
                );
                return Ok(());
            }
        }

        self.strategy.add_pair_impl(u, v)?;
        let relation = Relation::new(u, v);
        tracing::debug!(pair = %relation, kind = %self.kind, "adding generating pair");
        self.generating_pairs.push(relation);
        // Forget an aliased parent, drop an owned quotient.
        self.quotient = Quotient::Absent;
        self.generation += 1;
        self.runner.set_finished(false);
        Ok(())
    }

    pub fn add_relation(&mut self, relation: &Relation) -> Result<(), CongruenceError> {
        self.add_pair(&relation.lhs, &relation.rhs)
    }

    pub fn generating_pairs(&self) -> std::slice::Iter<'_, Relation> {
        self.generating_pairs.iter()
    }

    pub fn nr_generating_pairs(&self) -> usize {
        self.generating_pairs.len()
    }

    // ── Running ─────────────────────────────────────────────────────────

    /// Whether the whole congruence is known.
    pub fn finished(&self) -> bool {
        self.runner.finished()
    }

    /// Whether the enumeration was permanently stopped.
    pub fn dead(&self) -> bool {
        self.runner.dead()
    }

    pub fn kill(&self) {
        self.runner.kill();
    }

    pub fn kill_handle(&self) -> KillHandle {
        self.runner.kill_handle()
    }

    /// Run the strategy until it finishes or is killed.
    pub fn run(&mut self) -> Result<(), CongruenceError> {
        self.run_with_budget(None)
    }

    /// Run the strategy for roughly `budget`, keeping partial progress.
    pub fn run_for(&mut self, budget: Duration) -> Result<(), CongruenceError> {
        self.run_with_budget(Some(budget))
    }

    fn run_with_budget(&mut self, budget: Option<Duration>) -> Result<(), CongruenceError> {
        if self.runner.finished() {
            tracing::debug!("already finished, not running");
            return Ok(());
        }
        self.runner.set_budget(budget);
        let result = self.strategy.run_impl(&mut self.runner);
        self.runner.report_why_we_stopped();
        self.runner.set_budget(None);
        result
    }

    // ── Class indices ───────────────────────────────────────────────────

    /// The class index of `word`, running the enumeration if needed.
    pub fn word_to_class_index(
        &mut self,
        word: impl AsRef<[Letter]>,
    ) -> Result<ClassIndex, CongruenceError> {
        let word = word.as_ref();
        self.validate_word(word)?;
        self.strategy.word_to_class_index(word, &mut self.runner)
    }

    /// The class index of `word` if already known. Never runs anything.
    pub fn const_word_to_class_index(&self, word: impl AsRef<[Letter]>) -> Option<ClassIndex> {
        let word = word.as_ref();
        if let Err(e) = self.validate_word(word) {
            tracing::trace!(
                word = %format_word(word),
                error = %e,
                "no class index for an invalid word"
            );
            return None;
        }
        self.strategy.const_word_to_class_index(word)
    }

    pub fn nr_classes(&mut self) -> Result<ClassCount, CongruenceError> {
        self.strategy.nr_classes(&mut self.runner)
    }

    // ── Equivalence queries ─────────────────────────────────────────────

    /// Whether `u` and `v` are related. May run the enumeration.
    pub fn contains(
        &mut self,
        u: impl AsRef<[Letter]>,
        v: impl AsRef<[Letter]>,
    ) -> Result<bool, CongruenceError> {
        let (u, v) = (u.as_ref(), v.as_ref());
        if u == v {
            return Ok(true);
        }
        Ok(self.word_to_class_index(u)? == self.word_to_class_index(v)?)
    }

    /// Whether `u` and `v` are related, from work already done.
    ///
    /// Never answers `False` before the enumeration has finished, since
    /// a later merge could still identify the two classes.
    pub fn const_contains(&self, u: impl AsRef<[Letter]>, v: impl AsRef<[Letter]>) -> TriState {
        let (Some(x), Some(y)) = (
            self.const_word_to_class_index(u),
            self.const_word_to_class_index(v),
        ) else {
            return TriState::Unknown;
        };
        if x == y {
            TriState::True
        } else if self.finished() {
            TriState::False
        } else {
            TriState::Unknown
        }
    }

    /// Whether the class of `u` precedes the class of `v`.
    pub fn less(
        &mut self,
        u: impl AsRef<[Letter]>,
        v: impl AsRef<[Letter]>,
    ) -> Result<bool, CongruenceError> {
        let x = self.word_to_class_index(u)?;
        let y = self.word_to_class_index(v)?;
        Ok(x < y)
    }

    pub fn is_quotient_obviously_finite(&self) -> bool {
        self.strategy.is_quotient_obviously_finite()
    }

    pub fn is_quotient_obviously_infinite(&self) -> bool {
        self.strategy.is_quotient_obviously_infinite()
    }

    // ── Parent and quotient ─────────────────────────────────────────────

    /// Attach the semigroup this congruence is defined over.
    ///
    /// Re-attaching the current parent is a no-op. A different parent may
    /// only be attached once the runner is dead.
    pub fn set_parent_semigroup(&mut self, parent: &'p dyn FiniteSemigroup) {
        if let Some(current) = self.parent {
            if same_semigroup(current, parent) {
                return;
            }
        }
        assert!(
            self.parent.is_none() || self.runner.dead(),
            "the parent semigroup cannot be replaced"
        );
        assert!(
            self.runner.dead()
                || self
                    .nr_generators
                    .is_none_or(|n| n == parent.nr_generators()),
            "the parent has {} generators, the congruence has {:?}",
            parent.nr_generators(),
            self.nr_generators
        );
        tracing::debug!(size = parent.size(), "parent semigroup attached");
        self.strategy.set_parent_impl(parent);
        self.parent = Some(parent);
        self.generation += 1;
        if self.generating_pairs.is_empty() {
            self.quotient = Quotient::Borrowed(parent);
        }
    }

    pub fn has_parent_semigroup(&self) -> bool {
        self.parent.is_some()
    }

    pub fn parent_semigroup(&self) -> Result<&'p dyn FiniteSemigroup, CongruenceError> {
        self.parent.ok_or(CongruenceError::NoParent)
    }

    /// Whether a quotient is available without building one.
    pub fn has_quotient_semigroup(&self) -> bool {
        match &self.quotient {
            Quotient::Absent => false,
            Quotient::Borrowed(_) => true,
            Quotient::Owned(q) => q.generation == self.generation,
        }
    }

    /// The quotient semigroup, built by the strategy on first request.
    ///
    /// While no pairs have been added this is the parent itself.
    pub fn quotient_semigroup(&mut self) -> Result<&dyn FiniteSemigroup, CongruenceError> {
        if self.kind != CongruenceKind::TwoSided {
            return Err(CongruenceError::WrongHandedness { kind: self.kind });
        }
        if self.is_quotient_obviously_infinite() {
            return Err(CongruenceError::InfiniteQuotient);
        }
        if !self.has_quotient_semigroup() {
            let built = self.strategy.quotient_impl(&mut self.runner)?;
            tracing::debug!(size = built.size(), "quotient semigroup built");
            self.quotient = Quotient::Owned(Stamped {
                generation: self.generation,
                value: built,
            });
        }
        match &self.quotient {
            Quotient::Borrowed(q) => Ok(*q),
            Quotient::Owned(q) => Ok(q.value.as_ref()),
            Quotient::Absent => unreachable!("the quotient was just built"),
        }
    }

    // ── Non-trivial classes ─────────────────────────────────────────────

    /// Classes with more than one element of the parent, as words.
    ///
    /// Ordered by class index. Computed once per generation.
    pub fn non_trivial_classes(
        &mut self,
    ) -> Result<std::slice::Iter<'_, Vec<Word>>, CongruenceError> {
        self.init_non_trivial_classes()?;
        Ok(self
            .non_trivial_classes
            .as_ref()
            .map_or(&[][..], |c| c.value.as_slice())
            .iter())
    }

    pub fn nr_non_trivial_classes(&mut self) -> Result<usize, CongruenceError> {
        Ok(self.non_trivial_classes()?.len())
    }

    fn init_non_trivial_classes(&mut self) -> Result<(), CongruenceError> {
        if self
            .non_trivial_classes
            .as_ref()
            .is_some_and(|c| c.generation == self.generation)
        {
            return Ok(());
        }
        let parent = self.parent.ok_or(CongruenceError::NoParent)?;
        let nr_classes = match self.nr_classes()? {
            ClassCount::Finite(n) => n,
            ClassCount::Infinite => {
                panic!("non-trivial classes requested for a congruence with infinitely many classes")
            }
        };

        let mut classes: Vec<Vec<Word>> = vec![Vec::new(); nr_classes];
        for pos in 0..parent.size() {
            let word = parent.factorisation(pos);
            let index = self.strategy.word_to_class_index(&word, &mut self.runner)?;
            assert!(
                index < nr_classes,
                "class index {index} out of range, there are {nr_classes} classes"
            );
            classes[index].push(word);
        }
        classes.retain(|class| class.len() > 1);

        tracing::debug!(
            nr_classes,
            non_trivial = classes.len(),
            "non-trivial classes computed"
        );
        self.non_trivial_classes = Some(Stamped {
            generation: self.generation,
            value: classes,
        });
        Ok(())
    }
}

impl<S> std::fmt::Debug for Congruence<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Congruence")
            .field("kind", &self.kind)
            .field("nr_generators", &self.nr_generators)
            .field("generating_pairs", &self.generating_pairs)
            .field("has_parent", &self.parent.is_some())
            .field("generation", &self.generation)
            .field("finished", &self.runner.finished())
            .finish_non_exhaustive()
    }
}
