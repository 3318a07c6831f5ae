//! Error types for congruence operations.

use crate::kind::CongruenceKind;
use crate::word::{Letter, Word, format_word};

/// Errors reported synchronously by congruence operations.
///
/// None of these are retried internally. Internal consistency conditions
/// (class indices out of range, a parent whose alphabet disagrees) are
/// assertions instead, since they indicate a broken strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CongruenceError {
    /// The alphabet size was set more than once.
    #[error("the number of generators cannot be set more than once")]
    AlreadyConfigured,

    /// A letter or word was used before the alphabet size was fixed.
    #[error("no generators have been defined")]
    NotConfigured,

    /// A word contains a letter outside `[0, nr_generators)`.
    #[error(
        "invalid letter {letter} in word {}, the valid range is [0, {nr_generators})",
        format_word(.word)
    )]
    InvalidLetter {
        letter: Letter,
        word: Word,
        nr_generators: usize,
    },

    /// The operation needs a parent semigroup and none is attached.
    #[error("the parent semigroup is not defined")]
    NoParent,

    /// A quotient was requested for a one-sided congruence.
    #[error("the congruence must be two-sided, found {kind}")]
    WrongHandedness { kind: CongruenceKind },

    /// A quotient was requested but the quotient is known to be infinite.
    #[error("cannot find the quotient semigroup, it is infinite")]
    InfiniteQuotient,

    /// The enumeration was killed or timed out before it could answer.
    #[error("the enumeration stopped before finishing ({reason})")]
    Interrupted { reason: String },

    /// A word does not name an element of the parent (e.g. the empty word).
    #[error("the word {} does not represent an element of the parent semigroup", format_word(.word))]
    NotInParent { word: Word },

    /// A presentation or generator set is malformed.
    #[error("invalid presentation: {0}")]
    InvalidPresentation(String),
}
