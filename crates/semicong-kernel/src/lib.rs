//! # Semicong Kernel
//!
//! Congruences on semigroups given by generators: left, right and
//! two-sided equivalences generated by pairs of words.
//!
//! The kernel separates what every congruence has in common from how its
//! classes are found. [`Congruence`] keeps the generating pairs, the
//! optional parent semigroup, the quotient and the non-trivial classes;
//! a [`Strategy`] turns words into class indices.
//!
//! ## Architecture
//!
//! ```text
//! Word / Relation        ← Products of generators, pairs declared equal
//!     │
//! FiniteSemigroup        ← Parent: elements by position, factorisations
//!     │
//! Congruence<S>          ← Pairs, parent, quotient, non-trivial classes
//!     │
//! Strategy               ← word → class index (PairOrbit, ...)
//!     │
//! Runner                 ← finished / killed / time budget
//! ```

pub mod congruence;
pub mod error;
pub mod kind;
pub mod pairs;
pub mod presentation;
pub mod runner;
pub mod semigroup;
pub mod toy;
pub mod transformation;
pub mod word;

pub use congruence::{ClassCount, Congruence, Strategy};
pub use error::CongruenceError;
pub use kind::{CongruenceKind, TriState};
pub use pairs::{PairOrbit, QuotientSemigroup};
pub use presentation::Presentation;
pub use runner::{KillHandle, Runner};
pub use semigroup::{CayleyGraph, FiniteSemigroup};
pub use transformation::{Transformation, TransformationSemigroup};
pub use word::{ClassIndex, Letter, Relation, Word, format_word, parse_word};
