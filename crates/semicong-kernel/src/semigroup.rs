//! Finite semigroups as data sources.
//!
//! A congruence is always defined relative to words over a generating
//! alphabet. When a finite parent semigroup is attached, it supplies the
//! elements (by position), a factorisation of each element into a word,
//! and equality of words as elements.

use crate::word::{Letter, Word};

/// A finite semigroup whose elements are indexed by position.
pub trait FiniteSemigroup {
    /// Number of elements.
    fn size(&self) -> usize;

    /// Number of generators, i.e. the alphabet size of words over it.
    fn nr_generators(&self) -> usize;

    /// Whether two words evaluate to the same element.
    fn equal_to(&self, u: &[Letter], v: &[Letter]) -> bool;

    /// A word over the generators evaluating to the element at `pos`.
    ///
    /// Panics if `pos >= self.size()`.
    fn factorisation(&self, pos: usize) -> Word;
}

/// A finite semigroup with both Cayley graphs available.
///
/// Orbit-style strategies walk these graphs instead of multiplying
/// elements directly.
pub trait CayleyGraph: FiniteSemigroup {
    /// Position of the generator `letter`.
    fn generator_position(&self, letter: Letter) -> usize;

    /// Position of `element * generator`.
    fn right(&self, pos: usize, letter: Letter) -> usize;

    /// Position of `generator * element`.
    fn left(&self, pos: usize, letter: Letter) -> usize;

    /// Position of the element a word evaluates to.
    ///
    /// `None` for the empty word or a word with a letter out of range.
    fn position(&self, word: &[Letter]) -> Option<usize> {
        let (&first, rest) = word.split_first()?;
        let k = self.nr_generators();
        if word.iter().any(|&l| l >= k) {
            return None;
        }
        Some(
            rest.iter()
                .fold(self.generator_position(first), |pos, &l| self.right(pos, l)),
        )
    }
}

/// Whether two semigroup handles point at the same object.
pub fn same_semigroup(a: &dyn FiniteSemigroup, b: &dyn FiniteSemigroup) -> bool {
    std::ptr::addr_eq(a, b)
}
