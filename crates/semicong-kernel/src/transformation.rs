//! Transformation semigroups, fully enumerated.
//!
//! A transformation of degree `n` is a total map on `0..n`. The product
//! `x * y` applies `x` first and then `y`, so words act on the right.
//! [`TransformationSemigroup`] enumerates everything its generators
//! produce, breadth-first, and keeps both Cayley graphs.

use crate::error::CongruenceError;
use crate::semigroup::{CayleyGraph, FiniteSemigroup};
use crate::word::{Letter, Word};
use std::collections::HashMap;

/// A total map on `0..degree`, stored as its list of images.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Transformation(Vec<u32>);

impl Transformation {
    /// Build a transformation from its images, checking they are in range.
    pub fn new(images: Vec<u32>) -> Result<Self, CongruenceError> {
        let degree = images.len();
        if let Some(bad) = images.iter().find(|&&i| i as usize >= degree) {
            return Err(CongruenceError::InvalidPresentation(format!(
                "image {bad} out of range for a transformation of degree {degree}"
            )));
        }
        Ok(Self(images))
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn images(&self) -> &[u32] {
        &self.0
    }

    /// `self` then `other`.
    pub fn product(&self, other: &Self) -> Self {
        Self(self.0.iter().map(|&i| other.0[i as usize]).collect())
    }
}

/// A finite semigroup of transformations given by generators.
#[derive(Debug, Clone)]
pub struct TransformationSemigroup {
    generators: Vec<Transformation>,
    generator_positions: Vec<usize>,
    elements: Vec<Transformation>,
    words: Vec<Word>,
    right: Vec<Vec<usize>>,
    left: Vec<Vec<usize>>,
}

impl TransformationSemigroup {
    /// Enumerate the semigroup generated by `generators`.
    ///
    /// Elements are numbered in the order they are found: distinct
    /// generators first, then products by increasing word length.
    pub fn new(generators: Vec<Transformation>) -> Result<Self, CongruenceError> {
        let degree = match generators.first() {
            None => {
                return Err(CongruenceError::InvalidPresentation(
                    "at least one generator is required".to_string(),
                ));
            }
            Some(g) => g.degree(),
        };
        if degree == 0 {
            return Err(CongruenceError::InvalidPresentation(
                "transformations of degree 0 are not supported".to_string(),
            ));
        }
        if let Some(g) = generators.iter().find(|g| g.degree() != degree) {
            return Err(CongruenceError::InvalidPresentation(format!(
                "generators have mixed degrees {degree} and {}",
                g.degree()
            )));
        }

        let mut index: HashMap<Transformation, usize> = HashMap::new();
        let mut elements = Vec::new();
        let mut words: Vec<Word> = Vec::new();
        let mut generator_positions = Vec::with_capacity(generators.len());

        for (letter, g) in generators.iter().enumerate() {
            let pos = *index.entry(g.clone()).or_insert_with(|| {
                elements.push(g.clone());
                words.push(vec![letter]);
                elements.len() - 1
            });
            generator_positions.push(pos);
        }

        let mut right: Vec<Vec<usize>> = Vec::new();
        let mut next = 0;
        while next < elements.len() {
            let mut row = Vec::with_capacity(generators.len());
            for (letter, g) in generators.iter().enumerate() {
                let product = elements[next].product(g);
                let pos = match index.get(&product) {
                    Some(&pos) => pos,
                    None => {
                        let mut word = words[next].clone();
                        word.push(letter);
                        elements.push(product.clone());
                        words.push(word);
                        index.insert(product, elements.len() - 1);
                        elements.len() - 1
                    }
                };
                row.push(pos);
            }
            right.push(row);
            next += 1;
        }

        // Closed under right multiplication by generators, hence under
        // everything: every left product is already indexed.
        let left = elements
            .iter()
            .map(|x| {
                generators
                    .iter()
                    .map(|g| index[&g.product(x)])
                    .collect::<Vec<_>>()
            })
            .collect();

        tracing::debug!(
            size = elements.len(),
            nr_generators = generators.len(),
            degree,
            "enumerated transformation semigroup"
        );

        Ok(Self {
            generators,
            generator_positions,
            elements,
            words,
            right,
            left,
        })
    }

    pub fn generators(&self) -> &[Transformation] {
        &self.generators
    }

    /// The element at `pos`.
    pub fn at(&self, pos: usize) -> &Transformation {
        &self.elements[pos]
    }
}

impl FiniteSemigroup for TransformationSemigroup {
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn nr_generators(&self) -> usize {
        self.generators.len()
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

impl CayleyGraph for TransformationSemigroup {
    fn generator_position(&self, letter: Letter) -> usize {
        self.generator_positions[letter]
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

    fn t(images: &[u32]) -> Transformation {
        Transformation::new(images.to_vec()).unwrap()
    }

    #[test]
    fn product_applies_left_factor_first() {
        let x = t(&[1, 2, 0]);
        let y = t(&[0, 0, 2]);
        // 0 -> 1 -> 0, 1 -> 2 -> 2, 2 -> 0 -> 0
        assert_eq!(x.product(&y), t(&[0, 2, 0]));
    }

    #[test]
    fn rejects_out_of_range_images() {
        assert!(Transformation::new(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn rejects_bad_generator_sets() {
        assert!(TransformationSemigroup::new(vec![]).is_err());
        assert!(TransformationSemigroup::new(vec![t(&[0, 1]), t(&[0, 1, 2])]).is_err());
        assert!(TransformationSemigroup::new(vec![t(&[])]).is_err());
    }

    #[test]
    fn cyclic_group_of_order_three() {
        let s = TransformationSemigroup::new(vec![t(&[1, 2, 0])]).unwrap();
        assert_eq!(s.size(), 3);
        assert_eq!(s.nr_generators(), 1);
        assert!(s.equal_to(&[0, 0, 0, 0], &[0]));
        assert!(!s.equal_to(&[0, 0], &[0]));
    }

    #[test]
    fn duplicate_generators_share_a_position() {
        let s = TransformationSemigroup::new(vec![t(&[1, 0]), t(&[1, 0])]).unwrap();
        assert_eq!(s.size(), 2);
        assert_eq!(s.generator_position(0), s.generator_position(1));
        assert!(s.equal_to(&[0], &[1]));
    }

    #[test]
    fn factorisations_evaluate_to_their_element() {
        let s = TransformationSemigroup::new(vec![t(&[1, 3, 4, 2, 3]), t(&[3, 2, 1, 3, 3])])
            .unwrap();
        assert_eq!(s.size(), 88);
        for pos in 0..s.size() {
            assert_eq!(s.position(&s.factorisation(pos)), Some(pos));
        }
    }

    #[test]
    fn cayley_graphs_agree_with_products() {
        let s = TransformationSemigroup::new(vec![t(&[1, 3, 4, 2, 3]), t(&[3, 2, 1, 3, 3])])
            .unwrap();
        for pos in 0..s.size() {
            for letter in 0..s.nr_generators() {
                let g = &s.generators()[letter];
                assert_eq!(s.at(s.right(pos, letter)), &s.at(pos).product(g));
                assert_eq!(s.at(s.left(pos, letter)), &g.product(s.at(pos)));
            }
        }
    }

    #[test]
    fn position_rejects_empty_and_out_of_range_words() {
        let s = TransformationSemigroup::new(vec![t(&[1, 0])]).unwrap();
        assert_eq!(s.position(&[]), None);
        assert_eq!(s.position(&[0, 1]), None);
        assert!(!s.equal_to(&[], &[]));
    }
}
