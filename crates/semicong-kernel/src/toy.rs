//! Small named semigroups for tests and demos.
//!
//! - **klein_four**: two commuting involutions of `{0, 1, 2, 3}`; four
//!   elements, so `[0, 1]` and `[1, 0]` are already equal.
//! - **cyclic_3**: a single 3-cycle; the cyclic group of order three.
//! - **t5_pair**: the 88-element semigroup generated by `[1, 3, 4, 2, 3]`
//!   and `[3, 2, 1, 3, 3]`.

use crate::transformation::{Transformation, TransformationSemigroup};

/// Names accepted by [`get_semigroup`].
pub const NAMES: [&str; 3] = ["klein_four", "cyclic_3", "t5_pair"];

/// Get a toy semigroup by name.
pub fn get_semigroup(name: &str) -> Option<TransformationSemigroup> {
    match name {
        "klein_four" => Some(klein_four()),
        "cyclic_3" => Some(cyclic_3()),
        "t5_pair" => Some(t5_pair()),
        _ => None,
    }
}

pub fn klein_four() -> TransformationSemigroup {
    build(&[&[1, 0, 2, 3], &[0, 1, 3, 2]])
}

pub fn cyclic_3() -> TransformationSemigroup {
    build(&[&[1, 2, 0]])
}

pub fn t5_pair() -> TransformationSemigroup {
    build(&[&[1, 3, 4, 2, 3], &[3, 2, 1, 3, 3]])
}

fn build(generators: &[&[u32]]) -> TransformationSemigroup {
    let generators = generators
        .iter()
        .map(|images| Transformation::new(images.to_vec()).expect("toy images are in range"))
        .collect();
    TransformationSemigroup::new(generators).expect("toy generators share a degree")
}
