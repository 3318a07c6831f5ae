//! Presentation files: a parent semigroup plus generating pairs.
//!
//! A presentation names the congruence kind, the parent as a list of
//! transformation generators, and the pairs to identify. It is read from
//! JSON or TOML:
//!
//! ```toml
//! kind = "two-sided"
//! generators = [[1, 0, 2, 3], [0, 1, 3, 2]]
//! pairs = [[[0], [1]]]
//! ```
//!
//! Every presentation has a content digest, so results can be tied back
//! to exactly the input that produced them.

use crate::congruence::{Congruence, Strategy};
use crate::error::CongruenceError;
use crate::kind::CongruenceKind;
use crate::transformation::{Transformation, TransformationSemigroup};
use crate::word::{Relation, Word, format_word};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Presentation {
    #[serde(default)]
    pub kind: CongruenceKind,
    /// Images of each generating transformation.
    pub generators: Vec<Vec<u32>>,
    #[serde(default)]
    pub pairs: Vec<(Word, Word)>,
}

impl Presentation {
    pub fn from_json(text: &str) -> Result<Self, CongruenceError> {
        serde_json::from_str(text)
            .map_err(|e| CongruenceError::InvalidPresentation(format!("invalid JSON: {e}")))
    }

    pub fn from_toml(text: &str) -> Result<Self, CongruenceError> {
        toml::from_str(text)
            .map_err(|e| CongruenceError::InvalidPresentation(format!("invalid TOML: {e}")))
    }

    /// Read a presentation, choosing the format by file extension.
    ///
    /// `.toml` files are TOML; anything else is parsed as JSON.
    pub fn load(path: &Path) -> Result<Self, CongruenceError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CongruenceError::InvalidPresentation(format!("cannot read {}: {e}", path.display()))
        })?;
        let presentation = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text)?,
            _ => Self::from_json(&text)?,
        };
        tracing::debug!(
            path = %path.display(),
            digest = %presentation.digest(),
            "presentation loaded"
        );
        Ok(presentation)
    }

    /// Enumerate the parent semigroup.
    pub fn semigroup(&self) -> Result<TransformationSemigroup, CongruenceError> {
        let generators = self
            .generators
            .iter()
            .map(|images| Transformation::new(images.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        TransformationSemigroup::new(generators)
    }

    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.pairs.iter().map(|(u, v)| Relation::new(u.clone(), v.clone()))
    }

    /// Add every pair, in file order, to `cong`.
    pub fn add_pairs_to<S: Strategy>(
        &self,
        cong: &mut Congruence<'_, S>,
    ) -> Result<(), CongruenceError> {
        for relation in self.relations() {
            cong.add_relation(&relation)?;
        }
        Ok(())
    }

    /// SHA-256 over the kind, generators and pairs, in order.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        feed(&mut hasher, "kind", &self.kind.to_string());
        for images in &self.generators {
            let images: Vec<String> = images.iter().map(u32::to_string).collect();
            feed(&mut hasher, "generator", &images.join(","));
        }
        for (u, v) in &self.pairs {
            feed(
                &mut hasher,
                "pair",
                &format!("{}={}", format_word(u), format_word(v)),
            );
        }
        format!("{:x}", hasher.finalize())
    }
}

fn feed(hasher: &mut Sha256, name: &str, value: &str) {
    hasher.update(name.as_bytes());
    hasher.update(b":");
    hasher.update(value.as_bytes());
    hasher.update(b"\n");
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.generators.first().map_or(0, Vec::len);
        write!(
            f,
            "{} congruence, {} generator(s) of degree {}, {} pair(s)",
            self.kind,
            self.generators.len(),
            degree,
            self.pairs.len()
        )
    }
}
