//! Letters, words and relations over a generating alphabet.
//!
//! A word is read left to right as the product of its generators, so
//! `[0, 1, 1]` stands for `a0 * a1 * a1`. Equality is structural.

/// Index of a generator. Valid letters lie in `[0, nr_generators)`.
pub type Letter = usize;

/// A product of generators, in order.
pub type Word = Vec<Letter>;

/// Canonical identifier of a congruence class.
pub type ClassIndex = usize;

/// A pair of words declared equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Relation {
    pub lhs: Word,
    pub rhs: Word,
}

impl Relation {
    pub fn new(lhs: impl Into<Word>, rhs: impl Into<Word>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", format_word(&self.lhs), format_word(&self.rhs))
    }
}

/// Render a word as `[0, 1, 1]`.
pub fn format_word(word: &[Letter]) -> String {
    let letters: Vec<String> = word.iter().map(Letter::to_string).collect();
    format!("[{}]", letters.join(", "))
}

/// Parse a comma separated word such as `0,1,1`.
///
/// Whitespace around letters is ignored; an empty string is the empty word.
pub fn parse_word(s: &str) -> Result<Word, String> {
    let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
    if trimmed.trim().is_empty() {
        return Ok(Word::new());
    }
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<Letter>()
                .map_err(|e| format!("invalid letter {:?}: {e}", part.trim()))
        })
        .collect()
}
