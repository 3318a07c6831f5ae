//! Handedness of a congruence, and tri-state answers.
//!
//! A two-sided congruence is compatible with multiplication on both sides,
//! a left congruence only with multiplication on the left, a right one only
//! on the right. The handedness is fixed when a congruence is created.

/// Which multiplications a congruence is compatible with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CongruenceKind {
    /// `(u, v)` related implies `(xu, xv)` related.
    Left,

    /// `(u, v)` related implies `(ux, vx)` related.
    Right,

    /// Compatible with multiplication on both sides.
    TwoSided,
}

impl CongruenceKind {
    /// Whether the congruence is closed under multiplication on the left.
    pub fn acts_on_left(self) -> bool {
        matches!(self, Self::Left | Self::TwoSided)
    }

    /// Whether the congruence is closed under multiplication on the right.
    pub fn acts_on_right(self) -> bool {
        matches!(self, Self::Right | Self::TwoSided)
    }
}

impl Default for CongruenceKind {
    fn default() -> Self {
        Self::TwoSided
    }
}

impl std::fmt::Display for CongruenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoSided => write!(f, "two-sided"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for CongruenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-sided" | "twosided" | "two_sided" | "2-sided" => Ok(Self::TwoSided),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("unknown congruence kind: {s}")),
        }
    }
}

/// An answer that may not be known yet without further enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    True,
    False,
    Unknown,
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl std::fmt::Display for TriState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(CongruenceKind::TwoSided.to_string(), "two-sided");
        assert_eq!(CongruenceKind::Left.to_string(), "left");
        assert_eq!(CongruenceKind::Right.to_string(), "right");
    }

    #[test]
    fn kind_parse() {
        assert_eq!(
            "two-sided".parse::<CongruenceKind>().unwrap(),
            CongruenceKind::TwoSided
        );
        assert_eq!(
            "TWOSIDED".parse::<CongruenceKind>().unwrap(),
            CongruenceKind::TwoSided
        );
        assert_eq!(
            "left".parse::<CongruenceKind>().unwrap(),
            CongruenceKind::Left
        );
        assert!("middle".parse::<CongruenceKind>().is_err());
    }

    #[test]
    fn kind_serde_matches_display() {
        let json = serde_json::to_string(&CongruenceKind::TwoSided).unwrap();
        assert_eq!(json, "\"two-sided\"");
    }

    #[test]
    fn sides() {
        assert!(CongruenceKind::TwoSided.acts_on_left());
        assert!(CongruenceKind::TwoSided.acts_on_right());
        assert!(CongruenceKind::Left.acts_on_left());
        assert!(!CongruenceKind::Left.acts_on_right());
        assert!(!CongruenceKind::Right.acts_on_left());
    }
}
