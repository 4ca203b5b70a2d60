//! Partition families with a known invariant.
//!
//! | Family | Shape | Parity |
//! |--------|-------|--------|
//! | one-dimensional | `(n)`, `(1ⁿ)` | 1 |
//! | self-conjugate | `p = p'`, `n > 1` | 0 |
//! | hook | `(n − r, 1ʳ)`, `n` odd | closed form, see [`hook_parity`] |
//!
//! [`hook_parity`]: crate::partition::hook_parity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::partition::{hook_parity, Partition};
use crate::record::Parity;

/// Classification tag of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// `(n)` or `(1ⁿ)`.
    OneDimensional,
    /// Equal to its own conjugate.
    SelfConjugate,
    /// `(k, 1ʳ)` with `r ≥ 1`.
    Hook,
    /// None of the above.
    Unclassified,
}

/// A family tag that names no known family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("family {0:?} not recognized; use 'hook', '1d', 'self-conj', or 'none'")]
pub struct UnknownFamily(pub String);

impl Family {
    /// Every family, in classification priority order.
    pub const ALL: [Family; 4] = [
        Family::OneDimensional,
        Family::SelfConjugate,
        Family::Hook,
        Family::Unclassified,
    ];

    /// The first family in priority order whose predicate holds.
    pub fn classify(p: &Partition) -> Self {
        Self::ALL
            .into_iter()
            .find(|family| family.matches(p))
            .unwrap_or(Family::Unclassified)
    }

    /// Whether `p` satisfies this family's predicate. Families overlap:
    /// `(1, 1, 1)` is both one-dimensional and a hook.
    pub fn matches(self, p: &Partition) -> bool {
        match self {
            Family::OneDimensional => p.is_one_dimensional(),
            Family::SelfConjugate => p.is_self_conjugate(),
            Family::Hook => p.is_hook(),
            Family::Unclassified => {
                !p.is_one_dimensional() && !p.is_self_conjugate() && !p.is_hook()
            }
        }
    }

    /// Shortcut parity for `p`, if its family determines one.
    ///
    /// Hooks are only short-circuited for odd `n`; the closed form does not
    /// hold for even `n`.
    pub fn known_parity(p: &Partition) -> Option<(Family, Parity)> {
        let n = p.size();
        if p.is_one_dimensional() {
            Some((Family::OneDimensional, Parity::Odd))
        } else if p.is_self_conjugate() {
            Some((Family::SelfConjugate, Parity::Even))
        } else if p.is_hook() && n % 2 == 1 {
            // Even-n hooks are never 2-special on both sides, so only
            // single-shape solves reach the pipeline for them.
            Some((Family::Hook, hook_parity(n, p.trailing_ones())))
        } else {
            None
        }
    }

    /// Query tag, e.g. `self-conjugate`.
    pub const fn tag(self) -> &'static str {
        match self {
            Family::OneDimensional => "one-dimensional",
            Family::SelfConjugate => "self-conjugate",
            Family::Hook => "hook",
            Family::Unclassified => "none",
        }
    }

    /// Bracketed label used in report rows; empty for unclassified.
    pub const fn label(self) -> &'static str {
        match self {
            Family::OneDimensional => "[1D]",
            Family::SelfConjugate => "[SELF-CONJ]",
            Family::Hook => "[HOOK]",
            Family::Unclassified => "",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hook" | "hooks" => Ok(Family::Hook),
            "1d" | "one dimensional" | "one-dimensional" => Ok(Family::OneDimensional),
            "self" | "self-conj" | "self-conjugate" => Ok(Family::SelfConjugate),
            "none" => Ok(Family::Unclassified),
            _ => Err(UnknownFamily(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(parts: &[usize]) -> Partition {
        Partition::new(parts.to_vec()).unwrap()
    }

    #[test]
    fn classification_priority() {
        assert_eq!(Family::classify(&p(&[1])), Family::OneDimensional);
        assert_eq!(Family::classify(&p(&[1, 1, 1])), Family::OneDimensional);
        assert_eq!(Family::classify(&p(&[3, 1, 1])), Family::SelfConjugate);
        assert_eq!(Family::classify(&p(&[5, 1, 1])), Family::Hook);
        assert_eq!(Family::classify(&p(&[4, 2, 1])), Family::Unclassified);
    }

    #[test]
    fn overlapping_predicates() {
        assert!(Family::Hook.matches(&p(&[1, 1, 1])));
        assert!(Family::OneDimensional.matches(&p(&[1, 1, 1])));
        assert!(!Family::Unclassified.matches(&p(&[1, 1, 1])));
        assert!(Family::Unclassified.matches(&p(&[3, 3, 1])));
    }

    #[test]
    fn shortcuts() {
        assert_eq!(
            Family::known_parity(&p(&[7])),
            Some((Family::OneDimensional, Parity::Odd))
        );
        assert_eq!(
            Family::known_parity(&p(&[3, 3, 3])),
            Some((Family::SelfConjugate, Parity::Even))
        );
        assert_eq!(
            Family::known_parity(&p(&[5, 1, 1])),
            Some((Family::Hook, Parity::Odd))
        );
        // Even hooks fall through to the full computation.
        assert_eq!(Family::known_parity(&p(&[3, 1])), None);
        assert_eq!(Family::known_parity(&p(&[4, 2, 1])), None);
    }

    #[test]
    fn tag_aliases() {
        assert_eq!("hooks".parse::<Family>(), Ok(Family::Hook));
        assert_eq!("1D".parse::<Family>(), Ok(Family::OneDimensional));
        assert_eq!("one dimensional".parse::<Family>(), Ok(Family::OneDimensional));
        assert_eq!("self-conj".parse::<Family>(), Ok(Family::SelfConjugate));
        assert_eq!("none".parse::<Family>(), Ok(Family::Unclassified));
        assert!("spiral".parse::<Family>().is_err());
        for family in Family::ALL {
            assert_eq!(family.tag().parse::<Family>(), Ok(family));
        }
    }
}
