// crates/askmap-core/src/text.rs

//! Name normalization and matching.
//!
//! Location names are compared case-insensitively. By default that is *all*
//! that happens: `"Côte d'Ivoire"` and `"cote d'ivoire"` do not match. The
//! [`MatchMode::Folded`] mode additionally transliterates to ASCII first.

use serde::{Deserialize, Serialize};

/// How two location names are normalized before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Lower-case only.
    #[default]
    Lowercase,
    /// Transliterate Unicode → ASCII, then lower-case.
    Folded,
}

impl MatchMode {
    /// Normalize `s` into the key used for comparisons in this mode.
    pub fn key(self, s: &str) -> String {
        match self {
            MatchMode::Lowercase => s.to_lowercase(),
            MatchMode::Folded => fold_key(s),
        }
    }

    /// Exact match on the normalized form.
    #[inline]
    pub fn equals(self, a: &str, b: &str) -> bool {
        self.key(a) == self.key(b)
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowercase" | "lower" => Ok(MatchMode::Lowercase),
            "folded" | "fold" => Ok(MatchMode::Folded),
            other => Err(format!("unknown match mode: {other}")),
        }
    }
}

/// Convert a string into a folded key suitable for comparison.
///
/// 1) Transliterate Unicode → ASCII (e.g. `Åland` -> `Aland`)
/// 2) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use askmap_core::text::fold_key;
///
/// assert_eq!(fold_key("Côte d'Ivoire"), "cote d'ivoire");
/// assert_eq!(fold_key("Curaçao"), "curacao");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Name-based matching helpers for types that expose a display name.
pub trait NameMatch {
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str, mode: MatchMode) -> bool {
        mode.equals(self.name_str(), q)
    }
}
