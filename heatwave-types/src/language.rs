//! The closed set of BCP-47 language codes this pipeline searches in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 14 languages the pipeline is configured to search in.
///
/// The set is closed: adding a language requires a schema change, not a
/// runtime registration, so that `Region::languages` and fingerprints stay
/// reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LanguageCode {
    /// Hindi
    Hi,
    /// Bengali
    Bn,
    /// Telugu
    Te,
    /// Marathi
    Mr,
    /// Tamil
    Ta,
    /// Urdu
    Ur,
    /// Gujarati
    Gu,
    /// Kannada
    Kn,
    /// Odia
    Or,
    /// Malayalam
    Ml,
    /// Punjabi
    Pa,
    /// Assamese
    As,
    /// English (pan-India fallback)
    En,
    /// Nepali (border districts)
    Ne,
}

impl LanguageCode {
    /// All 14 supported codes, in a stable order used for deterministic iteration.
    pub const ALL: [Self; 14] = [
        Self::As,
        Self::Bn,
        Self::En,
        Self::Gu,
        Self::Hi,
        Self::Kn,
        Self::Ml,
        Self::Mr,
        Self::Ne,
        Self::Or,
        Self::Pa,
        Self::Ta,
        Self::Te,
        Self::Ur,
    ];

    /// The subset of codes GNews accepts: 8 of the 14.
    pub const GNEWS_SUPPORTED: [Self; 8] = [
        Self::As,
        Self::Bn,
        Self::En,
        Self::Gu,
        Self::Hi,
        Self::Mr,
        Self::Ta,
        Self::Te,
    ];

    /// The BCP-47 code as a lowercase string, e.g. `"hi"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hi => "hi",
            Self::Bn => "bn",
            Self::Te => "te",
            Self::Mr => "mr",
            Self::Ta => "ta",
            Self::Ur => "ur",
            Self::Gu => "gu",
            Self::Kn => "kn",
            Self::Or => "or",
            Self::Ml => "ml",
            Self::Pa => "pa",
            Self::As => "as",
            Self::En => "en",
            Self::Ne => "ne",
        }
    }

    /// Parse a BCP-47 code, rejecting anything outside the closed set.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Whether GNews accepts this language.
    #[must_use]
    pub fn gnews_supported(self) -> bool {
        Self::GNEWS_SUPPORTED.contains(&self)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_fourteen_unique_codes() {
        let mut seen = std::collections::HashSet::new();
        assert_eq!(LanguageCode::ALL.len(), 14);
        for code in LanguageCode::ALL {
            assert!(seen.insert(code));
        }
    }

    #[test]
    fn gnews_subset_is_eight_and_within_all() {
        assert_eq!(LanguageCode::GNEWS_SUPPORTED.len(), 8);
        for code in LanguageCode::GNEWS_SUPPORTED {
            assert!(LanguageCode::ALL.contains(&code));
            assert!(code.gnews_supported());
        }
    }

    #[test]
    fn parse_round_trips_through_as_str() {
        for code in LanguageCode::ALL {
            assert_eq!(LanguageCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(LanguageCode::parse("zz"), None);
    }
}
