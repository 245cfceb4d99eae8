//! The closed term-category enumeration and the typed term catalogue.
//!
//! The natural-language term dictionary itself is a read-only external
//! input; this module only describes its shape — a typed dictionary keyed
//! by `(language, category)`, replacing any runtime string lookup of
//! category names.

use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of 8 term categories. New categories require a
/// schema change, not a runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermCategory {
    /// Heatwave conditions generally.
    Heatwave,
    /// Death or heatstroke.
    DeathOrStroke,
    /// Water crisis / shortage.
    WaterCrisis,
    /// Power cuts / grid stress.
    PowerCuts,
    /// Crop damage.
    CropDamage,
    /// Human impact (displacement, health system load).
    HumanImpact,
    /// Government response (advisories, relief measures).
    GovernmentResponse,
    /// Raw temperature records/reporting.
    Temperature,
}

impl TermCategory {
    /// All 8 categories, in a stable order used for Google's per-category
    /// state-level emission.
    pub const ALL: [Self; 8] = [
        Self::Heatwave,
        Self::DeathOrStroke,
        Self::WaterCrisis,
        Self::PowerCuts,
        Self::CropDamage,
        Self::HumanImpact,
        Self::GovernmentResponse,
        Self::Temperature,
    ];
}

/// A term's register: how formal/colloquial it is. Ordered so that
/// `Register::Formal > Register::Colloquial > Register::Journalistic >
/// Register::Borrowed`, matching the drop priority used when truncating:
/// borrowed terms go first, formal terms are kept longest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Register {
    /// Loanword/borrowed term, lowest priority to keep when truncating.
    Borrowed,
    /// Journalistic/headline phrasing.
    Journalistic,
    /// Everyday colloquial phrasing.
    Colloquial,
    /// Formal/standard phrasing, highest priority to keep when truncating.
    Formal,
}

/// A single heat-related term in one language, with its register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatTerm {
    /// The term text, in the target language's script.
    pub text: String,
    /// How formal the term is; used to prioritize which terms survive
    /// length-budget truncation/packing.
    pub register: Register,
}

impl HeatTerm {
    /// Whether the term contains whitespace and therefore must be
    /// double-quoted when embedded in a query string.
    #[must_use]
    pub fn is_multi_word(&self) -> bool {
        self.text.split_whitespace().count() > 1
    }
}

/// A read-only dictionary of heat terms keyed by `(language, category)`.
///
/// Construction of the dictionary's content is out of scope; this type
/// only defines the shape the Query Generator consumes.
///
/// `(language, category)` tuple keys aren't representable as JSON object
/// keys, so this type serializes as a flat array of `(language, category,
/// terms)` triples rather than deriving on the `HashMap` directly.
#[derive(Debug, Clone, Default)]
pub struct TermCatalogue {
    entries: HashMap<(LanguageCode, TermCategory), Vec<HeatTerm>>,
}

impl Serialize for TermCatalogue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for ((lang, cat), terms) in &self.entries {
            seq.serialize_element(&(*lang, *cat, terms))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TermCatalogue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Vec<(LanguageCode, TermCategory, Vec<HeatTerm>)> =
            Deserialize::deserialize(deserializer)?;
        Ok(Self {
            entries: raw.into_iter().map(|(l, c, t)| ((l, c), t)).collect(),
        })
    }
}

impl TermCatalogue {
    /// An empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the terms for a `(language, category)` key.
    pub fn insert(&mut self, language: LanguageCode, category: TermCategory, terms: Vec<HeatTerm>) {
        self.entries.insert((language, category), terms);
    }

    /// Look up the terms for a `(language, category)` key. Returns an empty
    /// slice if the catalogue has no entry (a region/language/category
    /// combination with no curated terms simply contributes nothing to the
    /// generated query, it does not error).
    #[must_use]
    pub fn terms(&self, language: LanguageCode, category: TermCategory) -> &[HeatTerm] {
        self.entries
            .get(&(language, category))
            .map_or(&[], Vec::as_slice)
    }

    /// All terms for a language across every category, in priority order
    /// (formal → colloquial → journalistic → borrowed), used by the
    /// newsdata/gnews broad-query strategy.
    #[must_use]
    pub fn terms_by_priority(&self, language: LanguageCode) -> Vec<&HeatTerm> {
        let mut out: Vec<&HeatTerm> = TermCategory::ALL
            .iter()
            .flat_map(|cat| self.terms(language, *cat))
            .collect();
        out.sort_by(|a, b| b.register.cmp(&a.register));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_returns_empty_slice() {
        let cat = TermCatalogue::new();
        assert!(cat.terms(LanguageCode::Hi, TermCategory::Heatwave).is_empty());
    }

    #[test]
    fn terms_by_priority_orders_formal_first() {
        let mut cat = TermCatalogue::new();
        cat.insert(
            LanguageCode::Hi,
            TermCategory::Heatwave,
            vec![
                HeatTerm { text: "loo".into(), register: Register::Borrowed },
                HeatTerm { text: "lu".into(), register: Register::Formal },
            ],
        );
        let ranked = cat.terms_by_priority(LanguageCode::Hi);
        assert_eq!(ranked[0].register, Register::Formal);
        assert_eq!(ranked[1].register, Register::Borrowed);
    }

    #[test]
    fn register_priority_order() {
        assert!(Register::Formal > Register::Colloquial);
        assert!(Register::Colloquial > Register::Journalistic);
        assert!(Register::Journalistic > Register::Borrowed);
    }
}
