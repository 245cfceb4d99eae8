//! Geography: states, union territories, and their districts.
//!
//! Regions are a read-only input to the core: the geographic catalogue is a
//! collaborator, not something this crate builds. This module only
//! describes its shape and the invariants the rest of the engine relies on.

use crate::error::HeatwaveError;
use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// A state or a union territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    /// One of India's states.
    State,
    /// A union territory.
    Ut,
}

/// The name of a district within a region. A thin wrapper so district batches
/// and query strings can't accidentally be confused with other free strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DistrictName(pub String);

impl DistrictName {
    /// Borrow the district name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DistrictName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compact view of a region passed to provider adapters. Adapters see
/// only what they need to build a request, never the full district list or
/// language set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionContext {
    /// Stable identifier, e.g. `"rajasthan"`.
    pub slug: String,
    /// Human-facing name, e.g. `"Rajasthan"`.
    pub display_name: String,
}

/// An immutable geography record: a state/UT, its supported languages, and
/// its districts.
///
/// Invariants (enforced by [`Region::new`]):
/// - `languages` is non-empty and every code is one of the 14 supported
///   codes (trivially true since [`LanguageCode`] is a closed enum).
/// - district names within the region are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Stable slug, e.g. `"rajasthan"`. Sorting by slug gives the stable
    /// iteration order reproducible fingerprints require.
    pub slug: String,
    /// Human-facing display name, e.g. `"Rajasthan"`.
    pub display_name: String,
    /// State or union territory.
    pub kind: RegionKind,
    /// Languages this region is searched in, in the stable order they were
    /// supplied (callers are expected to pre-sort; [`Region::new`] only
    /// checks non-emptiness and uniqueness, it does not re-sort, so that a
    /// caller-specified language priority order survives intact).
    pub languages: Vec<LanguageCode>,
    /// Districts within the region, unique by name.
    pub districts: Vec<DistrictName>,
}

impl Region {
    /// Construct a region, validating its invariants.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::InvalidArg`] if `languages` is empty or if
    /// `districts` contains a duplicate name.
    pub fn new(
        slug: impl Into<String>,
        display_name: impl Into<String>,
        kind: RegionKind,
        languages: Vec<LanguageCode>,
        districts: Vec<DistrictName>,
    ) -> Result<Self, HeatwaveError> {
        if languages.is_empty() {
            return Err(HeatwaveError::invalid_arg(
                "region must support at least one language",
            ));
        }
        let mut seen = std::collections::HashSet::with_capacity(districts.len());
        for d in &districts {
            if !seen.insert(d.as_str()) {
                return Err(HeatwaveError::invalid_arg(format!(
                    "duplicate district name: {d}"
                )));
            }
        }
        Ok(Self {
            slug: slug.into(),
            display_name: display_name.into(),
            kind,
            languages,
            districts,
        })
    }

    /// The compact view handed to provider adapters.
    #[must_use]
    pub fn context(&self) -> RegionContext {
        RegionContext {
            slug: self.slug.clone(),
            display_name: self.display_name.clone(),
        }
    }

    /// Districts sorted by name, the stable order batching districts for
    /// Phase 2 requires.
    #[must_use]
    pub fn districts_sorted(&self) -> Vec<&DistrictName> {
        let mut out: Vec<&DistrictName> = self.districts.iter().collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(name: &str) -> DistrictName {
        DistrictName(name.to_string())
    }

    #[test]
    fn rejects_empty_languages() {
        let err = Region::new("raj", "Rajasthan", RegionKind::State, vec![], vec![]).unwrap_err();
        assert!(matches!(err, HeatwaveError::InvalidArg(_)));
    }

    #[test]
    fn rejects_duplicate_districts() {
        let err = Region::new(
            "raj",
            "Rajasthan",
            RegionKind::State,
            vec![LanguageCode::Hi],
            vec![district("Jaipur"), district("Jaipur")],
        )
        .unwrap_err();
        assert!(matches!(err, HeatwaveError::InvalidArg(_)));
    }

    #[test]
    fn districts_sorted_is_stable() {
        let region = Region::new(
            "raj",
            "Rajasthan",
            RegionKind::State,
            vec![LanguageCode::Hi],
            vec![district("Udaipur"), district("Alwar"), district("Jaipur")],
        )
        .unwrap();
        let names: Vec<&str> = region
            .districts_sorted()
            .into_iter()
            .map(DistrictName::as_str)
            .collect();
        assert_eq!(names, vec!["Alwar", "Jaipur", "Udaipur"]);
    }
}
