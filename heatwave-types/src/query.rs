//! The immutable `Query` value and its stable fingerprint.

use crate::language::LanguageCode;
use crate::provider_kind::ProviderKind;
use crate::region::DistrictName;
use crate::term::TermCategory;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Whether a query targets a whole state/UT or a batch of its districts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Phase 1: one query per (region, language[, category]).
    State,
    /// Phase 2: one query per (active region, language, district batch).
    District,
}

/// A stable, hex-encoded hash of a [`Query`]'s identity, used as the
/// checkpoint key. At least 128 bits are required; this implementation uses
/// the full 256-bit SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable description of one intended provider request.
///
/// `fingerprint` is computed once at construction from
/// `(provider_hint, level, region_slug, language, category, district_batch)`
/// and is therefore stable across runs given identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// The fully constructed search string sent to the provider.
    pub query_string: String,
    /// Language this query searches in.
    pub language: LanguageCode,
    /// Stable region slug.
    pub region_slug: String,
    /// Human-facing region name, carried for logging/debugging only; not
    /// part of the fingerprint (two regions could in principle share a
    /// display name rendering, but never a slug).
    pub region_display: String,
    /// State-level sweep or district-level drill-down.
    pub level: Level,
    /// Term category, for Google's per-category state-level emission.
    /// `None` for the broad newsdata/gnews queries and for district-level
    /// queries, which use a curated phrase rather than the full category
    /// expansion.
    pub category: Option<TermCategory>,
    /// Districts this query batches, in stable (sorted) order. Empty for
    /// state-level queries.
    pub district_batch: Vec<DistrictName>,
    /// Which provider this query is destined for.
    pub provider_hint: ProviderKind,
    /// Stable identity hash, used as the checkpoint key.
    pub fingerprint: Fingerprint,
}

impl Query {
    /// Construct a query, computing its fingerprint from its identity
    /// fields.
    #[must_use]
    pub fn new(
        query_string: String,
        language: LanguageCode,
        region_slug: String,
        region_display: String,
        level: Level,
        category: Option<TermCategory>,
        district_batch: Vec<DistrictName>,
        provider_hint: ProviderKind,
    ) -> Self {
        let fingerprint = compute_fingerprint(
            provider_hint,
            level,
            &region_slug,
            language,
            category,
            &district_batch,
        );
        Self {
            query_string,
            language,
            region_slug,
            region_display,
            level,
            category,
            district_batch,
            provider_hint,
            fingerprint,
        }
    }
}

/// Deterministic hash of a query's identity fields. Two calls with
/// identical arguments always produce the same fingerprint, which is
/// why every input is formatted through a fixed, unambiguous textual
/// encoding before hashing rather than relying on `Debug` (whose format is
/// not a stability guarantee).
fn compute_fingerprint(
    provider_hint: ProviderKind,
    level: Level,
    region_slug: &str,
    language: LanguageCode,
    category: Option<TermCategory>,
    district_batch: &[DistrictName],
) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(provider_hint.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(if matches!(level, Level::State) { b"state" } else { b"district" });
    hasher.update(b"|");
    hasher.update(region_slug.as_bytes());
    hasher.update(b"|");
    hasher.update(language.as_str().as_bytes());
    hasher.update(b"|");
    match category {
        Some(cat) => {
            hasher.update(b"cat:");
            hasher.update(format!("{cat:?}").as_bytes());
        }
        None => hasher.update(b"cat:none"),
    }
    hasher.update(b"|");
    // District names are already expected to arrive pre-sorted, but
    // the fingerprint does not depend on that being enforced upstream: it
    // simply hashes whatever order it is given, so callers that fail to
    // sort get a different (still stable) fingerprint rather than silent
    // collisions.
    for d in district_batch {
        hasher.update(d.as_str().as_bytes());
        hasher.update(b",");
    }
    Fingerprint(hex_encode(hasher.finalize().as_slice()))
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        write!(out, "{b:02x}").expect("writing to a String cannot fail");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_query(region: &str) -> Query {
        Query::new(
            "(heat) Rajasthan".into(),
            LanguageCode::Hi,
            region.into(),
            "Rajasthan".into(),
            Level::State,
            Some(TermCategory::Heatwave),
            vec![],
            ProviderKind::Google,
        )
    }

    #[test]
    fn fingerprint_is_deterministic_across_construction() {
        let a = sample_query("rajasthan");
        let b = sample_query("rajasthan");
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn fingerprint_is_at_least_128_bits_hex() {
        let q = sample_query("rajasthan");
        // 256-bit SHA-256 digest -> 64 hex chars.
        assert_eq!(q.fingerprint.0.len(), 64);
    }

    #[test]
    fn fingerprint_differs_on_region() {
        let a = sample_query("rajasthan");
        let b = sample_query("mizoram");
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn fingerprint_ignores_query_string_text() {
        // The rendered string can change wording while the identity stays
        // the same; only the identity fields matter for resume semantics.
        let mut a = sample_query("rajasthan");
        a.query_string = "totally different rendering".into();
        let b = sample_query("rajasthan");
        assert_eq!(a.fingerprint, b.fingerprint);
    }
}
