//! The article reference returned by provider adapters.

use crate::language::LanguageCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single article reference. Opaque to the core except for these fields:
/// the core neither mutates nor interprets article content. Extraction,
/// relevance scoring, and deduplication are downstream consumers of this
/// type, not part of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    /// Article headline as returned by the provider.
    pub title: String,
    /// Canonical URL.
    pub url: String,
    /// Publisher/source name.
    pub source: String,
    /// Publication timestamp, if the provider supplied one.
    pub published_at: Option<DateTime<Utc>>,
    /// Language the query (not necessarily the article) was issued in.
    pub language: LanguageCode,
    /// Region slug the owning query targeted.
    pub region_slug: String,
    /// The literal search term/phrase that surfaced this article, useful
    /// for downstream relevance scoring.
    pub search_term: String,
}
