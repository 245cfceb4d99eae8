//! `QueryResult` and its never-null outcome.

use crate::article::ArticleRef;
use crate::query::Query;
use serde::{Deserialize, Serialize};

/// The terminal outcome of dispatching one [`Query`]. Every
/// `execute()` call produces exactly one of these; the never-raise contract
/// means no provider call or scheduler failure is ever represented as a
/// language-level exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// HTTP 2xx with parsed articles (possibly zero articles).
    Ok,
    /// The provider's daily budget was already exhausted; no network call
    /// was made.
    SkippedBudget,
    /// The provider does not accept the query's language; no network call
    /// was made.
    SkippedLanguage,
    /// The provider's circuit breaker was OPEN and not yet cool; no network
    /// call was made.
    SkippedBreakerOpen,
    /// Network error, timeout, 429, or 5xx, after exhausting retries.
    FailedTransient,
    /// HTTP 4xx (other), auth failure, or malformed response body.
    FailedPermanent,
}

impl Outcome {
    /// Whether this outcome is terminal for checkpoint purposes: a
    /// fingerprint present with a terminal outcome gates a checkpoint
    /// skip. Every variant here is terminal — there is no "pending"
    /// outcome in this enum by construction, since a [`QueryResult`] is
    /// only ever produced once `execute` has already returned.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        true
    }

    /// Whether the query produced at least a chance of articles, i.e. it
    /// actually ran to completion rather than being skipped or failing.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// The result of dispatching one query, always constructed even on failure;
/// never represented as `None` or a language-level exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The query that was dispatched.
    pub query: Query,
    /// Name of the provider that handled (or would have handled) the call.
    pub provider_name: &'static str,
    /// Articles returned, if any. Empty for every non-`Ok` outcome and
    /// possibly empty for `Ok` too (a successful call can legitimately
    /// return zero results).
    pub articles: Vec<ArticleRef>,
    /// The terminal classification of this attempt.
    pub outcome: Outcome,
    /// Human-readable detail for non-`Ok` outcomes, `None` for `Ok`.
    pub error_detail: Option<String>,
}

impl QueryResult {
    /// Build a successful result.
    #[must_use]
    pub fn ok(query: Query, provider_name: &'static str, articles: Vec<ArticleRef>) -> Self {
        Self {
            query,
            provider_name,
            articles,
            outcome: Outcome::Ok,
            error_detail: None,
        }
    }

    /// Build a non-`Ok` result with no articles.
    #[must_use]
    pub fn skipped_or_failed(
        query: Query,
        provider_name: &'static str,
        outcome: Outcome,
        error_detail: impl Into<String>,
    ) -> Self {
        debug_assert!(!matches!(outcome, Outcome::Ok), "use QueryResult::ok for Outcome::Ok");
        Self {
            query,
            provider_name,
            articles: Vec::new(),
            outcome,
            error_detail: Some(error_detail.into()),
        }
    }

    /// Whether this result should seed the active-region set: at least one
    /// `QueryResult` with `outcome=Ok` and a non-empty article list.
    #[must_use]
    pub fn activates_region(&self) -> bool {
        self.outcome.is_ok() && !self.articles.is_empty()
    }
}
