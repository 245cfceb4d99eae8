//! heatwave-mock
//!
//! A deterministic, fixture-driven [`heatwave_core::NewsProvider`] for
//! CI-safe tests and local development without real provider credentials.
//! Three region-slug sentinels force specific failure modes so tests can
//! exercise the scheduler's classification and circuit-breaker logic
//! without a real network:
//!
//! - `"FAIL"` — always returns a permanent error (auth/bad-request analog).
//! - `"TIMEOUT"` — always returns a transient error after a short simulated
//!   delay (network timeout analog).
//! - `"RATE_LIMIT"` — always returns a transient error immediately (429
//!   analog); unlike `"TIMEOUT"` it never recovers on its own, so repeated
//!   calls reliably trip a breaker in tests.
//!
//! Every other region slug is looked up in the static fixture table; slugs
//! with no fixture simply yield zero articles, same as a real provider
//! with no coverage for that region on that day.

mod fixtures;

use async_trait::async_trait;
use heatwave_core::NewsProvider;
use heatwave_types::{ArticleRef, HeatwaveError, LanguageCode, RegionContext};
use std::time::Duration;

/// Region slug sentinel forcing a permanent error.
pub const SENTINEL_FAIL: &str = "FAIL";
/// Region slug sentinel forcing a transient error after a short delay.
pub const SENTINEL_TIMEOUT: &str = "TIMEOUT";
/// Region slug sentinel forcing an immediate, non-recovering transient error.
pub const SENTINEL_RATE_LIMIT: &str = "RATE_LIMIT";

/// A deterministic [`NewsProvider`] backed by static fixtures, usable as a
/// stand-in for any of the three real providers in tests.
pub struct MockProvider {
    name: &'static str,
    configured: bool,
    supported_languages: Vec<LanguageCode>,
}

impl MockProvider {
    /// Build a mock provider supporting every one of the 14 languages and
    /// reporting itself as configured.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            configured: true,
            supported_languages: LanguageCode::ALL.to_vec(),
        }
    }

    /// Restrict the languages this mock reports as supported, e.g. to
    /// emulate `gnews`'s 8-language subset.
    #[must_use]
    pub fn with_languages(mut self, languages: Vec<LanguageCode>) -> Self {
        self.supported_languages = languages;
        self
    }

    /// Emulate missing/empty credentials: [`NewsProvider::is_configured`]
    /// returns `false`, and the scheduler must therefore never call
    /// [`NewsProvider::search`] on this instance.
    #[must_use]
    pub const fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }
}

#[async_trait]
impl NewsProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supported_languages(&self) -> &[LanguageCode] {
        &self.supported_languages
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search(
        &self,
        query_string: &str,
        language: LanguageCode,
        region_context: &RegionContext,
    ) -> Result<Vec<ArticleRef>, HeatwaveError> {
        match region_context.slug.as_str() {
            SENTINEL_FAIL => Err(HeatwaveError::permanent("forced permanent failure")),
            SENTINEL_TIMEOUT => {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Err(HeatwaveError::transient("forced timeout"))
            }
            SENTINEL_RATE_LIMIT => Err(HeatwaveError::transient("forced rate limit (429)")),
            slug => Ok(fixtures::articles::by_region(slug, query_string, language)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(slug: &str) -> RegionContext {
        RegionContext { slug: slug.to_string(), display_name: slug.to_string() }
    }

    #[tokio::test]
    async fn fail_sentinel_yields_permanent_error() {
        let provider = MockProvider::new("mock");
        let err = provider
            .search("(loo) X", LanguageCode::Hi, &ctx(SENTINEL_FAIL))
            .await
            .unwrap_err();
        assert!(matches!(err, HeatwaveError::PermanentRemote(_)));
    }

    #[tokio::test]
    async fn timeout_sentinel_yields_transient_error() {
        let provider = MockProvider::new("mock");
        let err = provider
            .search("(loo) X", LanguageCode::Hi, &ctx(SENTINEL_TIMEOUT))
            .await
            .unwrap_err();
        assert!(matches!(err, HeatwaveError::TransientRemote(_)));
    }

    #[tokio::test]
    async fn rate_limit_sentinel_never_recovers() {
        let provider = MockProvider::new("mock");
        for _ in 0..5 {
            let err = provider
                .search("(loo) X", LanguageCode::Hi, &ctx(SENTINEL_RATE_LIMIT))
                .await
                .unwrap_err();
            assert!(matches!(err, HeatwaveError::TransientRemote(_)));
        }
    }

    #[tokio::test]
    async fn ordinary_region_returns_fixture_articles() {
        let provider = MockProvider::new("mock");
        let articles = provider
            .search("(loo) Rajasthan", LanguageCode::Hi, &ctx("rajasthan"))
            .await
            .unwrap();
        assert_eq!(articles.len(), 3);
    }

    #[tokio::test]
    async fn unconfigured_mock_still_reports_is_configured_false() {
        let provider = MockProvider::new("mock").unconfigured();
        assert!(!provider.is_configured());
    }
}
