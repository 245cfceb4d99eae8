//! The three news providers and their static configuration.

use crate::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One of the three providers this engine queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Google (Custom Search-style) provider.
    Google,
    /// `NewsData.io`.
    Newsdata,
    /// `GNews`.
    Gnews,
}

impl ProviderKind {
    /// Fixed tie-break / registration order, `[Google, Newsdata, Gnews]`,
    /// preserved everywhere the engine needs a
    /// deterministic provider iteration order.
    pub const ALL: [Self; 3] = [Self::Google, Self::Newsdata, Self::Gnews];

    /// Stable lowercase name, used in logs, checkpoint keys, and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Newsdata => "newsdata",
            Self::Gnews => "gnews",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static per-provider configuration: the three rate-limiter dimensions,
/// breaker thresholds, concurrency, and language support.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Which provider this profile configures.
    pub kind: ProviderKind,
    /// Languages this provider accepts. `Google` and `Newsdata` accept all
    /// 14; `Gnews` accepts only [`LanguageCode::GNEWS_SUPPORTED`].
    pub supported_languages: Vec<LanguageCode>,
    /// Minimum interval between consecutive requests. `None` means no
    /// per-second pacing is enforced.
    pub per_second_interval: Option<Duration>,
    /// Rolling-window limit: `(max_requests, window)`. `None` means no
    /// rolling window is enforced.
    pub rolling_window: Option<(u32, Duration)>,
    /// Daily request cap. `None` means unbounded.
    pub daily_cap: Option<u32>,
    /// Maximum number of concurrent in-flight requests to this provider.
    pub concurrency: usize,
    /// Consecutive transient failures before the breaker trips
    /// (default 5).
    pub breaker_failure_threshold: u32,
    /// How long the breaker stays OPEN before allowing a HALF_OPEN probe
    /// (default 60s).
    pub breaker_cool_down: Duration,
    /// Maximum character length for a single query string this provider
    /// will accept.
    pub max_query_len: usize,
    /// Approximate district batch size per query for Phase 2.
    pub district_batch_size: usize,
}

impl ProviderProfile {
    /// The default configuration for each provider.
    #[must_use]
    pub fn default_for(kind: ProviderKind) -> Self {
        match kind {
            Self::Google => Self {
                kind,
                supported_languages: LanguageCode::ALL.to_vec(),
                per_second_interval: Some(Duration::from_millis(667)), // ~1.5 req/s
                rolling_window: None,
                daily_cap: None,
                concurrency: 5,
                breaker_failure_threshold: 5,
                breaker_cool_down: Duration::from_secs(60),
                max_query_len: 2048,
                district_batch_size: 30,
            },
            Self::Newsdata => Self {
                kind,
                supported_languages: LanguageCode::ALL.to_vec(),
                per_second_interval: Some(Duration::from_millis(100)), // 10 req/s
                rolling_window: Some((30, Duration::from_secs(900))),
                daily_cap: Some(200),
                concurrency: 1,
                breaker_failure_threshold: 5,
                breaker_cool_down: Duration::from_secs(60),
                max_query_len: 512,
                district_batch_size: 35,
            },
            Self::Gnews => Self {
                kind,
                supported_languages: LanguageCode::GNEWS_SUPPORTED.to_vec(),
                per_second_interval: Some(Duration::from_secs(1)),
                rolling_window: None,
                daily_cap: Some(100),
                concurrency: 1,
                breaker_failure_threshold: 5,
                breaker_cool_down: Duration::from_secs(60),
                max_query_len: 200,
                district_batch_size: 10,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_order_is_fixed() {
        assert_eq!(
            ProviderKind::ALL,
            [ProviderKind::Google, ProviderKind::Newsdata, ProviderKind::Gnews]
        );
    }

    #[test]
    fn gnews_profile_restricts_languages() {
        let profile = ProviderProfile::default_for(ProviderKind::Gnews);
        assert_eq!(profile.supported_languages.len(), 8);
        assert!(profile.supported_languages.contains(&LanguageCode::Hi));
        assert!(!profile.supported_languages.contains(&LanguageCode::Ne));
    }
}
