//! The run's configuration surface.

use crate::language::LanguageCode;
use crate::provider_kind::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// The full configuration surface for one run of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Subset of region slugs to process; empty means all regions.
    pub region_selection: Vec<String>,
    /// Subset of language codes to process; empty means all 14.
    pub language_selection: Vec<LanguageCode>,
    /// Subset of providers to query; empty means all three.
    pub provider_selection: Vec<ProviderKind>,
    /// Wall-clock budget for the whole run, split 80/20 between
    /// Phase 1+2 collection and the downstream-reserved margin.
    pub deadline: Duration,
    /// Hard cap on total articles carried forward from Phase 1+2 combined.
    pub max_articles: Option<usize>,
    /// Per-provider concurrency override (advanced); absent entries fall
    /// back to the provider's default from
    /// [`ProviderProfile::default_for`](crate::provider_kind::ProviderProfile::default_for).
    /// Keyed by [`ProviderKind::as_str`] rather than the enum directly so
    /// this config round-trips through JSON/TOML, whose map keys must be
    /// strings.
    pub concurrency_overrides: HashMap<String, usize>,
    /// Opaque provider credentials; an absent or empty entry means the
    /// scheduler must synthesize a budget-exhausted-equivalent outcome and
    /// never attempt network I/O for that provider. Keyed by
    /// [`ProviderKind::as_str`].
    pub credentials: HashMap<String, String>,
    /// If true, do not clear the checkpoint store on clean completion;
    /// the operator is then responsible for clearing it before a new
    /// day's run.
    pub keep_checkpoint: bool,
    /// Global ceiling on in-flight query dispatches across all providers
    /// (default 64).
    pub global_concurrency: usize,
    /// Bounded queue depth for pending, not-yet-dispatched queries
    /// (default 1000).
    pub pending_queue_capacity: usize,
    /// Grace window given to in-flight queries after the deadline expires
    /// so their checkpoints can still be written (default 10s).
    pub cancellation_grace: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            region_selection: Vec::new(),
            language_selection: Vec::new(),
            provider_selection: Vec::new(),
            deadline: Duration::from_secs(3600),
            max_articles: None,
            concurrency_overrides: HashMap::new(),
            credentials: HashMap::new(),
            keep_checkpoint: false,
            global_concurrency: 64,
            pending_queue_capacity: 1000,
            cancellation_grace: Duration::from_secs(10),
        }
    }
}

impl RunConfig {
    /// Start from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the run to these region slugs.
    #[must_use]
    pub fn with_regions(mut self, slugs: Vec<String>) -> Self {
        self.region_selection = slugs;
        self
    }

    /// Restrict the run to these languages.
    #[must_use]
    pub fn with_languages(mut self, langs: Vec<LanguageCode>) -> Self {
        self.language_selection = langs;
        self
    }

    /// Restrict the run to these providers.
    #[must_use]
    pub fn with_providers(mut self, providers: Vec<ProviderKind>) -> Self {
        self.provider_selection = providers;
        self
    }

    /// Set the overall wall-clock deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Set the hard article cap.
    #[must_use]
    pub const fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = Some(max_articles);
        self
    }

    /// Register a credential for a provider. An empty string is treated the
    /// same as an absent credential by the scheduler.
    #[must_use]
    pub fn with_credential(mut self, provider: ProviderKind, credential: impl Into<String>) -> Self {
        self.credentials
            .insert(provider.as_str().to_string(), credential.into());
        self
    }

    /// The 80% share of `deadline` reserved for Phase 1+2 collection; the
    /// remaining 20% is reserved for downstream stages.
    #[must_use]
    pub fn collection_deadline(&self) -> Duration {
        self.deadline.mul_f64(0.8)
    }

    /// Whether this provider has a usable, non-empty credential.
    #[must_use]
    pub fn has_credential(&self, provider: ProviderKind) -> bool {
        self.credentials
            .get(provider.as_str())
            .is_some_and(|c| !c.trim().is_empty())
    }

    /// The effective concurrency for `provider`: the override if set,
    /// otherwise `default`.
    #[must_use]
    pub fn effective_concurrency(&self, provider: ProviderKind, default: usize) -> usize {
        self.concurrency_overrides
            .get(provider.as_str())
            .copied()
            .unwrap_or(default)
    }

    /// Whether `region_slug` is in scope for this run (empty selection
    /// means every region is in scope).
    #[must_use]
    pub fn region_in_scope(&self, region_slug: &str) -> bool {
        self.region_selection.is_empty()
            || self.region_selection.iter().any(|s| s == region_slug)
    }

    /// Whether `language` is in scope for this run.
    #[must_use]
    pub fn language_in_scope(&self, language: LanguageCode) -> bool {
        self.language_selection.is_empty() || self.language_selection.contains(&language)
    }

    /// Whether `provider` is in scope for this run.
    #[must_use]
    pub fn provider_in_scope(&self, provider: ProviderKind) -> bool {
        self.provider_selection.is_empty() || self.provider_selection.contains(&provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_means_everything_in_scope() {
        let cfg = RunConfig::new();
        assert!(cfg.region_in_scope("rajasthan"));
        assert!(cfg.language_in_scope(LanguageCode::Hi));
        assert!(cfg.provider_in_scope(ProviderKind::Google));
    }

    #[test]
    fn non_empty_selection_restricts_scope() {
        let cfg = RunConfig::new().with_regions(vec!["rajasthan".into()]);
        assert!(cfg.region_in_scope("rajasthan"));
        assert!(!cfg.region_in_scope("mizoram"));
    }

    #[test]
    fn collection_deadline_is_eighty_percent() {
        let cfg = RunConfig::new().with_deadline(Duration::from_secs(100));
        assert_eq!(cfg.collection_deadline(), Duration::from_secs(80));
    }

    #[test]
    fn empty_credential_does_not_count() {
        let cfg = RunConfig::new().with_credential(ProviderKind::Gnews, "   ");
        assert!(!cfg.has_credential(ProviderKind::Gnews));
    }
}
