//! The uniform provider adapter contract.

use async_trait::async_trait;
use heatwave_types::{ArticleRef, HeatwaveError, LanguageCode, RegionContext};

/// The single operation every news provider adapter implements.
///
/// Implementations are responsible for HTTP, auth, pagination, and parsing.
/// They must return an empty sequence on any failure they choose to absorb,
/// or a [`HeatwaveError`] that a source scheduler can classify into
/// `failed_transient` vs `failed_permanent`.
/// Adapters must be safe for concurrent calls up to the scheduler's
/// configured concurrency (`Send + Sync`).
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Stable provider name, e.g. `"google"`.
    fn name(&self) -> &'static str;

    /// Languages this provider accepts.
    fn supported_languages(&self) -> &[LanguageCode];

    /// Whether this adapter has usable credentials. When `false`, callers
    /// must not invoke [`NewsProvider::search`]; the scheduler synthesizes a
    /// skipped outcome instead and never attempts network I/O.
    fn is_configured(&self) -> bool;

    /// Execute one search against the provider.
    async fn search(
        &self,
        query_string: &str,
        language: LanguageCode,
        region_context: &RegionContext,
    ) -> Result<Vec<ArticleRef>, HeatwaveError>;
}
