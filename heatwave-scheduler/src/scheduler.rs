use crate::backoff::jitter_wait_ms;
use heatwave_core::NewsProvider;
use heatwave_governor::{Admission, CircuitBreaker, RateGovernor};
use heatwave_types::{HeatwaveError, Outcome, ProviderProfile, Query, QueryResult};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Bounded retries within a single `execute` call, only for transient
/// failures. A retry is the same logical request: it does not draw from
/// the daily budget again.
const MAX_RETRIES: u32 = 2;
const RETRY_BASE_MS: u64 = 200;
const RETRY_JITTER_PERCENT: u32 = 30;

/// Wraps one provider with its rate limiting and circuit breaking so that
/// `execute` never raises: every terminal condition, including every
/// provider error, becomes a [`QueryResult`] outcome rather than a
/// propagated error.
pub struct SourceScheduler<P> {
    provider: P,
    governor: RateGovernor,
    breaker: CircuitBreaker,
    semaphore: Semaphore,
}

impl<P: NewsProvider> SourceScheduler<P> {
    #[must_use]
    pub fn new(provider: P, profile: &ProviderProfile) -> Self {
        Self {
            provider,
            governor: RateGovernor::from_profile(profile),
            breaker: CircuitBreaker::new(profile.breaker_failure_threshold, profile.breaker_cool_down),
            semaphore: Semaphore::new(profile.concurrency),
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Dispatch one query against the wrapped provider, applying the
    /// ordering rules: language support, circuit breaker, budget,
    /// concurrency, then the rate limiters, then the HTTP call itself.
    pub async fn execute(&self, query: Query) -> QueryResult {
        if !self.provider.supported_languages().contains(&query.language) {
            return QueryResult::skipped_or_failed(
                query,
                self.provider.name(),
                Outcome::SkippedLanguage,
                "provider does not support this language",
            );
        }

        if !self.provider.is_configured() {
            return QueryResult::skipped_or_failed(
                query,
                self.provider.name(),
                Outcome::SkippedBudget,
                "provider has no usable credentials",
            );
        }

        let admission = self.breaker.admit();
        if admission == Admission::Refused {
            return QueryResult::skipped_or_failed(
                query,
                self.provider.name(),
                Outcome::SkippedBreakerOpen,
                "circuit breaker open",
            );
        }

        if !self.governor.has_budget() {
            // `admission` may have just admitted this as the breaker's one
            // HalfOpen probe; since it never reaches the provider, release
            // it so the next call gets another chance rather than finding
            // `half_open_probe_in_flight` stuck forever.
            if admission == Admission::AllowedAsProbe {
                self.breaker.release_probe();
            }
            return QueryResult::skipped_or_failed(
                query,
                self.provider.name(),
                Outcome::SkippedBudget,
                "daily budget exhausted",
            );
        }

        let Ok(_permit) = self.semaphore.acquire().await else {
            if admission == Admission::AllowedAsProbe {
                self.breaker.release_probe();
            }
            return QueryResult::skipped_or_failed(
                query,
                self.provider.name(),
                Outcome::FailedTransient,
                "scheduler shutting down",
            );
        };

        self.dispatch_with_retries(query).await
    }

    async fn dispatch_with_retries(&self, query: Query) -> QueryResult {
        let mut credited = false;
        let mut attempt = 0;

        loop {
            self.governor.pace().await;

            let outcome = self
                .provider
                .search(&query.query_string, query.language, &self.region_context(&query))
                .await;

            if !credited {
                self.governor.credit_request();
                credited = true;
            }

            match outcome {
                Ok(articles) => {
                    self.breaker.record_success();
                    return QueryResult::ok(query, self.provider.name(), articles);
                }
                Err(err) if err.is_retryable() && attempt < MAX_RETRIES => {
                    self.breaker.record_failure();
                    attempt += 1;
                    let wait_ms = jitter_wait_ms(
                        RETRY_BASE_MS * 2u64.pow(attempt - 1),
                        RETRY_JITTER_PERCENT,
                    );
                    debug!(provider = self.provider.name(), attempt, wait_ms, "retrying transient failure");
                    tokio::time::sleep(std::time::Duration::from_millis(wait_ms)).await;
                }
                Err(err) => {
                    let outcome = classify(&err);
                    if err.trips_breaker() {
                        self.breaker.record_failure();
                    }
                    if matches!(outcome, Outcome::FailedTransient) {
                        warn!(provider = self.provider.name(), %err, "query failed after retries");
                    }
                    return QueryResult::skipped_or_failed(
                        query,
                        self.provider.name(),
                        outcome,
                        err.to_string(),
                    );
                }
            }
        }
    }

    fn region_context(&self, query: &Query) -> heatwave_types::RegionContext {
        heatwave_types::RegionContext {
            slug: query.region_slug.clone(),
            display_name: query.region_display.clone(),
        }
    }
}

fn classify(err: &HeatwaveError) -> Outcome {
    if err.is_retryable() {
        Outcome::FailedTransient
    } else {
        Outcome::FailedPermanent
    }
}
