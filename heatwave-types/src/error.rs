//! Unified error taxonomy for the heatwave workspace.

use thiserror::Error;

/// Error taxonomy shared by provider adapters, the scheduler, and the
/// executor. Callers match on the variant, not on a message string.
#[derive(Debug, Error, Clone)]
pub enum HeatwaveError {
    /// Invalid input argument (region/query construction, config validation).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The provider's daily cap (or a scheduler-synthesized equivalent for
    /// missing credentials) has been reached.
    #[error("budget exhausted")]
    BudgetExhausted,

    /// The provider does not accept the requested language.
    #[error("language unsupported: {0}")]
    LanguageUnsupported(String),

    /// The provider's circuit breaker is OPEN and not yet cool.
    #[error("circuit breaker open")]
    BreakerOpen,

    /// Network error, timeout, HTTP 429, or HTTP 5xx. Retryable and counts
    /// toward the breaker's failure streak.
    #[error("transient remote error: {0}")]
    TransientRemote(String),

    /// HTTP 4xx (other than 429), auth failure, or malformed response body.
    /// Not retried, does not trip the breaker.
    #[error("permanent remote error: {0}")]
    PermanentRemote(String),

    /// The run's deadline or an interrupt fired while the call was in
    /// flight or waiting on a limiter.
    #[error("cancelled")]
    Cancelled,

    /// A checkpoint write failed.
    #[error("checkpoint I/O error: {0}")]
    CheckpointIo(String),

    /// Provider credentials are empty or missing.
    #[error("missing credentials for provider {0}")]
    MissingCredentials(String),

    /// Opaque escape hatch for conditions that don't fit the taxonomy above.
    #[error("{0}")]
    Other(String),
}

impl HeatwaveError {
    /// Build an [`HeatwaveError::InvalidArg`].
    #[must_use]
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Build an [`HeatwaveError::TransientRemote`].
    #[must_use]
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::TransientRemote(msg.into())
    }

    /// Build an [`HeatwaveError::PermanentRemote`].
    #[must_use]
    pub fn permanent(msg: impl Into<String>) -> Self {
        Self::PermanentRemote(msg.into())
    }

    /// Whether this error, if it came from a provider call, should count as
    /// a circuit-breaker failure: only transient remote errors increment
    /// the breaker's failure counter.
    #[must_use]
    pub const fn trips_breaker(&self) -> bool {
        matches!(self, Self::TransientRemote(_))
    }

    /// Whether a scheduler may retry this error within a single `execute`
    /// call; only transient remote errors are retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientRemote(_))
    }
}
