//! The circuit breaker's three states.

use serde::{Deserialize, Serialize};

/// Per-provider liveness state. The breaker models liveness, not
/// correctness: only transient (network/5xx/429) failures move it toward
/// `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakerState {
    /// Requests pass through normally.
    Closed,
    /// Requests are rejected immediately until the cool-down elapses.
    Open,
    /// Exactly one probe request is admitted to test recovery.
    HalfOpen,
}
