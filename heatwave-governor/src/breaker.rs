//! Per-provider circuit breaker.
//!
//! Modeled as an explicit state machine, in the style of the teacher's
//! streaming supervisor: states are data, transitions are functions from
//! (state, event) to a new state, and the lock only ever guards that small
//! piece of state.

use heatwave_types::BreakerState;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

struct Inner {
    state: BreakerState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    half_open_probe_in_flight: bool,
}

/// Trips to `Open` after `failure_threshold` consecutive transient failures,
/// refuses all traffic until `cool_down` elapses, then admits exactly one
/// probe request in `HalfOpen`. The probe's outcome decides whether the
/// breaker closes again or re-opens for another `cool_down`.
pub struct CircuitBreaker {
    failure_threshold: u32,
    cool_down: Duration,
    inner: Mutex<Inner>,
}

/// What the caller may do right now, decided by `admit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Proceed with the request.
    Allowed,
    /// Proceed, and this attempt is the single `HalfOpen` probe; its result
    /// must be reported via `record_success`/`record_failure`.
    AllowedAsProbe,
    /// Refused; the breaker is open and not yet eligible for a probe.
    Refused,
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(failure_threshold: u32, cool_down: Duration) -> Self {
        Self {
            failure_threshold,
            cool_down,
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                half_open_probe_in_flight: false,
            }),
        }
    }

    pub fn state(&self) -> BreakerState {
        self.inner.lock().expect("breaker mutex poisoned").state
    }

    /// Decide whether a request may proceed right now. Transitions `Open` to
    /// `HalfOpen` itself once `cool_down` has elapsed, rather than requiring
    /// a separate poll.
    pub fn admit(&self) -> Admission {
        let mut inner = self.inner.lock().expect("breaker mutex poisoned");
        match inner.state {
            BreakerState::Closed => Admission::Allowed,
            BreakerState::HalfOpen => {
                if inner.half_open_probe_in_flight {
                    Admission::Refused
                } else {
                    inner.half_open_probe_in_flight = true;
                    Admission::AllowedAsProbe
                }
            }
            BreakerState::Open => {
                let elapsed = inner
                    .opened_at
                    .map(|t| Instant::now().saturating_duration_since(t))
                    .unwrap_or(Duration::ZERO);
                if elapsed >= self.cool_down {
                    inner.state = BreakerState::HalfOpen;
                    inner.half_open_probe_in_flight = true;
                    debug!("breaker cool-down elapsed, admitting a half-open probe");
                    Admission::AllowedAsProbe
                } else {
                    Admission::Refused
                }
            }
        }
    }

    /// Release a probe admitted via `AllowedAsProbe` without recording a
    /// result, because a gate downstream of the breaker (budget,
    /// concurrency) short-circuited before the probe ever reached the
    /// provider. Leaves the breaker in `HalfOpen` so the next call gets
    /// another chance at the single admitted probe, rather than being
    /// wedged `Refused` forever by a probe flag no call will ever clear.
    pub fn release_probe(&self) {
        let mut inner = self.inner.lock().expect("breaker mutex poisoned");
        if inner.state == BreakerState::HalfOpen {
            inner.half_open_probe_in_flight = false;
        }
    }

    /// Report that the admitted request succeeded.
    pub fn record_success(&self) {
        let mut inner = self.inner.lock().expect("breaker mutex poisoned");
        inner.consecutive_failures = 0;
        if inner.state != BreakerState::Closed {
            info!("breaker closing after a successful probe");
        }
        inner.state = BreakerState::Closed;
        inner.half_open_probe_in_flight = false;
        inner.opened_at = None;
    }

    /// Report that the admitted request failed with a trip-eligible error.
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().expect("breaker mutex poisoned");
        match inner.state {
            BreakerState::HalfOpen => {
                info!("probe failed, breaker re-opening");
                inner.state = BreakerState::Open;
                inner.opened_at = Some(Instant::now());
                inner.half_open_probe_in_flight = false;
                inner.consecutive_failures = self.failure_threshold;
            }
            BreakerState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.failure_threshold {
                    info!(
                        threshold = self.failure_threshold,
                        "breaker tripping open after consecutive failures"
                    );
                    inner.state = BreakerState::Open;
                    inner.opened_at = Some(Instant::now());
                }
            }
            BreakerState::Open => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_closed_under_threshold() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), BreakerState::Closed);
        assert_eq!(breaker.admit(), Admission::Allowed);
    }

    #[test]
    fn trips_open_at_threshold_and_refuses() {
        let breaker = CircuitBreaker::new(2, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), BreakerState::Open);
        assert_eq!(breaker.admit(), Admission::Refused);
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), BreakerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn half_open_admits_a_single_probe() {
        let breaker = CircuitBreaker::new(1, Duration::from_secs(30));
        breaker.record_failure();
        assert_eq!(breaker.admit(), Admission::Refused);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(breaker.admit(), Admission::AllowedAsProbe);
        assert_eq!(breaker.admit(), Admission::Refused);
    }

    #[tokio::test(start_paused = true)]
    async fn releasing_an_unused_probe_lets_the_next_call_try_again() {
        let breaker = CircuitBreaker::new(1, Duration::from_secs(30));
        breaker.record_failure();
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(breaker.admit(), Admission::AllowedAsProbe);

        // A gate downstream of the breaker (budget, concurrency)
        // short-circuited before the probe reached the provider.
        breaker.release_probe();

        assert_eq!(breaker.state(), BreakerState::HalfOpen);
        assert_eq!(breaker.admit(), Admission::AllowedAsProbe);
    }

    #[test]
    fn releasing_a_probe_while_closed_is_a_no_op() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        breaker.release_probe();
        assert_eq!(breaker.state(), BreakerState::Closed);
        assert_eq!(breaker.admit(), Admission::Allowed);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_probe_reopens_for_another_cool_down() {
        let breaker = CircuitBreaker::new(1, Duration::from_secs(30));
        breaker.record_failure();
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(breaker.admit(), Admission::AllowedAsProbe);
        breaker.record_failure();
        assert_eq!(breaker.state(), BreakerState::Open);
        assert_eq!(breaker.admit(), Admission::Refused);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(breaker.admit(), Admission::AllowedAsProbe);
        breaker.record_success();
        assert_eq!(breaker.state(), BreakerState::Closed);
    }
}
