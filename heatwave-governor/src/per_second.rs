//! Per-second pacing limiter.

use rand::Rng;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive requests, using the
/// monotonic clock exclusively — wall-clock changes must never perturb
/// pacing.
pub struct PerSecondLimiter {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl PerSecondLimiter {
    /// Build a limiter enforcing `interval` between requests.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Block until the next request is allowed, then record it.
    ///
    /// `wait = last_request + interval - now`; if positive, sleeps
    /// `wait + uniform_jitter(0, 0.3 * interval)` before recording the new
    /// `last_request`. The jitter breaks thundering-herd alignment when
    /// many tasks resume from a window wait at the same instant.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let now = Instant::now();
        if let Some(prev) = *last {
            let earliest = prev + self.interval;
            if earliest > now {
                let wait = earliest - now;
                let jitter_bound_ms = (self.interval.as_millis() as f64 * 0.3).max(1.0) as u64;
                let jitter_ms = rand::rng().random_range(0..jitter_bound_ms);
                tokio::time::sleep(wait + Duration::from_millis(jitter_ms)).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn second_acquire_waits_for_interval() {
        let limiter = PerSecondLimiter::new(Duration::from_millis(100));
        limiter.acquire().await;
        let started = Instant::now();
        limiter.acquire().await;
        assert!(Instant::now() - started >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn first_acquire_never_waits() {
        let limiter = PerSecondLimiter::new(Duration::from_secs(5));
        let started = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), started);
    }
}
