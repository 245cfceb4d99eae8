//! Rolling-window limiter.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// A small positive pad added past the window boundary so that, after
/// sleeping, a re-check never races the exact instant the oldest timestamp
/// expires.
const EPSILON: Duration = Duration::from_millis(5);

/// Enforces `max_requests` within any trailing `window` of wall time,
/// tracked via an ordered queue of monotonic timestamps.
pub struct RollingWindowLimiter {
    max_requests: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RollingWindowLimiter {
    /// Build a limiter allowing `max_requests` per `window`.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests as usize,
            window,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Prune, wait if the window is full, prune again, then record the new
    /// request. Pruning and append happen under the same mutex guard to
    /// preserve FIFO ordering within this provider.
    pub async fn acquire(&self) {
        let mut timestamps = self.timestamps.lock().await;
        self.prune(&mut timestamps, Instant::now());

        if timestamps.len() >= self.max_requests {
            if let Some(&oldest) = timestamps.front() {
                let release_at = oldest + self.window + EPSILON;
                let now = Instant::now();
                if release_at > now {
                    tokio::time::sleep(release_at - now).await;
                }
                self.prune(&mut timestamps, Instant::now());
            }
        }

        timestamps.push_back(Instant::now());
    }

    fn prune(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}
