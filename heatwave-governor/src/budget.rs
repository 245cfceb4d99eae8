//! Daily request budget.

use std::sync::atomic::{AtomicU32, Ordering};

/// Caps total requests issued to a provider over a day. Checking the budget
/// never touches the window or per-second limiters: an exhausted budget
/// fails fast, before any other limiter state is consulted or mutated.
pub struct DailyBudget {
    cap: u32,
    used: AtomicU32,
}

impl DailyBudget {
    #[must_use]
    pub fn new(cap: u32) -> Self {
        Self { cap, used: AtomicU32::new(0) }
    }

    /// `true` if at least one more request fits under the cap. Does not
    /// reserve it — call `credit` once the request is actually dispatched.
    pub fn has_capacity(&self) -> bool {
        self.used.load(Ordering::Acquire) < self.cap
    }

    /// Record a dispatched request. Called once per actual attempt, after
    /// the other limiters have admitted it, not on every `has_capacity`
    /// check.
    pub fn credit(&self) {
        self.used.fetch_add(1, Ordering::AcqRel);
    }

    pub fn used(&self) -> u32 {
        self.used.load(Ordering::Acquire)
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Reset the counter, e.g. on a new calendar day.
    pub fn reset(&self) {
        self.used.store(0, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausts_after_cap_credits() {
        let budget = DailyBudget::new(2);
        assert!(budget.has_capacity());
        budget.credit();
        assert!(budget.has_capacity());
        budget.credit();
        assert!(!budget.has_capacity());
    }

    #[test]
    fn reset_restores_capacity() {
        let budget = DailyBudget::new(1);
        budget.credit();
        assert!(!budget.has_capacity());
        budget.reset();
        assert!(budget.has_capacity());
    }
}
