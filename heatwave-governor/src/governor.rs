//! Composition of the three rate-limiting dimensions for one provider.

use crate::budget::DailyBudget;
use crate::per_second::PerSecondLimiter;
use crate::window::RollingWindowLimiter;
use heatwave_types::ProviderProfile;

/// Combines a daily budget, a rolling window, and per-second pacing into
/// the single gate a scheduler consults before dispatching a request.
///
/// The three dimensions are checked and acquired in a fixed order: budget
/// first (a cheap, non-blocking check that must never itself wait), then
/// the rolling window, then per-second pacing. Checking budget first means
/// an exhausted provider never pays the cost of waiting on the other two.
pub struct RateGovernor {
    budget: Option<DailyBudget>,
    window: Option<RollingWindowLimiter>,
    per_second: Option<PerSecondLimiter>,
}

impl RateGovernor {
    #[must_use]
    pub fn from_profile(profile: &ProviderProfile) -> Self {
        Self {
            budget: profile.daily_cap.map(DailyBudget::new),
            window: profile
                .rolling_window
                .map(|(max, window)| RollingWindowLimiter::new(max, window)),
            per_second: profile.per_second_interval.map(PerSecondLimiter::new),
        }
    }

    /// Non-blocking budget check. Returns `false` without touching the
    /// window or per-second limiters when the daily cap is already spent.
    pub fn has_budget(&self) -> bool {
        self.budget.as_ref().map_or(true, DailyBudget::has_capacity)
    }

    /// Wait for the rolling window and per-second limiters to admit a
    /// request. Call only after `has_budget` returned `true`.
    pub async fn pace(&self) {
        if let Some(window) = &self.window {
            window.acquire().await;
        }
        if let Some(per_second) = &self.per_second {
            per_second.acquire().await;
        }
    }

    /// Record that a request was actually dispatched, consuming one unit of
    /// the daily budget. Call once, after `pace` returns and the request
    /// has been sent.
    pub fn credit_request(&self) {
        if let Some(budget) = &self.budget {
            budget.credit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatwave_types::ProviderKind;

    #[test]
    fn budgetless_profile_always_has_budget() {
        let profile = ProviderProfile::default_for(ProviderKind::Google);
        let governor = RateGovernor::from_profile(&profile);
        assert!(governor.has_budget());
    }

    #[test]
    fn capped_profile_exhausts_after_cap_credits() {
        let profile = ProviderProfile::default_for(ProviderKind::Gnews);
        let governor = RateGovernor::from_profile(&profile);
        let cap = profile.daily_cap.expect("gnews has a daily cap");
        for _ in 0..cap {
            assert!(governor.has_budget());
            governor.credit_request();
        }
        assert!(!governor.has_budget());
    }
}
