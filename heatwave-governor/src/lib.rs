//! heatwave-governor
//!
//! Per-provider rate limiting (daily budget, rolling window, per-second
//! pacing) and circuit breaking for the heatwave query-orchestration
//! engine. A scheduler holds one `RateGovernor` and one `CircuitBreaker`
//! per provider and consults both before dispatching a request.

mod breaker;
mod budget;
mod governor;
mod per_second;
mod window;

pub use breaker::{Admission, CircuitBreaker};
pub use budget::DailyBudget;
pub use governor::RateGovernor;
pub use per_second::PerSecondLimiter;
pub use window::RollingWindowLimiter;
