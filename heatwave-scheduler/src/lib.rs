//! heatwave-scheduler
//!
//! Wraps a single [`heatwave_core::NewsProvider`] with its rate governor
//! and circuit breaker, exposing a dispatch contract that never raises.

mod backoff;
mod scheduler;

pub use backoff::jitter_wait_ms;
pub use scheduler::SourceScheduler;
