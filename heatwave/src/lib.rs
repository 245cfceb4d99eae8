//! heatwave
//!
//! The composition root: wires one [`SourceScheduler`](heatwave_scheduler::SourceScheduler)
//! per provider, the geography and term inputs, and the checkpoint store
//! into a runnable two-phase batch. [`ExecutorBuilder`] registers
//! providers and inputs; [`QueryExecutor::run`] drives Phase 1 (state
//! sweep), computes the active-region set, then drives Phase 2 (district
//! drill-down) only for regions Phase 1 found active.

mod dispatch;
mod executor;
mod report;

pub use dispatch::SchedulerHandle;
pub use executor::{ExecutorBuilder, QueryExecutor};
pub use report::RunReport;
