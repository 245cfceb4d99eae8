//! Type-erased handle over one provider's [`SourceScheduler`], so the
//! Executor can hold a fixed-size table of `Arc<dyn SchedulerHandle>`
//! rather than being generic over every provider type it was built with.

use async_trait::async_trait;
use heatwave_core::NewsProvider;
use heatwave_scheduler::SourceScheduler;
use heatwave_types::{Query, QueryResult};

/// Object-safe view of a [`SourceScheduler<P>`] for some provider `P`.
#[async_trait]
pub trait SchedulerHandle: Send + Sync {
    /// The wrapped provider's stable name.
    fn provider_name(&self) -> &'static str;

    /// Dispatch one query. Never raises; see [`SourceScheduler::execute`].
    async fn execute(&self, query: Query) -> QueryResult;
}

#[async_trait]
impl<P: NewsProvider + 'static> SchedulerHandle for SourceScheduler<P> {
    fn provider_name(&self) -> &'static str {
        self.provider_name()
    }

    async fn execute(&self, query: Query) -> QueryResult {
        self.execute(query).await
    }
}
