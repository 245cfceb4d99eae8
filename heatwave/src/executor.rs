//! The two-phase driver: state-level sweep, active-region computation,
//! then district-level drill-down, with checkpoint-gated dispatch and
//! structured cancellation.

use crate::dispatch::SchedulerHandle;
use crate::report::RunReport;
use heatwave_checkpoint::FileCheckpointStore;
use heatwave_types::{
    CheckpointRecord, Fingerprint, HeatwaveError, Outcome, ProviderKind, Query, QueryResult,
    Region, RunConfig, TermCatalogue,
};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Consecutive checkpoint write failures within one phase that escalate
/// the run to a fatal error, per the error-handling design's rule that
/// there is no way to resume without durable checkpoints.
const CHECKPOINT_FAILURE_ESCALATION_THRESHOLD: u32 = 2;

/// Builder that registers one [`SchedulerHandle`] per provider, the
/// geography and term inputs, and the run configuration, then produces a
/// runnable [`QueryExecutor`].
pub struct ExecutorBuilder {
    schedulers: HashMap<ProviderKind, Arc<dyn SchedulerHandle>>,
    regions: Vec<Region>,
    catalogue: TermCatalogue,
    config: RunConfig,
    checkpoint_path: Option<PathBuf>,
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorBuilder {
    /// Start from an empty table of schedulers and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schedulers: HashMap::new(),
            regions: Vec::new(),
            catalogue: TermCatalogue::new(),
            config: RunConfig::default(),
            checkpoint_path: None,
        }
    }

    /// Register the scheduler that handles `kind`. Registering the same
    /// kind twice replaces the previous handle.
    #[must_use]
    pub fn with_scheduler(mut self, kind: ProviderKind, handle: Arc<dyn SchedulerHandle>) -> Self {
        self.schedulers.insert(kind, handle);
        self
    }

    /// Set the geography catalogue this run sweeps.
    #[must_use]
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    /// Set the term dictionary the Query Generator draws from.
    #[must_use]
    pub fn with_catalogue(mut self, catalogue: TermCatalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Set the run's configuration surface.
    #[must_use]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the path the checkpoint store reads from and writes to.
    #[must_use]
    pub fn with_checkpoint_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = Some(path.into());
        self
    }

    /// Finish construction.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::InvalidArg`] if no checkpoint path was set.
    pub fn build(self) -> Result<QueryExecutor, HeatwaveError> {
        let checkpoint_path = self
            .checkpoint_path
            .ok_or_else(|| HeatwaveError::invalid_arg("checkpoint path not set"))?;
        Ok(QueryExecutor {
            schedulers: self.schedulers,
            regions: self.regions,
            catalogue: self.catalogue,
            config: self.config,
            checkpoint: Arc::new(FileCheckpointStore::new(checkpoint_path)),
        })
    }
}

/// Drives one end-to-end run of the pipeline against its registered
/// schedulers, geography, and checkpoint store.
pub struct QueryExecutor {
    schedulers: HashMap<ProviderKind, Arc<dyn SchedulerHandle>>,
    regions: Vec<Region>,
    catalogue: TermCatalogue,
    config: RunConfig,
    checkpoint: Arc<FileCheckpointStore>,
}

impl QueryExecutor {
    /// Run Phase 1 (state sweep), compute the active-region set, then run
    /// Phase 2 (district drill-down) for active regions only. The
    /// collection deadline (80% of `config.deadline`) cancels further
    /// dispatch; in-flight queries get `config.cancellation_grace` to
    /// finish before their result is synthesized as `failed_transient`.
    ///
    /// # Errors
    /// Returns [`HeatwaveError::CheckpointIo`] if the checkpoint store
    /// fails to write twice in a row within either phase: there is no way
    /// to resume correctly without a durable checkpoint, so the run aborts
    /// rather than silently losing resume state.
    pub async fn run(&self) -> Result<RunReport, HeatwaveError> {
        let loaded = self.checkpoint.load().await?;

        let token = CancellationToken::new();
        let deadline_token = token.clone();
        let collection_deadline = self.config.collection_deadline();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(collection_deadline).await;
            deadline_token.cancel();
        });

        let phase1_plan = heatwave_generator::state_level(&self.regions, &self.catalogue, &self.config);
        let phase1_queries = flatten_plan(phase1_plan);
        let (phase1_results, mut active_slugs) =
            self.dispatch_all(phase1_queries, &loaded, &token).await?;

        active_slugs.extend(
            phase1_results
                .iter()
                .filter(|r| r.activates_region())
                .map(|r| r.query.region_slug.clone()),
        );

        let phase1_aborted = token.is_cancelled();

        let phase2_results = if phase1_aborted {
            info!("phase 1 cancelled before completion; skipping phase 2 district drill-down");
            Vec::new()
        } else {
            let active_regions: Vec<&Region> = self
                .regions
                .iter()
                .filter(|region| active_slugs.contains(&region.slug))
                .collect();
            let phase2_plan =
                heatwave_generator::district_level(&active_regions, &self.catalogue, &self.config);
            let phase2_queries = flatten_plan(phase2_plan);
            let (results, _) = self.dispatch_all(phase2_queries, &loaded, &token).await?;
            results
        };

        timer.abort();
        let cancelled = token.is_cancelled();

        if cancelled || self.config.keep_checkpoint {
            self.checkpoint.compact().await?;
        } else {
            self.checkpoint.clear().await?;
        }

        let mut active_regions: Vec<String> = active_slugs.into_iter().collect();
        active_regions.sort();

        let mut report = RunReport {
            phase1_results,
            phase2_results,
            active_regions,
            phase1_aborted,
            cancelled,
        };
        let dropped = report.apply_max_articles(self.config.max_articles);
        if dropped > 0 {
            info!(dropped, "max-articles cap reached; dropped excess articles from the tail of the run");
        }

        Ok(report)
    }

    /// Filter `queries` against the loaded checkpoint, then fan the
    /// remainder out across a bounded channel and a fixed worker pool
    /// (the global concurrency ceiling), checkpointing every result before
    /// it's collected.
    async fn dispatch_all(
        &self,
        queries: Vec<Query>,
        loaded: &HashMap<Fingerprint, CheckpointRecord>,
        token: &CancellationToken,
    ) -> Result<(Vec<QueryResult>, HashSet<String>), HeatwaveError> {
        let mut to_dispatch = Vec::with_capacity(queries.len());
        let mut replayed_active = HashSet::new();
        for query in queries {
            match loaded.get(&query.fingerprint) {
                Some(record) if record.outcome.is_ok() && record.article_count >= 1 => {
                    replayed_active.insert(query.region_slug.clone());
                }
                Some(_) => {}
                None => to_dispatch.push(query),
            }
        }

        if to_dispatch.is_empty() {
            return Ok((Vec::new(), replayed_active));
        }

        let worker_count = self.config.global_concurrency.min(to_dispatch.len()).max(1);
        let (tx, rx) = mpsc::channel::<Query>(self.config.pending_queue_capacity);
        let rx = Arc::new(Mutex::new(rx));

        let producer_token = token.clone();
        let producer = tokio::spawn(async move {
            for query in to_dispatch {
                if producer_token.is_cancelled() {
                    break;
                }
                if tx.send(query).await.is_err() {
                    break;
                }
            }
        });

        let consecutive_failures = Arc::new(AtomicU32::new(0));
        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let rx = Arc::clone(&rx);
            let token = token.clone();
            let schedulers = self.schedulers.clone();
            let checkpoint = Arc::clone(&self.checkpoint);
            let grace = self.config.cancellation_grace;
            let consecutive_failures = Arc::clone(&consecutive_failures);
            workers.push(tokio::spawn(async move {
                worker_loop(rx, token, schedulers, checkpoint, grace, consecutive_failures).await
            }));
        }

        producer
            .await
            .map_err(|err| HeatwaveError::Other(format!("producer task panicked: {err}")))?;

        let mut results = Vec::new();
        for worker in workers {
            let worker_results = worker
                .await
                .map_err(|err| HeatwaveError::Other(format!("worker task panicked: {err}")))??;
            results.extend(worker_results);
        }

        Ok((results, replayed_active))
    }
}

async fn worker_loop(
    rx: Arc<Mutex<mpsc::Receiver<Query>>>,
    token: CancellationToken,
    schedulers: HashMap<ProviderKind, Arc<dyn SchedulerHandle>>,
    checkpoint: Arc<FileCheckpointStore>,
    grace: Duration,
    consecutive_failures: Arc<AtomicU32>,
) -> Result<Vec<QueryResult>, HeatwaveError> {
    let mut out = Vec::new();
    loop {
        let query = {
            let mut guard = rx.lock().await;
            guard.recv().await
        };
        let Some(query) = query else { break };

        let Some(handle) = schedulers.get(&query.provider_hint).cloned() else {
            warn!(provider = %query.provider_hint, "no scheduler registered for this query's provider");
            continue;
        };

        let Some(result) = dispatch_one(handle, query, &token, grace).await else {
            continue;
        };

        match checkpoint
            .mark(
                result.query.fingerprint.clone(),
                result.outcome,
                result.articles.len(),
                chrono::Utc::now(),
            )
            .await
        {
            Ok(()) => consecutive_failures.store(0, Ordering::SeqCst),
            Err(err) => {
                warn!(%err, "checkpoint write failed");
                if consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1
                    >= CHECKPOINT_FAILURE_ESCALATION_THRESHOLD
                {
                    return Err(err);
                }
            }
        }

        out.push(result);
    }
    Ok(out)
}

/// Dispatch one query, honoring cancellation. Returns `None` if the
/// cancellation signal had already fired before this query could be
/// initiated (no request is ever sent). If cancellation fires while the
/// call is already in flight, the same in-progress call is given `grace`
/// more time to finish before being abandoned and synthesized as
/// `failed_transient`.
async fn dispatch_one(
    handle: Arc<dyn SchedulerHandle>,
    query: Query,
    token: &CancellationToken,
    grace: Duration,
) -> Option<QueryResult> {
    if token.is_cancelled() {
        return None;
    }

    let exec = handle.execute(query.clone());
    tokio::pin!(exec);
    tokio::select! {
        biased;
        result = &mut exec => Some(result),
        () = token.cancelled() => {
            match tokio::time::timeout(grace, exec).await {
                Ok(result) => Some(result),
                Err(_) => Some(QueryResult::skipped_or_failed(
                    query,
                    handle.provider_name(),
                    Outcome::FailedTransient,
                    "cancelled: grace window exceeded",
                )),
            }
        }
    }
}

fn flatten_plan(plan: HashMap<ProviderKind, Vec<Query>>) -> Vec<Query> {
    ProviderKind::ALL
        .into_iter()
        .flat_map(|kind| plan.get(&kind).cloned().unwrap_or_default())
        .collect()
}
