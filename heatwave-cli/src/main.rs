//! Binary entry point: loads configuration and credentials, wires the
//! three provider adapters into schedulers, and drives one run of the
//! heatwave query-orchestration engine.

mod cli;
mod fixtures;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Cli;
use heatwave::{ExecutorBuilder, SchedulerHandle};
use heatwave_providers::{GnewsProvider, GoogleProvider, NewsdataProvider};
use heatwave_scheduler::SourceScheduler;
use heatwave_types::{ProviderKind, ProviderProfile, RunConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = build_run_config(&cli).context("building run configuration")?;

    let executor = ExecutorBuilder::new()
        .with_regions(fixtures::demo_regions())
        .with_catalogue(fixtures::demo_catalogue())
        .with_scheduler(ProviderKind::Google, google_scheduler(&config))
        .with_scheduler(ProviderKind::Newsdata, newsdata_scheduler(&config))
        .with_scheduler(ProviderKind::Gnews, gnews_scheduler(&config))
        .with_config(config)
        .with_checkpoint_path(cli.checkpoint_path.clone())
        .build()
        .context("building executor")?;

    let report = executor.run().await.context("running the pipeline")?;

    tracing::info!(
        phase1 = report.phase1_results.len(),
        phase2 = report.phase2_results.len(),
        active_regions = report.active_regions.len(),
        cancelled = report.cancelled,
        ok_fraction = report.ok_fraction(),
        "run finished"
    );

    if report.phase1_aborted {
        bail!("phase 1 did not complete before the collection deadline");
    }

    Ok(())
}

fn build_run_config(cli: &Cli) -> Result<RunConfig> {
    let languages = cli
        .parsed_languages()
        .map_err(|err| anyhow::anyhow!(err))
        .context("parsing --language values")?;

    let mut config = RunConfig::new()
        .with_regions(cli.regions.clone())
        .with_languages(languages)
        .with_providers(cli.provider_kinds())
        .with_deadline(cli.deadline());

    if let Some(max_articles) = cli.max_articles {
        config = config.with_max_articles(max_articles);
    }
    config.keep_checkpoint = cli.keep_checkpoint;
    config.global_concurrency = cli.global_concurrency;

    for (provider, env_var) in [
        (ProviderKind::Google, "GOOGLE_API_KEY"),
        (ProviderKind::Newsdata, "NEWSDATA_API_KEY"),
        (ProviderKind::Gnews, "GNEWS_API_KEY"),
    ] {
        if let Ok(credential) = std::env::var(env_var) {
            config = config.with_credential(provider, credential);
        }
    }

    Ok(config)
}

fn google_scheduler(config: &RunConfig) -> Arc<dyn SchedulerHandle> {
    let api_key = config
        .credentials
        .get(ProviderKind::Google.as_str())
        .cloned()
        .unwrap_or_default();
    let search_engine_id = std::env::var("GOOGLE_SEARCH_ENGINE_ID").unwrap_or_default();
    let provider = GoogleProvider::new(api_key, search_engine_id);
    let profile = ProviderProfile::default_for(ProviderKind::Google);
    Arc::new(SourceScheduler::new(provider, &profile))
}

fn newsdata_scheduler(config: &RunConfig) -> Arc<dyn SchedulerHandle> {
    let api_key = config
        .credentials
        .get(ProviderKind::Newsdata.as_str())
        .cloned()
        .unwrap_or_default();
    let provider = NewsdataProvider::new(api_key);
    let profile = ProviderProfile::default_for(ProviderKind::Newsdata);
    Arc::new(SourceScheduler::new(provider, &profile))
}

fn gnews_scheduler(config: &RunConfig) -> Arc<dyn SchedulerHandle> {
    let api_key = config
        .credentials
        .get(ProviderKind::Gnews.as_str())
        .cloned()
        .unwrap_or_default();
    let provider = GnewsProvider::new(api_key);
    let profile = ProviderProfile::default_for(ProviderKind::Gnews);
    Arc::new(SourceScheduler::new(provider, &profile))
}
