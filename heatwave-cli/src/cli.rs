//! Command-line argument surface, mapped onto [`heatwave_types::RunConfig`].

use clap::{Parser, ValueEnum};
use heatwave_types::ProviderKind;
use std::path::PathBuf;
use std::time::Duration;

/// Run one batch of the heatwave news collection pipeline.
#[derive(Parser, Debug)]
#[command(name = "heatwave", version, about)]
pub struct Cli {
    /// Region slugs to restrict the run to. Repeatable. Default: all
    /// regions in the embedded demo catalogue.
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// BCP-47 language codes to restrict the run to (e.g. `hi`, `en`).
    /// Repeatable. Default: every language the region supports.
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Providers to restrict the run to. Repeatable. Default: all three.
    #[arg(long = "provider", value_enum)]
    pub providers: Vec<ProviderArg>,

    /// Wall-clock budget for the whole run, in seconds. 80% is spent on
    /// collection, 20% reserved for downstream stages.
    #[arg(long, default_value_t = 3600)]
    pub deadline_secs: u64,

    /// Hard cap on total articles carried forward from both phases.
    #[arg(long)]
    pub max_articles: Option<usize>,

    /// Where the checkpoint store reads from and writes to.
    #[arg(long, default_value = "./heatwave-checkpoint.ndjson")]
    pub checkpoint_path: PathBuf,

    /// Keep the checkpoint after a clean run instead of clearing it.
    /// Operators who set this are responsible for clearing it externally
    /// before the next day's run.
    #[arg(long)]
    pub keep_checkpoint: bool,

    /// Global ceiling on in-flight query dispatches across all providers.
    #[arg(long, default_value_t = 64)]
    pub global_concurrency: usize,
}

impl Cli {
    /// The overall wall-clock deadline as a [`Duration`].
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    /// Parsed, validated language selection.
    ///
    /// # Errors
    /// Returns an error message naming the first code that isn't one of
    /// the 14 supported BCP-47 codes.
    pub fn parsed_languages(&self) -> Result<Vec<heatwave_types::LanguageCode>, String> {
        self.languages
            .iter()
            .map(|code| {
                heatwave_types::LanguageCode::parse(code)
                    .ok_or_else(|| format!("unsupported language code: {code}"))
            })
            .collect()
    }

    /// Provider selection mapped onto [`ProviderKind`].
    #[must_use]
    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }
}

/// CLI-facing mirror of [`ProviderKind`], since `clap::ValueEnum` needs a
/// type it can derive parsing for directly.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ProviderArg {
    Google,
    Newsdata,
    Gnews,
}

impl ProviderArg {
    #[must_use]
    pub const fn kind(self) -> ProviderKind {
        match self {
            Self::Google => ProviderKind::Google,
            Self::Newsdata => ProviderKind::Newsdata,
            Self::Gnews => ProviderKind::Gnews,
        }
    }
}
