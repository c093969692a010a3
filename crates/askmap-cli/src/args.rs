use askmap_core::text::MatchMode;
use askmap_core::AskMapConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for askmap
#[derive(Debug, Parser)]
#[command(
    name = "askmap",
    version,
    about = "Ask a question in plain language and see which places it is about"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand. Unset options keep the value from
/// the `ASKMAP_*` environment (or the built-in default).
#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// Country-name endpoint (REST countries v3.1)
    #[arg(long, global = true)]
    pub countries_url: Option<String>,

    /// GeoJSON FeatureCollection with a `name` property per feature
    #[arg(long, global = true)]
    pub boundaries_url: Option<String>,

    /// Base URL of the generative-AI API
    #[arg(long, global = true)]
    pub ai_base_url: Option<String>,

    /// Model name (e.g. gemini-1.5-flash)
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// API key for the generative-AI endpoint
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Directory for the on-disk caches (country names, boundaries)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Speech recognition locale
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Name matching: `lowercase` or `folded` (also ignores diacritics)
    #[arg(long, global = true)]
    pub match_mode: Option<MatchMode>,

    /// HTTP timeout in seconds; 0 disables it
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Clear highlights when a search finds nothing or fails
    #[arg(long, global = true)]
    pub clear_on_failure: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

impl GlobalOptions {
    /// Apply the command line on top of `base`.
    pub fn apply(&self, mut base: AskMapConfig) -> AskMapConfig {
        if let Some(v) = &self.countries_url {
            base.countries_url = v.clone();
        }
        if let Some(v) = &self.boundaries_url {
            base.boundaries_url = v.clone();
        }
        if let Some(v) = &self.ai_base_url {
            base.ai_base_url = v.clone();
        }
        if let Some(v) = &self.model {
            base.ai_model = v.clone();
        }
        if self.api_key.is_some() {
            base.api_key = self.api_key.clone();
        }
        if self.cache_dir.is_some() {
            base.cache_dir = self.cache_dir.clone();
        }
        if let Some(v) = &self.locale {
            base.locale = v.clone();
        }
        if let Some(mode) = self.match_mode {
            base.match_mode = mode;
        }
        if let Some(secs) = self.timeout {
            base.request_timeout_secs = (secs > 0).then_some(secs);
        }
        if self.clear_on_failure {
            base.clear_on_failure = true;
        }
        base
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show country-name suggestions for a prefix
    Suggest {
        /// Beginning of a country name (case-insensitive)
        prefix: String,
    },

    /// Ask a question and highlight the places in the answer
    Ask {
        /// Free-text query, e.g. "capital of France and Germany"
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Highlight a single named place, without asking the AI
    Highlight {
        /// Feature name in the boundary dataset
        name: String,
    },

    /// Take the query from (typed) speech, then ask
    Listen,

    /// Show what the configured sources contain
    Stats,
}
