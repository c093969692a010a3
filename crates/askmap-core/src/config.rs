// crates/askmap-core/src/config.rs

use crate::text::MatchMode;
use serde::Deserialize;
use std::env::var;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name";
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json";
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Runtime configuration for a [`Session`](crate::session::Session) and its clients.
///
/// All fields have defaults, so a config can be deserialized from a partial
/// document or built from [`AskMapConfig::from_env`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AskMapConfig {
    pub countries_url: String,
    pub boundaries_url: String,
    pub ai_base_url: String,
    pub ai_model: String,
    /// Never hard-coded; comes from the environment or the command line.
    pub api_key: Option<String>,
    /// Speech recognition locale.
    pub locale: String,
    pub match_mode: MatchMode,
    /// Capped at [`DEFAULT_MAX_SUGGESTIONS`].
    pub max_suggestions: usize,
    /// `None` disables the timeout.
    pub request_timeout_secs: Option<u64>,
    /// Keep the boundary dataset after the first download instead of
    /// fetching it once per highlight.
    pub cache_boundaries: bool,
    /// Where the gzip+bincode caches live. `None` keeps caches in memory only.
    pub cache_dir: Option<PathBuf>,
    pub cache_max_age_secs: u64,
    /// Clear existing highlights when a search finds nothing or fails.
    pub clear_on_failure: bool,
}

impl Default for AskMapConfig {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            boundaries_url: DEFAULT_BOUNDARIES_URL.to_string(),
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            api_key: None,
            locale: DEFAULT_LOCALE.to_string(),
            match_mode: MatchMode::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            request_timeout_secs: Some(30),
            cache_boundaries: true,
            cache_dir: None,
            cache_max_age_secs: 7 * 24 * 60 * 60,
            clear_on_failure: false,
        }
    }
}

impl AskMapConfig {
    /// Defaults, overlaid with `ASKMAP_*` variables and `GEMINI_API_KEY`.
    ///
    /// Empty or unparsable variables are ignored (and logged) rather than
    /// treated as errors.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_str("ASKMAP_COUNTRIES_URL") {
            cfg.countries_url = v;
        }
        if let Some(v) = env_str("ASKMAP_BOUNDARIES_URL") {
            cfg.boundaries_url = v;
        }
        if let Some(v) = env_str("ASKMAP_AI_BASE_URL") {
            cfg.ai_base_url = v;
        }
        if let Some(v) = env_str("ASKMAP_AI_MODEL") {
            cfg.ai_model = v;
        }
        cfg.api_key = env_str("GEMINI_API_KEY").or_else(|| env_str("ASKMAP_API_KEY"));
        if let Some(v) = env_str("ASKMAP_LOCALE") {
            cfg.locale = v;
        }
        if let Some(v) = env_parse("ASKMAP_MATCH_MODE") {
            cfg.match_mode = v;
        }
        if let Some(v) = env_parse("ASKMAP_MAX_SUGGESTIONS") {
            cfg.max_suggestions = v;
        }
        if let Some(v) = env_parse::<u64>("ASKMAP_TIMEOUT_SECS") {
            cfg.request_timeout_secs = (v > 0).then_some(v);
        }
        if let Some(v) = env_parse("ASKMAP_CACHE_BOUNDARIES") {
            cfg.cache_boundaries = v;
        }
        if let Some(v) = env_str("ASKMAP_CACHE_DIR") {
            cfg.cache_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = env_parse("ASKMAP_CACHE_MAX_AGE_SECS") {
            cfg.cache_max_age_secs = v;
        }
        if let Some(v) = env_parse("ASKMAP_CLEAR_ON_FAILURE") {
            cfg.clear_on_failure = v;
        }

        cfg
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }

    /// `generateContent` URL for the configured model.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.ai_base_url.trim_end_matches('/'),
            self.ai_model
        )
    }
}

fn env_str(key: &str) -> Option<String> {
    match var(key) {
        Ok(value) => match value.trim().is_empty() {
            true => {
                tracing::debug!("{key} is empty");
                None
            }
            false => Some(value.trim().to_string()),
        },
        Err(_) => None,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_str(key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("ignoring {key}: cannot parse {raw:?}");
            None
        }
    }
}
