// crates/askmap-core/src/suggestions.rs

//! # Suggestion Index
//!
//! Known location names for completion while typing. The list is fetched
//! once, kept in source order and never refreshed.

use crate::cache;
use crate::config::DEFAULT_MAX_SUGGESTIONS;
use crate::error::Result;
use crate::lock;
use crate::text::MatchMode;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const NAMES_CACHE_NAME: &str = "country-names";

/// Where the list of known location names comes from.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_names(&self) -> Result<Vec<String>>;
}

/// One record of the REST countries API; only `name.common` is consumed.
#[derive(Debug, Deserialize)]
pub struct CountryRecord {
    pub name: CountryNameRecord,
}

#[derive(Debug, Deserialize)]
pub struct CountryNameRecord {
    pub common: String,
}

/// Parse a REST countries response body into common names, in source order.
pub fn parse_country_names(body: &str) -> Result<Vec<String>> {
    let records: Vec<CountryRecord> = serde_json::from_str(body)?;
    Ok(records.into_iter().map(|r| r.name.common).collect())
}

#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct RestCountriesSource {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl RestCountriesSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CountrySource for RestCountriesSource {
    async fn fetch_names(&self) -> Result<Vec<String>> {
        let body = crate::http::get_text(&self.client, &self.url).await?;
        parse_country_names(&body)
    }
}

/// A fixed list, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCountrySource {
    names: Vec<String>,
}

impl StaticCountrySource {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl CountrySource for StaticCountrySource {
    async fn fetch_names(&self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }
}

/// Serves the name list from the disk cache while it is fresh, otherwise
/// fetches from `inner` and rewrites the cache.
pub struct DiskCachedCountrySource {
    inner: Arc<dyn CountrySource>,
    path: PathBuf,
    max_age: Duration,
}

impl DiskCachedCountrySource {
    pub fn new(inner: Arc<dyn CountrySource>, dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            inner,
            path: cache::cache_path(&dir.into(), NAMES_CACHE_NAME),
            max_age,
        }
    }
}

#[async_trait]
impl CountrySource for DiskCachedCountrySource {
    async fn fetch_names(&self) -> Result<Vec<String>> {
        if let Some(names) = cache::read_cached::<Vec<String>>(&self.path, self.max_age) {
            tracing::debug!(count = names.len(), "country names from disk cache");
            return Ok(names);
        }
        let names = self.inner.fetch_names().await?;
        if let Err(e) = cache::write_cached(&self.path, &names) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not write name cache");
        }
        Ok(names)
    }
}

/// REST countries at `countries_url`, behind the disk cache when a
/// `cache_dir` is configured.
#[cfg(feature = "http")]
pub fn configured_source(
    client: reqwest::Client,
    config: &crate::config::AskMapConfig,
) -> Arc<dyn CountrySource> {
    let remote: Arc<dyn CountrySource> =
        Arc::new(RestCountriesSource::new(client, config.countries_url.clone()));
    match &config.cache_dir {
        Some(dir) => Arc::new(DiskCachedCountrySource::new(
            remote,
            dir.clone(),
            config.cache_max_age(),
        )),
        None => remote,
    }
}

// -----------------------------------------------------------------------------
// INDEX
// -----------------------------------------------------------------------------

/// The Suggestion List plus prefix filtering over it.
#[derive(Debug)]
pub struct SuggestionIndex {
    names: OnceCell<Vec<String>>,
    load_error: Mutex<Option<String>>,
    mode: MatchMode,
    limit: usize,
}

impl SuggestionIndex {
    /// `limit` is clamped to `1..=DEFAULT_MAX_SUGGESTIONS`.
    pub fn new(mode: MatchMode, limit: usize) -> Self {
        Self {
            names: OnceCell::new(),
            load_error: Mutex::new(None),
            mode,
            limit: limit.clamp(1, DEFAULT_MAX_SUGGESTIONS),
        }
    }

    /// An index that is loaded from the start.
    pub fn with_names(names: Vec<String>, mode: MatchMode, limit: usize) -> Self {
        let index = Self::new(mode, limit);
        // a fresh cell cannot already be set
        let _ = index.names.set(names);
        index
    }

    /// Populate the index from `source`. Only the first successful load
    /// counts; later calls are no-ops.
    ///
    /// A failed fetch leaves the index empty. It is logged and remembered in
    /// [`SuggestionIndex::load_error`], never propagated.
    pub async fn load(&self, source: &dyn CountrySource) {
        if self.is_loaded() {
            return;
        }
        match source.fetch_names().await {
            Ok(names) => {
                tracing::info!(count = names.len(), "suggestion index loaded");
                if self.names.set(names).is_err() {
                    tracing::debug!("suggestion index was loaded concurrently; keeping the first list");
                }
                *lock(&self.load_error) = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load country names; suggestions disabled");
                *lock(&self.load_error) = Some(e.to_string());
            }
        }
    }

    /// Case-insensitive prefix matches, at most `limit`, in source order.
    ///
    /// Empty for empty input and while the index has not loaded.
    pub fn filter_prefix(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }
        let Some(names) = self.names.get() else {
            return Vec::new();
        };
        let prefix = self.mode.key(input);
        names
            .iter()
            .filter(|name| self.mode.key(name).starts_with(&prefix))
            .take(self.limit)
            .cloned()
            .collect()
    }

    pub fn is_loaded(&self) -> bool {
        self.names.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.names.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> &[String] {
        self.names.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Why the last load failed, if it did.
    pub fn load_error(&self) -> Option<String> {
        lock(&self.load_error).clone()
    }
}

/// The clickable list under the search field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPanel {
    items: Vec<String>,
    visible: bool,
}

impl SuggestionPanel {
    /// Re-filter for `input`. Shown only when there is at least one item.
    pub fn refresh(&mut self, index: &SuggestionIndex, input: &str) {
        self.items = index.filter_prefix(input);
        self.visible = !self.items.is_empty();
    }

    /// The text of suggestion `i`, hiding the panel. `None` if out of range.
    pub fn select(&mut self, i: usize) -> Option<String> {
        let picked = self.items.get(i).cloned()?;
        self.hide();
        Some(picked)
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rest_countries_records() {
        let body = r#"[
            {"name": {"common": "France", "official": "French Republic", "nativeName": {}}},
            {"name": {"common": "Peru", "official": "Republic of Peru"}}
        ]"#;
        assert_eq!(parse_country_names(body).unwrap(), vec!["France", "Peru"]);
        assert!(parse_country_names(r#"{"status": 400}"#).is_err());
    }

    #[test]
    fn unloaded_index_suggests_nothing() {
        let index = SuggestionIndex::new(MatchMode::Lowercase, 5);
        assert!(!index.is_loaded());
        assert!(index.filter_prefix("fr").is_empty());
    }

    #[test]
    fn out_of_range_selection_keeps_panel() {
        let index = SuggestionIndex::with_names(vec!["Chad".into()], MatchMode::Lowercase, 5);
        let mut panel = SuggestionPanel::default();
        panel.refresh(&index, "ch");
        assert_eq!(panel.select(3), None);
        assert!(panel.is_visible());
    }
}
