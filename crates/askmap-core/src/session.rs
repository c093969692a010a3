// crates/askmap-core/src/session.rs

//! # Session
//!
//! The search orchestrator plus the UI state it drives (query, suggestion
//! panel, status text, listening indicator). Everything the page used to
//! keep in globals lives here, and every input arrives through
//! [`Session::dispatch`].

use crate::config::AskMapConfig;
use crate::error::Result;
use crate::extractor::LocationExtractor;
use crate::highlighter::{HighlightOutcome, LocationHighlighter};
use crate::lock;
use crate::map::OverlayId;
use crate::suggestions::{CountrySource, SuggestionIndex, SuggestionPanel};
use crate::voice::{ListenIndicator, SpeechEvent, VoiceInput};
use futures::future::join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const STATUS_THINKING: &str = "Thinking...";
pub const STATUS_NO_RESULTS: &str = "No relevant locations found!";
pub const STATUS_ERROR: &str = "Error processing AI query.";

/// Status line for a successful extraction.
pub fn found_status(locations: &[String]) -> String {
    format!("AI Found: {}", locations.join(", "))
}

/// Why a search ended back in [`SearchState::Idle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The extractor answered with no names.
    NoResults,
    /// The extractor failed; carries the error text.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle { failure: Option<SearchFailure> },
    Searching { query: String },
    Displaying { locations: Vec<String> },
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::Idle { failure: None }
    }
}

/// Every input the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search field now contains this text.
    Input(String),
    /// A suggestion was clicked.
    SelectSuggestion(usize),
    Submit,
    /// The push-to-talk control was pressed.
    SpeakPressed,
    Speech(SpeechEvent),
}

#[derive(Debug, Default)]
struct UiState {
    query: String,
    status: String,
    search: SearchState,
    panel: SuggestionPanel,
}

pub struct Session {
    suggestions: SuggestionIndex,
    extractor: Arc<dyn LocationExtractor>,
    highlighter: Arc<dyn LocationHighlighter>,
    voice: Option<VoiceInput>,
    clear_on_failure: bool,
    generation: AtomicU64,
    ui: Mutex<UiState>,
}

impl Session {
    pub fn new(
        config: &AskMapConfig,
        extractor: Arc<dyn LocationExtractor>,
        highlighter: Arc<dyn LocationHighlighter>,
    ) -> Self {
        Self {
            suggestions: SuggestionIndex::new(config.match_mode, config.max_suggestions),
            extractor,
            highlighter,
            voice: None,
            clear_on_failure: config.clear_on_failure,
            generation: AtomicU64::new(0),
            ui: Mutex::new(UiState::default()),
        }
    }

    /// Wire the network-backed components from `config` and load the
    /// suggestion list. Only a missing API key or a broken HTTP client is
    /// fatal here; a failed suggestion fetch leaves suggestions empty.
    #[cfg(feature = "http")]
    pub async fn connect(
        config: &AskMapConfig,
        surface: Arc<dyn crate::map::MapSurface>,
    ) -> Result<Self> {
        use crate::extractor::GeminiExtractor;
        use crate::highlighter::Highlighter;

        let client = crate::http::build_client(config)?;
        let extractor = GeminiExtractor::new(client.clone(), config)?;
        let boundaries = crate::boundary::configured_source(client.clone(), config);
        let highlighter = Highlighter::new(boundaries, surface, config.match_mode);
        let countries = crate::suggestions::configured_source(client, config);

        let session = Self::new(config, Arc::new(extractor), Arc::new(highlighter));
        session.load_suggestions(countries.as_ref()).await;
        Ok(session)
    }

    pub fn with_voice(mut self, voice: VoiceInput) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Replace the (empty) suggestion index, e.g. with a preloaded one.
    pub fn with_suggestions(mut self, index: SuggestionIndex) -> Self {
        self.suggestions = index;
        self
    }

    /// Fetch the suggestion list. Failures leave suggestions empty.
    pub async fn load_suggestions(&self, source: &dyn CountrySource) {
        self.suggestions.load(source).await;
    }

    /// The single entry point for UI input.
    ///
    /// Only `SpeakPressed` can fail (voice busy, recognizer failed to start);
    /// search failures end up in the status text instead.
    pub async fn dispatch(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Input(text) => self.set_query(text),
            UiEvent::SelectSuggestion(i) => {
                self.select_suggestion(i);
            }
            UiEvent::Submit => {
                self.submit().await;
            }
            UiEvent::SpeakPressed => self.start_listening()?,
            UiEvent::Speech(ev) => self.handle_speech(&ev),
        }
        Ok(())
    }

    /// Set the query text and refresh the suggestion panel for it.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let mut ui = lock(&self.ui);
        ui.panel.refresh(&self.suggestions, &text);
        ui.query = text;
    }

    /// Copy suggestion `i` into the query and hide the panel.
    pub fn select_suggestion(&self, i: usize) -> Option<String> {
        let mut ui = lock(&self.ui);
        let picked = ui.panel.select(i)?;
        ui.query = picked.clone();
        Some(picked)
    }

    /// Search for the current query.
    pub async fn submit(&self) -> SearchState {
        let query = lock(&self.ui).query.clone();
        self.search(&query).await
    }

    /// Run one search: extract, clear, highlight each name.
    ///
    /// Blank queries are ignored. If another search is submitted before
    /// this one's extraction returns, this one is dropped without touching
    /// status or highlights.
    pub async fn search(&self, query: &str) -> SearchState {
        let query = query.trim();
        if query.is_empty() {
            return self.state();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut ui = lock(&self.ui);
            ui.panel.hide();
            ui.status = STATUS_THINKING.to_string();
            ui.search = SearchState::Searching {
                query: query.to_string(),
            };
        }
        tracing::info!(query, generation, "search started");

        let extracted = self.extractor.try_extract(query).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(query, generation, "search superseded");
            return self.state();
        }

        match extracted {
            Ok(locations) if !locations.is_empty() => {
                self.set_outcome(
                    found_status(&locations),
                    SearchState::Displaying {
                        locations: locations.clone(),
                    },
                );
                self.highlighter.clear_highlights();

                let outcomes = join_all(locations.iter().map(|location| {
                    let name = location.to_lowercase();
                    async move { self.highlighter.highlight(&name).await }
                }))
                .await;

                let drawn = outcomes
                    .iter()
                    .filter(|o| matches!(o, HighlightOutcome::Drawn(_)))
                    .count();
                tracing::info!(query, found = locations.len(), drawn, "search displayed");
            }
            Ok(_) => {
                tracing::info!(query, "no locations extracted");
                self.fail(SearchFailure::NoResults, STATUS_NO_RESULTS);
            }
            Err(e) => {
                tracing::error!(query, error = %e, "AI extraction failed");
                self.fail(SearchFailure::Error(e.to_string()), STATUS_ERROR);
            }
        }

        self.state()
    }

    fn fail(&self, failure: SearchFailure, status: &str) {
        if self.clear_on_failure {
            self.highlighter.clear_highlights();
        }
        self.set_outcome(
            status.to_string(),
            SearchState::Idle {
                failure: Some(failure),
            },
        );
    }

    fn set_outcome(&self, status: String, state: SearchState) {
        let mut ui = lock(&self.ui);
        ui.status = status;
        ui.search = state;
    }

    fn start_listening(&self) -> Result<()> {
        match &self.voice {
            Some(voice) => voice.capture_speech(),
            None => {
                tracing::warn!("speak pressed but no voice input is configured");
                Ok(())
            }
        }
    }

    fn handle_speech(&self, event: &SpeechEvent) {
        let Some(voice) = &self.voice else {
            return;
        };
        if let Some(transcript) = voice.handle_event(event) {
            lock(&self.ui).query = transcript;
        }
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    pub fn query(&self) -> String {
        lock(&self.ui).query.clone()
    }

    pub fn status(&self) -> String {
        lock(&self.ui).status.clone()
    }

    pub fn state(&self) -> SearchState {
        lock(&self.ui).search.clone()
    }

    /// Items currently in the suggestion panel.
    pub fn suggestions(&self) -> Vec<String> {
        lock(&self.ui).panel.items().to_vec()
    }

    pub fn suggestions_visible(&self) -> bool {
        lock(&self.ui).panel.is_visible()
    }

    pub fn suggestion_index(&self) -> &SuggestionIndex {
        &self.suggestions
    }

    pub fn listening(&self) -> ListenIndicator {
        self.voice
            .as_ref()
            .map_or(ListenIndicator::Ready, VoiceInput::indicator)
    }

    pub fn active_highlights(&self) -> Vec<OverlayId> {
        self.highlighter.active_highlights()
    }
}
