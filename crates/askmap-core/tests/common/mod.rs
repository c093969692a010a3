// Shared fakes for the integration tests.
#![allow(dead_code)]

use askmap_core::prelude::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const COUNTRIES: &[&str] = &[
    "France",
    "Finland",
    "Fiji",
    "Falkland Islands",
    "Faroe Islands",
    "French Guiana",
    "French Polynesia",
    "Germany",
    "Ghana",
    "Peru",
    "Côte d'Ivoire",
];

pub const BOUNDARIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "France"},
         "geometry": {"type": "Polygon", "coordinates": [[[-4.0, 43.0], [7.5, 43.0], [7.5, 51.0], [-4.0, 51.0], [-4.0, 43.0]]]}},
        {"type": "Feature", "properties": {"name": "Germany"},
         "geometry": {"type": "Polygon", "coordinates": [[[6.0, 47.5], [15.0, 47.5], [15.0, 55.0], [6.0, 55.0], [6.0, 47.5]]]}},
        {"type": "Feature", "properties": {"name": "Peru"},
         "geometry": {"type": "Polygon", "coordinates": [[[-81.0, -18.0], [-69.0, -18.0], [-69.0, 0.0], [-81.0, 0.0], [-81.0, -18.0]]]}}
    ]
}"#;

pub fn atlas() -> BoundaryAtlas {
    BoundaryAtlas::from_geojson(BOUNDARIES).unwrap()
}

pub fn loaded_index(mode: MatchMode) -> SuggestionIndex {
    SuggestionIndex::with_names(COUNTRIES.iter().map(|s| s.to_string()).collect(), mode, 5)
}

// -----------------------------------------------------------------------------
// Extractor
// -----------------------------------------------------------------------------

/// Answers by query; unknown queries get an empty list. A query listed in
/// `gated` waits for `gate` before answering.
#[derive(Default)]
pub struct ScriptedExtractor {
    answers: HashMap<String, std::result::Result<Vec<String>, String>>,
    gated: Vec<String>,
    pub gate: Arc<Notify>,
    pub calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn answer(mut self, query: &str, names: &[&str]) -> Self {
        self.answers.insert(
            query.to_string(),
            Ok(names.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn fail(mut self, query: &str, message: &str) -> Self {
        self.answers
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    pub fn gated(mut self, query: &str) -> Self {
        self.gated.push(query.to_string());
        self
    }
}

#[async_trait]
impl LocationExtractor for ScriptedExtractor {
    async fn try_extract(&self, query: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.gated.iter().any(|q| q == query) {
            self.gate.notified().await;
        }
        match self.answers.get(query) {
            Some(Ok(names)) => Ok(names.clone()),
            Some(Err(msg)) => Err(AskMapError::InvalidResponse(msg.clone())),
            None => Ok(Vec::new()),
        }
    }
}

// -----------------------------------------------------------------------------
// Highlighter
// -----------------------------------------------------------------------------

/// Records every call as `"clear"` or `"highlight:<name>"`.
#[derive(Default)]
pub struct RecordingHighlighter {
    pub calls: Mutex<Vec<String>>,
    active: Mutex<Vec<OverlayId>>,
    next: AtomicUsize,
}

impl RecordingHighlighter {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn highlighted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("highlight:").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl LocationHighlighter for RecordingHighlighter {
    async fn highlight(&self, location_name: &str) -> HighlightOutcome {
        self.calls
            .lock()
            .unwrap()
            .push(format!("highlight:{location_name}"));
        let id = OverlayId(self.next.fetch_add(1, Ordering::SeqCst) as u64);
        self.active.lock().unwrap().push(id);
        HighlightOutcome::Drawn(id)
    }

    fn clear_highlights(&self) {
        self.calls.lock().unwrap().push("clear".to_string());
        self.active.lock().unwrap().clear();
    }

    fn active_highlights(&self) -> Vec<OverlayId> {
        self.active.lock().unwrap().clone()
    }
}

// -----------------------------------------------------------------------------
// Voice
// -----------------------------------------------------------------------------

/// Counts start/stop calls; optionally refuses to start.
#[derive(Default)]
pub struct FakeRecognizer {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    pub refuse: bool,
    pub locales: Mutex<Vec<String>>,
}

impl SpeechRecognizer for FakeRecognizer {
    fn start(&self, locale: &str, _events: askmap_core::voice::SpeechEventSender) -> Result<()> {
        if self.refuse {
            return Err(AskMapError::Speech("not-allowed".into()));
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.locales.lock().unwrap().push(locale.to_string());
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// A cue whose speaker is unplugged.
pub struct BrokenCue;

impl AudioCue for BrokenCue {
    fn play(&self) -> Result<()> {
        Err(AskMapError::Audio("no output device".into()))
    }
}
