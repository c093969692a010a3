// crates/askmap-core/src/error.rs

use thiserror::Error;

/// Every failure the library can report.
///
/// None of these are fatal to a [`Session`](crate::session::Session): the
/// orchestrator downgrades them to a log line or a generic status string.
/// They exist so that callers who *do* care (the CLI, tests) can tell a
/// failed request apart from an empty answer.
#[derive(Debug, Error)]
pub enum AskMapError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The AI endpoint answered, but not with the `candidates[0].content.parts[0].text` shape.
    #[error("AI response has no usable candidates: {0}")]
    InvalidResponse(String),

    #[error("No API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("A speech recognition session is already active")]
    VoiceBusy,

    #[error("Speech recognition failed: {0}")]
    Speech(String),

    #[error("Audio cue failed: {0}")]
    Audio(String),
}

impl From<geojson::Error> for AskMapError {
    fn from(e: geojson::Error) -> Self {
        AskMapError::GeoJson(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, AskMapError>;
