// crates/askmap-core/src/extractor.rs

//! # AI Location Extractor
//!
//! Asks a generative model to list the locations relevant to a free-text
//! query and parses its comma-separated answer.
//!
//! The contract between prompt and output format is informal: the model is
//! *asked* for `name, name, name` and we take whatever text comes back in the
//! first candidate, split on commas.

use crate::error::{AskMapError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The instruction sent with every query.
pub fn build_prompt(query: &str) -> String {
    format!("List all relevant locations (only names, comma-separated). Query: {query}")
}

/// Split a comma-separated model answer into trimmed, non-empty names.
///
/// ```rust
/// use askmap_core::extractor::split_locations;
///
/// assert_eq!(split_locations(" Paris, Berlin ,\n"), vec!["Paris", "Berlin"]);
/// assert!(split_locations("   ").is_empty());
/// ```
pub fn split_locations(text: &str) -> Vec<String> {
    text.trim()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
pub trait LocationExtractor: Send + Sync {
    /// One attempt, no retry. `Ok(vec![])` means the model found nothing;
    /// `Err` means the request or the response was broken.
    async fn try_extract(&self, query: &str) -> Result<Vec<String>>;

    /// Lossy form of [`LocationExtractor::try_extract`]: failures are logged
    /// and reported as an empty list.
    async fn extract_locations(&self, query: &str) -> Vec<String> {
        match self.try_extract(query).await {
            Ok(locations) => locations,
            Err(e) => {
                tracing::error!(query, error = %e, "AI extraction failed");
                Vec::new()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// generateContent wire types
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-text-part request for `query`.
    pub fn for_query(query: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(build_prompt(query)),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Result<&str> {
        if let Some(err) = &self.error {
            return Err(AskMapError::InvalidResponse(format!(
                "API error {}: {}",
                err.code.unwrap_or_default(),
                err.message
            )));
        }
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| AskMapError::InvalidResponse("no candidates".into()))?;
        candidate
            .content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or_else(|| {
                AskMapError::InvalidResponse("first candidate has no text part".into())
            })
    }
}

/// Parse a `generateContent` response body into location names.
pub fn parse_response(body: &str) -> Result<Vec<String>> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    let text = response.first_text()?;
    tracing::debug!(raw = text.trim(), "AI response");
    Ok(split_locations(text))
}

// -----------------------------------------------------------------------------
// Gemini client
// -----------------------------------------------------------------------------

#[cfg(feature = "http")]
#[derive(Clone)]
pub struct GeminiExtractor {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

#[cfg(feature = "http")]
impl std::fmt::Debug for GeminiExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiExtractor")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "http")]
impl GeminiExtractor {
    /// Fails with [`AskMapError::MissingApiKey`] when the config carries no key.
    pub fn new(client: reqwest::Client, config: &crate::config::AskMapConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AskMapError::MissingApiKey)?;
        Ok(Self {
            client,
            url: config.generate_content_url(),
            api_key,
        })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl LocationExtractor for GeminiExtractor {
    async fn try_extract(&self, query: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::for_query(query))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // error bodies carry {"error": {...}}; prefer that message
            return match parse_response(&body) {
                Err(AskMapError::InvalidResponse(msg)) => Err(AskMapError::InvalidResponse(msg)),
                _ => Err(AskMapError::InvalidResponse(format!("HTTP {status}"))),
            };
        }

        parse_response(&body)
    }
}
