// crates/askmap-core/src/lib.rs

//! # askmap-core
//!
//! Ask a free-text question, get the relevant places outlined on a map.
//!
//! * [`suggestions`]: country-name completion while typing.
//! * [`extractor`]: the generative-AI call that turns a query into names.
//! * [`boundary`] + [`highlighter`]: name → GeoJSON shape → map overlay.
//! * [`voice`]: push-to-talk input.
//! * [`session`]: the orchestrator tying them together behind one
//!   dispatch point.
//!
//! ```rust
//! use askmap_core::prelude::*;
//!
//! let index = SuggestionIndex::with_names(
//!     vec!["France".into(), "Finland".into(), "Peru".into()],
//!     MatchMode::Lowercase,
//!     5,
//! );
//! assert_eq!(index.filter_prefix("f"), vec!["France", "Finland"]);
//! ```

pub mod boundary;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractor;
pub mod highlighter;
#[cfg(feature = "http")]
pub mod http;
pub mod map;
pub mod prelude;
pub mod session;
pub mod suggestions;
pub mod text;
pub mod voice;

use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-exports
pub use crate::config::AskMapConfig;
pub use crate::error::{AskMapError, Result};
pub use crate::session::{SearchFailure, SearchState, Session, UiEvent};

/// Lock ignoring poison: every guarded value stays consistent between
/// statements, so a panicked holder leaves nothing half-written.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
