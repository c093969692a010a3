//! askmap prelude: bring the common types and traits into scope.

#![allow(unused_imports)]

pub use crate::boundary::{
    Boundary, BoundaryAtlas, BoundarySource, CachedBoundarySource, StaticBoundarySource,
};
pub use crate::config::AskMapConfig;
pub use crate::error::{AskMapError, Result};
pub use crate::extractor::{build_prompt, parse_response, split_locations, LocationExtractor};
pub use crate::highlighter::{HighlightOutcome, Highlighter, LocationHighlighter};
pub use crate::map::{Bounds, MapSurface, MemorySurface, Overlay, OverlayId, OverlayStyle};
pub use crate::session::{SearchFailure, SearchState, Session, UiEvent};
pub use crate::suggestions::{
    CountrySource, DiskCachedCountrySource, StaticCountrySource, SuggestionIndex,
    SuggestionPanel,
};
pub use crate::text::{fold_key, MatchMode, NameMatch};
pub use crate::voice::{
    AudioCue, ListenIndicator, SilentCue, SpeechEvent, SpeechRecognizer, VoiceInput,
};

#[cfg(feature = "http")]
pub use crate::boundary::HttpBoundarySource;
#[cfg(feature = "http")]
pub use crate::extractor::GeminiExtractor;
#[cfg(feature = "http")]
pub use crate::suggestions::RestCountriesSource;
