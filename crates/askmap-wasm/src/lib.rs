//! askmap-wasm: WebAssembly bindings for askmap-core
//!
//! The browser page does its own networking (`fetch`) and speech
//! (`SpeechRecognition`); this crate supplies the parts in between.
//!
//! What it provides
//! ----------------
//! - `init_suggestions(names)` / `suggest(input)`: country-name completion
//! - `build_prompt(query)` / `parse_ai_response(json)`: the AI request text
//!   and the names in its answer
//! - `load_boundaries(geojson)` / `find_boundary(name)`: the shape to draw
//!   for a name, with its bounding box
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { init_suggestions, suggest, build_prompt, parse_ai_response,
//!                load_boundaries, find_boundary } from 'askmap-wasm';
//!
//! await init();
//! const countries = await (await fetch(COUNTRIES_URL)).json();
//! init_suggestions(countries.map(c => c.name.common));
//! load_boundaries(await (await fetch(BOUNDARIES_URL)).text());
//!
//! suggest('fr');                   // ["France", "French Guiana", ...]
//! const body = { contents: [{ parts: [{ text: build_prompt(query) }] }] };
//! const answer = await (await fetch(AI_URL, { method: 'POST', body: JSON.stringify(body) })).text();
//! for (const name of parse_ai_response(answer)) {
//!   const hit = find_boundary(name.toLowerCase());
//!   if (hit) drawPolygons(hit.polygons, hit.bounds);
//! }
//! ```
//!
//! Notes
//! -----
//! - Both datasets are set once per page load; later calls keep the first.
//! - Name lookups are case-insensitive, exact and not diacritic-folded.
use std::sync::OnceLock;
use wasm_bindgen::prelude::*;

use askmap_core::boundary::BoundaryAtlas;
use askmap_core::config::DEFAULT_MAX_SUGGESTIONS;
use askmap_core::extractor;
use askmap_core::suggestions::SuggestionIndex;
use askmap_core::text::MatchMode;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};

static SUGGESTIONS: OnceLock<SuggestionIndex> = OnceLock::new();
static ATLAS: OnceLock<BoundaryAtlas> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing askmap WASM module...".into());
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/* --------------------------------------------------------------------------
   Suggestions
-------------------------------------------------------------------------- */

/// Set the Suggestion List. Returns the number of names now available.
#[wasm_bindgen]
pub fn init_suggestions(names: JsValue) -> Result<usize, JsValue> {
    let names: Vec<String> = from_value(names).map_err(js_error)?;
    let index = SUGGESTIONS.get_or_init(|| {
        SuggestionIndex::with_names(names, MatchMode::Lowercase, DEFAULT_MAX_SUGGESTIONS)
    });
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("✓ {} suggestions", index.len()).into());
    Ok(index.len())
}

/// Up to five names starting with `input`; empty before `init_suggestions`.
#[wasm_bindgen]
pub fn suggest(input: &str) -> js_sys::Array {
    SUGGESTIONS
        .get()
        .map(|index| index.filter_prefix(input))
        .unwrap_or_default()
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
}

/* --------------------------------------------------------------------------
   AI request / response
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn build_prompt(query: &str) -> String {
    extractor::build_prompt(query)
}

/// Location names from a `generateContent` response body.
#[wasm_bindgen]
pub fn parse_ai_response(json: &str) -> Result<JsValue, JsValue> {
    let names = extractor::parse_response(json).map_err(js_error)?;
    to_js(&names)
}

/* --------------------------------------------------------------------------
   Boundaries
-------------------------------------------------------------------------- */

/// Parse and keep the boundary GeoJSON. Returns the number of usable features.
#[wasm_bindgen]
pub fn load_boundaries(geojson: &str) -> Result<usize, JsValue> {
    if let Some(atlas) = ATLAS.get() {
        return Ok(atlas.len());
    }
    let parsed = BoundaryAtlas::from_geojson(geojson).map_err(js_error)?;
    let atlas = ATLAS.get_or_init(|| parsed);
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("✓ Loaded {} boundaries", atlas.len()).into());
    Ok(atlas.len())
}

/// `{ name, polygons, bounds }` for `name`, or `null`.
#[wasm_bindgen]
pub fn find_boundary(name: &str) -> Result<JsValue, JsValue> {
    let hit = ATLAS
        .get()
        .and_then(|atlas| atlas.find(name, MatchMode::Lowercase));
    match hit {
        Some(boundary) => to_js(boundary),
        None => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&format!("Location not found on map: {name}").into());
            Ok(JsValue::NULL)
        }
    }
}
