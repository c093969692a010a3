//! A whole search session without network access.
//!
//! The extractor is a small keyword table standing in for the AI, the map
//! is a `MemorySurface`, and input arrives as `UiEvent`s exactly as it
//! would from a page.

use askmap_core::prelude::*;
use async_trait::async_trait;
use std::sync::Arc;

const BOUNDARIES: &str = r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"name": "France"},
   "geometry": {"type": "Polygon", "coordinates": [[[-4.0, 43.0], [7.5, 43.0], [7.5, 51.0], [-4.0, 51.0], [-4.0, 43.0]]]}},
  {"type": "Feature", "properties": {"name": "Germany"},
   "geometry": {"type": "Polygon", "coordinates": [[[6.0, 47.5], [15.0, 47.5], [15.0, 55.0], [6.0, 55.0], [6.0, 47.5]]]}},
  {"type": "Feature", "properties": {"name": "Peru"},
   "geometry": {"type": "Polygon", "coordinates": [[[-81.0, -18.0], [-69.0, -18.0], [-69.0, 0.0], [-81.0, 0.0], [-81.0, -18.0]]]}}
]}"#;

/// Answers with every known country mentioned in the query.
struct KeywordExtractor {
    known: Vec<&'static str>,
}

#[async_trait]
impl LocationExtractor for KeywordExtractor {
    async fn try_extract(&self, query: &str) -> Result<Vec<String>> {
        let query = query.to_lowercase();
        Ok(self
            .known
            .iter()
            .filter(|name| query.contains(&name.to_lowercase()))
            .map(|name| name.to_string())
            .collect())
    }
}

fn print_map(surface: &MemorySurface) {
    let names = surface.overlay_names();
    let [lon, lat] = surface.viewport().center();
    println!("  map: {names:?}, view centered at {lat:.1}, {lon:.1}");
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== askmap Offline Session ===\n");

    let config = AskMapConfig::default();
    let surface = Arc::new(MemorySurface::new());
    let highlighter = Highlighter::new(
        Arc::new(StaticBoundarySource::new(BoundaryAtlas::from_geojson(BOUNDARIES)?)),
        surface.clone(),
        config.match_mode,
    );
    let extractor = KeywordExtractor {
        known: vec!["France", "Germany", "Peru"],
    };

    let session = Session::new(&config, Arc::new(extractor), Arc::new(highlighter));
    session
        .load_suggestions(&StaticCountrySource::new(["France", "Germany", "Ghana", "Peru"]))
        .await;

    // Typing, then picking a suggestion
    session.dispatch(UiEvent::Input("g".into())).await?;
    println!("typed 'g', suggestions: {:?}", session.suggestions());
    session.dispatch(UiEvent::SelectSuggestion(0)).await?;
    println!("picked: {}", session.query());

    for query in [
        "trade between France and Germany",
        "the Inca trail in Peru",
        "somewhere on the moon",
    ] {
        session.dispatch(UiEvent::Input(query.into())).await?;
        session.dispatch(UiEvent::Submit).await?;
        println!("\n> {query}");
        println!("  status: {}", session.status());
        println!("  state: {:?}", session.state());
        print_map(&surface);
    }

    println!("\n=== Session finished ===");
    Ok(())
}
