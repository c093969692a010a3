//! Basic usage example for askmap-core
//!
//! This example demonstrates how to:
//! - Build a suggestion index and filter it while "typing"
//! - Turn a raw AI response into location names
//! - Look those names up in a boundary dataset
//! - Use the folded match mode for names with diacritics
//!
//! Everything runs offline on small inline datasets.

use askmap_core::prelude::*;

const COUNTRIES: &[&str] = &[
    "France", "Finland", "Fiji", "Germany", "Ghana", "Peru", "Côte d'Ivoire",
];

const AI_RESPONSE: &str = r#"{
  "candidates": [{"content": {"role": "model", "parts": [{"text": "France, Germany, Atlantis\n"}]}}]
}"#;

const BOUNDARIES: &str = r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"name": "France"},
   "geometry": {"type": "Polygon", "coordinates": [[[-4.0, 43.0], [7.5, 43.0], [7.5, 51.0], [-4.0, 51.0], [-4.0, 43.0]]]}},
  {"type": "Feature", "properties": {"name": "Germany"},
   "geometry": {"type": "Polygon", "coordinates": [[[6.0, 47.5], [15.0, 47.5], [15.0, 55.0], [6.0, 55.0], [6.0, 47.5]]]}}
]}"#;

fn main() -> Result<()> {
    println!("=== askmap Basic Usage Example ===\n");

    // Example 1: Suggestions while typing
    println!("--- Example 1: Suggestions ---");
    let names: Vec<String> = COUNTRIES.iter().map(|s| s.to_string()).collect();
    let index = SuggestionIndex::with_names(names.clone(), MatchMode::Lowercase, 5);
    for input in ["f", "fi", "GH", "x", ""] {
        println!("{input:>4?} -> {:?}", index.filter_prefix(input));
    }
    println!();

    // Example 2: The prompt and the answer
    println!("--- Example 2: Prompt and AI response ---");
    println!("Prompt: {}", build_prompt("countries that founded the euro"));
    let locations = parse_response(AI_RESPONSE)?;
    println!("Locations: {locations:?}\n");

    // Example 3: Boundaries for each name
    println!("--- Example 3: Boundary lookup ---");
    let atlas = BoundaryAtlas::from_geojson(BOUNDARIES)?;
    println!("Dataset has {} features", atlas.len());
    for name in &locations {
        match atlas.find(&name.to_lowercase(), MatchMode::Lowercase) {
            Some(b) => {
                let [lon, lat] = b.bounds.center();
                println!("✓ {} centered at {lat:.1}, {lon:.1}", b.name);
            }
            None => println!("✗ {name}: not on the map"),
        }
    }
    println!();

    // Example 4: Diacritics
    println!("--- Example 4: Folded matching ---");
    let folded = SuggestionIndex::with_names(names, MatchMode::Folded, 5);
    println!("lowercase 'cote' -> {:?}", index.filter_prefix("cote"));
    println!("folded    'cote' -> {:?}", folded.filter_prefix("cote"));

    println!("\n=== Example completed successfully ===");
    Ok(())
}
