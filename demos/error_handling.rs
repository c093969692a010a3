//! Error handling example for askmap-core
//!
//! Shows the errors a caller can see, and which ones a `Session` swallows.

use askmap_core::extractor::GeminiExtractor;
use askmap_core::prelude::*;
use std::sync::Arc;

struct Mute;

impl SpeechRecognizer for Mute {
    fn start(&self, _locale: &str, _events: askmap_core::voice::SpeechEventSender) -> Result<()> {
        Ok(())
    }

    fn stop(&self) {}
}

fn main() {
    println!("=== askmap Error Handling Example ===\n");

    // 1. No API key configured
    println!("--- Missing API key ---");
    let config = AskMapConfig {
        api_key: None,
        ..AskMapConfig::default()
    };
    let client = askmap_core::http::build_client(&config);
    match client.and_then(|c| GeminiExtractor::new(c, &config)) {
        Ok(_) => println!("unexpected: extractor built"),
        Err(AskMapError::MissingApiKey) => println!("✓ MissingApiKey: {}", AskMapError::MissingApiKey),
        Err(e) => println!("other error: {e}"),
    }
    println!();

    // 2. Broken AI responses
    println!("--- Invalid AI responses ---");
    let bodies = [
        r#"{"candidates": []}"#,
        r#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#,
        "<html>502 Bad Gateway</html>",
    ];
    for body in bodies {
        match parse_response(body) {
            Ok(names) => println!("parsed {names:?}"),
            Err(e) => println!("✓ {e}"),
        }
    }
    println!();

    // 3. A dataset that is not a FeatureCollection
    println!("--- Bad boundary dataset ---");
    match BoundaryAtlas::from_geojson(r#"{"type": "Point", "coordinates": [0, 0]}"#) {
        Ok(atlas) => println!("unexpected: {} features", atlas.len()),
        Err(e) => println!("✓ {e}"),
    }
    println!();

    // 4. Pressing "speak" twice
    println!("--- Voice busy ---");
    let (voice, _events) = VoiceInput::new(Arc::new(Mute), Arc::new(SilentCue), "en-US");
    let first = voice.capture_speech();
    let second = voice.capture_speech();
    println!("first:  {first:?}");
    println!("second: {second:?}");

    println!("\n=== Example completed ===");
}
