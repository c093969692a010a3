#![cfg(feature = "http")]

use askmap_core::extractor::{GeminiExtractor, LocationExtractor};
use askmap_core::http::build_client;
use askmap_core::{AskMapConfig, AskMapError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/models/test-model:generateContent";

fn config(server: &MockServer) -> AskMapConfig {
    AskMapConfig {
        ai_base_url: server.uri(),
        ai_model: "test-model".into(),
        api_key: Some("test-key".into()),
        ..AskMapConfig::default()
    }
}

fn extractor(server: &MockServer) -> GeminiExtractor {
    let config = config(server);
    GeminiExtractor::new(build_client(&config).unwrap(), &config).unwrap()
}

#[tokio::test]
async fn posts_prompt_with_key_header_and_parses_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [{"parts": [{"text":
                "List all relevant locations (only names, comma-separated). Query: capital of France and Germany"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "Paris, Berlin\n"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let names = extractor(&server)
        .try_extract("capital of France and Germany")
        .await
        .unwrap();
    assert_eq!(names, vec!["Paris", "Berlin"]);
}

#[tokio::test]
async fn api_error_body_message_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    match extractor(&server).try_extract("anything").await {
        Err(AskMapError::InvalidResponse(msg)) => assert!(msg.contains("API key not valid"), "{msg}"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_reports_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>502 Bad Gateway</html>"))
        .mount(&server)
        .await;

    match extractor(&server).try_extract("anything").await {
        Err(AskMapError::InvalidResponse(msg)) => assert!(msg.starts_with("HTTP 502"), "{msg}"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn success_without_candidates_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let extractor = extractor(&server);
    assert!(matches!(
        extractor.try_extract("anything").await,
        Err(AskMapError::InvalidResponse(_))
    ));
    assert!(extractor.extract_locations("anything").await.is_empty());
}

#[test]
fn missing_key_is_rejected_up_front() {
    let config = AskMapConfig {
        api_key: Some("   ".into()),
        ..AskMapConfig::default()
    };
    let client = build_client(&config).unwrap();
    assert!(matches!(
        GeminiExtractor::new(client, &config),
        Err(AskMapError::MissingApiKey)
    ));
}
