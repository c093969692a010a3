mod common;

use askmap_core::prelude::*;
use common::*;
use std::sync::Arc;

fn session_with(index: SuggestionIndex) -> Session {
    Session::new(
        &AskMapConfig::default(),
        Arc::new(ScriptedExtractor::default()),
        Arc::new(RecordingHighlighter::default()),
    )
    .with_suggestions(index)
}

#[test]
fn empty_input_suggests_nothing_and_hides_panel() {
    let session = session_with(loaded_index(MatchMode::Lowercase));

    session.set_query("fr");
    assert!(session.suggestions_visible());

    session.set_query("");
    assert!(session.suggestions().is_empty());
    assert!(!session.suggestions_visible());
}

#[test]
fn unique_prefix_yields_that_name() {
    let index = loaded_index(MatchMode::Lowercase);
    assert_eq!(index.filter_prefix("PER"), vec!["Peru"]);
    assert_eq!(index.filter_prefix("gh"), vec!["Ghana"]);
}

#[test]
fn at_most_five_suggestions_in_source_order() {
    let index = loaded_index(MatchMode::Lowercase);
    let hits = index.filter_prefix("f");
    assert_eq!(
        hits,
        vec!["France", "Finland", "Fiji", "Falkland Islands", "Faroe Islands"]
    );
}

#[test]
fn limit_follows_config() {
    let index = SuggestionIndex::with_names(
        COUNTRIES.iter().map(|s| s.to_string()).collect(),
        MatchMode::Lowercase,
        2,
    );
    assert_eq!(index.filter_prefix("fr").len(), 2);
}

#[tokio::test]
async fn config_cannot_raise_the_limit_past_five() {
    let config = AskMapConfig {
        max_suggestions: 8,
        ..AskMapConfig::default()
    };
    let session = Session::new(
        &config,
        Arc::new(ScriptedExtractor::default()),
        Arc::new(RecordingHighlighter::default()),
    );
    session
        .load_suggestions(&StaticCountrySource::new(COUNTRIES.iter().copied()))
        .await;

    session.set_query("f");
    assert_eq!(session.suggestions().len(), 5);
}

#[test]
fn zero_limit_still_suggests_one() {
    let index = SuggestionIndex::with_names(
        COUNTRIES.iter().map(|s| s.to_string()).collect(),
        MatchMode::Lowercase,
        0,
    );
    assert_eq!(index.filter_prefix("f"), vec!["France"]);
}

#[tokio::test]
async fn selecting_a_suggestion_sets_query_and_hides_panel() {
    let session = session_with(loaded_index(MatchMode::Lowercase));

    session.dispatch(UiEvent::Input("fre".into())).await.unwrap();
    assert_eq!(session.suggestions(), vec!["French Guiana", "French Polynesia"]);
    assert!(session.suggestions_visible());

    session.dispatch(UiEvent::SelectSuggestion(1)).await.unwrap();
    assert_eq!(session.query(), "French Polynesia");
    assert!(!session.suggestions_visible());
}

#[test]
fn diacritics_need_folded_mode() {
    let plain = loaded_index(MatchMode::Lowercase);
    assert!(plain.filter_prefix("cote").is_empty());

    let folded = loaded_index(MatchMode::Folded);
    assert_eq!(folded.filter_prefix("cote"), vec!["Côte d'Ivoire"]);
}

#[tokio::test]
async fn load_fills_the_index_once() {
    let index = SuggestionIndex::new(MatchMode::Lowercase, 5);
    index
        .load(&StaticCountrySource::new(["Chad", "Chile"]))
        .await;
    index
        .load(&StaticCountrySource::new(["China"]))
        .await;

    assert!(index.is_loaded());
    assert_eq!(index.names(), ["Chad", "Chile"]);
}

struct DownSource;

#[async_trait::async_trait]
impl CountrySource for DownSource {
    async fn fetch_names(&self) -> Result<Vec<String>> {
        Err(AskMapError::NotFound("countries endpoint".into()))
    }
}

#[tokio::test]
async fn failed_load_leaves_suggestions_empty() {
    let session = session_with(SuggestionIndex::new(MatchMode::Lowercase, 5));
    session.load_suggestions(&DownSource).await;

    assert!(!session.suggestion_index().is_loaded());
    assert!(session.suggestion_index().load_error().is_some());

    session.set_query("fr");
    assert!(session.suggestions().is_empty());
    assert!(!session.suggestions_visible());
}

#[tokio::test]
async fn disk_cached_names_skip_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let max_age = std::time::Duration::from_secs(3600);

    let warm = DiskCachedCountrySource::new(
        Arc::new(StaticCountrySource::new(["Peru", "Chile"])),
        dir.path(),
        max_age,
    );
    assert_eq!(warm.fetch_names().await.unwrap(), vec!["Peru", "Chile"]);

    let cold = DiskCachedCountrySource::new(Arc::new(DownSource), dir.path(), max_age);
    assert_eq!(cold.fetch_names().await.unwrap(), vec!["Peru", "Chile"]);
}
