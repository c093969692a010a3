mod common;

use askmap_core::prelude::*;
use async_trait::async_trait;
use common::*;
use std::sync::Arc;
use tokio::sync::Notify;

fn highlighter(surface: &Arc<MemorySurface>) -> Highlighter {
    Highlighter::new(
        Arc::new(StaticBoundarySource::new(atlas())),
        surface.clone(),
        MatchMode::Lowercase,
    )
}

#[tokio::test]
async fn draws_and_fits_the_viewport() {
    let surface = Arc::new(MemorySurface::new());
    let h = highlighter(&surface);

    let outcome = h.highlight("peru").await;
    let HighlightOutcome::Drawn(id) = outcome else {
        panic!("expected a drawn overlay, got {outcome:?}");
    };

    assert_eq!(h.active_highlights(), vec![id]);
    let overlays = surface.overlays();
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].1.name, "Peru");
    assert_eq!(overlays[0].1.style, OverlayStyle::highlight());
    assert_eq!(surface.viewport(), overlays[0].1.bounds);
}

#[tokio::test]
async fn clear_empties_the_active_set() {
    let surface = Arc::new(MemorySurface::new());
    let h = highlighter(&surface);

    h.highlight("france").await;
    h.highlight("germany").await;
    assert_eq!(h.active_highlights().len(), 2);

    h.clear_highlights();
    assert!(h.active_highlights().is_empty());
    assert!(surface.overlays().is_empty());

    // clearing twice is harmless
    h.clear_highlights();
    assert!(h.active_highlights().is_empty());
}

#[tokio::test]
async fn unknown_location_is_a_quiet_miss() {
    let surface = Arc::new(MemorySurface::new());
    let h = highlighter(&surface);

    assert_eq!(h.highlight("atlantis").await, HighlightOutcome::NotFound);
    assert!(h.active_highlights().is_empty());
    assert!(surface.overlays().is_empty());
    assert_eq!(surface.viewport(), Bounds::WORLD);
}

struct BrokenSource;

#[async_trait]
impl BoundarySource for BrokenSource {
    async fn load(&self) -> Result<Arc<BoundaryAtlas>> {
        Err(AskMapError::InvalidData("truncated download".into()))
    }
}

#[tokio::test]
async fn unavailable_dataset_draws_nothing() {
    let surface = Arc::new(MemorySurface::new());
    let h = Highlighter::new(Arc::new(BrokenSource), surface.clone(), MatchMode::Lowercase);

    assert_eq!(h.highlight("peru").await, HighlightOutcome::Unavailable);
    assert!(surface.overlays().is_empty());
}

/// Holds the atlas back until released.
struct GatedSource {
    gate: Arc<Notify>,
}

#[async_trait]
impl BoundarySource for GatedSource {
    async fn load(&self) -> Result<Arc<BoundaryAtlas>> {
        self.gate.notified().await;
        Ok(Arc::new(atlas()))
    }
}

#[tokio::test]
async fn clear_during_load_supersedes_the_highlight() {
    let gate = Arc::new(Notify::new());
    let surface = Arc::new(MemorySurface::new());
    let h = Highlighter::new(
        Arc::new(GatedSource { gate: gate.clone() }),
        surface.clone(),
        MatchMode::Lowercase,
    );

    let (outcome, ()) = tokio::join!(h.highlight("france"), async {
        h.clear_highlights();
        gate.notify_one();
    });

    assert_eq!(outcome, HighlightOutcome::Superseded);
    assert!(h.active_highlights().is_empty());
    assert!(surface.overlays().is_empty());
}
