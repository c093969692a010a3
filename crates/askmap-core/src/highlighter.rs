// crates/askmap-core/src/highlighter.rs

use crate::boundary::BoundarySource;
use crate::lock;
use crate::map::{MapSurface, Overlay, OverlayId, OverlayStyle};
use crate::text::MatchMode;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// What a single [`LocationHighlighter::highlight`] call did.
///
/// Purely informational: a miss is not an error, and the orchestrator only
/// logs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightOutcome {
    Drawn(OverlayId),
    /// The dataset has no feature with that name.
    NotFound,
    /// The dataset could not be loaded.
    Unavailable,
    /// `clear_highlights` ran while the dataset was loading; nothing drawn.
    Superseded,
}

/// The seam between the orchestrator and whatever draws highlights.
#[async_trait]
pub trait LocationHighlighter: Send + Sync {
    async fn highlight(&self, location_name: &str) -> HighlightOutcome;
    fn clear_highlights(&self);
    fn active_highlights(&self) -> Vec<OverlayId>;
}

#[derive(Debug, Default)]
struct ActiveSet {
    /// Bumped by every clear.
    epoch: u64,
    overlays: Vec<OverlayId>,
}

/// Draws and removes location highlights, and owns the Active Highlight Set.
pub struct Highlighter {
    source: Arc<dyn BoundarySource>,
    surface: Arc<dyn MapSurface>,
    mode: MatchMode,
    active: Mutex<ActiveSet>,
}

impl Highlighter {
    pub fn new(
        source: Arc<dyn BoundarySource>,
        surface: Arc<dyn MapSurface>,
        mode: MatchMode,
    ) -> Self {
        Self {
            source,
            surface,
            mode,
            active: Mutex::new(ActiveSet::default()),
        }
    }
}

#[async_trait]
impl LocationHighlighter for Highlighter {
    /// Look `location_name` up in the boundary dataset and, if present, draw
    /// it, remember the handle and fit the viewport to it.
    async fn highlight(&self, location_name: &str) -> HighlightOutcome {
        let epoch = lock(&self.active).epoch;

        let atlas = match self.source.load().await {
            Ok(atlas) => atlas,
            Err(e) => {
                tracing::warn!(location = location_name, error = %e, "boundary dataset unavailable");
                return HighlightOutcome::Unavailable;
            }
        };

        let Some(boundary) = atlas.find(location_name, self.mode) else {
            tracing::info!(location = location_name, "location not found on map");
            return HighlightOutcome::NotFound;
        };

        let mut active = lock(&self.active);
        if active.epoch != epoch {
            tracing::debug!(location = location_name, "highlight superseded by a newer clear");
            return HighlightOutcome::Superseded;
        }

        let id = self.surface.add_overlay(Overlay {
            name: boundary.name.clone(),
            style: OverlayStyle::highlight(),
            polygons: boundary.polygons.clone(),
            bounds: boundary.bounds,
        });
        active.overlays.push(id);
        self.surface.fit_bounds(boundary.bounds);

        tracing::debug!(location = location_name, %id, "highlighted");
        HighlightOutcome::Drawn(id)
    }

    /// Remove every overlay in the Active Highlight Set and empty it.
    fn clear_highlights(&self) {
        let mut active = lock(&self.active);
        active.epoch += 1;
        for id in active.overlays.drain(..) {
            self.surface.remove_overlay(id);
        }
    }

    /// Handles currently drawn, in the order they were added.
    fn active_highlights(&self) -> Vec<OverlayId> {
        lock(&self.active).overlays.clone()
    }
}
