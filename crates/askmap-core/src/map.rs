// crates/askmap-core/src/map.rs

//! The map rendering surface.
//!
//! Rendering itself belongs to whatever front end hosts the session (a JS
//! map library, a TUI canvas, ...). The core only needs three things from
//! it: add an overlay, remove an overlay, fit the viewport.

use crate::lock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A closed ring of `[lon, lat]` positions.
pub type Ring = Vec<[f64; 2]>;
/// Exterior ring first, holes after.
pub type Polygon = Vec<Ring>;

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Whole-world viewport, the starting view of a fresh surface.
    pub const WORLD: Bounds = Bounds {
        min_lon: -180.0,
        min_lat: -90.0,
        max_lon: 180.0,
        max_lat: 90.0,
    };

    pub fn of_point(p: [f64; 2]) -> Self {
        Self {
            min_lon: p[0],
            min_lat: p[1],
            max_lon: p[0],
            max_lat: p[1],
        }
    }

    pub fn extend(&mut self, p: [f64; 2]) {
        self.min_lon = self.min_lon.min(p[0]);
        self.min_lat = self.min_lat.min(p[1]);
        self.max_lon = self.max_lon.max(p[0]);
        self.max_lat = self.max_lat.max(p[1]);
    }

    /// Bounds of every position in `polygons`, `None` if there are none.
    pub fn of_polygons(polygons: &[Polygon]) -> Option<Bounds> {
        let mut points = polygons.iter().flatten().flatten();
        let mut bounds = Bounds::of_point(*points.next()?);
        for p in points {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub color: String,
    pub weight: u32,
}

impl OverlayStyle {
    /// Outline used for a matched location.
    pub fn highlight() -> Self {
        Self {
            color: "red".to_string(),
            weight: 3,
        }
    }
}

/// Something drawable on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub name: String,
    pub style: OverlayStyle,
    pub polygons: Vec<Polygon>,
    pub bounds: Bounds,
}

/// Handle issued by a [`MapSurface`] for an overlay it has drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait MapSurface: Send + Sync {
    fn add_overlay(&self, overlay: Overlay) -> OverlayId;
    fn remove_overlay(&self, id: OverlayId);
    fn fit_bounds(&self, bounds: Bounds);
}

/// A map surface that just remembers what it was told.
///
/// Used by the CLI to print the resulting map state and by tests to assert
/// on it.
#[derive(Debug)]
pub struct MemorySurface {
    next_id: AtomicU64,
    overlays: Mutex<BTreeMap<OverlayId, Overlay>>,
    viewport: Mutex<Bounds>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            overlays: Mutex::new(BTreeMap::new()),
            viewport: Mutex::new(Bounds::WORLD),
        }
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays currently on the map, in insertion order.
    pub fn overlays(&self) -> Vec<(OverlayId, Overlay)> {
        lock(&self.overlays)
            .iter()
            .map(|(id, o)| (*id, o.clone()))
            .collect()
    }

    pub fn overlay_names(&self) -> Vec<String> {
        lock(&self.overlays).values().map(|o| o.name.clone()).collect()
    }

    pub fn viewport(&self) -> Bounds {
        *lock(&self.viewport)
    }
}

impl MapSurface for MemorySurface {
    fn add_overlay(&self, overlay: Overlay) -> OverlayId {
        let id = OverlayId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.overlays).insert(id, overlay);
        id
    }

    fn remove_overlay(&self, id: OverlayId) {
        if lock(&self.overlays).remove(&id).is_none() {
            tracing::debug!(%id, "remove_overlay: not on the map");
        }
    }

    fn fit_bounds(&self, bounds: Bounds) {
        *lock(&self.viewport) = bounds;
    }
}
