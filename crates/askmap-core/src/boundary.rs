// crates/askmap-core/src/boundary.rs

//! # Boundary Dataset
//!
//! Resolves a location name to a drawable shape. The external dataset is a
//! GeoJSON `FeatureCollection` whose features carry a `name` property; it is
//! converted once into a [`BoundaryAtlas`] (names + polygon rings + bounds),
//! which is small enough to cache with bincode.

use crate::cache;
use crate::error::{AskMapError, Result};
use crate::map::{Bounds, Polygon, Ring};
use crate::text::{MatchMode, NameMatch};
use async_trait::async_trait;
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

pub const ATLAS_CACHE_NAME: &str = "boundaries";

/// One named feature of the boundary dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub name: String,
    pub polygons: Vec<Polygon>,
    pub bounds: Bounds,
}

impl NameMatch for Boundary {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// The whole boundary dataset, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryAtlas {
    pub boundaries: Vec<Boundary>,
}

impl BoundaryAtlas {
    /// Parse a GeoJSON `FeatureCollection`.
    ///
    /// Features without a string `name` property, or without polygonal
    /// geometry, are skipped.
    pub fn from_geojson(text: &str) -> Result<Self> {
        let geojson: GeoJson = text.parse()?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => {
                return Err(AskMapError::InvalidData(
                    "boundary dataset is not a FeatureCollection".into(),
                ))
            }
        };

        let mut boundaries = Vec::with_capacity(collection.features.len());
        let mut skipped = 0usize;

        for feature in collection.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let polygons = feature
                .geometry
                .as_ref()
                .map(|g| polygons_of(&g.value))
                .unwrap_or_default();

            match (name, Bounds::of_polygons(&polygons)) {
                (Some(name), Some(bounds)) => boundaries.push(Boundary {
                    name,
                    polygons,
                    bounds,
                }),
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "boundary features without name or polygon");
        }

        Ok(Self { boundaries })
    }

    /// First boundary whose name equals `name` (exact, not substring).
    pub fn find(&self, name: &str, mode: MatchMode) -> Option<&Boundary> {
        self.boundaries.iter().find(|b| b.is_named(name, mode))
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boundaries.iter().map(|b| b.name.as_str())
    }
}

fn polygons_of(value: &geojson::Value) -> Vec<Polygon> {
    match value {
        geojson::Value::Polygon(rings) => vec![to_polygon(rings)],
        geojson::Value::MultiPolygon(polys) => polys.iter().map(|p| to_polygon(p)).collect(),
        geojson::Value::GeometryCollection(geoms) => {
            geoms.iter().flat_map(|g| polygons_of(&g.value)).collect()
        }
        _ => Vec::new(),
    }
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Polygon {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| [pos[0], pos[1]])
                .collect::<Ring>()
        })
        .filter(|ring| !ring.is_empty())
        .collect()
}

// -----------------------------------------------------------------------------
// SOURCES
// -----------------------------------------------------------------------------

/// Where the boundary atlas comes from.
#[async_trait]
pub trait BoundarySource: Send + Sync {
    async fn load(&self) -> Result<Arc<BoundaryAtlas>>;
}

/// An atlas that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticBoundarySource {
    atlas: Arc<BoundaryAtlas>,
}

impl StaticBoundarySource {
    pub fn new(atlas: BoundaryAtlas) -> Self {
        Self {
            atlas: Arc::new(atlas),
        }
    }
}

#[async_trait]
impl BoundarySource for StaticBoundarySource {
    async fn load(&self) -> Result<Arc<BoundaryAtlas>> {
        Ok(Arc::clone(&self.atlas))
    }
}

/// Downloads the GeoJSON on every call.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpBoundarySource {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpBoundarySource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl BoundarySource for HttpBoundarySource {
    async fn load(&self) -> Result<Arc<BoundaryAtlas>> {
        tracing::debug!(url = %self.url, "downloading boundary dataset");
        let text = crate::http::get_text(&self.client, &self.url).await?;
        let atlas = BoundaryAtlas::from_geojson(&text)?;
        tracing::debug!(features = atlas.len(), "boundary dataset parsed");
        Ok(Arc::new(atlas))
    }
}

/// Keeps the first successful load for the lifetime of the source, and
/// optionally on disk between runs.
pub struct CachedBoundarySource {
    inner: Arc<dyn BoundarySource>,
    memory: OnceCell<Arc<BoundaryAtlas>>,
    disk: Option<(PathBuf, Duration)>,
}

impl CachedBoundarySource {
    pub fn new(inner: Arc<dyn BoundarySource>) -> Self {
        Self {
            inner,
            memory: OnceCell::new(),
            disk: None,
        }
    }

    /// Also persist the atlas under `dir`, trusting it for `max_age`.
    pub fn with_disk_cache(mut self, dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        let path = cache::cache_path(&dir.into(), ATLAS_CACHE_NAME);
        self.disk = Some((path, max_age));
        self
    }

    async fn load_uncached(&self) -> Result<Arc<BoundaryAtlas>> {
        if let Some((path, max_age)) = &self.disk {
            if let Some(atlas) = cache::read_cached::<BoundaryAtlas>(path, *max_age) {
                tracing::debug!(path = %path.display(), "boundary atlas from disk cache");
                return Ok(Arc::new(atlas));
            }
        }

        let atlas = self.inner.load().await?;

        if let Some((path, _)) = &self.disk {
            if let Err(e) = cache::write_cached(path, atlas.as_ref()) {
                tracing::warn!(path = %path.display(), error = %e, "could not write boundary cache");
            }
        }

        Ok(atlas)
    }
}

#[async_trait]
impl BoundarySource for CachedBoundarySource {
    async fn load(&self) -> Result<Arc<BoundaryAtlas>> {
        self.memory
            .get_or_try_init(|| self.load_uncached())
            .await
            .map(Arc::clone)
    }
}

/// The boundary source `config` asks for: downloaded from
/// `boundaries_url`, kept in memory when `cache_boundaries` is set and on
/// disk when a `cache_dir` is configured as well.
#[cfg(feature = "http")]
pub fn configured_source(
    client: reqwest::Client,
    config: &crate::config::AskMapConfig,
) -> Arc<dyn BoundarySource> {
    let remote: Arc<dyn BoundarySource> = Arc::new(HttpBoundarySource::new(
        client,
        config.boundaries_url.clone(),
    ));
    if !config.cache_boundaries {
        return remote;
    }
    let cached = CachedBoundarySource::new(remote);
    match &config.cache_dir {
        Some(dir) => Arc::new(cached.with_disk_cache(dir.clone(), config.cache_max_age())),
        None => Arc::new(cached),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "FRA", "properties": {"name": "France"},
             "geometry": {"type": "Polygon", "coordinates": [[[-4.0, 43.0], [7.5, 43.0], [7.5, 51.0], [-4.0, 51.0], [-4.0, 43.0]]]}},
            {"type": "Feature", "id": "GRC", "properties": {"name": "Greece"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[20.0, 38.0], [26.0, 38.0], [26.0, 41.5], [20.0, 41.5], [20.0, 38.0]]],
                [[[23.5, 34.8], [26.3, 34.8], [26.3, 35.6], [23.5, 35.6], [23.5, 34.8]]]
             ]}},
            {"type": "Feature", "properties": {"name": "Null Island"}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}},
            {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}}
        ]
    }"#;

    #[test]
    fn parses_named_polygons_only() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        assert_eq!(atlas.names().collect::<Vec<_>>(), vec!["France", "Greece"]);

        let greece = atlas.find("greece", MatchMode::Lowercase).unwrap();
        assert_eq!(greece.polygons.len(), 2);
        assert_eq!(greece.bounds.min_lat, 34.8);
        assert_eq!(greece.bounds.max_lat, 41.5);
    }

    #[test]
    fn lookup_is_exact_not_substring() {
        let atlas = BoundaryAtlas::from_geojson(SAMPLE).unwrap();
        assert!(atlas.find("FRANCE", MatchMode::Lowercase).is_some());
        assert!(atlas.find("fran", MatchMode::Lowercase).is_none());
        assert!(atlas.find("atlantis", MatchMode::Lowercase).is_none());
    }

    #[test]
    fn rejects_non_collections() {
        let err = BoundaryAtlas::from_geojson(
            r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AskMapError::InvalidData(_)));
        assert!(BoundaryAtlas::from_geojson("not json").is_err());
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BoundarySource for CountingSource {
        async fn load(&self) -> Result<Arc<BoundaryAtlas>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(BoundaryAtlas::from_geojson(SAMPLE)?))
        }
    }

    #[tokio::test]
    async fn cached_source_downloads_once() {
        let inner = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedBoundarySource::new(inner.clone());

        for _ in 0..3 {
            assert_eq!(cached.load().await.unwrap().len(), 2);
        }
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disk_cache_survives_a_new_source() {
        let dir = tempfile::tempdir().unwrap();
        let inner = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });

        let first = CachedBoundarySource::new(inner.clone())
            .with_disk_cache(dir.path(), Duration::from_secs(3600));
        first.load().await.unwrap();

        let second = CachedBoundarySource::new(inner.clone())
            .with_disk_cache(dir.path(), Duration::from_secs(3600));
        let atlas = second.load().await.unwrap();

        assert_eq!(atlas.len(), 2);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
