// crates/askmap-core/src/cache.rs

//! # Disk Cache
//!
//! Persists downloaded datasets (country names, the boundary atlas) as
//! bincode, gzip-compressed when the `compact` feature is on. A cache file
//! is only trusted while it is younger than the configured max age.

use crate::error::{AskMapError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "bin.gz";

/// `<dir>/<name>.<suffix>`
pub fn cache_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{CACHE_SUFFIX}"))
}

/// Reads a cached value if the file exists, is fresh and decodes cleanly.
///
/// Any problem is treated as a cache miss.
pub fn read_cached<T: DeserializeOwned>(path: &Path, max_age: Duration) -> Option<T> {
    if !is_fresh(path, max_age) {
        return None;
    }

    let mut reader = match open_stream(path) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cache unreadable");
            return None;
        }
    };

    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes) {
        tracing::debug!(path = %path.display(), error = %e, "cache unreadable");
        return None;
    }

    match bincode::deserialize::<T>(&bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding corrupt cache");
            None
        }
    }
}

/// Writes ANY serializable value to disk, creating the parent directory.
pub fn write_cached<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    #[cfg(feature = "compact")]
    {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        bincode::serialize_into(&mut encoder, value)?;
        encoder.finish()?.flush()?;
    }

    #[cfg(not(feature = "compact"))]
    {
        let mut writer = writer;
        bincode::serialize_into(&mut writer, value)?;
        writer.flush()?;
    }

    Ok(())
}

fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        AskMapError::NotFound(format!("Cache not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Ok(Box::new(reader))
    }
}

fn is_fresh(path: &Path, max_age: Duration) -> bool {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    match SystemTime::now().duration_since(modified) {
        Ok(age) => age <= max_age,
        // mtime in the future: clock skew, trust it
        Err(_) => true,
    }
}
