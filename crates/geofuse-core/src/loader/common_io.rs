// crates/geofuse-core/src/loader/common_io.rs
use crate::error::{GeoFuseError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Open a source file as a byte stream. With the `compact` feature a
/// `.gz` path is decompressed transparently.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoFuseError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    if path.extension().map(|ext| ext == "gz").unwrap_or(false) {
        return Ok(Box::new(GzDecoder::new(reader)));
    }

    Ok(Box::new(reader))
}
