// crates/geofuse-core/src/error.rs

use thiserror::Error;

/// Errors raised at the I/O boundary of the crate.
///
/// The engine itself (classification, normalization, filtering,
/// reconciliation) is total: malformed input degrades to a documented
/// default instead of failing. `GeoFuseError` therefore only shows up when
/// reading source files or fetching datasets.
#[derive(Debug, Error)]
pub enum GeoFuseError {
    #[error("{0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[cfg(feature = "fetch")]
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeoFuseError>;
