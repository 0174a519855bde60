// crates/geofuse-core/src/loader/fetch.rs

//! # API Loader
//!
//! Feature-gated alternative to the file loader: pulls the four
//! collections from the dashboard API instead of local files. Each
//! endpoint already serves its features kind-stamped; the
//! partial-availability policy is the same as on disk.

use crate::error::Result;
use crate::kind::Kind;
use crate::model::db::FeatureDb;
use crate::raw::FeatureCollection;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Where the dashboard API lives.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        FetchConfig {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), name)
    }
}

/// Fetch all four sources and assemble a store. Source order matches the
/// file loader so feature ids stay comparable across transports.
pub fn fetch_bundle(config: &FetchConfig) -> FeatureDb {
    let health = fetch_or_empty(config, "health_centers");
    let roads = fetch_or_empty(config, "roads");
    let checkpoints = fetch_or_empty(config, "checkpoints");
    let borders = fetch_or_empty(config, "border_crossings");
    FeatureDb::from_collections(vec![
        (Kind::HealthCenter, health),
        (Kind::Road, roads),
        (Kind::Checkpoint, checkpoints),
        (Kind::BorderCrossing, borders),
    ])
}

/// Fetch and parse one collection.
pub fn fetch_collection(config: &FetchConfig, name: &str) -> Result<FeatureCollection> {
    let url = config.endpoint(name);
    let body = reqwest::blocking::get(&url)?.error_for_status()?.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn fetch_or_empty(config: &FetchConfig, name: &str) -> FeatureCollection {
    match fetch_collection(config, name) {
        Ok(collection) => collection,
        Err(err) => {
            tracing::warn!(
                endpoint = name,
                %err,
                "endpoint unavailable, substituting empty collection"
            );
            FeatureCollection::default()
        }
    }
}
