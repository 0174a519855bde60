// crates/geofuse-core/src/loader/mod.rs

//! # Data Loader
//!
//! Reads the three bundled source files (health centers, the combined
//! checkpoints/roads file, border crossings) and assembles the feature
//! store. Sources load independently: one that is missing or malformed is
//! substituted with an empty collection so a partial deployment still
//! comes up, with the substitution logged at the boundary.

use crate::error::Result;
use crate::kind::Kind;
use crate::model::db::FeatureDb;
use crate::raw::FeatureCollection;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

mod common_io;

#[cfg(feature = "fetch")]
pub mod fetch;

pub use common_io::open_stream;

static BUNDLED_DB: OnceCell<FeatureDb> = OnceCell::new();

pub const HEALTH_FILE: &str = "health_centers.geojson";
pub const COMBINED_FILE: &str = "checkpoints_roads.geojson";
pub const BORDERS_FILE: &str = "border_crossings.geojson";

/// Paths of the three files one deployment ships.
#[derive(Debug, Clone)]
pub struct SourceBundle {
    pub health: PathBuf,
    pub combined: PathBuf,
    pub borders: PathBuf,
}

impl SourceBundle {
    /// The conventional filenames under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        SourceBundle {
            health: dir.join(HEALTH_FILE),
            combined: dir.join(COMBINED_FILE),
            borders: dir.join(BORDERS_FILE),
        }
    }
}

impl Default for SourceBundle {
    fn default() -> Self {
        Self::in_dir(FeatureDb::default_data_dir())
    }
}

impl FeatureDb {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Bundled dataset, loaded once and cached for the process lifetime.
    pub fn load_bundled() -> FeatureDb {
        BUNDLED_DB
            .get_or_init(|| Self::load_bundle(&SourceBundle::default()))
            .clone()
    }

    /// Load a bundle into a store.
    ///
    /// Source order is fixed (health, roads, checkpoints, borders) because
    /// it defines the source ordinal in every feature id.
    pub fn load_bundle(bundle: &SourceBundle) -> FeatureDb {
        let health = read_or_empty(&bundle.health);
        let combined = read_or_empty(&bundle.combined);
        let borders = read_or_empty(&bundle.borders);
        let (checkpoints, roads) = split_combined(combined);
        FeatureDb::from_collections(vec![
            (Kind::HealthCenter, health),
            (Kind::Road, roads),
            (Kind::Checkpoint, checkpoints),
            (Kind::BorderCrossing, borders),
        ])
    }
}

/// Read and parse one GeoJSON collection.
pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let reader = open_stream(path)?;
    Ok(serde_json::from_reader(reader)?)
}

fn read_or_empty(path: &Path) -> FeatureCollection {
    match read_collection(path) {
        Ok(collection) => collection,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                %err,
                "source unavailable, substituting empty collection"
            );
            FeatureCollection::default()
        }
    }
}

/// The combined file carries checkpoints as points and roads as lines.
/// Other geometries have no bucket and are dropped.
fn split_combined(combined: FeatureCollection) -> (FeatureCollection, FeatureCollection) {
    let mut checkpoints = Vec::new();
    let mut roads = Vec::new();
    for feature in combined.features {
        match feature.geometry_type() {
            Some("Point") => checkpoints.push(feature),
            Some("LineString") => roads.push(feature),
            other => {
                tracing::debug!(geometry = ?other, "combined source feature skipped");
            }
        }
    }
    (
        FeatureCollection::new(checkpoints),
        FeatureCollection::new(roads),
    )
}
