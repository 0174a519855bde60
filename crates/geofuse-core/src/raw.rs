// crates/geofuse-core/src/raw.rs

//! Raw GeoJSON-shaped input types.
//!
//! Property bags stay free-form JSON maps; every downstream view is
//! derived from them and never written back. Parsing is tolerant of
//! missing members so a half-formed feature still enters the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single feature as it arrives from a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub feature_type: String,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn feature_type() -> String {
    "Feature".to_string()
}

impl Default for RawFeature {
    fn default() -> Self {
        RawFeature {
            feature_type: feature_type(),
            geometry: None,
            properties: Map::new(),
        }
    }
}

impl RawFeature {
    /// The geometry's type tag, when a geometry is present.
    pub fn geometry_type(&self) -> Option<&str> {
        self.geometry.as_ref().map(|g| g.kind.as_str())
    }

    pub fn is_line(&self) -> bool {
        matches!(
            self.geometry_type(),
            Some("LineString") | Some("MultiLineString")
        )
    }

    pub fn is_point(&self) -> bool {
        matches!(self.geometry_type(), Some("Point"))
    }

    pub fn is_pointish(&self) -> bool {
        matches!(self.geometry_type(), Some("Point") | Some("MultiPoint"))
    }
}

/// Geometry is opaque to the engine except for its type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// A GeoJSON feature collection, tolerant of missing members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub collection_type: String,
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

impl Default for FeatureCollection {
    fn default() -> Self {
        FeatureCollection {
            collection_type: collection_type(),
            features: Vec::new(),
        }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<RawFeature>) -> Self {
        FeatureCollection {
            features,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
