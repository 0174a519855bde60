// crates/geofuse-core/src/model/db.rs

//! # Feature Store
//!
//! The in-memory collection of classified features. Features are stamped
//! with a stable identity at ingestion and keep their raw GeoJSON shape;
//! everything downstream (normalization, facets, filtering) is a pure view
//! over this store.

use crate::alias;
use crate::common::FeatureStats;
use crate::facet::{build_facets, FacetIndex};
use crate::filter::{filter_features, FilterCriteria};
use crate::kind::{classify, Kind};
use crate::raw::{FeatureCollection, RawFeature};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Stable identity of a feature: ingestion source ordinal plus position
/// within that source. Assigned once at load time and never derived from
/// feature content, so edits to a property bag do not move markers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FeatureId {
    pub source: u16,
    pub index: u32,
}

impl FeatureId {
    pub fn new(source: u16, index: u32) -> Self {
        FeatureId { source, index }
    }

    /// Parse the `source:index` wire form produced by [`Display`].
    ///
    /// [`Display`]: std::fmt::Display
    pub fn parse(s: &str) -> Option<FeatureId> {
        let (source, index) = s.split_once(':')?;
        Some(FeatureId {
            source: source.trim().parse().ok()?,
            index: index.trim().parse().ok()?,
        })
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.index)
    }
}

/// One ingested feature: identity, effective kind and the raw GeoJSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampedFeature {
    pub id: FeatureId,
    pub kind: Kind,
    pub raw: RawFeature,
}

/// All loaded features in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct FeatureDb {
    features: Vec<StampedFeature>,
}

impl FeatureDb {
    /// Assemble a store from per-source collections.
    ///
    /// Source order defines the `source` ordinal of every [`FeatureId`], so
    /// callers must keep it stable across loads. Each feature is stamped
    /// with its source's kind (unless it already carries a truthy `kind`
    /// property) and then classified; the classifier's verdict is what the
    /// store records, so misfiled features land in their detected bucket.
    pub fn from_collections(sources: Vec<(Kind, FeatureCollection)>) -> FeatureDb {
        let mut features = Vec::new();
        for (source, (kind, collection)) in sources.into_iter().enumerate() {
            for (index, mut raw) in collection.features.into_iter().enumerate() {
                stamp_kind(&mut raw, kind);
                let effective = classify(&raw);
                features.push(StampedFeature {
                    id: FeatureId::new(source as u16, index as u32),
                    kind: effective,
                    raw,
                });
            }
        }
        let db = FeatureDb { features };
        tracing::debug!(features = db.len(), "feature store assembled");
        db
    }

    pub fn features(&self) -> &[StampedFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Look up one feature by identity.
    pub fn get(&self, id: FeatureId) -> Option<&StampedFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Per-kind counts.
    pub fn stats(&self) -> FeatureStats {
        let mut stats = FeatureStats::default();
        for f in &self.features {
            match f.kind {
                Kind::HealthCenter => stats.health_centers += 1,
                Kind::Road => stats.roads += 1,
                Kind::Checkpoint => stats.checkpoints += 1,
                Kind::BorderCrossing => stats.border_crossings += 1,
                Kind::Unknown => stats.unknown += 1,
            }
        }
        stats
    }

    /// Scan the store and collect the facet values UI widgets offer.
    pub fn facets(&self) -> FacetIndex {
        build_facets(&self.features)
    }

    /// Run one filter pass, preserving ingestion order.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&StampedFeature> {
        filter_features(&self.features, criteria)
    }
}

/// Stamp the source kind onto a feature that does not already declare one.
fn stamp_kind(feature: &mut RawFeature, kind: Kind) {
    let declared = feature
        .properties
        .get("kind")
        .map(alias::is_truthy)
        .unwrap_or(false);
    if !declared {
        feature
            .properties
            .insert("kind".to_string(), Value::String(kind.as_str().to_string()));
    }
}
