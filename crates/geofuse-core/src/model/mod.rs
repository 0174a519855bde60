// crates/geofuse-core/src/model/mod.rs

//! # Data Model
//!
//! The layered model: stamped features in a [`FeatureDb`], normalized
//! per-pass into [`NormalizedRecord`] views.

pub mod db;
pub mod normalize;
pub mod record;

pub use db::{FeatureDb, FeatureId, StampedFeature};
pub use normalize::normalize;
pub use record::{BilingualText, BorderInfo, Language, NormalizedRecord, Oneway, RoadInfo};
