// crates/geofuse-core/src/lib.rs

pub mod alias; // Property-bag lookup tables and helpers
pub mod common;
pub mod error;
pub mod facet; // Facet collection and widget publishing
pub mod filter; // The filter pass
pub mod kind; // Classification heuristics
pub mod loader; // File (and optional API) ingestion
pub mod model;
pub mod prelude;
pub mod raw; // Raw GeoJSON shapes
pub mod reconcile; // Marker registry diffing
pub mod text; // Folding and permissive coercion

// Re-exports
pub use crate::common::FeatureStats;
pub use crate::error::{GeoFuseError, Result};
pub use crate::facet::{
    build_facets, publish_options, FacetId, FacetIndex, FacetOption, OptionSink, RangeFacet,
};
pub use crate::filter::{
    apply_filters, filter_features, run_filter_pass, FilterCriteria, RenderSink,
};
pub use crate::kind::{classify, Kind};
pub use crate::model::{
    normalize, BilingualText, FeatureDb, FeatureId, Language, NormalizedRecord, Oneway,
    StampedFeature,
};
pub use crate::raw::{FeatureCollection, RawFeature};
pub use crate::reconcile::{MarkerRegistry, RenderDelta};
pub use crate::text::{equals_folded, fold_key};
