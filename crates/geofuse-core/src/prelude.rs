// crates/geofuse-core/src/prelude.rs

//! Everything a typical consumer needs, importable in one line.

pub use crate::common::FeatureStats;
pub use crate::error::{GeoFuseError, Result};
pub use crate::facet::{
    build_facets, publish_options, FacetId, FacetIndex, FacetOption, OptionSink, RangeFacet,
};
pub use crate::filter::{
    apply_filters, filter_features, run_filter_pass, BorderCriteria, CheckpointCriteria,
    FilterCriteria, HealthCriteria, RenderSink, RoadCriteria,
};
pub use crate::kind::{classify, Kind};
pub use crate::loader::{read_collection, SourceBundle};
pub use crate::model::{
    normalize, BilingualText, BorderInfo, FeatureDb, FeatureId, Language, NormalizedRecord,
    Oneway, RoadInfo, StampedFeature,
};
pub use crate::raw::{FeatureCollection, RawFeature};
pub use crate::reconcile::{MarkerRegistry, RenderDelta};
pub use crate::text::{coerce_number, equals_folded, fold_key, parse_instant_ms};

#[cfg(feature = "fetch")]
pub use crate::loader::fetch::{fetch_bundle, FetchConfig};
