// crates/geofuse-core/src/facet.rs

//! # Facet Index
//!
//! Scans the feature store and collects, per kind, the discrete values and
//! numeric ranges a filter UI can offer. The index itself is
//! language-neutral; [`publish_options`] projects it into sorted,
//! language-resolved option lists for an [`OptionSink`].

use crate::kind::Kind;
use crate::model::db::StampedFeature;
use crate::model::normalize::normalize;
use crate::model::record::{BilingualText, Language, Oneway};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Facet values observed for health centers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthFacets {
    pub types: Vec<BilingualText>,
    pub services: Vec<BilingualText>,
    pub urbanizations: Vec<BilingualText>,
    pub governorates: Vec<BilingualText>,
}

/// Facet values observed for roads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoadFacets {
    pub highways: Vec<String>,
    pub oneways: Vec<Oneway>,
    /// Observed (min, max) lane count, absent when no road carries one.
    pub lanes: Option<(f64, f64)>,
    /// Observed (min, max) speed limit, absent when no road carries one.
    pub maxspeed: Option<(f64, f64)>,
}

/// Facet values observed for checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckpointFacets {
    pub countries: Vec<String>,
}

/// Facet values observed for border crossings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderFacets {
    pub countries: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
}

/// Everything a filter UI needs to populate its widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetIndex {
    /// Kinds present in the store, in dataset-selector order. Unknown
    /// features never surface here.
    pub kinds: Vec<Kind>,
    pub health: HealthFacets,
    pub road: RoadFacets,
    pub checkpoint: CheckpointFacets,
    pub border: BorderFacets,
}

/// Build the facet index for a slice of stamped features.
///
/// Bilingual facets dedup on their primary label; discrete string facets
/// collect into sorted sets; numeric facets fold into an observed range.
pub fn build_facets(features: &[StampedFeature]) -> FacetIndex {
    let mut types = BTreeMap::new();
    let mut services = BTreeMap::new();
    let mut urbanizations = BTreeMap::new();
    let mut governorates = BTreeMap::new();

    let mut highways = BTreeSet::new();
    let mut oneways = BTreeSet::new();
    let mut lanes = None;
    let mut maxspeed = None;

    let mut checkpoint_countries = BTreeSet::new();
    let mut border_countries = BTreeSet::new();
    let mut border_types = BTreeSet::new();
    let mut border_statuses = BTreeSet::new();

    let mut present = BTreeSet::new();

    for feature in features {
        let n = normalize(&feature.raw, Some(feature.kind));
        present.insert(n.kind);

        match n.kind {
            Kind::HealthCenter => {
                insert_bilingual(&mut types, Some(&n.type_label));
                insert_bilingual(&mut urbanizations, n.urbanization.as_ref());
                insert_bilingual(&mut governorates, n.governorate.as_ref());
                if let Some(sv) = &n.services {
                    for part in split_services(&sv.en) {
                        services.insert(part.to_string(), BilingualText::new(part, ""));
                    }
                    for part in split_services(&sv.ar) {
                        services.insert(part.to_string(), BilingualText::new("", part));
                    }
                }
            }
            Kind::Checkpoint => {
                if let Some(c) = &n.country {
                    checkpoint_countries.insert(c.clone());
                }
            }
            Kind::BorderCrossing => {
                if let Some(c) = &n.country {
                    border_countries.insert(c.clone());
                }
                if let Some(b) = &n.border {
                    if let Some(t) = &b.crossing_type {
                        border_types.insert(t.clone());
                    }
                    if let Some(s) = &b.status {
                        border_statuses.insert(s.clone());
                    }
                }
            }
            Kind::Road => {
                if let Some(r) = &n.road {
                    if let Some(h) = &r.highway {
                        highways.insert(h.clone());
                    }
                    if let Some(o) = r.oneway {
                        oneways.insert(o);
                    }
                    if let Some(v) = r.lanes {
                        widen(&mut lanes, v);
                    }
                    if let Some(v) = r.maxspeed {
                        widen(&mut maxspeed, v);
                    }
                }
            }
            Kind::Unknown => {}
        }
    }

    FacetIndex {
        kinds: DATASET_ORDER
            .iter()
            .copied()
            .filter(|k| present.contains(k))
            .collect(),
        health: HealthFacets {
            types: types.into_values().collect(),
            services: services.into_values().collect(),
            urbanizations: urbanizations.into_values().collect(),
            governorates: governorates.into_values().collect(),
        },
        road: RoadFacets {
            highways: highways.into_iter().collect(),
            oneways: oneways.into_iter().collect(),
            lanes,
            maxspeed,
        },
        checkpoint: CheckpointFacets {
            countries: checkpoint_countries.into_iter().collect(),
        },
        border: BorderFacets {
            countries: border_countries.into_iter().collect(),
            types: border_types.into_iter().collect(),
            statuses: border_statuses.into_iter().collect(),
        },
    }
}

/// Dataset-selector order. Presence in the store decides which appear.
const DATASET_ORDER: &[Kind] = &[
    Kind::HealthCenter,
    Kind::Checkpoint,
    Kind::BorderCrossing,
    Kind::Road,
];

fn insert_bilingual(map: &mut BTreeMap<String, BilingualText>, value: Option<&BilingualText>) {
    if let Some(v) = value {
        if !v.is_empty() {
            map.insert(v.label_key().to_string(), v.clone());
        }
    }
}

/// Split a compound services label on `+`, dropping empty segments.
fn split_services(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('+').map(str::trim).filter(|s| !s.is_empty())
}

fn widen(range: &mut Option<(f64, f64)>, v: f64) {
    *range = Some(match *range {
        Some((lo, hi)) => (lo.min(v), hi.max(v)),
        None => (v, v),
    });
}

/* ---- Publishing ---- */

/// A widget the engine can fill. Names mirror the element ids of the
/// reference frontend so a DOM-backed sink is a direct dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetId {
    Dataset,
    HealthType,
    HealthService,
    HealthUrbanization,
    HealthGovernorate,
    CheckpointCountry,
    BorderCountry,
    BorderType,
    BorderStatus,
    RoadHighway,
    RoadOneway,
}

impl FacetId {
    /// Element id of the select this facet fills.
    pub fn dom_id(&self) -> &'static str {
        match self {
            FacetId::Dataset => "datasetFilter",
            FacetId::HealthType => "typeFilter",
            FacetId::HealthService => "serviceFilter",
            FacetId::HealthUrbanization => "urbanFilter",
            FacetId::HealthGovernorate => "govFilter",
            FacetId::CheckpointCountry => "checkpointCountryFilter",
            FacetId::BorderCountry => "borderCountryFilter",
            FacetId::BorderType => "borderTypeFilter",
            FacetId::BorderStatus => "borderStatusFilter",
            FacetId::RoadHighway => "highwayFilter",
            FacetId::RoadOneway => "onewayFilter",
        }
    }
}

/// A numeric range input pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeFacet {
    Lanes,
    Maxspeed,
}

impl RangeFacet {
    pub fn min_dom_id(&self) -> &'static str {
        match self {
            RangeFacet::Lanes => "lanesMin",
            RangeFacet::Maxspeed => "speedMin",
        }
    }

    pub fn max_dom_id(&self) -> &'static str {
        match self {
            RangeFacet::Lanes => "lanesMax",
            RangeFacet::Maxspeed => "speedMax",
        }
    }
}

/// One entry in a select widget. For bilingual facets the submit value is
/// the resolved display label itself, so round-tripping a selection back
/// into criteria needs no reverse lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

impl FacetOption {
    fn same(text: &str) -> FacetOption {
        FacetOption {
            value: text.to_string(),
            label: text.to_string(),
        }
    }
}

/// Receives resolved option lists. Implementations range from DOM selects
/// to plain collectors in tests.
pub trait OptionSink {
    fn populate_options(&mut self, facet: FacetId, options: &[FacetOption]);

    /// Observed bounds for a numeric input pair, absent when no feature
    /// carries the attribute. Sinks that have no range widgets can ignore
    /// this.
    fn set_range_hint(&mut self, facet: RangeFacet, bounds: Option<(f64, f64)>) {
        let _ = (facet, bounds);
    }
}

/// Project the index into option lists for one display language and hand
/// them to the sink, one facet at a time, in a fixed order.
pub fn publish_options(index: &FacetIndex, lang: Language, sink: &mut dyn OptionSink) {
    sink.populate_options(FacetId::Dataset, &dataset_options(&index.kinds));

    sink.populate_options(FacetId::HealthType, &split_options(&index.health.types, lang));
    sink.populate_options(
        FacetId::HealthService,
        &split_options(&index.health.services, lang),
    );
    sink.populate_options(
        FacetId::HealthUrbanization,
        &split_options(&index.health.urbanizations, lang),
    );
    sink.populate_options(
        FacetId::HealthGovernorate,
        &split_options(&index.health.governorates, lang),
    );

    sink.populate_options(
        FacetId::CheckpointCountry,
        &plain_options(&index.checkpoint.countries),
    );

    sink.populate_options(FacetId::BorderCountry, &plain_options(&index.border.countries));
    sink.populate_options(FacetId::BorderType, &plain_options(&index.border.types));
    sink.populate_options(FacetId::BorderStatus, &plain_options(&index.border.statuses));

    sink.populate_options(FacetId::RoadHighway, &plain_options(&index.road.highways));
    sink.populate_options(FacetId::RoadOneway, &oneway_options(&index.road.oneways));

    sink.set_range_hint(RangeFacet::Lanes, index.road.lanes);
    sink.set_range_hint(RangeFacet::Maxspeed, index.road.maxspeed);
}

fn dataset_options(kinds: &[Kind]) -> Vec<FacetOption> {
    kinds
        .iter()
        .map(|k| FacetOption {
            value: k.as_str().to_string(),
            label: k.label().to_string(),
        })
        .collect()
}

/// Options for a bilingual facet: entries with no label in the active
/// language are dropped, the rest sort by display label.
fn split_options(values: &[BilingualText], lang: Language) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = values
        .iter()
        .filter(|v| !v.get(lang).is_empty())
        .map(|v| FacetOption::same(v.get(lang)))
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

fn plain_options(values: &[String]) -> Vec<FacetOption> {
    values.iter().map(|v| FacetOption::same(v)).collect()
}

fn oneway_options(values: &[Oneway]) -> Vec<FacetOption> {
    values
        .iter()
        .map(|o| FacetOption {
            value: o.as_str().to_string(),
            label: o.as_str().to_uppercase(),
        })
        .collect()
}
