// crates/geofuse-core/src/filter.rs

//! # Filter Engine
//!
//! One pass over the feature store against a [`FilterCriteria`]. Stages
//! run cheapest-first: time window, dataset gate, free-text search, then
//! kind-specific criteria. Features are normalized on the fly and the
//! output preserves store order.

use crate::kind::Kind;
use crate::model::db::StampedFeature;
use crate::model::normalize::normalize;
use crate::model::record::{BilingualText, Language, NormalizedRecord, Oneway};
use crate::raw::RawFeature;
use crate::text::{self, equals_folded, fold_key};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Everything one filter pass depends on.
///
/// Deserializes leniently from the camelCase JSON a UI submits: numbers
/// may arrive as strings, the time floor as an epoch or an ISO-8601
/// instant, and empty strings mean "no criterion".
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub lang: Language,
    #[serde(deserialize_with = "lenient_kind")]
    pub dataset: Option<Kind>,
    pub query: String,
    #[serde(deserialize_with = "lenient_ts")]
    pub since_ms: Option<i64>,
    pub include_undated: bool,
    pub health: HealthCriteria,
    pub road: RoadCriteria,
    pub checkpoint: CheckpointCriteria,
    pub border: BorderCriteria,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            lang: Language::default(),
            dataset: None,
            query: String::new(),
            since_ms: None,
            // An open pass keeps undated features visible.
            include_undated: true,
            health: HealthCriteria::default(),
            road: RoadCriteria::default(),
            checkpoint: CheckpointCriteria::default(),
            border: BorderCriteria::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthCriteria {
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub service: Option<String>,
    pub urbanization: Option<String>,
    pub governorate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoadCriteria {
    pub highway: Option<String>,
    #[serde(deserialize_with = "lenient_oneway")]
    pub oneway: Option<Oneway>,
    #[serde(deserialize_with = "lenient_num")]
    pub lanes_min: Option<f64>,
    #[serde(deserialize_with = "lenient_num")]
    pub lanes_max: Option<f64>,
    #[serde(deserialize_with = "lenient_num")]
    pub speed_min: Option<f64>,
    #[serde(deserialize_with = "lenient_num")]
    pub speed_max: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckpointCriteria {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorderCriteria {
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub crossing_type: Option<String>,
    pub status: Option<String>,
}

/* ---- Lenient field parsing ---- */

/// Kind labels form a closed set; an unrecognized non-empty label gates on
/// the unknown bucket rather than failing deserialization.
fn lenient_kind<'de, D>(de: D) -> Result<Option<Kind>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(Kind::parse(s)),
        _ => None,
    }))
}

fn lenient_ts<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_f64().and_then(text::epoch_to_ms),
        Value::String(s) => text::parse_instant_ms(s),
        _ => None,
    }))
}

fn lenient_num<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(text::coerce_number_value))
}

fn lenient_oneway<'de, D>(de: D) -> Result<Option<Oneway>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(|v| v.as_str()).and_then(Oneway::parse))
}

/* ---- The pass ---- */

/// Run one filter pass, returning matches in store order.
pub fn filter_features<'a>(
    features: &'a [StampedFeature],
    criteria: &FilterCriteria,
) -> Vec<&'a StampedFeature> {
    let query = fold_key(criteria.query.trim());
    let matched: Vec<&StampedFeature> = features
        .iter()
        .filter(|f| passes(&normalize(&f.raw, Some(f.kind)), criteria, &query))
        .collect();
    tracing::debug!(
        total = features.len(),
        matched = matched.len(),
        "filter pass"
    );
    matched
}

/// Like [`filter_features`] but yields the raw features a renderer wants.
pub fn apply_filters<'a>(
    features: &'a [StampedFeature],
    criteria: &FilterCriteria,
) -> Vec<&'a RawFeature> {
    filter_features(features, criteria)
        .into_iter()
        .map(|f| &f.raw)
        .collect()
}

/// Anything that can draw a filtered set of features.
pub trait RenderSink {
    fn render_markers(&mut self, features: &[&RawFeature]);
}

/// Filter and hand the surviving raw features to the sink.
pub fn run_filter_pass(
    features: &[StampedFeature],
    criteria: &FilterCriteria,
    sink: &mut dyn RenderSink,
) {
    let filtered = apply_filters(features, criteria);
    sink.render_markers(&filtered);
}

fn passes(n: &NormalizedRecord<'_>, criteria: &FilterCriteria, query: &str) -> bool {
    // Time window. Undated features ride on the include_undated switch;
    // without a floor the window is open and nothing is dropped here.
    if let Some(since) = criteria.since_ms {
        match n.ts_ms {
            Some(ts) => {
                if ts < since {
                    return false;
                }
            }
            None => {
                if !criteria.include_undated {
                    return false;
                }
            }
        }
    }

    // Dataset gate.
    if let Some(dataset) = criteria.dataset {
        if n.kind != dataset {
            return false;
        }
    }

    // Free-text search across bilingual name and type.
    if !query.is_empty() {
        let hit = [&n.name.en, &n.name.ar, &n.type_label.en, &n.type_label.ar]
            .iter()
            .any(|hay| fold_key(hay).contains(query));
        if !hit {
            return false;
        }
    }

    match n.kind {
        Kind::HealthCenter => {
            let h = &criteria.health;
            bilingual_matches(Some(&n.type_label), h.facility_type.as_deref(), criteria.lang)
                && bilingual_matches(n.services.as_ref(), h.service.as_deref(), criteria.lang)
                && bilingual_matches(
                    n.urbanization.as_ref(),
                    h.urbanization.as_deref(),
                    criteria.lang,
                )
                && bilingual_matches(
                    n.governorate.as_ref(),
                    h.governorate.as_deref(),
                    criteria.lang,
                )
        }
        Kind::Road => road_passes(n, &criteria.road),
        Kind::Checkpoint => equals_opt(
            n.country.as_deref(),
            criteria.checkpoint.country.as_deref(),
        ),
        Kind::BorderCrossing => {
            let b = &criteria.border;
            let border = n.border.as_ref();
            equals_opt(n.country.as_deref(), b.country.as_deref())
                && equals_opt(
                    border.and_then(|x| x.crossing_type.as_deref()),
                    b.crossing_type.as_deref(),
                )
                && equals_opt(
                    border.and_then(|x| x.status.as_deref()),
                    b.status.as_deref(),
                )
        }
        // Unknown features carry nothing to screen on beyond the shared
        // stages above.
        Kind::Unknown => true,
    }
}

/// Trimmed, non-empty criterion value. Empty means "no criterion".
fn wanted(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Folded substring match against the active language with an English
/// fallback, so an English selection keeps matching under Arabic display.
fn bilingual_matches(field: Option<&BilingualText>, raw: Option<&str>, lang: Language) -> bool {
    let want = match wanted(raw) {
        Some(w) => w,
        None => return true,
    };
    let field = match field {
        Some(f) => f,
        None => return false,
    };
    let needle = fold_key(want);
    fold_key(field.get(lang)).contains(&needle) || fold_key(&field.en).contains(&needle)
}

/// Folded equality; a feature missing the attribute fails a set criterion.
fn equals_opt(value: Option<&str>, raw: Option<&str>) -> bool {
    match wanted(raw) {
        None => true,
        Some(want) => value.map(|v| equals_folded(v, want)).unwrap_or(false),
    }
}

fn road_passes(n: &NormalizedRecord<'_>, criteria: &RoadCriteria) -> bool {
    let road = n.road.as_ref();

    if let Some(want) = wanted(criteria.highway.as_deref()) {
        if road.and_then(|r| r.highway.as_deref()) != Some(want) {
            return false;
        }
    }
    if let Some(want) = criteria.oneway {
        if road.and_then(|r| r.oneway) != Some(want) {
            return false;
        }
    }

    let (lanes, maxspeed) = match road {
        Some(r) => (r.lanes, r.maxspeed),
        None => (None, None),
    };
    in_bounds(lanes, criteria.lanes_min, criteria.lanes_max)
        && in_bounds(maxspeed, criteria.speed_min, criteria.speed_max)
}

/// Range check. A set bound excludes features that do not carry the
/// attribute at all; zero is an ordinary bound.
fn in_bounds(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let v = match value {
        Some(v) => v,
        None => return false,
    };
    min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
}
