// crates/geofuse-core/src/kind.rs

//! Dataset kinds and the layered classification heuristics.

use crate::alias::{self, PropMap};
use crate::raw::RawFeature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four dataset kinds plus the explicit fallback.
///
/// `Unknown` is a first-class outcome, not an error: a feature matching no
/// heuristic stays in the collection and is exempt from kind-specific
/// filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    HealthCenter,
    Road,
    Checkpoint,
    BorderCrossing,
    Unknown,
}

impl Kind {
    /// Wire name, as stamped into property bags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::HealthCenter => "health_center",
            Kind::Road => "road",
            Kind::Checkpoint => "checkpoint",
            Kind::BorderCrossing => "border_crossing",
            Kind::Unknown => "unknown",
        }
    }

    /// Display label for the dataset selector.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::HealthCenter => "Health Centers",
            Kind::Road => "Roads",
            Kind::Checkpoint => "Checkpoints",
            Kind::BorderCrossing => "Border Crossings",
            Kind::Unknown => "Unknown",
        }
    }

    /// Parse a wire name. The set is closed: anything unrecognised maps to
    /// `Unknown` rather than failing.
    pub fn parse(s: &str) -> Kind {
        match s.trim().to_ascii_lowercase().as_str() {
            "health_center" => Kind::HealthCenter,
            "road" => Kind::Road,
            "checkpoint" => Kind::Checkpoint,
            "border_crossing" => Kind::BorderCrossing,
            _ => Kind::Unknown,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag equality rules checked against the nested tag bag, first hit wins.
const TAG_RULES: &[(&str, &str, Kind)] = &[
    ("barrier", "checkpoint", Kind::Checkpoint),
    ("checkpoint", "yes", Kind::Checkpoint),
    ("amenity", "border_control", Kind::BorderCrossing),
    ("border_control", "yes", Kind::BorderCrossing),
    ("border_crossing", "yes", Kind::BorderCrossing),
    ("crossing", "border", Kind::BorderCrossing),
];

/// Classify a feature into a [`Kind`].
///
/// Total, pure and deterministic; rules run in a fixed precedence order and
/// the first match wins:
///
/// 1. an explicit `kind` property, taken verbatim
/// 2. any flat health-schema field
/// 3. line geometry with a road signal
/// 4. flat border fields on a point (or geometry-less) feature
/// 5. the tag rule table (barrier/checkpoint/border-control tags)
/// 6. a named point with a containment hint
/// 7. a bare name tag
/// 8. `Unknown`
///
/// An explicit kind always short-circuits the heuristics, so collections
/// stamped at ingestion classify identically on every pass.
pub fn classify(feature: &RawFeature) -> Kind {
    let props = &feature.properties;

    if let Some(explicit) = explicit_kind(props) {
        return explicit;
    }
    if alias::has_any(props, alias::HEALTH_KEYS) {
        return Kind::HealthCenter;
    }
    if feature.is_line() && has_road_signal(props) {
        return Kind::Road;
    }
    if has_flat_border_fields(props) && (feature.is_point() || feature.geometry.is_none()) {
        return Kind::BorderCrossing;
    }
    if let Some(kind) = tag_rule_kind(props) {
        return kind;
    }
    let named = has_name_tag(props);
    if feature.is_pointish() && named && has_containment_hint(props) {
        return Kind::Checkpoint;
    }
    if named {
        // A bare name tag with no stronger signal defaults to checkpoint.
        return Kind::Checkpoint;
    }
    Kind::Unknown
}

fn explicit_kind(props: &PropMap) -> Option<Kind> {
    let v = props.get("kind")?;
    if !alias::is_truthy(v) {
        return None;
    }
    Some(match alias::scalar_str(v) {
        Some(s) => Kind::parse(&s),
        None => Kind::Unknown,
    })
}

fn has_road_signal(props: &PropMap) -> bool {
    ["highway", "lanes", "maxspeed", "name"]
        .iter()
        .any(|k| alias::prop_or_tag(props, k).is_some())
}

fn has_flat_border_fields(props: &PropMap) -> bool {
    alias::first_loose(props, alias::BORDER_COUNTRY_KEYS).is_some()
        || alias::first_loose(props, alias::BORDER_STATUS_KEYS).is_some()
        || alias::first_loose(props, alias::BORDER_TYPE_KEYS).is_some()
}

fn tag_rule_kind(props: &PropMap) -> Option<Kind> {
    let tags = alias::tags(props)?;
    for (key, value, kind) in TAG_RULES {
        let hit = tags
            .get(*key)
            .and_then(alias::scalar_str)
            .map(|v| v.eq_ignore_ascii_case(value))
            .unwrap_or(false);
        if hit {
            return Some(*kind);
        }
    }
    None
}

fn has_name_tag(props: &PropMap) -> bool {
    ["name", "name:en", "name:ar"]
        .iter()
        .any(|k| alias::tag_str(props, k).is_some())
}

fn has_containment_hint(props: &PropMap) -> bool {
    alias::tag_str(props, "is_in").is_some()
        || props.get("is_in").map(alias::is_truthy).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(v: serde_json::Value) -> RawFeature {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn explicit_kind_wins_over_everything() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[0,0],[1,1]]},
            "properties": {"kind": "road", "NAME": "Clinic", "TYPE": "Clinic"}
        }));
        assert_eq!(classify(&f), Kind::Road);
    }

    #[test]
    fn unrecognised_explicit_kind_is_unknown() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"kind": "hospital_ship", "NAME": "x"}
        }));
        assert_eq!(classify(&f), Kind::Unknown);
    }

    #[test]
    fn blank_explicit_kind_falls_through() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"kind": "", "TYPE": "Clinic|عيادة"}
        }));
        assert_eq!(classify(&f), Kind::HealthCenter);
    }

    #[test]
    fn health_schema_fields_classify_as_health() {
        for key in ["NAME", "TYPE", "SERVICES", "GOVERNORATE", "URBANIZATION"] {
            let f = feature(json!({"type": "Feature", "properties": {key: "x"}}));
            assert_eq!(classify(&f), Kind::HealthCenter, "key {key}");
        }
    }

    #[test]
    fn line_with_road_signal_is_road() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[0,0],[1,1]]},
            "properties": {"tags": {"highway": "primary"}}
        }));
        assert_eq!(classify(&f), Kind::Road);

        let unnamed = feature(json!({
            "type": "Feature",
            "geometry": {"type": "LineString", "coordinates": [[0,0],[1,1]]},
            "properties": {}
        }));
        assert_eq!(classify(&unnamed), Kind::Unknown);
    }

    #[test]
    fn flat_border_fields_on_point_are_border() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0,0]},
            "properties": {"Name": "Rafah", "Status": "Open", "Country": "Egypt"}
        }));
        assert_eq!(classify(&f), Kind::BorderCrossing);

        // Geometry-less flat records also count.
        let bare = feature(json!({
            "type": "Feature",
            "properties": {"type": "International"}
        }));
        assert_eq!(classify(&bare), Kind::BorderCrossing);
    }

    #[test]
    fn barrier_tag_beats_border_tags() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0,0]},
            "properties": {"tags": {"barrier": "checkpoint", "crossing": "border"}}
        }));
        assert_eq!(classify(&f), Kind::Checkpoint);
    }

    #[test]
    fn border_control_tags_classify_as_border() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0,0]},
            "properties": {"tags": {"amenity": "border_control"}}
        }));
        assert_eq!(classify(&f), Kind::BorderCrossing);
    }

    #[test]
    fn named_point_with_containment_is_checkpoint() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0,0]},
            "properties": {"tags": {"name": "Netzarim", "is_in": "Gaza Strip"}}
        }));
        assert_eq!(classify(&f), Kind::Checkpoint);
    }

    #[test]
    fn bare_name_tag_falls_back_to_checkpoint() {
        let f = feature(json!({
            "type": "Feature",
            "properties": {"tags": {"name:ar": "حاجز"}}
        }));
        assert_eq!(classify(&f), Kind::Checkpoint);
    }

    #[test]
    fn empty_feature_is_unknown() {
        let f = feature(json!({"type": "Feature", "properties": {}}));
        assert_eq!(classify(&f), Kind::Unknown);
    }

    #[test]
    fn classification_is_idempotent_after_stamping() {
        let mut f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0,0]},
            "properties": {"tags": {"barrier": "checkpoint", "name": "X"}}
        }));
        let first = classify(&f);
        f.properties.insert("kind".into(), json!(first.as_str()));
        assert_eq!(classify(&f), first);
    }
}
