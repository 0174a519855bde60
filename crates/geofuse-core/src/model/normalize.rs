// crates/geofuse-core/src/model/normalize.rs

//! # Feature Normalizer
//!
//! Projects a heterogeneous property bag onto the uniform
//! [`NormalizedRecord`] view. The projection is total: any feature of any
//! shape produces a record, with inapplicable members left absent. Records
//! borrow the raw feature and are recomputed on every pass, so the raw
//! collection stays the single source of truth.

use crate::alias::{
    self, PropMap, BORDER_COUNTRY_KEYS, BORDER_SOURCE_KEYS, BORDER_STATUS_KEYS, BORDER_TYPE_KEYS,
    BORDER_UPDATED_KEYS, NAME_KEYS, TS_KEYS,
};
use crate::kind::{classify, Kind};
use crate::model::record::{BilingualText, BorderInfo, NormalizedRecord, Oneway, RoadInfo};
use crate::raw::RawFeature;
use crate::text;

/// Normalize one feature.
///
/// Pass the kind when it is already known (features stored in a
/// [`FeatureDb`](crate::model::db::FeatureDb) carry theirs); otherwise the
/// feature is classified first.
pub fn normalize<'a>(feature: &'a RawFeature, kind: Option<Kind>) -> NormalizedRecord<'a> {
    let props = &feature.properties;
    let kind = kind.unwrap_or_else(|| classify(feature));

    let road = (kind == Kind::Road).then(|| road_info(props));
    let border = (kind == Kind::BorderCrossing).then(|| border_info(props));

    let country = alias::tag_str(props, "is_in")
        .or_else(|| props.get("is_in").and_then(alias::scalar_str))
        .or_else(|| border.as_ref().and_then(|b| b.country.clone()));

    let type_label = match kind {
        Kind::HealthCenter => piped_field(props, "TYPE"),
        Kind::Road => BilingualText::new(
            road.as_ref()
                .and_then(|r| r.highway.clone())
                .unwrap_or_default(),
            "",
        ),
        Kind::Checkpoint => BilingualText::new("Checkpoint", ""),
        Kind::BorderCrossing => BilingualText::new(
            border
                .as_ref()
                .and_then(|b| b.crossing_type.clone())
                .unwrap_or_else(|| "Border Crossing".to_string()),
            "",
        ),
        Kind::Unknown => BilingualText::default(),
    };

    let (services, urbanization, governorate) = if kind == Kind::HealthCenter {
        (
            Some(piped_field(props, "SERVICES")),
            Some(piped_field(props, "URBANIZATION")),
            Some(piped_field(props, "GOVERNORATE")),
        )
    } else {
        (None, None, None)
    };

    NormalizedRecord {
        kind,
        name: feature_name(props),
        type_label,
        services,
        urbanization,
        governorate,
        country,
        road,
        border,
        ts_ms: feature_ts_ms(props),
        raw: feature,
    }
}

/// Resolve the bilingual name through the alias chain.
///
/// Per language: structured `NAME.{en,ar}`, then language-suffixed props,
/// then nested-tag variants. The plain `tags.name`, flat `NAME` and loose
/// `name` fallbacks apply to English only.
fn feature_name(props: &PropMap) -> BilingualText {
    let en = alias::object_member_str(props, "NAME", "en")
        .or_else(|| alias::first_str(props, &["NAME:EN", "name:en"]))
        .or_else(|| alias::tag_str(props, "name:en"))
        .or_else(|| alias::tag_str(props, "name_en"))
        .or_else(|| alias::tag_str(props, "name"))
        .or_else(|| props.get("NAME").and_then(alias::scalar_str))
        .or_else(|| alias::first_loose(props, NAME_KEYS))
        .unwrap_or_default();
    let ar = alias::object_member_str(props, "NAME", "ar")
        .or_else(|| alias::first_str(props, &["NAME:AR", "name:ar"]))
        .or_else(|| alias::tag_str(props, "name:ar"))
        .or_else(|| alias::tag_str(props, "name_ar"))
        .unwrap_or_default();
    BilingualText::new(en, ar)
}

/// Split a pipe-delimited health field found under an exact key.
fn piped_field(props: &PropMap, key: &str) -> BilingualText {
    BilingualText::from_piped(&alias::first_str(props, &[key]).unwrap_or_default())
}

/// First value under `key`, prop before tag, that coerces to a number.
fn numeric_field(props: &PropMap, key: &str) -> Option<f64> {
    props
        .get(key)
        .and_then(text::coerce_number_value)
        .or_else(|| {
            alias::tags(props)
                .and_then(|t| t.get(key))
                .and_then(text::coerce_number_value)
        })
}

fn road_info(props: &PropMap) -> RoadInfo {
    RoadInfo {
        highway: alias::prop_or_tag(props, "highway"),
        oneway: alias::prop_or_tag(props, "oneway").and_then(|v| Oneway::parse(&v)),
        lanes: numeric_field(props, "lanes"),
        maxspeed: numeric_field(props, "maxspeed"),
    }
}

fn border_info(props: &PropMap) -> BorderInfo {
    BorderInfo {
        crossing_type: alias::first_loose(props, BORDER_TYPE_KEYS),
        status: alias::first_loose(props, BORDER_STATUS_KEYS),
        source: alias::first_loose(props, BORDER_SOURCE_KEYS),
        last_update: alias::first_loose(props, BORDER_UPDATED_KEYS),
        country: alias::first_loose(props, BORDER_COUNTRY_KEYS),
    }
}

/// Walk the timestamp candidates in precedence order and keep the first
/// value that parses. An unparseable candidate does not mask later ones.
fn feature_ts_ms(props: &PropMap) -> Option<i64> {
    TS_KEYS
        .iter()
        .find_map(|k| props.get(*k).and_then(text::parse_ts_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(props: serde_json::Value) -> RawFeature {
        serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [34.45, 31.5] },
            "properties": props,
        }))
        .unwrap()
    }

    fn line_feature(props: serde_json::Value) -> RawFeature {
        serde_json::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[34.4, 31.5], [34.5, 31.6]] },
            "properties": props,
        }))
        .unwrap()
    }

    #[test]
    fn health_center_gets_all_bilingual_fields() {
        let f = feature(json!({
            "NAME": "Al-Shifa Medical Complex|مجمع الشفاء الطبي",
            "TYPE": "Hospital|مستشفى",
            "SERVICES": "Emergency + Surgery|طوارئ + جراحة",
            "GOVERNORATE": "Gaza|غزة",
            "URBANIZATION": "Urban|حضري",
        }));
        let n = normalize(&f, None);
        assert_eq!(n.kind, Kind::HealthCenter);
        assert_eq!(n.type_label.en, "Hospital");
        assert_eq!(n.type_label.ar, "مستشفى");
        assert_eq!(n.services.as_ref().unwrap().en, "Emergency + Surgery");
        assert_eq!(n.governorate.as_ref().unwrap().ar, "غزة");
        assert!(n.road.is_none());
        assert!(n.border.is_none());
    }

    #[test]
    fn health_fields_absent_on_other_kinds() {
        let f = feature(json!({ "tags": { "barrier": "checkpoint", "name": "CP" } }));
        let n = normalize(&f, None);
        assert_eq!(n.kind, Kind::Checkpoint);
        assert!(n.services.is_none());
        assert!(n.urbanization.is_none());
        assert!(n.governorate.is_none());
    }

    #[test]
    fn name_chain_prefers_structured_then_suffixed_then_tags() {
        let structured = feature(json!({
            "NAME": { "en": "Structured", "ar": "منظم" },
            "NAME:EN": "Suffixed",
            "tags": { "name": "Tagged" },
        }));
        assert_eq!(normalize(&structured, None).name.en, "Structured");
        assert_eq!(normalize(&structured, None).name.ar, "منظم");

        let suffixed = feature(json!({
            "NAME:EN": "Suffixed",
            "tags": { "name": "Tagged" },
        }));
        assert_eq!(normalize(&suffixed, None).name.en, "Suffixed");

        let tagged = feature(json!({ "tags": { "name:en": "Tag EN", "name": "Tagged" } }));
        assert_eq!(normalize(&tagged, None).name.en, "Tag EN");
    }

    #[test]
    fn loose_name_alias_is_last_resort() {
        let f = feature(json!({ "Name": "Rafah Crossing", "Status": "Open", "Country": "Egypt" }));
        let n = normalize(&f, None);
        assert_eq!(n.kind, Kind::BorderCrossing);
        assert_eq!(n.name.en, "Rafah Crossing");
        assert_eq!(n.name.ar, "");
    }

    #[test]
    fn road_attributes_coerce_and_gate() {
        let f = line_feature(json!({
            "tags": {
                "highway": "primary",
                "name": "Salah al-Din Road",
                "name:ar": "طريق صلاح الدين",
                "oneway": "YES",
                "lanes": "2 lanes",
                "maxspeed": "60-80",
            },
        }));
        let n = normalize(&f, None);
        assert_eq!(n.kind, Kind::Road);
        let road = n.road.as_ref().unwrap();
        assert_eq!(road.highway.as_deref(), Some("primary"));
        assert_eq!(road.oneway, Some(Oneway::Yes));
        assert_eq!(road.lanes, Some(2.0));
        assert_eq!(road.maxspeed, None);
        assert_eq!(n.type_label.en, "primary");
        assert_eq!(n.name.ar, "طريق صلاح الدين");
    }

    #[test]
    fn empty_numeric_props_fall_through_to_tags() {
        let f = line_feature(json!({
            "lanes": "",
            "tags": { "highway": "secondary", "lanes": 3 },
        }));
        let n = normalize(&f, None);
        assert_eq!(n.road.as_ref().unwrap().lanes, Some(3.0));
    }

    #[test]
    fn border_fields_resolve_loosely() {
        let f = feature(json!({
            "Name": "Erez",
            "Type": "Pedestrian",
            "STATUS": "Closed",
            "Last_Update": "2024-03-01",
            "Country": "Israel",
            "Source": "OCHA",
        }));
        let n = normalize(&f, None);
        assert_eq!(n.kind, Kind::BorderCrossing);
        let b = n.border.as_ref().unwrap();
        assert_eq!(b.crossing_type.as_deref(), Some("Pedestrian"));
        assert_eq!(b.status.as_deref(), Some("Closed"));
        assert_eq!(b.last_update.as_deref(), Some("2024-03-01"));
        assert_eq!(b.source.as_deref(), Some("OCHA"));
        assert_eq!(n.country.as_deref(), Some("Israel"));
        assert_eq!(n.type_label.en, "Pedestrian");
    }

    #[test]
    fn border_type_label_falls_back_to_generic() {
        let f = feature(json!({ "Name": "Unnamed", "Status": "Open" }));
        let n = normalize(&f, None);
        assert_eq!(n.kind, Kind::BorderCrossing);
        assert_eq!(n.type_label.en, "Border Crossing");
    }

    #[test]
    fn country_prefers_tags_over_flat_over_border() {
        let tagged = feature(json!({
            "tags": { "barrier": "checkpoint", "is_in": "Gaza Strip" },
            "is_in": "Flat",
        }));
        assert_eq!(normalize(&tagged, None).country.as_deref(), Some("Gaza Strip"));

        let flat = feature(json!({
            "tags": { "barrier": "checkpoint" },
            "is_in": "Flat",
        }));
        assert_eq!(normalize(&flat, None).country.as_deref(), Some("Flat"));
    }

    #[test]
    fn first_parsable_timestamp_wins() {
        let f = feature(json!({
            "observed_ts": "not a timestamp",
            "observed_at": "2024-01-15T08:30:00Z",
            "last_update": 1_700_000_000,
        }));
        let n = normalize(&f, None);
        assert_eq!(n.ts_ms, Some(1_705_307_400_000));
    }

    #[test]
    fn seconds_scale_epochs_are_promoted() {
        let f = feature(json!({ "observed_ts": 1_700_000_000 }));
        assert_eq!(normalize(&f, None).ts_ms, Some(1_700_000_000_000));

        let g = feature(json!({ "observed_ts": 1_700_000_000_000_i64 }));
        assert_eq!(normalize(&g, None).ts_ms, Some(1_700_000_000_000));
    }

    #[test]
    fn undated_feature_has_no_timestamp() {
        let f = feature(json!({ "NAME": "Clinic|عيادة" }));
        assert_eq!(normalize(&f, None).ts_ms, None);
    }

    #[test]
    fn known_kind_skips_reclassification() {
        let f = feature(json!({ "name": "Plain" }));
        let n = normalize(&f, Some(Kind::Road));
        assert_eq!(n.kind, Kind::Road);
        assert!(n.road.is_some());
    }
}
