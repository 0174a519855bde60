//! Property tests over the total core.
//!
//! Arbitrary property bags must never panic the classifier, normalizer,
//! or filter; the filter must preserve store order; the marker registry
//! must land on exactly the wanted set after any sequence of syncs.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use geofuse_core::prelude::*;

/* ---- Strategies ---- */

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // JSON numbers cannot carry NaN or infinities.
        prop::num::f64::NORMAL.prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
        Just(Value::from("Hospital|مستشفى")),
        Just(Value::from("طوارئ + جراحة")),
        Just(Value::from("Unknown")),
    ]
}

/// Keys skew towards the ones the engine actually screens on.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("NAME".to_string()),
        Just("TYPE".to_string()),
        Just("SERVICES".to_string()),
        Just("GOVERNORATE".to_string()),
        Just("kind".to_string()),
        Just("name".to_string()),
        Just("highway".to_string()),
        Just("status".to_string()),
        Just("country".to_string()),
        Just("observed_ts".to_string()),
        Just("observed_at".to_string()),
        Just("is_in".to_string()),
        "[a-zA-Z_:]{1,10}",
    ]
}

fn arb_feature() -> impl Strategy<Value = RawFeature> {
    let props = prop::collection::btree_map(arb_key(), arb_scalar(), 0..8);
    let tags = prop::collection::btree_map(arb_key(), arb_scalar(), 0..5);
    let geometry = prop_oneof![
        Just(None),
        Just(Some("Point")),
        Just(Some("MultiPoint")),
        Just(Some("LineString")),
        Just(Some("MultiLineString")),
        Just(Some("Polygon")),
    ];
    (props, tags, geometry, any::<bool>()).prop_map(|(props, tags, geometry, nest_tags)| {
        let mut bag: Map<String, Value> = props.into_iter().collect();
        if nest_tags {
            bag.insert(
                "tags".to_string(),
                Value::Object(tags.into_iter().collect()),
            );
        }
        serde_json::from_value(json!({
            "type": "Feature",
            "geometry": geometry.map(|t| json!({ "type": t, "coordinates": [] })),
            "properties": bag,
        }))
        .unwrap()
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop_oneof![Just(Language::En), Just(Language::Ar)],
        prop_oneof![
            Just(None),
            Just(Some(Kind::HealthCenter)),
            Just(Some(Kind::Road)),
            Just(Some(Kind::Checkpoint)),
            Just(Some(Kind::BorderCrossing)),
            Just(Some(Kind::Unknown)),
        ],
        "[ -~]{0,8}",
        prop::option::of(-2_000_000_000_000_i64..2_000_000_000_000),
        any::<bool>(),
    )
        .prop_map(
            |(lang, dataset, query, since_ms, include_undated)| FilterCriteria {
                lang,
                dataset,
                query,
                since_ms,
                include_undated,
                ..Default::default()
            },
        )
}

/* ---- Properties ---- */

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn classification_is_total_and_sticky(feature in arb_feature()) {
        let verdict = classify(&feature);
        let mut stamped = feature.clone();
        stamped
            .properties
            .insert("kind".to_string(), Value::from(verdict.as_str()));
        prop_assert_eq!(classify(&stamped), verdict);
    }

    #[test]
    fn normalization_is_total_and_deterministic(feature in arb_feature()) {
        let n = normalize(&feature, None);
        prop_assert_eq!(n.kind, classify(&feature));
        prop_assert_eq!(n.ts_ms, normalize(&feature, None).ts_ms);
        // Names and labels always come back owned in both languages.
        let _ = (n.name.en.len(), n.name.ar.len(), n.type_label.en.len());
    }

    #[test]
    fn text_folding_is_idempotent(s in "\\PC{0,24}") {
        let folded = fold_key(&s);
        let twice = fold_key(&folded);
        prop_assert_eq!(twice, folded);
    }

    #[test]
    fn coercion_helpers_are_total(s in "\\PC{0,24}") {
        let _ = coerce_number(&s);
        let _ = parse_instant_ms(&s);
    }

    #[test]
    fn filtering_preserves_store_order(
        features in prop::collection::vec(arb_feature(), 0..24),
        criteria in arb_criteria(),
    ) {
        let db = FeatureDb::from_collections(vec![(
            Kind::HealthCenter,
            FeatureCollection::new(features),
        )]);

        let all: Vec<FeatureId> = db.features().iter().map(|f| f.id).collect();
        let matched: Vec<FeatureId> = db.filter(&criteria).iter().map(|f| f.id).collect();

        // Matches form a subsequence of the store's id sequence.
        let mut cursor = all.iter();
        for id in &matched {
            prop_assert!(cursor.any(|x| x == id));
        }

        // Open criteria keep everything.
        prop_assert_eq!(db.filter(&FilterCriteria::default()).len(), db.len());
    }

    #[test]
    fn reconciliation_reaches_the_wanted_state(
        first in prop::collection::vec((0u16..4, 0u32..32), 0..24),
        second in prop::collection::vec((0u16..4, 0u32..32), 0..24),
    ) {
        let first: Vec<FeatureId> = first.iter().map(|&(s, i)| FeatureId::new(s, i)).collect();
        let second: Vec<FeatureId> = second.iter().map(|&(s, i)| FeatureId::new(s, i)).collect();

        let mut registry: MarkerRegistry<u32> = MarkerRegistry::new();
        registry.sync(&first, |_| 0, |_, _| {});
        let delta = registry.sync(&second, |_| 0, |_, _| {});

        // End state is exactly the wanted set.
        let mut expect = second.clone();
        expect.sort_unstable();
        expect.dedup();
        prop_assert_eq!(registry.ids(), expect);

        // The delta touches only the symmetric difference.
        for id in &delta.to_add {
            prop_assert!(!first.contains(id));
            prop_assert!(!delta.to_remove.contains(id));
        }
        for id in &delta.to_remove {
            prop_assert!(!second.contains(id));
        }
    }
}
