//! Advanced filtering example for geofuse-rs
//!
//! This example demonstrates combined criteria, lenient criteria parsed
//! straight from UI JSON, language-scoped matching, and marker
//! reconciliation across successive passes.

use geofuse_core::prelude::*;

fn main() -> Result<()> {
    println!("=== geofuse-rs Advanced Filtering Example ===\n");

    let db = FeatureDb::load_bundled();

    // Example 1: Combined criteria
    println!("--- Example 1: Primary roads, 2+ lanes, observed since Dec 2023 ---");
    let criteria = FilterCriteria {
        dataset: Some(Kind::Road),
        since_ms: parse_instant_ms("2023-12-01T00:00:00Z"),
        include_undated: false,
        road: RoadCriteria {
            highway: Some("primary".to_string()),
            lanes_min: Some(2.0),
            ..Default::default()
        },
        ..Default::default()
    };
    for f in db.filter(&criteria) {
        let n = normalize(&f.raw, Some(f.kind));
        println!("- {} ({} lanes)", n.name.en, n.road.and_then(|r| r.lanes).unwrap_or(0.0));
    }
    println!();

    // Example 2: Criteria exactly as a UI submits them
    println!("--- Example 2: Lenient criteria from JSON ---");
    let criteria: FilterCriteria = serde_json::from_str(
        r#"{ "dataset": "road", "sinceMs": "2024-01-01", "road": { "oneway": "YES", "lanesMin": "1" } }"#,
    )?;
    let matches = db.filter(&criteria);
    println!("Matched {} one-way roads observed in 2024:", matches.len());
    for f in &matches {
        let n = normalize(&f.raw, Some(f.kind));
        println!("- {}", n.name.en);
    }
    println!();

    // Example 3: Language-scoped service matching
    println!("--- Example 3: Arabic service filter ---");
    let criteria = FilterCriteria {
        lang: Language::Ar,
        dataset: Some(Kind::HealthCenter),
        health: HealthCriteria {
            service: Some("جراحة".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    for f in db.filter(&criteria) {
        let n = normalize(&f.raw, Some(f.kind));
        println!("- {} / {}", n.name.get(Language::Ar), n.name.en);
    }
    println!();

    // Example 4: Marker reconciliation across passes
    println!("--- Example 4: Marker churn across three passes ---");
    let mut registry: MarkerRegistry<String> = MarkerRegistry::new();
    let passes = [
        ("all datasets", FilterCriteria::default()),
        (
            "checkpoints only",
            FilterCriteria {
                dataset: Some(Kind::Checkpoint),
                ..Default::default()
            },
        ),
        (
            "borders only",
            FilterCriteria {
                dataset: Some(Kind::BorderCrossing),
                ..Default::default()
            },
        ),
    ];
    for (label, criteria) in passes {
        let wanted: Vec<FeatureId> = db.filter(&criteria).iter().map(|f| f.id).collect();
        let delta = registry.sync(&wanted, |id| id.to_string(), |_, _| {});
        println!(
            "{label}: visible {} (+{} -{})",
            registry.len(),
            delta.to_add.len(),
            delta.to_remove.len()
        );
    }
    println!();

    // Example 5: The highlight follows the visible set
    println!("--- Example 5: Highlight lifecycle ---");
    if let Some(first) = registry.ids().first().copied() {
        registry.highlight(first);
        println!("Highlighted: {:?}", registry.highlighted());
    }
    let roads_only = FilterCriteria {
        dataset: Some(Kind::Road),
        ..Default::default()
    };
    let wanted: Vec<FeatureId> = db.filter(&roads_only).iter().map(|f| f.id).collect();
    registry.sync(&wanted, |id| id.to_string(), |_, _| {});
    println!("After switching to roads: {:?}", registry.highlighted());

    Ok(())
}
