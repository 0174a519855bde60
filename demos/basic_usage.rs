//! Basic usage example for geofuse-rs
//!
//! This example demonstrates how to:
//! - Load the bundled Gaza datasets
//! - Inspect per-kind statistics
//! - Read normalized, bilingual views of raw features
//! - Run a first filter pass

use geofuse_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geofuse-rs Basic Usage Example ===\n");

    // Load the bundled feature store
    println!("Loading bundled datasets...");
    let db = FeatureDb::load_bundled();
    println!("✓ Store assembled successfully\n");

    // Example 1: Per-kind statistics
    println!("--- Example 1: Feature statistics ---");
    let stats = db.stats();
    println!("Health centers: {}", stats.health_centers);
    println!("Roads: {}", stats.roads);
    println!("Checkpoints: {}", stats.checkpoints);
    println!("Border crossings: {}", stats.border_crossings);
    println!("Total: {}\n", stats.total());

    // Example 2: Normalized views of the raw property bags
    println!("--- Example 2: Normalized feature views ---");
    for f in db.features().iter().take(5) {
        let n = normalize(&f.raw, Some(f.kind));
        let ar = if n.name.ar.is_empty() { "-" } else { &n.name.ar };
        println!("{}. [{}] {} / {}", f.id, f.kind.as_str(), n.name.en, ar);
    }
    println!("... and {} more\n", db.len() - 5);

    // Example 3: Facet options for the filter widgets
    println!("--- Example 3: Observed facet values ---");
    let facets = db.facets();
    let datasets: Vec<_> = facets.kinds.iter().map(|k| k.label()).collect();
    println!("Datasets: {datasets:?}");
    println!("Highways: {:?}", facets.road.highways);
    if let Some((lo, hi)) = facets.road.lanes {
        println!("Lanes observed: {lo} .. {hi}");
    }
    println!();

    // Example 4: A first filter pass
    println!("--- Example 4: Filter down to roads ---");
    let criteria = FilterCriteria {
        dataset: Some(Kind::Road),
        ..Default::default()
    };
    let matches = db.filter(&criteria);
    println!("Matched {} roads:", matches.len());
    for f in &matches {
        let n = normalize(&f.raw, Some(f.kind));
        println!("- {} ({})", n.name.en, n.type_label.en);
    }
    println!();

    // Example 5: Arabic display labels
    println!("--- Example 5: Arabic display labels ---");
    let health = db
        .features()
        .iter()
        .filter(|f| f.kind == Kind::HealthCenter)
        .take(3);
    for f in health {
        let n = normalize(&f.raw, Some(f.kind));
        println!(
            "- {} ({})",
            n.name.get(Language::Ar),
            n.type_label.get(Language::Ar)
        );
    }

    Ok(())
}
