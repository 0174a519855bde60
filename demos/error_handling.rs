//! Error handling example for geofuse-rs
//!
//! This example demonstrates the engine's degradation rules and the few
//! places a real error surfaces

use std::path::Path;

use geofuse_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geofuse-rs Error Handling Example ===\n");

    // Example 1: Direct reads fail loudly
    println!("--- Example 1: Reading a missing source directly ---");
    match read_collection(Path::new("data/never_written.geojson")) {
        Ok(c) => println!("✓ Loaded {} features", c.len()),
        Err(e) => println!("✗ Expected failure: {e}"),
    }
    println!();

    // Example 2: The bundle loader degrades per source instead
    println!("--- Example 2: Loading from an empty directory ---");
    let db = FeatureDb::load_bundle(&SourceBundle::in_dir("/tmp/geofuse-missing"));
    println!("Store still usable, {} features\n", db.len());

    // Example 3: Half-formed features survive parsing
    println!("--- Example 3: Tolerant feature parsing ---");
    let collection: FeatureCollection = serde_json::from_str(
        r#"{ "features": [ {}, { "properties": { "NAME": "Lone Clinic" } } ] }"#,
    )?;
    println!("Parsed {} features missing type or geometry members", collection.len());
    for f in &collection.features {
        println!("- classified as {}", classify(f).as_str());
    }
    println!();

    // Example 4: Garbage numerics and timestamps degrade to absent
    println!("--- Example 4: Unparseable attributes ---");
    let feature: RawFeature = serde_json::from_str(
        r#"{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[34.2, 31.3], [34.3, 31.4]] },
            "properties": {
                "tags": { "highway": "primary", "lanes": "several", "maxspeed": "fast" },
                "observed_ts": "sometime last spring"
            }
        }"#,
    )?;
    let n = normalize(&feature, None);
    println!("lanes: {:?}", n.road.as_ref().and_then(|r| r.lanes));
    println!("maxspeed: {:?}", n.road.as_ref().and_then(|r| r.maxspeed));
    println!("timestamp: {:?}", n.ts_ms);
    println!();

    // Example 5: Unknown is an outcome, not an error
    println!("--- Example 5: The unknown bucket ---");
    let stray: RawFeature = serde_json::from_str(
        r#"{ "type": "Feature", "properties": { "comment": "no recognizable shape" } }"#,
    )?;
    println!("Classified as: {}", classify(&stray).as_str());
    println!("Unknown features stay in the store and pass kind-specific filter stages untouched");

    Ok(())
}
