//! geofuse-cli — Command-line interface for geofuse-core
//!
//! This binary loads the bundled Gaza datasets (or a custom data
//! directory), classifies them into one feature store, and lets you
//! inspect the store from your terminal: per-kind counts, the facet
//! options a filter UI would offer, single filter passes, and a replay of
//! the time window with per-tick marker churn.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ geofuse-cli stats
//!
//! - Print the facet options, in Arabic
//!   $ geofuse-cli --lang ar facets
//!
//! - Run a filter pass
//!   $ geofuse-cli filter --dataset road --highway primary --lanes-min 2
//!   $ geofuse-cli filter --query shifa --since 2024-01-01
//!   $ geofuse-cli filter --dataset border_crossing --border-status closed --json
//!
//! - Replay the time window in 20 ticks
//!   $ geofuse-cli timeline --steps 20
//!
//! Data source
//! -----------
//!
//! By default the CLI reads the three GeoJSON sources bundled with the
//! `geofuse-core` crate. Use `--data <dir>` to point at a directory with
//! your own `health_centers.geojson`, `checkpoints_roads.geojson` and
//! `border_crossings.geojson` (gzipped variants work with the default
//! `compact` feature). A missing or malformed source degrades to an empty
//! collection with a warning; set RUST_LOG=debug for per-pass counts.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use geofuse_core::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let lang = Language::parse(&args.lang);
    let db = load_store(&args);

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Feature store:");
            println!("  Health centers: {}", stats.health_centers);
            println!("  Roads: {}", stats.roads);
            println!("  Checkpoints: {}", stats.checkpoints);
            println!("  Border crossings: {}", stats.border_crossings);
            if stats.unknown > 0 {
                println!("  Unknown: {}", stats.unknown);
            }
            println!("  Total: {}", stats.total());
        }

        Commands::Facets => {
            let facets = db.facets();
            publish_options(&facets, lang, &mut PrintSink);
        }

        Commands::Filter {
            dataset,
            query,
            since,
            exclude_undated,
            facility_type,
            service,
            urbanization,
            governorate,
            highway,
            oneway,
            lanes_min,
            lanes_max,
            speed_min,
            speed_max,
            checkpoint_country,
            border_country,
            border_type,
            border_status,
            json,
        } => {
            let since_ms = match since.as_deref() {
                Some(raw) => {
                    let parsed = parse_instant_ms(raw);
                    if parsed.is_none() {
                        eprintln!("Ignoring unparseable --since value: {raw}");
                    }
                    parsed
                }
                None => None,
            };

            let criteria = FilterCriteria {
                lang,
                dataset: dataset
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Kind::parse),
                query: query.unwrap_or_default(),
                since_ms,
                include_undated: !exclude_undated,
                health: HealthCriteria {
                    facility_type,
                    service,
                    urbanization,
                    governorate,
                },
                road: RoadCriteria {
                    highway,
                    oneway: oneway.as_deref().and_then(Oneway::parse),
                    lanes_min: lanes_min.as_deref().and_then(coerce_number),
                    lanes_max: lanes_max.as_deref().and_then(coerce_number),
                    speed_min: speed_min.as_deref().and_then(coerce_number),
                    speed_max: speed_max.as_deref().and_then(coerce_number),
                },
                checkpoint: CheckpointCriteria {
                    country: checkpoint_country,
                },
                border: BorderCriteria {
                    country: border_country,
                    crossing_type: border_type,
                    status: border_status,
                },
            };

            if json {
                let mut sink = GeoJsonSink { features: Vec::new() };
                run_filter_pass(db.features(), &criteria, &mut sink);
                let collection = FeatureCollection::new(sink.features);
                println!("{}", serde_json::to_string_pretty(&collection)?);
                return Ok(());
            }

            let matches = db.filter(&criteria);
            if matches.is_empty() {
                println!("No features matched.");
            } else {
                println!("Matched {} of {} features:", matches.len(), db.len());
                for f in &matches {
                    let n = normalize(&f.raw, Some(f.kind));
                    let name = display_name(&n.name, lang);
                    match n.ts_ms.and_then(format_day) {
                        Some(day) => println!(
                            "  {:<6} {:<16} {name}  ({day})",
                            f.id.to_string(),
                            f.kind.as_str()
                        ),
                        None => {
                            println!("  {:<6} {:<16} {name}", f.id.to_string(), f.kind.as_str())
                        }
                    }
                }
            }
        }

        Commands::Timeline { steps, since } => {
            let earliest = db
                .features()
                .iter()
                .filter_map(|f| normalize(&f.raw, Some(f.kind)).ts_ms)
                .min();
            let start = since
                .as_deref()
                .and_then(parse_instant_ms)
                .or(earliest)
                .context("no dated features to replay")?;
            let end = Utc::now().timestamp_millis();
            let span = (end - start).max(0);
            let steps = steps.max(1);

            println!(
                "Replaying {} -> now in {steps} ticks over {} features",
                format_stamp(start),
                db.len()
            );
            let mut registry: MarkerRegistry<()> = MarkerRegistry::new();
            for step in 0..=steps {
                let floor = start + span * i64::from(step) / i64::from(steps);
                let criteria = FilterCriteria {
                    since_ms: Some(floor),
                    include_undated: false,
                    ..Default::default()
                };
                let wanted: Vec<FeatureId> = db.filter(&criteria).iter().map(|f| f.id).collect();
                let delta = registry.sync(&wanted, |_| (), |_, _| {});
                println!(
                    "  tick {step:>3}  since {}  visible {:>4}  +{} -{}",
                    format_stamp(floor),
                    registry.len(),
                    delta.to_add.len(),
                    delta.to_remove.len()
                );
            }
        }
    }

    Ok(())
}

fn load_store(args: &CliArgs) -> FeatureDb {
    #[cfg(feature = "fetch")]
    if let Some(base) = &args.fetch_url {
        return fetch_bundle(&FetchConfig::new(base));
    }

    match &args.data {
        Some(dir) => FeatureDb::load_bundle(&SourceBundle::in_dir(dir)),
        None => FeatureDb::load_bundled(),
    }
}

/// Prefer the active language, fall back to English, then to a placeholder.
fn display_name(name: &BilingualText, lang: Language) -> &str {
    let preferred = name.get(lang);
    if !preferred.is_empty() {
        return preferred;
    }
    if !name.en.is_empty() {
        return &name.en;
    }
    "(unnamed)"
}

fn format_day(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.format("%Y-%m-%d").to_string())
}

fn format_stamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Captures a filter pass as a plain GeoJSON collection for `--json`.
struct GeoJsonSink {
    features: Vec<RawFeature>,
}

impl RenderSink for GeoJsonSink {
    fn render_markers(&mut self, features: &[&RawFeature]) {
        self.features = features.iter().map(|f| (*f).clone()).collect();
    }
}

/// Prints each published facet as a labelled list.
struct PrintSink;

impl OptionSink for PrintSink {
    fn populate_options(&mut self, facet: FacetId, options: &[FacetOption]) {
        if options.is_empty() {
            return;
        }
        println!("{}:", facet.dom_id());
        for o in options {
            if o.value == o.label {
                println!("  - {}", o.label);
            } else {
                println!("  - {} ({})", o.label, o.value);
            }
        }
    }

    fn set_range_hint(&mut self, facet: RangeFacet, bounds: Option<(f64, f64)>) {
        if let Some((lo, hi)) = bounds {
            println!("{}/{}: {lo} .. {hi}", facet.min_dom_id(), facet.max_dom_id());
        }
    }
}
