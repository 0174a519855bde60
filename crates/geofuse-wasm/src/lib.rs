//! geofuse-wasm — WebAssembly bindings for geofuse-core
//!
//! This crate exposes a small JS/WASM API built on top of `geofuse-core`
//! for map dashboards. The frontend hands over the raw GeoJSON sources it
//! fetched, then drives the engine: read facet options, submit filter
//! criteria, and apply the returned marker deltas to its own layer group.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`)
//! - `load_features(health, roads, checkpoints, borders)` — parse and
//!   classify the four sources; a bad source degrades to empty
//! - `feature_stats()` — per-kind counts
//! - `build_dropdowns(lang)` — facet options keyed by the element ids the
//!   reference frontend uses, plus numeric range hints
//! - `apply_filter_pass(criteria)` — one pass; returns the matched
//!   features and the minimal `toAdd`/`toRemove` marker delta
//! - `highlight_marker(id)` / `highlighted_marker()` / `clear_highlight()`
//!
//! The module tracks marker *identity* only; the frontend owns the actual
//! Leaflet (or other) marker objects and applies the deltas to them.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { load_features, build_dropdowns, apply_filter_pass } from 'geofuse-wasm';
//!
//! async function main() {
//!   await init();
//!   const [health, combined, borders] = await fetchSources();
//!   console.log(load_features(health, "", "", borders));
//!
//!   for (const { facet, options } of build_dropdowns('en')) {
//!     fillSelect(facet, options);
//!   }
//!
//!   const delta = apply_filter_pass({ dataset: 'road', road: { highway: 'primary' } });
//!   delta.toRemove.forEach(removeMarker);
//!   delta.toAdd.forEach(addMarker);
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Criteria objects use the same camelCase shape the core's
//!   `FilterCriteria` deserializes: numbers may arrive as strings and the
//!   time floor as an epoch or ISO-8601 instant.
//! - All exported functions are `wasm_bindgen` bindings and return plain
//!   types or `JsValue` containing JSON-serializable arrays/objects.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

// Core Imports
use geofuse_core::prelude::*;
use serde_json::{json, Value};
use serde_wasm_bindgen::to_value;

/// Mutable per-module state: the classified store plus the marker
/// registry the deltas are computed against. WASM is single-threaded, so
/// a thread-local cell is all the synchronisation needed.
struct Session {
    db: FeatureDb,
    registry: MarkerRegistry<()>,
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session {
        db: FeatureDb::default(),
        registry: MarkerRegistry::new(),
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing geofuse WASM module...".into());
}

/* --------------------------------------------------------------------------
   Loading
-------------------------------------------------------------------------- */

/// Parse the four GeoJSON sources and assemble the feature store. Each
/// argument degrades to an empty collection on its own; the others still
/// load. Returns the per-kind stats. Any previous store and its marker
/// registry are dropped.
#[wasm_bindgen]
pub fn load_features(health: &str, roads: &str, checkpoints: &str, borders: &str) -> JsValue {
    let db = FeatureDb::from_collections(vec![
        (Kind::HealthCenter, parse_or_empty(health, "health_centers")),
        (Kind::Road, parse_or_empty(roads, "roads")),
        (Kind::Checkpoint, parse_or_empty(checkpoints, "checkpoints")),
        (Kind::BorderCrossing, parse_or_empty(borders, "border_crossings")),
    ]);
    let stats = db.stats();
    web_sys::console::log_1(&format!("✓ Loaded {} features", stats.total()).into());

    SESSION.with(|s| {
        let mut session = s.borrow_mut();
        session.db = db;
        session.registry = MarkerRegistry::new();
    });

    to_value(&stats).unwrap()
}

#[wasm_bindgen]
pub fn feature_stats() -> JsValue {
    SESSION.with(|s| to_value(&s.borrow().db.stats()).unwrap())
}

#[wasm_bindgen]
pub fn feature_count() -> usize {
    SESSION.with(|s| s.borrow().db.len())
}

fn parse_or_empty(raw: &str, source: &str) -> FeatureCollection {
    if raw.trim().is_empty() {
        return FeatureCollection::default();
    }
    match serde_json::from_str(raw) {
        Ok(collection) => collection,
        Err(err) => {
            web_sys::console::warn_1(
                &format!("{source}: unreadable collection, substituting empty ({err})").into(),
            );
            FeatureCollection::default()
        }
    }
}

/* --------------------------------------------------------------------------
   Facets
-------------------------------------------------------------------------- */

/// Facet options for the active language, as an array of
/// `{ facet, options }` entries (element-id keyed) followed by
/// `{ facet, placeholder }` range hints for the numeric inputs.
#[wasm_bindgen]
pub fn build_dropdowns(lang: &str) -> JsValue {
    let lang = Language::parse(lang);
    SESSION.with(|s| {
        let session = s.borrow();
        let facets = session.db.facets();
        let mut sink = Collector::default();
        publish_options(&facets, lang, &mut sink);
        to_value(&sink.entries).unwrap()
    })
}

#[derive(Default)]
struct Collector {
    entries: Vec<Value>,
}

impl OptionSink for Collector {
    fn populate_options(&mut self, facet: FacetId, options: &[FacetOption]) {
        self.entries.push(json!({
            "facet": facet.dom_id(),
            "options": options,
        }));
    }

    fn set_range_hint(&mut self, facet: RangeFacet, bounds: Option<(f64, f64)>) {
        let (lo, hi) = match bounds {
            Some((lo, hi)) => (json!(lo), json!(hi)),
            None => (Value::Null, Value::Null),
        };
        self.entries.push(json!({
            "facet": facet.min_dom_id(),
            "placeholder": lo,
        }));
        self.entries.push(json!({
            "facet": facet.max_dom_id(),
            "placeholder": hi,
        }));
    }
}

/* --------------------------------------------------------------------------
   Filtering
-------------------------------------------------------------------------- */

/// Run one filter pass against the submitted criteria object.
///
/// Returns `{ features, toAdd, toRemove }`: the matched features in store
/// order (each as `{ id, feature }`) and the minimal marker delta since
/// the previous pass. Unreadable criteria degrade to an open pass.
#[wasm_bindgen]
pub fn apply_filter_pass(criteria: JsValue) -> JsValue {
    let criteria: FilterCriteria = match serde_wasm_bindgen::from_value(criteria) {
        Ok(c) => c,
        Err(err) => {
            web_sys::console::warn_1(
                &format!("unreadable criteria, running an open pass ({err})").into(),
            );
            FilterCriteria::default()
        }
    };

    SESSION.with(|s| {
        let mut guard = s.borrow_mut();
        let Session { db, registry } = &mut *guard;

        let matched = db.filter(&criteria);
        let wanted: Vec<FeatureId> = matched.iter().map(|f| f.id).collect();
        let delta = registry.sync(&wanted, |_| (), |_, _| {});

        let features: Vec<Value> = matched
            .iter()
            .map(|f| json!({ "id": f.id.to_string(), "feature": f.raw }))
            .collect();

        to_value(&json!({
            "features": features,
            "toAdd": id_strings(&delta.to_add),
            "toRemove": id_strings(&delta.to_remove),
        }))
        .unwrap()
    })
}

fn id_strings(ids: &[FeatureId]) -> Vec<String> {
    ids.iter().map(FeatureId::to_string).collect()
}

/* --------------------------------------------------------------------------
   Markers
-------------------------------------------------------------------------- */

/// Mark a rendered feature as highlighted. Returns false when the id does
/// not parse or is not currently rendered.
#[wasm_bindgen]
pub fn highlight_marker(id: &str) -> bool {
    match FeatureId::parse(id) {
        Some(id) => SESSION.with(|s| s.borrow_mut().registry.highlight(id)),
        None => false,
    }
}

#[wasm_bindgen]
pub fn highlighted_marker() -> Option<String> {
    SESSION.with(|s| s.borrow().registry.highlighted().map(|id| id.to_string()))
}

#[wasm_bindgen]
pub fn clear_highlight() {
    SESSION.with(|s| s.borrow_mut().registry.clear_highlight());
}

#[wasm_bindgen]
pub fn marker_count() -> usize {
    SESSION.with(|s| s.borrow().registry.len())
}

/// Ids of every currently rendered marker, sorted.
#[wasm_bindgen]
pub fn registered_ids() -> js_sys::Array {
    SESSION.with(|s| {
        let array = js_sys::Array::new();
        for id in s.borrow().registry.ids() {
            array.push(&JsValue::from_str(&id.to_string()));
        }
        array
    })
}
