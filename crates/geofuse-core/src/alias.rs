// crates/geofuse-core/src/alias.rs

//! Centralized property-bag access.
//!
//! All schema aliasing lives here: exact ordered candidates, loose
//! (case-insensitive, whitespace-tolerant) key lookup, and the nested OSM
//! `tags` sub-bag. The classifier and the normalizer go through these
//! helpers, so a new alias is added in exactly one place.

use serde_json::{Map, Value};

/// A raw feature's property bag.
pub type PropMap = Map<String, Value>;

/// Flat health-schema fields; any one of them marks the health shape.
pub const HEALTH_KEYS: &[&str] = &["NAME", "TYPE", "SERVICES", "GOVERNORATE", "URBANIZATION"];

/// Timestamp candidates on the property bag, in precedence order.
pub const TS_KEYS: &[&str] = &[
    "observed_ts",
    "observed_at",
    "last_update",
    "ingested_ts",
    "ingested_at",
    "last_seen_ts",
];

/// Name aliases tried once every structured name candidate came up empty.
pub const NAME_KEYS: &[&str] = &["name"];

// Border-crossing field aliases, looked up loosely so `Type`/`TYPE`/`type`
// collapse to one entry each.
pub const BORDER_TYPE_KEYS: &[&str] = &["type"];
pub const BORDER_STATUS_KEYS: &[&str] = &["status"];
pub const BORDER_SOURCE_KEYS: &[&str] = &["source"];
pub const BORDER_UPDATED_KEYS: &[&str] = &["last_update", "lastUpdate"];
pub const BORDER_COUNTRY_KEYS: &[&str] = &["country"];

/// Stringify a scalar JSON value, trimmed. Objects, arrays, nulls and
/// whitespace-only strings yield `None`.
pub fn scalar_str(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Presence check: null, false, zero and the empty string count as absent,
/// everything else as present.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First non-empty scalar among `keys`, exact key match, in order.
pub fn first_str(props: &PropMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| props.get(*k).and_then(scalar_str))
}

/// Case-insensitive, whitespace-tolerant single-key lookup.
///
/// Scans for a key whose trimmed lowercase form equals `key` and returns
/// its scalar value. Linear, which is fine for the small bags involved.
pub fn loose_str(props: &PropMap, key: &str) -> Option<String> {
    if let Some(v) = props.get(key).and_then(scalar_str) {
        return Some(v);
    }
    props.iter().find_map(|(k, v)| {
        if k.trim().eq_ignore_ascii_case(key) {
            scalar_str(v)
        } else {
            None
        }
    })
}

/// First non-empty scalar among `keys`, each looked up loosely.
pub fn first_loose(props: &PropMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| loose_str(props, k))
}

/// Presence (not value) check over exact keys.
pub fn has_any(props: &PropMap, keys: &[&str]) -> bool {
    keys.iter()
        .any(|k| props.get(*k).map(is_truthy).unwrap_or(false))
}

/// The nested OSM tag sub-bag, when present.
pub fn tags(props: &PropMap) -> Option<&PropMap> {
    match props.get("tags") {
        Some(Value::Object(m)) => Some(m),
        _ => None,
    }
}

/// Tag value by exact key.
pub fn tag_str(props: &PropMap, key: &str) -> Option<String> {
    tags(props).and_then(|t| t.get(key)).and_then(scalar_str)
}

/// Property first, tag second; the usual precedence for OSM-derived fields.
pub fn prop_or_tag(props: &PropMap, key: &str) -> Option<String> {
    props
        .get(key)
        .and_then(scalar_str)
        .or_else(|| tag_str(props, key))
}

/// Member of a structured bilingual object value, e.g. `NAME.en`.
pub fn object_member_str(props: &PropMap, key: &str, member: &str) -> Option<String> {
    match props.get(key) {
        Some(Value::Object(m)) => m.get(member).and_then(scalar_str),
        _ => None,
    }
}
