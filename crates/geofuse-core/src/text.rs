// crates/geofuse-core/src/text.rs

//! Text folding and permissive coercion helpers.
//!
//! Everything here is total: malformed input degrades to `None` or an
//! empty string, never to an error or a panic.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Epoch numbers below this are taken as seconds and scaled to milliseconds.
const EPOCH_MS_THRESHOLD: f64 = 2.0e10;

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// The implementation uses the `deunicode` crate to perform a best-effort
/// transliteration from Unicode to ASCII.
///
/// # Examples
///
/// ```rust
/// use geofuse_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Straße"), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding.
///
/// Case-insensitive and accent-insensitive: both sides are transliterated
/// to ASCII and lowercased before comparison.
///
/// # Examples
///
/// ```rust
/// use geofuse_core::text::equals_folded;
///
/// assert!(equals_folded("Łódź", "lodz"));
/// assert!(equals_folded("MÜNCHEN", "munchen"));
/// assert!(!equals_folded("Rafah", "Erez"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Permissive numeric extraction for lane counts and speed limits.
///
/// Keeps digits, decimal points and minus signs, discards everything else,
/// then parses. `"2 lanes"` becomes `2.0`, `"60 km/h"` becomes `60.0`,
/// `""` and `"n/a"` become `None`. Non-finite results are rejected.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if filtered.is_empty() {
        return None;
    }
    filtered.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract a finite number from a free-form JSON value.
///
/// Numbers pass through; strings go through [`coerce_number`]; anything
/// else is absent.
pub fn coerce_number_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => coerce_number(s),
        _ => None,
    }
}

/// Scale a raw epoch number into milliseconds using the threshold rule.
pub fn epoch_to_ms(v: f64) -> Option<i64> {
    if !v.is_finite() {
        return None;
    }
    Some(if v < EPOCH_MS_THRESHOLD {
        (v * 1000.0) as i64
    } else {
        v as i64
    })
}

/// Interpret a raw JSON value as an epoch-milliseconds instant.
///
/// Numbers are epoch seconds or milliseconds, disambiguated by a 2e10
/// threshold. Strings go through ISO-8601 parsing; naive timestamps are
/// treated as UTC. Anything else is absent.
pub fn parse_ts_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(epoch_to_ms),
        Value::String(s) => parse_iso_ms(s),
        _ => None,
    }
}

/// Parse an ISO-8601 date or datetime string into epoch milliseconds.
///
/// Accepts an explicit offset (RFC 3339), a naive datetime down to minute
/// precision, or a bare date; naive forms are taken as UTC.
pub fn parse_iso_ms(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = day.and_hms_opt(0, 0, 0)?;
        return Some(midnight.and_utc().timestamp_millis());
    }
    None
}

/// Parse a user-supplied instant: epoch seconds/millis or an ISO-8601 string.
///
/// The numeric form is accepted here (CLI flags, criteria objects) but not
/// for feature property strings, which only ever carry ISO text.
pub fn parse_instant_ms(s: &str) -> Option<i64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(n) = t.parse::<f64>() {
        return epoch_to_ms(n);
    }
    parse_iso_ms(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(fold_key("Łódź"), "lodz");
        assert!(equals_folded("EGYPT", "egypt"));
        assert!(equals_folded("Zürich", "zurich"));
    }

    #[test]
    fn coerces_units_and_noise() {
        assert_eq!(coerce_number("2 lanes"), Some(2.0));
        assert_eq!(coerce_number("60 km/h"), Some(60.0));
        assert_eq!(coerce_number("3.5"), Some(3.5));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("n/a"), None);
        assert_eq!(coerce_number("60-80"), None);
    }

    #[test]
    fn coerces_json_values() {
        assert_eq!(coerce_number_value(&json!(4)), Some(4.0));
        assert_eq!(coerce_number_value(&json!("4")), Some(4.0));
        assert_eq!(coerce_number_value(&json!(null)), None);
        assert_eq!(coerce_number_value(&json!({"v": 4})), None);
    }

    #[test]
    fn scales_epoch_seconds_to_millis() {
        assert_eq!(parse_ts_ms(&json!(1_700_000_000)), Some(1_700_000_000_000));
        assert_eq!(parse_ts_ms(&json!(1_700_000_000_000i64)), Some(1_700_000_000_000));
    }

    #[test]
    fn parses_iso_strings_as_utc() {
        assert_eq!(
            parse_ts_ms(&json!("2023-11-14T00:00:00Z")),
            Some(1_699_920_000_000)
        );
        assert_eq!(
            parse_iso_ms("2023-11-14T00:00:00"),
            parse_iso_ms("2023-11-14T00:00:00Z")
        );
        assert_eq!(parse_iso_ms("2023-11-14"), parse_iso_ms("2023-11-14T00:00"));
        assert_eq!(parse_iso_ms("not a date"), None);
    }

    #[test]
    fn numeric_strings_are_not_feature_timestamps() {
        // Property values only parse as ISO text; epoch-in-a-string is a
        // criteria-boundary convenience.
        assert_eq!(parse_ts_ms(&json!("1700000000")), None);
        assert_eq!(parse_instant_ms("1700000000"), Some(1_700_000_000_000));
    }
}
