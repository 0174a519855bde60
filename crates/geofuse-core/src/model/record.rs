// crates/geofuse-core/src/model/record.rs

use crate::kind::Kind;
use crate::raw::RawFeature;
use serde::{Deserialize, Serialize};

/// Display language for labels and facet options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Parse "en"/"ar"; anything else falls back to English.
    pub fn parse(s: &str) -> Language {
        if s.trim().eq_ignore_ascii_case("ar") {
            Language::Ar
        } else {
            Language::En
        }
    }
}

/// A label carried in both languages.
///
/// Pipe-delimited source text (`"English|العربية"`) splits into the pair;
/// an empty bilingual field carries the `Unknown` placeholder on the
/// English side only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualText {
    pub en: String,
    pub ar: String,
}

impl BilingualText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        BilingualText {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// The placeholder pair used when a bilingual field is empty.
    pub fn unknown() -> Self {
        BilingualText {
            en: "Unknown".to_string(),
            ar: String::new(),
        }
    }

    /// Split a pipe-delimited bilingual value.
    ///
    /// Empty input (or the literal placeholder) yields the placeholder
    /// pair. A missing or blank half stays empty, except the English one,
    /// which falls back to the placeholder. A third `|` segment is
    /// discarded.
    pub fn from_piped(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "Unknown" {
            return Self::unknown();
        }
        let mut parts = raw.split('|');
        let en = parts.next().unwrap_or("").trim();
        let ar = parts.next().unwrap_or("").trim();
        BilingualText {
            en: if en.is_empty() {
                "Unknown".to_string()
            } else {
                en.to_string()
            },
            ar: ar.to_string(),
        }
    }

    /// Label in the given language.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// Dedup key for facet values: primary label with Arabic fallback.
    pub fn label_key(&self) -> &str {
        if self.en.is_empty() {
            &self.ar
        } else {
            &self.en
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ar.is_empty()
    }
}

/// Oneway restriction on a road.
///
/// Variant order matches the lexicographic order of the wire names, which
/// keeps sorted facet output stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Oneway {
    No,
    Yes,
}

impl Oneway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Oneway::Yes => "yes",
            Oneway::No => "no",
        }
    }

    /// Case-insensitive parse; anything but yes/no is absent.
    pub fn parse(s: &str) -> Option<Oneway> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Oneway::Yes),
            "no" => Some(Oneway::No),
            _ => None,
        }
    }
}

/// Road-specific attributes, present only on road records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoadInfo {
    pub highway: Option<String>,
    pub oneway: Option<Oneway>,
    pub lanes: Option<f64>,
    pub maxspeed: Option<f64>,
}

/// Border-crossing attributes, present only on border records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderInfo {
    pub crossing_type: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub last_update: Option<String>,
    pub country: Option<String>,
}

/// The uniform, ephemeral view of one raw feature.
///
/// Shape is identical across kinds; inapplicable members are `None`.
/// Recomputed on every pass and never cached, so the raw feature stays the
/// single source of truth.
#[derive(Debug, Clone)]
pub struct NormalizedRecord<'a> {
    pub kind: Kind,
    pub name: BilingualText,
    pub type_label: BilingualText,
    pub services: Option<BilingualText>,
    pub urbanization: Option<BilingualText>,
    pub governorate: Option<BilingualText>,
    pub country: Option<String>,
    pub road: Option<RoadInfo>,
    pub border: Option<BorderInfo>,
    pub ts_ms: Option<i64>,
    pub raw: &'a RawFeature,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piped_text_splits_and_trims() {
        let t = BilingualText::from_piped("Hospital | مستشفى");
        assert_eq!(t.en, "Hospital");
        assert_eq!(t.ar, "مستشفى");
    }

    #[test]
    fn empty_and_placeholder_inputs_yield_unknown() {
        assert_eq!(BilingualText::from_piped(""), BilingualText::unknown());
        assert_eq!(BilingualText::from_piped("  "), BilingualText::unknown());
        assert_eq!(BilingualText::from_piped("Unknown"), BilingualText::unknown());
    }

    #[test]
    fn missing_halves_get_defaults() {
        let en_only = BilingualText::from_piped("Clinic");
        assert_eq!(en_only.en, "Clinic");
        assert_eq!(en_only.ar, "");

        let ar_only = BilingualText::from_piped("|عيادة");
        assert_eq!(ar_only.en, "Unknown");
        assert_eq!(ar_only.ar, "عيادة");
    }

    #[test]
    fn third_segment_is_discarded() {
        let t = BilingualText::from_piped("a|b|c");
        assert_eq!(t.en, "a");
        assert_eq!(t.ar, "b");
    }

    #[test]
    fn label_key_prefers_english() {
        assert_eq!(BilingualText::new("Clinic", "عيادة").label_key(), "Clinic");
        assert_eq!(BilingualText::new("", "عيادة").label_key(), "عيادة");
    }

    #[test]
    fn oneway_parse_is_case_insensitive_and_closed() {
        assert_eq!(Oneway::parse("YES"), Some(Oneway::Yes));
        assert_eq!(Oneway::parse(" no "), Some(Oneway::No));
        assert_eq!(Oneway::parse("-1"), None);
        assert_eq!(Oneway::parse(""), None);
    }

    #[test]
    fn language_parse_defaults_to_english() {
        assert_eq!(Language::parse("ar"), Language::Ar);
        assert_eq!(Language::parse("AR"), Language::Ar);
        assert_eq!(Language::parse("fr"), Language::En);
        assert_eq!(Language::parse(""), Language::En);
    }
}
