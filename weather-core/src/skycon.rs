//! Sky-condition codes and their display phrases.

use std::collections::HashMap;

use crate::model::Language;

const SKYCONS: &[(&str, &str, &str)] = &[
    ("CLEAR_DAY", "晴天", "Clear Day"),
    ("CLEAR_NIGHT", "晴夜", "Clear Night"),
    ("PARTLY_CLOUDY_DAY", "多云", "Partly Cloudy Day"),
    ("PARTLY_CLOUDY_NIGHT", "多云", "Partly Cloudy Night"),
    ("CLOUDY", "阴", "Cloudy"),
    ("LIGHT_HAZE", "轻度雾霾", "Light Haze"),
    ("MODERATE_HAZE", "中度雾霾", "Moderate Haze"),
    ("HEAVY_HAZE", "重度雾霾", "Heavy Haze"),
    ("LIGHT_RAIN", "小雨", "Light Rain"),
    ("MODERATE_RAIN", "中雨", "Moderate Rain"),
    ("HEAVY_RAIN", "大雨", "Heavy Rain"),
    ("STORM_RAIN", "暴雨", "Storm Rain"),
    ("FOG", "雾", "Fog"),
    ("LIGHT_SNOW", "小雪", "Light Snow"),
    ("MODERATE_SNOW", "中雪", "Moderate Snow"),
    ("HEAVY_SNOW", "大雪", "Heavy Snow"),
    ("STORM_SNOW", "暴雪", "Storm Snow"),
    ("DUST", "浮尘", "Dust"),
    ("SAND", "沙尘", "Sand"),
    ("WIND", "大风", "Wind"),
];

/// One lookup table per supported language.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct SkyconTables {
    zh: HashMap<&'static str, &'static str>,
    en: HashMap<&'static str, &'static str>,
}

impl SkyconTables {
    pub fn new() -> Self {
        Self {
            zh: SKYCONS.iter().map(|(code, zh, _)| (*code, *zh)).collect(),
            en: SKYCONS.iter().map(|(code, _, en)| (*code, *en)).collect(),
        }
    }

    /// Phrase for `code` in `language`; unknown codes come back unchanged.
    pub fn resolve(&self, code: &str, language: Language) -> String {
        let table = match language {
            Language::Zh => &self.zh,
            Language::En => &self.en,
        };

        table.get(code).map_or_else(|| code.to_string(), |text| (*text).to_string())
    }
}

impl Default for SkyconTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_per_language() {
        let tables = SkyconTables::new();

        assert_eq!(tables.resolve("LIGHT_RAIN", Language::Zh), "小雨");
        assert_eq!(tables.resolve("LIGHT_RAIN", Language::En), "Light Rain");
        assert_eq!(tables.resolve("CLEAR_NIGHT", Language::Zh), "晴夜");
        assert_eq!(tables.resolve("WIND", Language::En), "Wind");
    }

    #[test]
    fn every_code_has_a_phrase_in_both_languages() {
        let tables = SkyconTables::new();

        for (code, zh, en) in SKYCONS {
            assert_eq!(tables.resolve(code, Language::Zh), *zh);
            assert_eq!(tables.resolve(code, Language::En), *en);
        }
        assert_eq!(SKYCONS.len(), 20);
        assert_eq!(tables.zh.len(), SKYCONS.len());
    }

    #[test]
    fn unknown_code_passes_through() {
        let tables = SkyconTables::new();

        for lang in Language::all() {
            assert_eq!(tables.resolve("THUNDER_SHOWER", *lang), "THUNDER_SHOWER");
            assert_eq!(tables.resolve("", *lang), "");
        }
    }
}
