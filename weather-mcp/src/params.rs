//! Argument types for each tool, with the JSON schemas advertised to the host.

use rmcp::schemars;
use serde::Deserialize;
use weather_core::{Language, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
pub enum LanguageArg {
    #[serde(rename = "zh_CN", alias = "zh")]
    Zh,
    #[serde(rename = "en_US", alias = "en")]
    En,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Zh => Language::Zh,
            LanguageArg::En => Language::En,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnitArg {
    Metric,
    Imperial,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Metric => Unit::Metric,
            UnitArg::Imperial => Unit::Imperial,
        }
    }
}

/// Optional per-call locale; falls back to the server defaults.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LocaleArgs {
    #[schemars(description = "Language (server default, zh_CN unless configured)")]
    pub language: Option<LanguageArg>,
    #[schemars(description = "Unit system (server default, metric unless configured)")]
    pub unit: Option<UnitArg>,
}

/// Step count from any JSON number, defaulting when absent.
///
/// Fractions are truncated and out-of-range values saturate; the client clamps the rest.
pub fn step_count(value: Option<f64>, default: u32) -> i64 {
    value.map_or(i64::from(default), |steps| steps as i64)
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LocationWeatherParams {
    #[schemars(description = "Longitude (-180 to 180)")]
    pub longitude: f64,
    #[schemars(description = "Latitude (-90 to 90)")]
    pub latitude: f64,
    #[schemars(description = "Number of forecast days (1-15, default 5)")]
    pub daily_steps: Option<f64>,
    #[schemars(description = "Number of forecast hours (1-360, default 24)")]
    pub hourly_steps: Option<f64>,
    #[serde(flatten)]
    pub locale: LocaleArgs,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddressWeatherParams {
    #[schemars(description = "Address to look up, e.g. \"北京市海淀区\"")]
    pub address: String,
    #[schemars(description = "Number of forecast days (1-15, default 5)")]
    pub daily_steps: Option<f64>,
    #[schemars(description = "Number of forecast hours (1-360, default 24)")]
    pub hourly_steps: Option<f64>,
    #[serde(flatten)]
    pub locale: LocaleArgs,
}

/// Arguments shared by the realtime, minutely and alert tools.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CoordinateParams {
    #[schemars(description = "Longitude (-180 to 180)")]
    pub longitude: f64,
    #[schemars(description = "Latitude (-90 to 90)")]
    pub latitude: f64,
    #[serde(flatten)]
    pub locale: LocaleArgs,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HourlyParams {
    #[schemars(description = "Longitude (-180 to 180)")]
    pub longitude: f64,
    #[schemars(description = "Latitude (-90 to 90)")]
    pub latitude: f64,
    #[schemars(description = "Number of forecast hours (1-360, default 24)")]
    pub hourly_steps: Option<f64>,
    #[serde(flatten)]
    pub locale: LocaleArgs,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyParams {
    #[schemars(description = "Longitude (-180 to 180)")]
    pub longitude: f64,
    #[schemars(description = "Latitude (-90 to 90)")]
    pub latitude: f64,
    #[schemars(description = "Number of forecast days (1-15, default 5)")]
    pub daily_steps: Option<f64>,
    #[serde(flatten)]
    pub locale: LocaleArgs,
}
