//! Caiyun response payloads as the provider sends them.
//!
//! Only the fields the normalizer reads are declared; everything else in the
//! payload is ignored on deserialization. Per-timestep arrays default to empty
//! so a sparse section still parses.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub api_status: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub tzshift: i64,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub server_time: i64,
    /// `[latitude, longitude]`, the reverse of the request path order
    #[serde(default)]
    pub location: [f64; 2],
    #[serde(default)]
    pub result: RawResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    pub realtime: Option<RawRealtime>,
    pub minutely: Option<RawMinutely>,
    pub hourly: Option<RawHourly>,
    pub daily: Option<RawDaily>,
    pub alert: Option<RawAlert>,
    pub primary: Option<i64>,
    pub forecast_keypoint: Option<String>,
}

// realtime

#[derive(Debug, Clone, Deserialize)]
pub struct RawRealtime {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub skycon: String,
    pub wind: RawWind,
    pub pressure: f64,
    pub visibility: f64,
    pub precipitation: RawRealtimePrecipitation,
    pub air_quality: RawRealtimeAirQuality,
    pub life_index: RawRealtimeLifeIndex,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawWind {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRealtimePrecipitation {
    pub local: RawLocalPrecipitation,
    pub nearest: Option<RawNearestPrecipitation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocalPrecipitation {
    pub intensity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNearestPrecipitation {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub intensity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRealtimeAirQuality {
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub aqi: RawAqi,
    pub description: RawAqiDescription,
}

/// Air quality index on the domestic (`chn`) and US scales.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawAqi {
    pub chn: f64,
    #[serde(default)]
    pub usa: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAqiDescription {
    #[serde(default)]
    pub chn: String,
    #[serde(default)]
    pub usa: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRealtimeLifeIndex {
    pub ultraviolet: RawLifeIndexEntry,
    pub comfort: RawLifeIndexEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLifeIndexEntry {
    #[serde(default)]
    pub desc: String,
}

// minutely

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMinutely {
    pub description: String,
    pub precipitation_2h: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub probability: Vec<f64>,
}

// hourly

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHourly {
    pub description: String,
    pub precipitation: Vec<RawHourlyPrecipitation>,
    pub temperature: Vec<RawHourlyValue>,
    pub apparent_temperature: Vec<RawHourlyValue>,
    pub wind: Vec<RawHourlyWind>,
    pub humidity: Vec<RawHourlyValue>,
    pub cloudrate: Vec<RawHourlyValue>,
    pub skycon: Vec<RawHourlySkycon>,
    pub pressure: Vec<RawHourlyValue>,
    pub visibility: Vec<RawHourlyValue>,
    pub air_quality: RawHourlyAirQuality,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourlyValue {
    pub datetime: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourlyPrecipitation {
    pub datetime: String,
    pub value: f64,
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourlyWind {
    pub datetime: String,
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourlySkycon {
    pub datetime: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHourlyAirQuality {
    pub aqi: Vec<RawHourlyAqi>,
    pub pm25: Vec<RawHourlyValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourlyAqi {
    pub datetime: String,
    pub value: RawAqi,
}

// daily

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDaily {
    pub astro: Vec<RawAstro>,
    pub precipitation: Vec<RawDailyPrecipitation>,
    pub temperature: Vec<RawDailyRange>,
    pub temperature_08h_20h: Vec<RawDailyRange>,
    pub temperature_20h_32h: Vec<RawDailyRange>,
    pub wind: Vec<RawDailyWind>,
    pub wind_08h_20h: Vec<RawDailyWind>,
    pub wind_20h_32h: Vec<RawDailyWind>,
    pub humidity: Vec<RawDailyRange>,
    pub cloudrate: Vec<RawDailyRange>,
    pub pressure: Vec<RawDailyRange>,
    pub visibility: Vec<RawDailyRange>,
    pub air_quality: RawDailyAirQuality,
    pub skycon: Vec<RawDailySkycon>,
    pub skycon_08h_20h: Vec<RawDailySkycon>,
    pub skycon_20h_32h: Vec<RawDailySkycon>,
    pub life_index: RawDailyLifeIndex,
}

/// Max/min/avg of one quantity over a day or a part of it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyRange {
    pub date: String,
    pub max: f64,
    pub min: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyPrecipitation {
    pub date: String,
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyWind {
    pub date: String,
    pub avg: RawWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailySkycon {
    pub date: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAstro {
    pub date: String,
    pub sunrise: RawTimeOfDay,
    pub sunset: RawTimeOfDay,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimeOfDay {
    pub time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDailyAirQuality {
    pub aqi: Vec<RawDailyAqi>,
    pub pm25: Vec<RawDailyRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyAqi {
    pub date: String,
    pub avg: RawAqi,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDailyLifeIndex {
    pub ultraviolet: Vec<RawDailyLifeIndexEntry>,
    #[serde(rename = "carWashing")]
    pub car_washing: Vec<RawDailyLifeIndexEntry>,
    pub dressing: Vec<RawDailyLifeIndexEntry>,
    pub comfort: Vec<RawDailyLifeIndexEntry>,
    #[serde(rename = "coldRisk")]
    pub cold_risk: Vec<RawDailyLifeIndexEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyLifeIndexEntry {
    pub date: String,
    #[serde(default)]
    pub desc: String,
}

// alert

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAlert {
    pub status: String,
    pub content: Vec<RawAlertContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAlertContent {
    pub title: String,
    pub description: String,
    pub code: String,
    pub source: String,
    pub location: String,
    pub province: String,
    pub city: String,
    pub county: String,
    pub adcode: String,
    pub pubtimestamp: i64,
}
