//! Reshapes raw Caiyun payloads into compact, display-ready reports.
//!
//! Each report kind maps to one output shape. Per-timestep arrays in the
//! provider payload are parallel: the temperature array decides how many
//! records come out, and every other array is read at the same index. An entry
//! missing from a shorter array leaves that field out of the record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{
    caiyun::raw::{
        RawAlert, RawDaily, RawDailyRange, RawDailyWind, RawHourly, RawMinutely, RawRealtime,
        RawReport,
    },
    error::{Error, Result},
    model::{Language, ReportKind, Section},
    skycon::SkyconTables,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wind {
    pub speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeReport {
    pub location: [f64; 2],
    pub server_time: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub weather: String,
    pub weather_code: String,
    pub wind: Wind,
    pub pressure: f64,
    pub visibility: f64,
    pub precipitation: RealtimePrecipitation,
    pub air_quality: RealtimeAirQuality,
    pub life_index: RealtimeLifeIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealtimePrecipitation {
    pub local: f64,
    pub nearest: f64,
    pub nearest_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeAirQuality {
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeLifeIndex {
    pub comfort: String,
    pub ultraviolet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutelyReport {
    pub location: [f64; 2],
    pub server_time: String,
    pub description: String,
    pub precipitation: Vec<f64>,
    pub precipitation_2h: Vec<f64>,
    pub probability: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyReport {
    pub location: [f64; 2],
    pub server_time: String,
    pub description: String,
    pub forecast: Vec<HourlyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub time: String,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<HourlyPrecipitation>,
    pub air_quality: AirQualitySummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyPrecipitation {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// Domestic AQI and PM2.5, as carried by hourly and daily records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AirQualitySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub location: [f64; 2],
    pub server_time: String,
    pub forecast: Vec<DailyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: String,
    pub temperature: Range,
    /// 08h-20h window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_day: Option<Range>,
    /// 20h-32h window, i.e. until 08h the next morning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_night: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_day_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_night: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_night_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_day: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_night: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<DailyPrecipitation>,
    pub air_quality: AirQualitySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub astro: Option<Astro>,
    pub life_index: DailyLifeIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPrecipitation {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyLifeIndex {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comfort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultraviolet: Option<String>,
    #[serde(rename = "carWashing", skip_serializing_if = "Option::is_none")]
    pub car_washing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dressing: Option<String>,
    #[serde(rename = "coldRisk", skip_serializing_if = "Option::is_none")]
    pub cold_risk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertReport {
    pub location: [f64; 2],
    pub server_time: String,
    pub alerts: Vec<AlertRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub title: String,
    pub description: String,
    pub code: String,
    pub source: String,
    pub location: String,
    pub region: Region,
    pub pub_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub province: String,
    pub city: String,
    pub county: String,
    pub adcode: String,
}

/// Whatever sections a combined payload carried, each in its normalized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedReport {
    pub location: [f64; 2],
    pub server_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_keypoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime: Option<RealtimeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutely: Option<MinutelyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedReport {
    Realtime(RealtimeReport),
    Minutely(MinutelyReport),
    Hourly(HourlyReport),
    Daily(DailyReport),
    Alert(AlertReport),
    Combined(CombinedReport),
}

/// Normalize `raw` as the report `kind` asked for.
///
/// Fails with [`Error::MissingSection`] when a single-section kind finds its
/// section absent. Alerts and combined reports never fail.
pub fn normalize(
    raw: &RawReport,
    kind: &ReportKind,
    skycons: &SkyconTables,
    language: Language,
) -> Result<NormalizedReport> {
    let sky = Sky { tables: skycons, language };

    match kind {
        ReportKind::Realtime => {
            let realtime = section(raw.result.realtime.as_ref(), Section::Realtime)?;
            Ok(NormalizedReport::Realtime(realtime_report(raw, realtime, sky)))
        }
        ReportKind::Minutely => {
            let minutely = section(raw.result.minutely.as_ref(), Section::Minutely)?;
            Ok(NormalizedReport::Minutely(minutely_report(raw, minutely)))
        }
        ReportKind::Hourly { .. } => {
            let hourly = section(raw.result.hourly.as_ref(), Section::Hourly)?;
            Ok(NormalizedReport::Hourly(hourly_report(raw, hourly, sky)))
        }
        ReportKind::Daily { .. } => {
            let daily = section(raw.result.daily.as_ref(), Section::Daily)?;
            Ok(NormalizedReport::Daily(daily_report(raw, daily, sky)))
        }
        ReportKind::Alert => {
            Ok(NormalizedReport::Alert(alert_report(raw, raw.result.alert.as_ref())))
        }
        ReportKind::Combined { .. } => Ok(NormalizedReport::Combined(combined_report(raw, sky))),
    }
}

/// Epoch seconds as an ISO-8601 UTC string with milliseconds.
pub fn iso_timestamp(epoch_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Copy)]
struct Sky<'a> {
    tables: &'a SkyconTables,
    language: Language,
}

impl Sky<'_> {
    fn text(&self, code: &str) -> String {
        self.tables.resolve(code, self.language)
    }
}

fn section<T>(value: Option<&T>, name: Section) -> Result<&T> {
    value.ok_or(Error::MissingSection(name))
}

fn realtime_report(raw: &RawReport, realtime: &RawRealtime, sky: Sky<'_>) -> RealtimeReport {
    let nearest = realtime.precipitation.nearest.as_ref();
    let air = &realtime.air_quality;

    RealtimeReport {
        location: raw.location,
        server_time: iso_timestamp(raw.server_time),
        temperature: realtime.temperature,
        apparent_temperature: realtime.apparent_temperature,
        humidity: realtime.humidity,
        weather: sky.text(&realtime.skycon),
        weather_code: realtime.skycon.clone(),
        wind: Wind { speed: realtime.wind.speed, direction: realtime.wind.direction },
        pressure: realtime.pressure,
        visibility: realtime.visibility,
        precipitation: RealtimePrecipitation {
            local: realtime.precipitation.local.intensity,
            nearest: nearest.map_or(0.0, |n| n.intensity),
            nearest_distance: nearest.map_or(0.0, |n| n.distance),
        },
        air_quality: RealtimeAirQuality {
            aqi: air.aqi.chn,
            pm25: air.pm25,
            pm10: air.pm10,
            o3: air.o3,
            so2: air.so2,
            no2: air.no2,
            co: air.co,
            description: air.description.chn.clone(),
        },
        life_index: RealtimeLifeIndex {
            comfort: realtime.life_index.comfort.desc.clone(),
            ultraviolet: realtime.life_index.ultraviolet.desc.clone(),
        },
    }
}

fn minutely_report(raw: &RawReport, minutely: &RawMinutely) -> MinutelyReport {
    MinutelyReport {
        location: raw.location,
        server_time: iso_timestamp(raw.server_time),
        description: minutely.description.clone(),
        precipitation: minutely.precipitation.clone(),
        precipitation_2h: minutely.precipitation_2h.clone(),
        probability: minutely.probability.clone(),
    }
}

fn hourly_report(raw: &RawReport, hourly: &RawHourly, sky: Sky<'_>) -> HourlyReport {
    let forecast = hourly
        .temperature
        .iter()
        .enumerate()
        .map(|(i, temp)| {
            let skycon = hourly.skycon.get(i).map(|s| s.value.as_str());

            HourlyRecord {
                time: temp.datetime.clone(),
                temperature: temp.value,
                apparent_temperature: hourly.apparent_temperature.get(i).map(|v| v.value),
                weather: skycon.map(|code| sky.text(code)),
                weather_code: skycon.map(str::to_string),
                wind: hourly.wind.get(i).map(|w| Wind { speed: w.speed, direction: w.direction }),
                humidity: hourly.humidity.get(i).map(|v| v.value),
                cloudrate: hourly.cloudrate.get(i).map(|v| v.value),
                pressure: hourly.pressure.get(i).map(|v| v.value),
                visibility: hourly.visibility.get(i).map(|v| v.value),
                precipitation: hourly
                    .precipitation
                    .get(i)
                    .map(|p| HourlyPrecipitation { value: p.value, probability: p.probability }),
                air_quality: AirQualitySummary {
                    aqi: hourly.air_quality.aqi.get(i).map(|a| a.value.chn),
                    pm25: hourly.air_quality.pm25.get(i).map(|v| v.value),
                },
            }
        })
        .collect();

    HourlyReport {
        location: raw.location,
        server_time: iso_timestamp(raw.server_time),
        description: hourly.description.clone(),
        forecast,
    }
}

fn daily_report(raw: &RawReport, daily: &RawDaily, sky: Sky<'_>) -> DailyReport {
    let range = |r: &RawDailyRange| Range { max: r.max, min: r.min, avg: r.avg };
    let wind = |w: &RawDailyWind| Wind { speed: w.avg.speed, direction: w.avg.direction };
    let life = &daily.life_index;

    let forecast = daily
        .temperature
        .iter()
        .enumerate()
        .map(|(i, temp)| {
            let skycon = daily.skycon.get(i).map(|s| s.value.as_str());
            let skycon_day = daily.skycon_08h_20h.get(i).map(|s| s.value.as_str());
            let skycon_night = daily.skycon_20h_32h.get(i).map(|s| s.value.as_str());

            DailyRecord {
                date: temp.date.clone(),
                temperature: range(temp),
                temperature_day: daily.temperature_08h_20h.get(i).map(range),
                temperature_night: daily.temperature_20h_32h.get(i).map(range),
                weather: skycon.map(|code| sky.text(code)),
                weather_code: skycon.map(str::to_string),
                weather_day: skycon_day.map(|code| sky.text(code)),
                weather_day_code: skycon_day.map(str::to_string),
                weather_night: skycon_night.map(|code| sky.text(code)),
                weather_night_code: skycon_night.map(str::to_string),
                wind: daily.wind.get(i).map(wind),
                wind_day: daily.wind_08h_20h.get(i).map(wind),
                wind_night: daily.wind_20h_32h.get(i).map(wind),
                humidity: daily.humidity.get(i).map(|r| r.avg),
                cloudrate: daily.cloudrate.get(i).map(|r| r.avg),
                pressure: daily.pressure.get(i).map(|r| r.avg),
                visibility: daily.visibility.get(i).map(|r| r.avg),
                precipitation: daily.precipitation.get(i).map(|p| DailyPrecipitation {
                    max: p.max,
                    min: p.min,
                    avg: p.avg,
                    probability: p.probability,
                }),
                air_quality: AirQualitySummary {
                    aqi: daily.air_quality.aqi.get(i).map(|a| a.avg.chn),
                    pm25: daily.air_quality.pm25.get(i).map(|r| r.avg),
                },
                astro: daily.astro.get(i).map(|a| Astro {
                    sunrise: a.sunrise.time.clone(),
                    sunset: a.sunset.time.clone(),
                }),
                life_index: DailyLifeIndex {
                    comfort: life.comfort.get(i).map(|e| e.desc.clone()),
                    ultraviolet: life.ultraviolet.get(i).map(|e| e.desc.clone()),
                    car_washing: life.car_washing.get(i).map(|e| e.desc.clone()),
                    dressing: life.dressing.get(i).map(|e| e.desc.clone()),
                    cold_risk: life.cold_risk.get(i).map(|e| e.desc.clone()),
                },
            }
        })
        .collect();

    DailyReport { location: raw.location, server_time: iso_timestamp(raw.server_time), forecast }
}

fn alert_report(raw: &RawReport, alert: Option<&RawAlert>) -> AlertReport {
    let alerts = alert
        .map(|a| a.content.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|item| AlertRecord {
            title: item.title.clone(),
            description: item.description.clone(),
            code: item.code.clone(),
            source: item.source.clone(),
            location: item.location.clone(),
            region: Region {
                province: item.province.clone(),
                city: item.city.clone(),
                county: item.county.clone(),
                adcode: item.adcode.clone(),
            },
            pub_time: iso_timestamp(item.pubtimestamp),
        })
        .collect();

    AlertReport { location: raw.location, server_time: iso_timestamp(raw.server_time), alerts }
}

fn combined_report(raw: &RawReport, sky: Sky<'_>) -> CombinedReport {
    let result = &raw.result;

    CombinedReport {
        location: raw.location,
        server_time: iso_timestamp(raw.server_time),
        forecast_keypoint: result.forecast_keypoint.clone(),
        realtime: result.realtime.as_ref().map(|r| realtime_report(raw, r, sky)),
        minutely: result
            .minutely
            .as_ref()
            .map(|m| minutely_report(raw, m))
            .filter(|m| !m.description.is_empty()),
        hourly: result
            .hourly
            .as_ref()
            .map(|h| hourly_report(raw, h, sky))
            .filter(|h| !h.forecast.is_empty()),
        daily: result
            .daily
            .as_ref()
            .map(|d| daily_report(raw, d, sky))
            .filter(|d| !d.forecast.is_empty()),
        alert: result
            .alert
            .as_ref()
            .map(|a| alert_report(raw, Some(a)))
            .filter(|a| !a.alerts.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn envelope(result: Value) -> RawReport {
        serde_json::from_value(json!({
            "status": "ok",
            "api_version": "v2.6",
            "lang": "zh_CN",
            "unit": "metric",
            "tzshift": 28800,
            "timezone": "Asia/Shanghai",
            "server_time": 0,
            "location": [39.9, 116.4],
            "result": result
        }))
        .expect("fixture must deserialize")
    }

    fn realtime_json() -> Value {
        json!({
            "status": "ok",
            "temperature": 21.5,
            "humidity": 0.43,
            "cloudrate": 0.1,
            "skycon": "PARTLY_CLOUDY_DAY",
            "visibility": 25.0,
            "dswrf": 512.3,
            "wind": { "speed": 8.2, "direction": 135.0 },
            "pressure": 101325.0,
            "apparent_temperature": 20.1,
            "precipitation": {
                "local": { "status": "ok", "datasource": "radar", "intensity": 0.0 }
            },
            "air_quality": {
                "pm25": 12, "pm10": 30, "o3": 80, "so2": 3, "no2": 20, "co": 0.5,
                "aqi": { "chn": 35, "usa": 50 },
                "description": { "chn": "优", "usa": "Good" }
            },
            "life_index": {
                "ultraviolet": { "index": 3, "desc": "中等" },
                "comfort": { "index": 5, "desc": "舒适" }
            }
        })
    }

    fn hourly_json(steps: usize) -> Value {
        let dt = |i: usize| format!("2024-05-01T{:02}:00+08:00", i % 24);
        let values = |v: f64| {
            (0..steps).map(|i| json!({ "datetime": dt(i), "value": v })).collect::<Vec<_>>()
        };

        json!({
            "status": "ok",
            "description": "多云",
            "temperature": values(18.0),
            "apparent_temperature": (0..steps.saturating_sub(1))
                .map(|i| json!({ "datetime": dt(i), "value": 17.0 }))
                .collect::<Vec<_>>(),
            "precipitation": (0..steps)
                .map(|i| json!({ "datetime": dt(i), "value": 0.1, "probability": 20 }))
                .collect::<Vec<_>>(),
            "wind": (0..steps)
                .map(|i| json!({ "datetime": dt(i), "speed": 5.0, "direction": 90.0 }))
                .collect::<Vec<_>>(),
            "humidity": values(0.5),
            "cloudrate": values(0.3),
            "skycon": (0..steps)
                .map(|i| json!({ "datetime": dt(i), "value": "CLOUDY" }))
                .collect::<Vec<_>>(),
            "pressure": values(100000.0),
            "visibility": values(20.0),
            "dswrf": values(100.0),
            "air_quality": {
                "aqi": (0..steps)
                    .map(|i| json!({ "datetime": dt(i), "value": { "chn": 40, "usa": 60 } }))
                    .collect::<Vec<_>>(),
                "pm25": values(15.0)
            }
        })
    }

    fn daily_json(days: usize) -> Value {
        let date = |i: usize| format!("2024-05-{:02}T00:00+08:00", i + 1);
        let ranges = |v: f64| {
            (0..days)
                .map(|i| json!({ "date": date(i), "max": v + 5.0, "min": v - 5.0, "avg": v }))
                .collect::<Vec<_>>()
        };
        let winds = || {
            (0..days)
                .map(|i| {
                    let w = json!({ "speed": 10.0, "direction": 180.0 });
                    json!({ "date": date(i), "max": w, "min": w, "avg": w })
                })
                .collect::<Vec<_>>()
        };
        let skycons = |code: &str| {
            (0..days).map(|i| json!({ "date": date(i), "value": code })).collect::<Vec<_>>()
        };
        let life = |desc: &str| {
            (0..days)
                .map(|i| json!({ "date": date(i), "index": "3", "desc": desc }))
                .collect::<Vec<_>>()
        };

        json!({
            "status": "ok",
            "astro": (0..days)
                .map(|i| json!({
                    "date": date(i),
                    "sunrise": { "time": "05:12" },
                    "sunset": { "time": "19:20" }
                }))
                .collect::<Vec<_>>(),
            "precipitation": (0..days)
                .map(|i| json!({
                    "date": date(i),
                    "max": 1.0,
                    "min": 0.0,
                    "avg": 0.4,
                    "probability": 60
                }))
                .collect::<Vec<_>>(),
            "temperature": ranges(20.0),
            "temperature_08h_20h": ranges(23.0),
            "temperature_20h_32h": ranges(15.0),
            "wind": winds(),
            "wind_08h_20h": winds(),
            "wind_20h_32h": winds(),
            "humidity": ranges(0.5),
            "cloudrate": ranges(0.4),
            "pressure": ranges(100500.0),
            "visibility": ranges(18.0),
            "dswrf": ranges(200.0),
            "air_quality": {
                "aqi": (0..days)
                    .map(|i| {
                        let aqi = json!({ "chn": 45, "usa": 70 });
                        json!({ "date": date(i), "max": aqi, "avg": aqi, "min": aqi })
                    })
                    .collect::<Vec<_>>(),
                "pm25": ranges(20.0)
            },
            "skycon": skycons("LIGHT_RAIN"),
            "skycon_08h_20h": skycons("MODERATE_RAIN"),
            "skycon_20h_32h": skycons("CLEAR_NIGHT"),
            "life_index": {
                "ultraviolet": life("弱"),
                "carWashing": life("不宜"),
                "dressing": life("舒适"),
                "comfort": life("温暖"),
                "coldRisk": life("少发")
            }
        })
    }

    fn alert_json(count: usize) -> Value {
        json!({
            "status": "ok",
            "content": (0..count)
                .map(|i| json!({
                    "province": "北京市",
                    "status": "预警中",
                    "code": "0902",
                    "description": format!("alert {i}"),
                    "regionId": "101010100",
                    "county": "海淀区",
                    "pubtimestamp": 1_714_521_600 + i as i64,
                    "latlon": [39.9, 116.4],
                    "city": "北京市",
                    "alertId": format!("id-{i}"),
                    "title": "大风蓝色预警",
                    "adcode": "110108",
                    "source": "国家预警信息发布中心",
                    "location": "北京市海淀区",
                    "request_status": "ok"
                }))
                .collect::<Vec<_>>()
        })
    }

    fn tables() -> SkyconTables {
        SkyconTables::new()
    }

    #[test]
    fn epoch_zero_formats_as_iso_utc() {
        assert_eq!(iso_timestamp(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(iso_timestamp(1_700_000_000), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn realtime_is_flattened_and_localized() {
        let raw = envelope(json!({ "realtime": realtime_json() }));
        let report = normalize(&raw, &ReportKind::Realtime, &tables(), Language::En).unwrap();

        let NormalizedReport::Realtime(r) = report else {
            panic!("expected realtime report");
        };
        assert_eq!(r.weather, "Partly Cloudy Day");
        assert_eq!(r.weather_code, "PARTLY_CLOUDY_DAY");
        assert_eq!(r.server_time, "1970-01-01T00:00:00.000Z");
        assert_eq!(r.wind, Wind { speed: 8.2, direction: 135.0 });
        assert_eq!(r.air_quality.aqi, 35.0);
        assert_eq!(r.air_quality.description, "优");
        assert_eq!(r.life_index.comfort, "舒适");
    }

    #[test]
    fn realtime_without_nearest_storm_defaults_to_zero() {
        let raw = envelope(json!({ "realtime": realtime_json() }));
        let NormalizedReport::Realtime(r) =
            normalize(&raw, &ReportKind::Realtime, &tables(), Language::Zh).unwrap()
        else {
            panic!("expected realtime report");
        };

        assert_eq!(
            r.precipitation,
            RealtimePrecipitation { local: 0.0, nearest: 0.0, nearest_distance: 0.0 }
        );
    }

    #[test]
    fn realtime_with_nearest_storm_is_reported() {
        let mut realtime = realtime_json();
        realtime["precipitation"]["nearest"] =
            json!({ "status": "ok", "distance": 12.5, "intensity": 0.8 });
        let raw = envelope(json!({ "realtime": realtime }));

        let NormalizedReport::Realtime(r) =
            normalize(&raw, &ReportKind::Realtime, &tables(), Language::Zh).unwrap()
        else {
            panic!("expected realtime report");
        };
        assert_eq!(r.precipitation.nearest, 0.8);
        assert_eq!(r.precipitation.nearest_distance, 12.5);
    }

    #[test]
    fn missing_section_is_reported() {
        let raw = envelope(json!({ "realtime": realtime_json() }));
        let err = normalize(&raw, &ReportKind::Daily { daily_steps: 5 }, &tables(), Language::Zh)
            .unwrap_err();

        assert!(matches!(err, Error::MissingSection(Section::Daily)));
        assert!(normalize(&raw, &ReportKind::Minutely, &tables(), Language::Zh).is_err());
        assert!(
            normalize(&raw, &ReportKind::Hourly { hourly_steps: 1 }, &tables(), Language::Zh)
                .is_err()
        );
    }

    #[test]
    fn minutely_series_pass_through() {
        let raw = envelope(json!({
            "minutely": {
                "status": "ok",
                "datasource": "radar",
                "description": "未来两小时不会下雨",
                "precipitation": [0.0, 0.1],
                "precipitation_2h": [0.0, 0.1, 0.2],
                "probability": [0.0, 0.05, 0.1, 0.2]
            }
        }));

        let NormalizedReport::Minutely(m) =
            normalize(&raw, &ReportKind::Minutely, &tables(), Language::Zh).unwrap()
        else {
            panic!("expected minutely report");
        };
        assert_eq!(m.description, "未来两小时不会下雨");
        assert_eq!(m.precipitation, vec![0.0, 0.1]);
        assert_eq!(m.precipitation_2h.len(), 3);
        assert_eq!(m.probability.len(), 4);
    }

    #[test]
    fn hourly_records_zip_parallel_arrays() {
        let raw = envelope(json!({ "hourly": hourly_json(3) }));
        let NormalizedReport::Hourly(h) =
            normalize(&raw, &ReportKind::Hourly { hourly_steps: 3 }, &tables(), Language::Zh)
                .unwrap()
        else {
            panic!("expected hourly report");
        };

        assert_eq!(h.description, "多云");
        assert_eq!(h.forecast.len(), 3);

        let first = &h.forecast[0];
        assert_eq!(first.time, "2024-05-01T00:00+08:00");
        assert_eq!(first.weather.as_deref(), Some("阴"));
        assert_eq!(first.weather_code.as_deref(), Some("CLOUDY"));
        assert_eq!(
            first.precipitation,
            Some(HourlyPrecipitation { value: 0.1, probability: Some(20.0) })
        );
        assert_eq!(first.air_quality, AirQualitySummary { aqi: Some(40.0), pm25: Some(15.0) });
    }

    #[test]
    fn shorter_apparent_temperature_leaves_gap() {
        let raw = envelope(json!({ "hourly": hourly_json(3) }));
        let NormalizedReport::Hourly(h) =
            normalize(&raw, &ReportKind::Hourly { hourly_steps: 3 }, &tables(), Language::Zh)
                .unwrap()
        else {
            panic!("expected hourly report");
        };

        assert_eq!(h.forecast[1].apparent_temperature, Some(17.0));
        assert_eq!(h.forecast[2].apparent_temperature, None);

        let json = serde_json::to_value(&h.forecast[2]).unwrap();
        assert!(json.get("apparent_temperature").is_none());
    }

    #[test]
    fn daily_records_cover_day_and_night_windows() {
        let raw = envelope(json!({ "daily": daily_json(15) }));
        let NormalizedReport::Daily(d) =
            normalize(&raw, &ReportKind::Daily { daily_steps: 15 }, &tables(), Language::En)
                .unwrap()
        else {
            panic!("expected daily report");
        };

        assert_eq!(d.forecast.len(), 15);
        for day in &d.forecast {
            assert_eq!(day.weather.as_deref(), Some("Light Rain"));
            assert_eq!(day.weather_day.as_deref(), Some("Moderate Rain"));
            assert_eq!(day.weather_night.as_deref(), Some("Clear Night"));
        }

        let first = &d.forecast[0];
        assert_eq!(first.date, "2024-05-01T00:00+08:00");
        assert_eq!(first.temperature, Range { max: 25.0, min: 15.0, avg: 20.0 });
        assert_eq!(first.temperature_day.map(|r| r.avg), Some(23.0));
        assert_eq!(first.wind_night, Some(Wind { speed: 10.0, direction: 180.0 }));
        assert_eq!(first.precipitation.and_then(|p| p.probability), Some(60.0));
        assert_eq!(first.astro.as_ref().map(|a| a.sunrise.as_str()), Some("05:12"));
        assert_eq!(first.life_index.car_washing.as_deref(), Some("不宜"));
        assert_eq!(first.air_quality.aqi, Some(45.0));
    }

    #[test]
    fn daily_without_day_night_windows_omits_them() {
        let mut daily = daily_json(2);
        let obj = daily.as_object_mut().unwrap();
        obj.remove("temperature_08h_20h");
        obj.remove("temperature_20h_32h");
        obj.remove("wind_08h_20h");
        let raw = envelope(json!({ "daily": daily }));

        let NormalizedReport::Daily(d) =
            normalize(&raw, &ReportKind::Daily { daily_steps: 2 }, &tables(), Language::Zh)
                .unwrap()
        else {
            panic!("expected daily report");
        };

        let json = serde_json::to_value(&d.forecast[0]).unwrap();
        assert!(json.get("temperature_day").is_none());
        assert!(json.get("temperature_night").is_none());
        assert!(json.get("wind_day").is_none());
        assert!(json.get("wind_night").is_some());
        assert_eq!(json["life_index"]["coldRisk"], "少发");
    }

    #[test]
    fn alerts_map_one_to_one_with_regions() {
        let raw = envelope(json!({ "alert": alert_json(3) }));
        let NormalizedReport::Alert(a) =
            normalize(&raw, &ReportKind::Alert, &tables(), Language::Zh).unwrap()
        else {
            panic!("expected alert report");
        };

        assert_eq!(a.alerts.len(), 3);
        let first = &a.alerts[0];
        assert_eq!(first.title, "大风蓝色预警");
        assert_eq!(first.region, Region {
            province: "北京市".into(),
            city: "北京市".into(),
            county: "海淀区".into(),
            adcode: "110108".into(),
        });
        assert_eq!(first.pub_time, "2024-05-01T00:00:00.000Z");
        assert_eq!(a.alerts[2].description, "alert 2");
    }

    #[test]
    fn missing_alert_section_yields_empty_list() {
        let raw = envelope(json!({}));
        let NormalizedReport::Alert(a) =
            normalize(&raw, &ReportKind::Alert, &tables(), Language::Zh).unwrap()
        else {
            panic!("expected alert report");
        };

        assert!(a.alerts.is_empty());
    }

    #[test]
    fn combined_includes_present_sections() {
        let raw = envelope(json!({
            "realtime": realtime_json(),
            "hourly": hourly_json(2),
            "daily": daily_json(3),
            "alert": alert_json(1),
            "forecast_keypoint": "今天多云"
        }));

        let NormalizedReport::Combined(c) =
            normalize(&raw, &ReportKind::combined_default(), &tables(), Language::Zh).unwrap()
        else {
            panic!("expected combined report");
        };

        assert_eq!(c.forecast_keypoint.as_deref(), Some("今天多云"));
        assert!(c.realtime.is_some());
        assert!(c.minutely.is_none());
        assert_eq!(c.hourly.map(|h| h.forecast.len()), Some(2));
        assert_eq!(c.daily.map(|d| d.forecast.len()), Some(3));
        assert_eq!(c.alert.map(|a| a.alerts.len()), Some(1));
    }

    #[test]
    fn combined_omits_empty_sections() {
        let mut hourly = hourly_json(2);
        hourly["temperature"] = json!([]);
        let raw = envelope(json!({
            "hourly": hourly,
            "daily": daily_json(0),
            "alert": alert_json(0),
            "minutely": { "description": "", "precipitation": [] }
        }));

        let report =
            normalize(&raw, &ReportKind::combined_default(), &tables(), Language::Zh).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("hourly").is_none());
        assert!(json.get("daily").is_none());
        assert!(json.get("alert").is_none());
        assert!(json.get("minutely").is_none());
        assert!(json.get("forecast_keypoint").is_none());
        assert_eq!(json["server_time"], "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn untagged_serialization_emits_record_directly() {
        let raw = envelope(json!({ "alert": alert_json(1) }));
        let report = normalize(&raw, &ReportKind::Alert, &tables(), Language::Zh).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["alerts"][0]["region"]["adcode"], "110108");
        assert_eq!(json["location"], json!([39.9, 116.4]));
    }
}
