use std::{convert::TryFrom, fmt};

pub const HOURLY_STEPS_MIN: u32 = 1;
pub const HOURLY_STEPS_MAX: u32 = 360;
pub const HOURLY_STEPS_DEFAULT: u32 = 24;

pub const DAILY_STEPS_MIN: u32 = 1;
pub const DAILY_STEPS_MAX: u32 = 15;
pub const DAILY_STEPS_DEFAULT: u32 = 5;

/// A point on the globe, longitude first as the provider expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh_CN",
            Language::En => "en_US",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::Zh, Language::En]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "zh_cn" | "zh" => Ok(Language::Zh),
            "en_us" | "en" => Ok(Language::En),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: zh_CN, en_US."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Imperial]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Unit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            _ => Err(anyhow::anyhow!("Unknown unit '{value}'. Supported units: metric, imperial.")),
        }
    }
}

/// Language and unit system a single report is requested and rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locale {
    pub language: Language,
    pub unit: Unit,
}

/// Sub-sections a provider payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Realtime,
    Minutely,
    Hourly,
    Daily,
    Alert,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Realtime => "realtime",
            Section::Minutely => "minutely",
            Section::Hourly => "hourly",
            Section::Daily => "daily",
            Section::Alert => "alert",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to ask the provider for, with the parameters each kind takes.
///
/// Step counts are stored as given; they are clamped when the request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Realtime,
    Minutely,
    Hourly { hourly_steps: i64 },
    Daily { daily_steps: i64 },
    Alert,
    Combined { daily_steps: i64, hourly_steps: i64, alert: bool },
}

impl ReportKind {
    /// Last path segment of the provider endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            ReportKind::Realtime => "realtime",
            ReportKind::Minutely => "minutely",
            ReportKind::Hourly { .. } => "hourly",
            ReportKind::Daily { .. } => "daily",
            ReportKind::Alert | ReportKind::Combined { .. } => "weather",
        }
    }

    /// Combined request with the default step counts and alerts included.
    pub fn combined_default() -> Self {
        ReportKind::Combined {
            daily_steps: i64::from(DAILY_STEPS_DEFAULT),
            hourly_steps: i64::from(HOURLY_STEPS_DEFAULT),
            alert: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRequest {
    pub coordinate: Coordinate,
    pub kind: ReportKind,
    pub locale: Locale,
}

impl ReportRequest {
    pub fn new(coordinate: Coordinate, kind: ReportKind, locale: Locale) -> Self {
        Self { coordinate, kind, locale }
    }
}

pub fn clamp_hourly_steps(steps: i64) -> u32 {
    clamp_steps(steps, HOURLY_STEPS_MIN, HOURLY_STEPS_MAX)
}

pub fn clamp_daily_steps(steps: i64) -> u32 {
    clamp_steps(steps, DAILY_STEPS_MIN, DAILY_STEPS_MAX)
}

fn clamp_steps(steps: i64, min: u32, max: u32) -> u32 {
    // the clamped value always fits in u32
    steps.clamp(i64::from(min), i64::from(max)) as u32
}
