use anyhow::anyhow;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    Config,
    error::{Error, Result},
    model::{
        Coordinate, Locale, ReportKind, ReportRequest, clamp_daily_steps, clamp_hourly_steps,
    },
};

pub mod raw;

pub use raw::RawReport;

pub const DEFAULT_BASE_URL: &str = "https://api.caiyunapp.com/v2.6";

/// HTTP client for the Caiyun weather API.
#[derive(Debug, Clone)]
pub struct CaiyunClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl CaiyunClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub async fn realtime(&self, coordinate: Coordinate, locale: Locale) -> Result<RawReport> {
        self.fetch(&ReportRequest::new(coordinate, ReportKind::Realtime, locale)).await
    }

    pub async fn minutely(&self, coordinate: Coordinate, locale: Locale) -> Result<RawReport> {
        self.fetch(&ReportRequest::new(coordinate, ReportKind::Minutely, locale)).await
    }

    /// `hourly_steps` is clamped into 1..=360.
    pub async fn hourly(
        &self,
        coordinate: Coordinate,
        hourly_steps: i64,
        locale: Locale,
    ) -> Result<RawReport> {
        let kind = ReportKind::Hourly { hourly_steps };
        self.fetch(&ReportRequest::new(coordinate, kind, locale)).await
    }

    /// `daily_steps` is clamped into 1..=15.
    pub async fn daily(
        &self,
        coordinate: Coordinate,
        daily_steps: i64,
        locale: Locale,
    ) -> Result<RawReport> {
        let kind = ReportKind::Daily { daily_steps };
        self.fetch(&ReportRequest::new(coordinate, kind, locale)).await
    }

    pub async fn alert(&self, coordinate: Coordinate, locale: Locale) -> Result<RawReport> {
        self.fetch(&ReportRequest::new(coordinate, ReportKind::Alert, locale)).await
    }

    /// Everything in one call: realtime, minutely, hourly, daily and optionally alerts.
    pub async fn weather(
        &self,
        coordinate: Coordinate,
        daily_steps: i64,
        hourly_steps: i64,
        alert: bool,
        locale: Locale,
    ) -> Result<RawReport> {
        let kind = ReportKind::Combined { daily_steps, hourly_steps, alert };
        self.fetch(&ReportRequest::new(coordinate, kind, locale)).await
    }

    /// Perform one GET for `request` and parse the payload.
    pub async fn fetch(&self, request: &ReportRequest) -> Result<RawReport> {
        let url = format!(
            "{}/{}/{}/{}",
            self.base_url,
            self.api_key,
            request.coordinate,
            request.kind.path()
        );
        let query = query_params(request);

        debug!(
            kind = request.kind.path(),
            coordinate = %request.coordinate,
            ?query,
            "Requesting Caiyun report"
        );

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::upstream(error_message(status, &body)));
        }

        parse_report(&body)
    }
}

/// Query string for `request`, with step counts clamped into their legal ranges.
pub fn query_params(request: &ReportRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("lang", request.locale.language.as_str().to_string()),
        ("unit", request.locale.unit.as_str().to_string()),
    ];

    match request.kind {
        ReportKind::Realtime | ReportKind::Minutely => {}
        ReportKind::Hourly { hourly_steps } => {
            query.push(("hourlysteps", clamp_hourly_steps(hourly_steps).to_string()));
        }
        ReportKind::Daily { daily_steps } => {
            query.push(("dailysteps", clamp_daily_steps(daily_steps).to_string()));
        }
        ReportKind::Alert => {
            query.push(("dailysteps", "1".to_string()));
            query.push(("hourlysteps", "1".to_string()));
            query.push(("alert", "true".to_string()));
        }
        ReportKind::Combined { daily_steps, hourly_steps, alert } => {
            query.push(("dailysteps", clamp_daily_steps(daily_steps).to_string()));
            query.push(("hourlysteps", clamp_hourly_steps(hourly_steps).to_string()));
            query.push(("alert", alert.to_string()));
        }
    }

    query
}

/// Construct a client from config; the Caiyun key is mandatory.
pub fn client_from_config(config: &Config) -> anyhow::Result<CaiyunClient> {
    let api_key = config.caiyun_api_key().ok_or_else(|| {
        anyhow!(
            "No Caiyun API key configured.\n\
             Provide it in one of these ways:\n\
             1. set the environment variable {}\n\
             2. pass --api-key=<KEY>\n\
             3. run `caiyun-weather-mcp configure`",
            crate::config::CAIYUN_API_KEY_ENV
        )
    })?;

    let client = match config.caiyun_base_url.as_deref() {
        Some(base_url) => CaiyunClient::with_base_url(api_key.to_owned(), base_url),
        None => CaiyunClient::new(api_key.to_owned()),
    };

    Ok(client)
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: Option<String>,
    error: Option<String>,
}

fn parse_report(body: &str) -> Result<RawReport> {
    if let Ok(envelope) = serde_json::from_str::<StatusEnvelope>(body) {
        if let Some(status) = envelope.status.filter(|s| s != "ok") {
            return Err(Error::upstream(
                envelope.error.unwrap_or_else(|| format!("response status '{status}'")),
            ));
        }
    }

    serde_json::from_str(body)
        .map_err(|source| Error::Decode { context: "Caiyun weather response", source })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<StatusEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| {
            format!("request failed with status {}: {}", status, truncate_body(body))
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
