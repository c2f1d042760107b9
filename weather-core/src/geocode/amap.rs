use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::Coordinate,
};

use super::Geocoder;

pub const DEFAULT_BASE_URL: &str = "https://restapi.amap.com";

/// Forward geocoding through the AMap web service API.
#[derive(Debug, Clone)]
pub struct AmapGeocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AmapGeocoder {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct AmapResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    geocodes: Vec<AmapGeocode>,
}

#[derive(Debug, Deserialize)]
struct AmapGeocode {
    location: String,
}

#[async_trait]
impl Geocoder for AmapGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate> {
        let url = format!("{}/v3/geocode/geo", self.base_url);
        debug!(address, "Geocoding address via AMap");

        let res = self
            .http
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str()), ("output", "JSON")])
            .send()
            .await
            .map_err(|e| {
                Error::resolution(format!("request for '{address}' failed: {}", e.without_url()))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            Error::resolution(format!(
                "reading response for '{address}' failed: {}",
                e.without_url()
            ))
        })?;

        let parsed = serde_json::from_str::<AmapResponse>(&body).ok();

        if !status.is_success() {
            let detail = parsed
                .map(|p| p.info)
                .filter(|info| !info.is_empty())
                .unwrap_or_else(|| format!("HTTP status {status}"));
            return Err(Error::resolution(format!("lookup of '{address}' failed: {detail}")));
        }

        let parsed = parsed.ok_or_else(|| {
            Error::resolution(format!("unreadable response while looking up '{address}'"))
        })?;

        if parsed.status != "1" {
            return Err(Error::resolution(format!(
                "lookup of '{address}' failed: {}",
                parsed.info
            )));
        }

        let first = parsed
            .geocodes
            .first()
            .ok_or_else(|| Error::resolution(format!("no location found for address: {address}")))?;

        parse_location(&first.location).ok_or_else(|| {
            Error::resolution(format!(
                "unexpected location '{}' for address: {address}",
                first.location
            ))
        })
    }
}

/// Parse AMap's `"lon,lat"` string.
fn parse_location(location: &str) -> Option<Coordinate> {
    let (lon, lat) = location.split_once(',')?;
    Some(Coordinate::new(lon.trim().parse().ok()?, lat.trim().parse().ok()?))
}
