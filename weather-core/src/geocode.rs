use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{Config, error::Result, model::Coordinate};

pub mod amap;

pub use amap::AmapGeocoder;

/// Used for every address when no geocoding credential is configured (central Beijing).
pub const FALLBACK_COORDINATE: Coordinate = Coordinate::new(116.3976, 39.9075);

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, address: &str) -> Result<Coordinate>;
}

/// Resolves every address to [`FALLBACK_COORDINATE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGeocoder;

#[async_trait]
impl Geocoder for FallbackGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate> {
        debug!(address, "No geocoding provider, using fallback coordinate");
        Ok(FALLBACK_COORDINATE)
    }
}

/// Construct a geocoder from config: AMap when a key is present, the fallback otherwise.
pub fn geocoder_from_config(config: &Config) -> Box<dyn Geocoder> {
    match config.amap_api_key() {
        Some(api_key) => {
            let geocoder = match config.amap_base_url.as_deref() {
                Some(base_url) => AmapGeocoder::with_base_url(api_key.to_owned(), base_url),
                None => AmapGeocoder::new(api_key.to_owned()),
            };
            Box::new(geocoder)
        }
        None => {
            warn!(
                "No AMap API key provided ({}); addresses resolve to the default coordinate {}",
                crate::config::AMAP_API_KEY_ENV,
                FALLBACK_COORDINATE
            );
            Box::new(FallbackGeocoder)
        }
    }
}
