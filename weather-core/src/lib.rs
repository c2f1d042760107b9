//! Core library for the Caiyun weather MCP server.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The Caiyun weather client and the normalizer for its responses
//! - Address geocoding (AMap, or a fixed fallback coordinate)
//! - Shared domain models (coordinates, locales, report kinds)
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or services.

pub mod caiyun;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod normalize;
pub mod skycon;

pub use caiyun::{CaiyunClient, RawReport, client_from_config};
pub use config::Config;
pub use error::{Error, Result};
pub use geocode::{FallbackGeocoder, Geocoder, geocoder_from_config};
pub use model::{Coordinate, Language, Locale, ReportKind, ReportRequest, Section, Unit};
pub use normalize::{NormalizedReport, normalize};
pub use skycon::SkyconTables;
