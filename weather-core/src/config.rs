use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{Language, Locale, Unit};

pub const CAIYUN_API_KEY_ENV: &str = "CAIYUN_API_KEY";
pub const AMAP_API_KEY_ENV: &str = "AMAP_API_KEY";

/// Process configuration, stored on disk as TOML.
///
/// Example:
/// ```toml
/// caiyun_api_key = "..."
/// amap_api_key = "..."
/// language = "en_US"
/// unit = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Weather provider credential; the server refuses to start without it.
    pub caiyun_api_key: Option<String>,

    /// Geocoding credential; when absent addresses resolve to a fixed coordinate.
    pub amap_api_key: Option<String>,

    /// Default language for tool calls that don't name one, e.g. "zh_CN".
    pub language: Option<String>,

    /// Default unit system, "metric" or "imperial".
    pub unit: Option<String>,

    pub caiyun_base_url: Option<String>,
    pub amap_base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "caiyun-weather", "caiyun-weather-mcp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace every field that `overrides` sets.
    pub fn overlay(&mut self, overrides: Config) {
        fn pick(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        pick(&mut self.caiyun_api_key, overrides.caiyun_api_key);
        pick(&mut self.amap_api_key, overrides.amap_api_key);
        pick(&mut self.language, overrides.language);
        pick(&mut self.unit, overrides.unit);
        pick(&mut self.caiyun_base_url, overrides.caiyun_base_url);
        pick(&mut self.amap_base_url, overrides.amap_base_url);
    }

    pub fn caiyun_api_key(&self) -> Option<&str> {
        non_blank(self.caiyun_api_key.as_deref())
    }

    pub fn amap_api_key(&self) -> Option<&str> {
        non_blank(self.amap_api_key.as_deref())
    }

    /// Language and unit used when a call doesn't specify them.
    pub fn default_locale(&self) -> Result<Locale> {
        let language = match non_blank(self.language.as_deref()) {
            Some(value) => Language::try_from(value).context("Invalid default language")?,
            None => Language::default(),
        };
        let unit = match non_blank(self.unit.as_deref()) {
            Some(value) => Unit::try_from(value).context("Invalid default unit")?,
            None => Unit::default(),
        };

        Ok(Locale { language, unit })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
