use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, Select, Text};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info, warn};
use weather_core::{
    Config, Geocoder, Language, SkyconTables, Unit, client_from_config, geocoder_from_config,
};

use crate::server::WeatherServer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "caiyun-weather-mcp", version, about = "Caiyun weather MCP server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve weather tools over stdio (the default).
    Serve,

    /// Store API keys and default language/unit in the config file.
    Configure,
}

/// Settings that take precedence over the config file.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Caiyun weather API key.
    #[arg(long, env = "CAIYUN_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// AMap geocoding key; without it addresses resolve to central Beijing.
    #[arg(long, env = "AMAP_API_KEY", global = true, hide_env_values = true)]
    pub amap_key: Option<String>,

    /// Default language: zh_CN or en_US.
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Default unit system: metric or imperial.
    #[arg(long, global = true)]
    pub unit: Option<String>,

    #[arg(long, env = "CAIYUN_BASE_URL", global = true, hide = true)]
    pub caiyun_base_url: Option<String>,

    #[arg(long, env = "AMAP_BASE_URL", global = true, hide = true)]
    pub amap_base_url: Option<String>,
}

impl From<Overrides> for Config {
    fn from(o: Overrides) -> Self {
        Config {
            caiyun_api_key: o.api_key,
            amap_api_key: o.amap_key,
            language: o.language,
            unit: o.unit,
            caiyun_base_url: o.caiyun_base_url,
            amap_base_url: o.amap_base_url,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => serve(self.overrides.into()).await,
            Command::Configure => configure(),
        }
    }
}

/// Resolve configuration (flags and env over the config file) and serve on stdio.
async fn serve(overrides: Config) -> anyhow::Result<()> {
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {e:#}");
        Config::default()
    });
    config.overlay(overrides);

    let client = client_from_config(&config)?;
    let defaults = config.default_locale()?;
    let geocoder: Arc<dyn Geocoder> = Arc::from(geocoder_from_config(&config));

    let server = WeatherServer::new(client, geocoder, Arc::new(SkyconTables::new()), defaults);

    info!(
        language = %defaults.language,
        unit = %defaults.unit,
        "Caiyun weather MCP server running on stdio"
    );
    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, shutting down");
            cancel.cancel();
        }
    });

    service.waiting().await?;
    info!("Caiyun weather MCP server stopped");
    Ok(())
}

/// Interactive configuration; empty answers keep the stored value.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let caiyun = Password::new("Caiyun API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read Caiyun API key")?;
    let amap = Text::new("AMap API key (optional):")
        .with_help_message("Used to geocode addresses; leave empty to keep the current value")
        .prompt()
        .context("Failed to read AMap API key")?;
    let language = Select::new("Default language:", Language::all().to_vec())
        .prompt()
        .context("Failed to read default language")?;
    let unit = Select::new("Default unit system:", Unit::all().to_vec())
        .prompt()
        .context("Failed to read default unit")?;

    let non_empty = |s: String| Some(s.trim().to_string()).filter(|s| !s.is_empty());
    config.overlay(Config {
        caiyun_api_key: non_empty(caiyun),
        amap_api_key: non_empty(amap),
        language: Some(language.to_string()),
        unit: Some(unit.to_string()),
        ..Config::default()
    });

    if config.caiyun_api_key().is_none() {
        bail!("A Caiyun API key is required");
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
