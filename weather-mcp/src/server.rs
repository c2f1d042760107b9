use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tracing::{error, info};
use weather_core::{
    CaiyunClient, Coordinate, Geocoder, Language, Locale, NormalizedReport, ReportKind,
    ReportRequest, SkyconTables, Unit,
    model::{DAILY_STEPS_DEFAULT, HOURLY_STEPS_DEFAULT},
    normalize,
};

use crate::params::{
    AddressWeatherParams, CoordinateParams, DailyParams, HourlyParams, LocaleArgs,
    LocationWeatherParams, step_count,
};

const INSTRUCTIONS: &str = "Weather data from the Caiyun API.\n\
    Coordinates are longitude/latitude in degrees. `get_weather_by_address` geocodes a free-text \
    address first. Optional `language` (zh_CN, en_US) and `unit` (metric, imperial) override the \
    server defaults. Step counts outside 1-15 days or 1-360 hours are clamped.";

/// Tool gateway: validates arguments, fetches, normalizes and serializes reports.
#[derive(Clone)]
pub struct WeatherServer {
    client: CaiyunClient,
    geocoder: Arc<dyn Geocoder>,
    skycons: Arc<SkyconTables>,
    defaults: Locale,
    tool_router: ToolRouter<WeatherServer>,
}

#[tool_router]
impl WeatherServer {
    pub fn new(
        client: CaiyunClient,
        geocoder: Arc<dyn Geocoder>,
        skycons: Arc<SkyconTables>,
        defaults: Locale,
    ) -> Self {
        Self { client, geocoder, skycons, defaults, tool_router: Self::tool_router() }
    }

    #[tool(description = "Get combined realtime, forecast and alert weather for a coordinate")]
    async fn get_weather_by_location(
        &self,
        Parameters(params): Parameters<LocationWeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let coordinate = Coordinate::new(params.longitude, params.latitude);
        let kind = combined(params.daily_steps, params.hourly_steps);

        let result = self.report(coordinate, kind, locale).await;
        Ok(tool_result("get_weather_by_location", result))
    }

    #[tool(description = "Get combined weather for an address, e.g. \"北京市海淀区\"")]
    async fn get_weather_by_address(
        &self,
        Parameters(params): Parameters<AddressWeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let kind = combined(params.daily_steps, params.hourly_steps);

        let result = match self.geocoder.geocode(&params.address).await {
            Ok(coordinate) => {
                info!(address = %params.address, %coordinate, "Resolved address");
                self.report(coordinate, kind, locale).await
            }
            Err(e) => Err(e),
        };
        Ok(tool_result("get_weather_by_address", result))
    }

    #[tool(description = "Get realtime weather conditions")]
    async fn get_realtime_weather(
        &self,
        Parameters(params): Parameters<CoordinateParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let coordinate = Coordinate::new(params.longitude, params.latitude);

        let result = self.report(coordinate, ReportKind::Realtime, locale).await;
        Ok(tool_result("get_realtime_weather", result))
    }

    #[tool(description = "Get the minute-level precipitation forecast for the next two hours")]
    async fn get_minutely_forecast(
        &self,
        Parameters(params): Parameters<CoordinateParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let coordinate = Coordinate::new(params.longitude, params.latitude);

        let result = self.report(coordinate, ReportKind::Minutely, locale).await;
        Ok(tool_result("get_minutely_forecast", result))
    }

    #[tool(description = "Get the hourly weather forecast")]
    async fn get_hourly_forecast(
        &self,
        Parameters(params): Parameters<HourlyParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let coordinate = Coordinate::new(params.longitude, params.latitude);
        let hourly_steps = step_count(params.hourly_steps, HOURLY_STEPS_DEFAULT);

        let result = self.report(coordinate, ReportKind::Hourly { hourly_steps }, locale).await;
        Ok(tool_result("get_hourly_forecast", result))
    }

    #[tool(description = "Get the daily weather forecast")]
    async fn get_daily_forecast(
        &self,
        Parameters(params): Parameters<DailyParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let coordinate = Coordinate::new(params.longitude, params.latitude);
        let daily_steps = step_count(params.daily_steps, DAILY_STEPS_DEFAULT);

        let result = self.report(coordinate, ReportKind::Daily { daily_steps }, locale).await;
        Ok(tool_result("get_daily_forecast", result))
    }

    #[tool(description = "Get active weather alerts")]
    async fn get_weather_alert(
        &self,
        Parameters(params): Parameters<CoordinateParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = self.locale(&params.locale);
        let coordinate = Coordinate::new(params.longitude, params.latitude);

        let result = self.report(coordinate, ReportKind::Alert, locale).await;
        Ok(tool_result("get_weather_alert", result))
    }
}

impl WeatherServer {
    /// Per-call locale over the server defaults.
    fn locale(&self, args: &LocaleArgs) -> Locale {
        Locale {
            language: args.language.map_or(self.defaults.language, Language::from),
            unit: args.unit.map_or(self.defaults.unit, Unit::from),
        }
    }

    async fn report(
        &self,
        coordinate: Coordinate,
        kind: ReportKind,
        locale: Locale,
    ) -> weather_core::Result<NormalizedReport> {
        let raw = self.client.fetch(&ReportRequest::new(coordinate, kind, locale)).await?;
        normalize(&raw, &kind, &self.skycons, locale.language)
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

fn combined(daily_steps: Option<f64>, hourly_steps: Option<f64>) -> ReportKind {
    ReportKind::Combined {
        daily_steps: step_count(daily_steps, DAILY_STEPS_DEFAULT),
        hourly_steps: step_count(hourly_steps, HOURLY_STEPS_DEFAULT),
        alert: true,
    }
}

/// Serialize a report as pretty JSON, or turn the fault into an error-flagged result.
fn tool_result(tool: &str, result: weather_core::Result<NormalizedReport>) -> CallToolResult {
    let text = result.map_err(|e| e.to_string()).and_then(|report| {
        serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))
    });

    match text {
        Ok(json) => {
            info!(tool, "Tool call succeeded");
            CallToolResult::success(vec![Content::text(json)])
        }
        Err(message) => {
            error!(tool, %message, "Tool call failed");
            CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
        }
    }
}
