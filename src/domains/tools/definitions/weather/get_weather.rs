//! Weather lookup tool.
//!
//! Queries the OpenWeatherMap current-weather endpoint for a location and
//! reports temperature (Celsius and Fahrenheit), condition, humidity and
//! wind speed.
//!
//! A missing API key is not an error: the tool answers with a successful
//! result explaining how to configure it. Network and API failures are
//! handler-level faults.

use std::time::Duration;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::core::config::Config;
use crate::domains::tools::definitions::common::{describe, success_result};
use crate::domains::tools::{ToolError, ToolHandler, parse_params, require_non_blank};

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Text returned when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "Weather API key not configured. Set OPENWEATHER_API_KEY environment variable.";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWeatherParams {
    /// City name, optionally with a country code.
    #[schemars(description = "City name (e.g., \"New York\" or \"London,UK\")")]
    pub location: String,
}

// ============================================================================
// Provider Response
// ============================================================================

/// Subset of the OpenWeatherMap current-weather response.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub name: String,
    #[serde(default)]
    pub sys: WeatherSys,
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub wind: WeatherWind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherSys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherWind {
    #[serde(default)]
    pub speed: f64,
}

/// Convert Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

impl WeatherReport {
    /// Render the human-readable report.
    pub fn render(&self) -> String {
        let location = match self.sys.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        };
        let condition = self
            .weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("unknown");

        format!(
            "Weather in {}:\nTemperature: {}°C ({:.1}°F)\nCondition: {}\nHumidity: {}%\nWind Speed: {} m/s",
            location,
            self.main.temp,
            celsius_to_fahrenheit(self.main.temp),
            condition,
            self.main.humidity,
            self.wind.speed
        )
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Weather tool - current conditions for a location.
pub struct GetWeatherTool {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GetWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get current weather for a location using the OpenWeatherMap API";

    /// Create the tool from the server configuration.
    pub fn new(config: &Config) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ToolError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.credentials.openweather_api_key.clone(),
            base_url: config.weather.base_url.clone(),
            client,
        })
    }

    /// Look up the weather for the requested location.
    #[instrument(skip_all, fields(location = %params.location))]
    pub async fn execute(&self, params: &GetWeatherParams) -> Result<CallToolResult, ToolError> {
        let location = require_non_blank("location", &params.location)?;

        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Weather lookup requested without {} configured", API_KEY_ENV);
            return Ok(success_result(MISSING_KEY_MESSAGE));
        };

        info!("Fetching weather for {}", location);
        let report = self.fetch(location, api_key).await?;
        Ok(success_result(report.render()))
    }

    async fn fetch(&self, location: &str, api_key: &str) -> Result<WeatherReport, ToolError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                // Strip the URL: it carries the API key as a query parameter.
                ToolError::execution_failed(format!(
                    "Failed to get weather: {}",
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::execution_failed(format!(
                "Failed to get weather: Weather API error: {}",
                status
            )));
        }

        response.json::<WeatherReport>().await.map_err(|e| {
            ToolError::execution_failed(format!(
                "Failed to get weather: invalid response: {}",
                e.without_url()
            ))
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        describe::<GetWeatherParams>(Self::NAME, Self::DESCRIPTION)
    }
}

#[async_trait]
impl ToolHandler for GetWeatherTool {
    fn tool(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: GetWeatherParams = parse_params(arguments)?;
        self.execute(&params).await
    }
}
