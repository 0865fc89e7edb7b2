//! Weather tool definition.
//!
//! Serves clearly-labelled mock data unless an OpenWeatherMap API key is
//! configured, in which case it queries the current-weather endpoint
//! through the shared outbound session.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::common::{describe_error, json_result};
use crate::core::config::WeatherConfig;
use crate::core::session::OutboundSession;

const MOCK_NOTE: &str = "This is mock data. Set MCP_WEATHER_API_KEY for actual data.";
const LIVE_NOTE: &str = "Live data from OpenWeatherMap.";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeatherApiParams {
    /// City to report on.
    #[schemars(description = "City name")]
    pub city: String,
}

// ============================================================================
// Structured Output
// ============================================================================

/// Weather report returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind_speed: String,
    pub note: String,
}

#[derive(Debug, Serialize)]
struct WeatherFailure<'a> {
    error: &'static str,
    message: String,
    city: &'a str,
}

/// Subset of the OpenWeatherMap current-weather response we read.
#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    /// Metres per second with `units=metric`.
    speed: f64,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Weather tool - current conditions for a city.
pub struct WeatherApiTool;

impl WeatherApiTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "weather_api";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather information for a city";

    /// Execute the tool logic.
    pub async fn execute(
        params: &WeatherApiParams,
        config: &WeatherConfig,
        session: &OutboundSession,
    ) -> CallToolResult {
        info!("Weather data requested for {}", params.city);

        let Some(api_key) = config.api_key.as_deref() else {
            return json_result(&Self::mock_report(&params.city));
        };

        match Self::fetch_live(&params.city, api_key, &config.base_url, session).await {
            Ok(report) => json_result(&report),
            Err(e) => {
                // Strip the URL: its query string carries the API key.
                let message = describe_error(&e.without_url());
                error!("Weather API error: {}", message);
                json_result(&WeatherFailure {
                    error: "Weather API Error",
                    message,
                    city: &params.city,
                })
            }
        }
    }

    fn mock_report(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.to_string(),
            temperature: "22°C".to_string(),
            description: "Partly cloudy".to_string(),
            humidity: "65%".to_string(),
            wind_speed: "10 km/h".to_string(),
            note: MOCK_NOTE.to_string(),
        }
    }

    async fn fetch_live(
        city: &str,
        api_key: &str,
        base_url: &str,
        session: &OutboundSession,
    ) -> Result<WeatherReport, reqwest::Error> {
        let client = session.acquire()?;
        let current: OwmResponse = client
            .get(base_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(WeatherReport {
            city: city.to_string(),
            temperature: format!("{:.0}°C", current.main.temp),
            description: current
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_else(|| "Unknown".to_string()),
            humidity: format!("{:.0}%", current.main.humidity),
            wind_speed: current
                .wind
                .map(|w| format!("{:.0} km/h", w.speed * 3.6))
                .unwrap_or_else(|| "n/a".to_string()),
            note: LIVE_NOTE.to_string(),
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<WeatherApiParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
