//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default total timeout for outbound HTTP requests, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default OpenWeatherMap current-weather endpoint.
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Resources domain configuration.
    pub resources: ResourcesConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Outbound HTTP session configuration.
    pub http: HttpClientConfig,

    /// Weather tool configuration.
    pub weather: WeatherConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the resources domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Value of the `debug` flag published in `config://settings`.
    pub debug: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Policy for the shared outbound HTTP session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Total request timeout (connect, send and read the body), in seconds.
    pub timeout_secs: u64,

    /// Skip TLS certificate verification. Development only.
    pub accept_invalid_certs: bool,
}

impl HttpClientConfig {
    /// The total request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for the weather tool.
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. When unset the tool serves mock data.
    pub api_key: Option<String>,

    /// Current-weather endpoint queried when an API key is present.
    pub base_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self { debug: true }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            accept_invalid_certs: false,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load the logging section alone, so the subscriber can be installed
    /// before the rest of the configuration reports problems.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "debug-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            resources: ResourcesConfig::default(),
            logging: LoggingConfig::default(),
            http: HttpClientConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        if let Some(debug) = parse_env("MCP_DEBUG") {
            config.resources.debug = debug;
        }

        // A zero timeout would fail every outbound request immediately.
        if let Some(timeout_secs) = parse_env::<NonZeroU64>("MCP_HTTP_TIMEOUT_SECS") {
            config.http.timeout_secs = timeout_secs.get();
        }

        if let Some(accept_invalid_certs) = parse_env("MCP_HTTP_ACCEPT_INVALID_CERTS") {
            config.http.accept_invalid_certs = accept_invalid_certs;
        }
        if config.http.accept_invalid_certs {
            warn!(
                "TLS certificate verification is DISABLED for outbound requests. \
                 Do not use MCP_HTTP_ACCEPT_INVALID_CERTS outside development."
            );
        }

        match std::env::var("MCP_WEATHER_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => {
                config.weather.api_key = Some(api_key);
                info!("Weather API key loaded from environment");
            }
            _ => {
                info!("MCP_WEATHER_API_KEY not set - weather_api serves mock data");
            }
        }

        if let Ok(base_url) = std::env::var("MCP_WEATHER_BASE_URL") {
            config.weather.base_url = base_url;
        }

        config
    }
}

/// Parse an environment variable, ignoring it with a warning if malformed.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}
