//! Application settings resource definition.

use serde::{Deserialize, Serialize};

use super::ResourceDefinition;
use crate::core::config::ResourcesConfig;
use crate::core::time::now_iso8601;
use crate::domains::resources::ResourceError;

/// Version of the settings document layout.
const SETTINGS_VERSION: &str = "1.0";

/// Settings snapshot published to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub version: String,
    pub debug: bool,
    pub last_updated: String,
}

/// Current application configuration (JSON, generated on read).
pub struct SettingsResource;

impl ResourceDefinition for SettingsResource {
    const URI: &'static str = "config://settings";
    const NAME: &'static str = "Application Settings";
    const DESCRIPTION: &'static str = "Current application configuration";
    const MIME_TYPE: &'static str = "application/json";

    fn render(config: &ResourcesConfig) -> Result<String, ResourceError> {
        let snapshot = SettingsSnapshot {
            version: SETTINGS_VERSION.to_string(),
            debug: config.debug,
            last_updated: now_iso8601(),
        };

        serde_json::to_string_pretty(&snapshot).map_err(|e| ResourceError::internal(e.to_string()))
    }
}
