//! Debug info tool definition.
//!
//! Reports the server's identity and what it currently exposes.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::json_result;
use crate::core::config::Config;
use crate::core::time::now_iso8601;
use crate::domains::resources::resource_uris;
use crate::domains::tools::ToolRegistry;

// ============================================================================
// Tool Parameters
// ============================================================================

/// The debug info tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DebugInfoParams {}

// ============================================================================
// Structured Output
// ============================================================================

/// Snapshot of the running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub server_name: String,
    pub timestamp: String,
    pub tools_available: Vec<String>,
    pub resources_available: Vec<String>,
    pub status: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Debug info tool - introspects the server.
pub struct DebugInfoTool;

impl DebugInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "debug_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get server debug information";

    /// Execute the tool logic.
    pub fn execute(_params: &DebugInfoParams, config: &Config) -> CallToolResult {
        info!("Debug info requested");

        let snapshot = DebugInfo {
            server_name: config.server.name.clone(),
            timestamp: now_iso8601(),
            tools_available: ToolRegistry::tool_names()
                .into_iter()
                .map(String::from)
                .collect(),
            resources_available: resource_uris().into_iter().map(String::from).collect(),
            status: "running".to_string(),
        };

        json_result(&snapshot)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DebugInfoParams>(),
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
