//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The closed set of tools ([`ToolKind`]) and their metadata
//! - Dispatch of a named call to the matching handler

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{error, info, warn};

use crate::core::config::Config;
use crate::core::session::OutboundSession;

use super::definitions::common::{json_result, panic_message, parse_params};
use super::definitions::{DebugInfoTool, EchoTool, FetchApiDataTool, WeatherApiTool};
use super::error::ToolError;

// ============================================================================
// Tool Kinds
// ============================================================================

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    DebugInfo,
    Echo,
    FetchApiData,
    WeatherApi,
}

impl ToolKind {
    /// All tools, in enumeration order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::DebugInfo,
        ToolKind::Echo,
        ToolKind::FetchApiData,
        ToolKind::WeatherApi,
    ];

    /// Registered tool name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DebugInfo => DebugInfoTool::NAME,
            Self::Echo => EchoTool::NAME,
            Self::FetchApiData => FetchApiDataTool::NAME,
            Self::WeatherApi => WeatherApiTool::NAME,
        }
    }

    /// Exact, case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Tool metadata (name, description, input schema).
    pub fn to_tool(self) -> Tool {
        match self {
            Self::DebugInfo => DebugInfoTool::to_tool(),
            Self::Echo => EchoTool::to_tool(),
            Self::FetchApiData => FetchApiDataTool::to_tool(),
            Self::WeatherApi => WeatherApiTool::to_tool(),
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - lists tools and dispatches calls to them.
///
/// The outbound session is injected here and only reaches the tools that
/// perform network I/O.
pub struct ToolRegistry {
    config: Arc<Config>,
    session: Arc<OutboundSession>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>, session: Arc<OutboundSession>) -> Self {
        Self { config, session }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        ToolKind::ALL.into_iter().map(ToolKind::name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for the `tools/list` response.
    pub fn get_all_tools() -> Vec<Tool> {
        ToolKind::ALL.into_iter().map(ToolKind::to_tool).collect()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Unknown names and undecodable arguments are errors. Everything that
    /// happens inside a handler, including a panic, comes back as content.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let Some(kind) = ToolKind::from_name(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        // Argument values may carry credentials (e.g. an Authorization header).
        info!(
            "Tool called: {} with args: {:?}",
            name,
            arguments.keys().collect::<Vec<_>>()
        );

        match AssertUnwindSafe(self.dispatch(kind, arguments))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", name, message);
                Ok(unexpected_fault(name, message))
            }
        }
    }

    async fn dispatch(
        &self,
        kind: ToolKind,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let result = match kind {
            ToolKind::DebugInfo => DebugInfoTool::execute(&parse_params(arguments)?, &self.config),
            ToolKind::Echo => EchoTool::execute(&parse_params(arguments)?),
            ToolKind::FetchApiData => {
                FetchApiDataTool::execute(parse_params(arguments)?, &self.session).await
            }
            ToolKind::WeatherApi => {
                WeatherApiTool::execute(
                    &parse_params(arguments)?,
                    &self.config.weather,
                    &self.session,
                )
                .await
            }
        };
        Ok(result)
    }
}

/// Content reported for a handler that panicked.
///
/// Same shape as the proxy's own "Unexpected Error" report: a successful
/// result whose body names the failure.
fn unexpected_fault(tool: &str, message: String) -> CallToolResult {
    json_result(&serde_json::json!({
        "error": "Unexpected Error",
        "message": message,
        "tool": tool,
    }))
}
