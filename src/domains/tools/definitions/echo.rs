//! Echo tool definition.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::time::now_iso8601;

/// Parameters for the echo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// Message to echo back.
    #[schemars(description = "Message to echo back")]
    pub message: String,
}

/// Echo tool - returns the message prefixed with the current time.
pub struct EchoTool;

impl EchoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "echo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Echo back the input with timestamp and debug info";

    /// Execute the tool logic.
    pub fn execute(params: &EchoParams) -> CallToolResult {
        let response = format!("Echo at {}: {}", now_iso8601(), params.message);
        info!("Echo response: {}", response);
        CallToolResult::success(vec![Content::text(response)])
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EchoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
