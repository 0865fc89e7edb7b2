//! Common utilities shared across tool definitions.
//!
//! Argument decoding, result formatting and error-message helpers.

use std::any::Any;

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::domains::tools::ToolError;

/// Decode a tool's argument object into its parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Create a success result whose single text block is pretty-printed JSON.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            error!("Failed to serialize tool output: {}", e);
            CallToolResult::error(vec![Content::text(format!(
                "Failed to serialize tool output: {}",
                e
            ))])
        }
    }
}

/// Render an error together with its chain of sources.
///
/// `reqwest` keeps the useful detail ("Connection refused", "dns error")
/// in the source chain rather than in the top-level message.
pub fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Extract a readable message from a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
pub fn result_json(result: &CallToolResult) -> serde_json::Value {
    serde_json::from_str(result_text(result)).expect("tool output should be JSON")
}
