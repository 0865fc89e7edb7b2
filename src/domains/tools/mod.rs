//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool enumeration and name-based dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`) with its
//!    params struct, `execute()` and `to_tool()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a `ToolKind` variant in `registry.rs`; the compiler will point
//!    at every match that needs the new arm

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::{ToolKind, ToolRegistry};
