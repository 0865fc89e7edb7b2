//! Debug MCP Server Library
//!
//! A Model Context Protocol (MCP) server for exercising and debugging MCP
//! clients over stdio.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Configuration, error handling, the shared outbound HTTP
//!   session, the server handler and the stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: `debug_info`, `echo`, `fetch_api_data` and `weather_api`
//!   - **resources**: `config://settings` and `debug://logs`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use debug_mcp_server::core::{Config, McpServer, OutboundSession, SessionGuard, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let session = Arc::new(OutboundSession::new(config.http.clone()));
//!     let _guard = SessionGuard::new(session.clone());
//!     StdioTransport::run(McpServer::new(config, session)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, McpServer};
