//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including configuration, the shared outbound HTTP session, server
//! lifecycle management and the stdio transport.

pub mod config;
pub mod server;
pub mod session;
pub mod time;
pub mod transport;

pub use config::Config;
pub use server::McpServer;
pub use session::{OutboundSession, SessionGuard};
pub use transport::{StdioTransport, TransportError};
