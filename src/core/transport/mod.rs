//! Transport layer for the MCP server.
//!
//! The server speaks MCP over standard input/output only; framing and the
//! `initialize` handshake are handled by rmcp's stdio transport.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
