//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, opens the shared outbound HTTP
//! session and serves MCP over stdio until the client disconnects.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use debug_mcp_server::core::config::LoggingConfig;
use debug_mcp_server::core::{Config, McpServer, OutboundSession, SessionGuard, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, so configuration warnings are not lost
    init_logging(&LoggingConfig::from_env().level);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    let session = Arc::new(OutboundSession::new(config.http.clone()));
    // Closes the session on every exit path, including errors and panics.
    let _session_guard = SessionGuard::new(session.clone());

    let server = McpServer::new(config, session);

    info!("Server initialized");

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for protocol frames.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
