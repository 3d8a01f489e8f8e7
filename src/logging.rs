//! Logging setup
//!
//! stdout carries the MCP stdio transport, so every log line goes to stderr
//! through a non-blocking writer. The filter comes from `RUST_LOG`, defaulting
//! to `openapi_mcp_bridge=info`. Set `OPENAPI_MCP_LOG_FORMAT=json` for JSON lines.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::core::{BridgeError, BridgeResult};

/// Environment variable selecting the log format (`json` or anything else for text)
pub const ENV_LOG_FORMAT: &str = "OPENAPI_MCP_LOG_FORMAT";

const DEFAULT_FILTER: &str = "openapi_mcp_bridge=info";

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the writer.
pub fn init_logging() -> BridgeResult<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| BridgeError::other(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}
