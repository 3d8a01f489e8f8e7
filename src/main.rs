use std::sync::Arc;

use rmcp::ServiceExt;

use openapi_mcp_bridge::logging;
use openapi_mcp_bridge::{
    load_providers, BridgeConfig, BridgeServer, Dispatcher, ToolRegistry, ToolSynthesizer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging system
    let _guard = logging::init_logging()?;

    tracing::info!("=== OpenAPI MCP Bridge Starting ===");

    let config = BridgeConfig::from_env()?;
    tracing::info!("Loading providers from {:?}", config.providers_dir);

    let providers = load_providers(&config.providers_dir)?;

    let synthesizer = ToolSynthesizer::new().with_max_name_length(config.max_name_length);
    let registry = Arc::new(ToolRegistry::from_providers(&providers, &synthesizer));

    if registry.is_empty() {
        tracing::warn!("No tools registered; check {:?}", config.providers_dir);
    }

    let dispatcher = Dispatcher::with_timeout(config.request_timeout());
    let server = BridgeServer::new(registry, dispatcher);

    // Serve MCP over stdin/stdout until the client disconnects
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    tracing::info!("=== OpenAPI MCP Bridge Shutting Down ===");

    Ok(())
}
