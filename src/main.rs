use std::sync::Arc;

use radar_mcp_server::config::ServerConfig;
use radar_mcp_server::server::McpServer;
use radar_mcp_server::source;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the JSON-RPC stream; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "radar_mcp_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("radar-mcp-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    let radar = match source::load_radar(&config).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(url = %config.entries_url, "radar-mcp-server: cannot load radar entries: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        url = %radar.source_url(),
        entries = radar.len(),
        "Radar entries loaded"
    );

    let mut server = McpServer::new(Arc::new(radar));
    if let Err(e) = server.run().await {
        tracing::error!("radar-mcp-server: fatal error: {e}");
        std::process::exit(1);
    }
}
