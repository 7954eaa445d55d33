//! Process bootstrap: configuration, logging, then one transport.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use super::types::Cli;
use crate::adapters::mcp::{StdioServer, WebHttpConfig, WebHttpServer};
use crate::domain::models::{Config, TransportMode};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{install_panic_hook, Logger};
use crate::infrastructure::tasks_api::TasksApiClient;
use crate::services::ToolDispatcher;

/// Run the server selected by `cli` until its transport finishes.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(&cli.overrides())?;

    if cli.print_config {
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        print!("{yaml}");
        return Ok(());
    }

    let _logger = Logger::init(&config.logging)?;
    install_panic_hook();

    let client = TasksApiClient::new(config.api.base_url.clone())?;
    let dispatcher = Arc::new(ToolDispatcher::new(client));

    if !config.logging.quiet {
        log_banner(&config, dispatcher.catalog().len());
    }

    match config.mode {
        TransportMode::Stdio => {
            let server = StdioServer::new(dispatcher);
            server.run().await
        }
        TransportMode::Web => {
            let server = WebHttpServer::new(
                dispatcher,
                WebHttpConfig {
                    host: config.server.host.clone(),
                    port: config.server.port,
                    enable_cors: true,
                    api_base: config.api.base_url.clone(),
                },
            );
            server.serve_with_shutdown(shutdown_signal()).await
        }
    }
}

fn log_banner(config: &Config, tools: usize) {
    info!(api_base = %config.api.base_url, tools, "TinyTasks MCP server starting");
    match config.mode {
        TransportMode::Stdio => info!("TinyTasks MCP Server running on stdio"),
        TransportMode::Web => {
            let origin = format!("http://{}:{}", config.server.host, config.server.port);
            info!(port = config.server.port, "TinyTasks MCP Web Server running");
            info!("Tools: {origin}/mcp/tools");
            info!("Execute: {origin}/mcp/execute");
            info!("Health: {origin}/health");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
