//! TinyTasks MCP server entry point.

use clap::Parser;

use tinytasks_mcp::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        tracing::error!(error = %format!("{err:#}"), "fatal error");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
