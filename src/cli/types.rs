//! CLI type definitions

use clap::Parser;
use std::path::PathBuf;

use crate::infrastructure::config::ConfigOverrides;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tinytasks-mcp")]
#[command(about = "MCP server exposing the TinyTasks API as tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Serve HTTP JSON endpoints instead of stdio
    #[arg(long)]
    pub web: bool,

    /// Port to listen on in web mode
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind in web mode
    #[arg(long)]
    pub host: Option<String>,

    /// Origin of the remote task API
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Extra YAML configuration file, merged over .tinytasks/
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            web: self.web,
            host: self.host.clone(),
            port: self.port,
            api_base_url: self.api_base_url.clone(),
        }
    }
}
