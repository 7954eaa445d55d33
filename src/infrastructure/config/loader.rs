use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::{Config, TransportMode};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid API base URL: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Server host cannot be empty")]
    EmptyHost,

    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Values given on the command line, applied after every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub web: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_base_url: Option<String>,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the current directory
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .tinytasks/config.yaml
    /// 3. .tinytasks/local.yaml (optional overrides)
    /// 4. --config file, when given
    /// 5. Environment variables (TINYTASKS_* prefix, `__` separates sections)
    /// 6. Hosting environment: PORT, WEB_MODE=true and NODE_ENV=production (quiet)
    /// 7. Command-line flags
    pub fn load(overrides: &ConfigOverrides) -> Result<Config> {
        Self::load_from_dir(".", overrides)
    }

    /// Load configuration using `dir` as the project root
    pub fn load_from_dir(dir: impl AsRef<Path>, overrides: &ConfigOverrides) -> Result<Config> {
        let dir = dir.as_ref().join(".tinytasks");

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")));

        if let Some(path) = &overrides.config_file {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment
            .merge(Env::prefixed("TINYTASKS_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()));

        if std::env::var("WEB_MODE").is_ok_and(|v| v == "true") {
            figment = figment.merge(Serialized::default("mode", TransportMode::Web));
        }
        if std::env::var("NODE_ENV").is_ok_and(|v| v == "production") {
            figment = figment.merge(Serialized::default("logging.quiet", true));
        }

        let mut config: Config = figment
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::apply_overrides(&mut config, overrides);
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) {
        if overrides.web {
            config.mode = TransportMode::Web;
        }
        if let Some(host) = &overrides.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = overrides.port {
            config.server.port = port;
        }
        if let Some(url) = &overrides.api_base_url {
            config.api.base_url.clone_from(url);
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = config.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(config.api.base_url.clone()));
        }

        if config.server.host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::DEFAULT_API_BASE_URL;
    use std::fs;

    const ENV_KEYS: [(&str, Option<&str>); 7] = [
        ("PORT", None),
        ("NODE_ENV", None),
        ("TINYTASKS_LOGGING__QUIET", None),
        ("WEB_MODE", None),
        ("TINYTASKS_MODE", None),
        ("TINYTASKS_SERVER__PORT", None),
        ("TINYTASKS_API__BASE_URL", None),
    ];

    fn load_clean(dir: &Path, overrides: &ConfigOverrides) -> Result<Config> {
        temp_env::with_vars(ENV_KEYS, || ConfigLoader::load_from_dir(dir, overrides))
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mode, TransportMode::Stdio);
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
mode: web
api:
  base_url: http://localhost:4000
server:
  host: 127.0.0.1
  port: 8080
logging:
  level: debug
  format: json
  quiet: true
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.mode, TransportMode::Web);
        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.logging.quiet);
        assert_eq!(config.logging.rotation, "daily");
        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_clean(dir.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_file_then_local_override() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(".tinytasks");
        fs::create_dir_all(&project).unwrap();
        fs::write(
            project.join("config.yaml"),
            "server:\n  port: 4000\napi:\n  base_url: http://api.local\n",
        )
        .unwrap();
        fs::write(project.join("local.yaml"), "server:\n  port: 4001\n").unwrap();

        let config = load_clean(dir.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.server.port, 4001);
        assert_eq!(config.api.base_url, "http://api.local");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(".tinytasks");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("config.yaml"), "server:\n  port: 4000\n").unwrap();

        let config = temp_env::with_vars(
            [
                ("PORT", None),
                ("WEB_MODE", None),
                ("TINYTASKS_MODE", Some("web")),
                ("TINYTASKS_SERVER__PORT", Some("5000")),
                ("TINYTASKS_API__BASE_URL", None),
            ],
            || ConfigLoader::load_from_dir(dir.path(), &ConfigOverrides::default()),
        )
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.mode, TransportMode::Web);
    }

    #[test]
    fn test_hosting_env_port_and_web_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars(
            [
                ("PORT", Some("8081")),
                ("WEB_MODE", Some("true")),
                ("TINYTASKS_MODE", None),
                ("TINYTASKS_SERVER__PORT", None),
                ("TINYTASKS_API__BASE_URL", None),
            ],
            || ConfigLoader::load_from_dir(dir.path(), &ConfigOverrides::default()),
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.mode, TransportMode::Web);
    }

    #[test]
    fn test_web_mode_other_values_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars(
            [
                ("PORT", None),
                ("WEB_MODE", Some("1")),
                ("TINYTASKS_MODE", None),
                ("TINYTASKS_SERVER__PORT", None),
                ("TINYTASKS_API__BASE_URL", None),
            ],
            || ConfigLoader::load_from_dir(dir.path(), &ConfigOverrides::default()),
        )
        .unwrap();

        assert_eq!(config.mode, TransportMode::Stdio);
    }

    #[test]
    fn test_production_node_env_silences_banner() {
        let dir = tempfile::tempdir().unwrap();
        let load = |node_env: &str| {
            temp_env::with_vars(
                [
                    ("PORT", None),
                    ("WEB_MODE", None),
                    ("NODE_ENV", Some(node_env)),
                    ("TINYTASKS_MODE", None),
                    ("TINYTASKS_LOGGING__QUIET", None),
                ],
                || ConfigLoader::load_from_dir(dir.path(), &ConfigOverrides::default()),
            )
            .unwrap()
        };

        assert!(load("production").logging.quiet);
        assert!(!load("development").logging.quiet);
    }

    #[test]
    fn test_cli_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            web: true,
            port: Some(9999),
            host: Some("127.0.0.1".to_string()),
            api_base_url: Some("http://localhost:1234".to_string()),
            config_file: None,
        };

        let config = temp_env::with_vars(
            [
                ("PORT", Some("8081")),
                ("WEB_MODE", None),
                ("TINYTASKS_MODE", None),
                ("TINYTASKS_SERVER__PORT", None),
                ("TINYTASKS_API__BASE_URL", None),
            ],
            || ConfigLoader::load_from_dir(dir.path(), &overrides),
        )
        .unwrap();

        assert_eq!(config.mode, TransportMode::Web);
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.api.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.yaml");
        fs::write(&file, "logging:\n  level: debug\n").unwrap();

        let overrides = ConfigOverrides {
            config_file: Some(file),
            ..Default::default()
        };
        let config = load_clean(dir.path(), &overrides).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(dir.path().join("absent.yaml")),
            ..Default::default()
        };
        let err = load_clean(dir.path(), &overrides).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn test_validate_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidBaseUrl(url)) => assert_eq!(url, "ftp://example.com"),
            other => panic!("Expected InvalidBaseUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPort)
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRotation(_))
        ));
    }
}
