//! # Configuration
//!
//! Layered service configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A TOML file: `--config <path>`, or `config/default.toml` if present
//! 3. Environment variables prefixed with `MARKET_API`, sections separated by
//!    `__` (e.g. `MARKET_API__SERVER__PORT=8080`)
//!
//! # Examples
//!
//! ```no_run
//! use market_api::config::AppConfig;
//!
//! let config = AppConfig::load(None)?;
//! println!("listening on {}", config.server.address());
//! # Ok::<(), config::ConfigError>(())
//! ```

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::Path;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "MARKET_API";

/// Default HTTP port.
const DEFAULT_PORT: u16 = 3000;

/// Default connection pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Storage backend.
    pub database: DatabaseConfig,
    /// Logging.
    pub log: LogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Storage configuration.
///
/// Without a URL the service keeps everything in memory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "market_api=info,tower_http=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// `.env` is read first so its variables take part in the environment layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicit file is missing or any source
    /// fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::build(
            Config::builder()
                .add_source(file)
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
