//! Configuration management for dartlens
//!
//! Loads and validates the YAML configuration shared by the CLI and the HTTP
//! server. Every field has a default, so an empty file is a valid config.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Period names accepted by `analysis.default_period`
pub const PERIOD_NAMES: [&str; 6] = ["current", "prior", "prior_prior", "당기", "전기", "전전기"];

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Browser origins allowed to call the API
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Statement analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Period analysed when a request names none
    #[serde(default = "default_period")]
    pub default_period: String,
    /// Number of leading rows scanned for the financial digest
    #[serde(default = "default_digest_limit")]
    pub digest_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
            digest_limit: default_digest_limit(),
        }
    }
}

fn default_period() -> String {
    "current".to_string()
}

fn default_digest_limit() -> usize {
    15
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path.to_path_buf())
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        let period = self.analysis.default_period.trim().to_lowercase();
        if !PERIOD_NAMES.contains(&period.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.default_period".to_string(),
                reason: format!("Period must be one of: {}", PERIOD_NAMES.join(", ")),
            });
        }

        if self.analysis.digest_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.digest_limit".to_string(),
                reason: "Digest limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
