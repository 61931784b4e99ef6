//! Configuration types and loading

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlueConfig {
    /// Longest attachment name accepted by the binder
    pub max_attachment_name_length: usize,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "PAPERGLUE_LOG_FORMAT".to_string(),
                message: format!("expected `pretty` or `json`, got `{}`", other),
            }),
        }
    }
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            max_attachment_name_length: 64,
            logging: LoggingConfig {
                filter: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Logging already initialized: {0}")]
    Telemetry(String),
}

impl GlueConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(len) = lookup("PAPERGLUE_MAX_ATTACHMENT_NAME_LENGTH") {
            config.max_attachment_name_length = match len.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "PAPERGLUE_MAX_ATTACHMENT_NAME_LENGTH".to_string(),
                        message: format!("expected a positive integer, got `{}`", len),
                    })
                }
                Ok(n) => n,
            };
        }

        if let Some(filter) = lookup("PAPERGLUE_LOG_FILTER") {
            config.logging.filter = filter;
        }
        if let Some(format) = lookup("PAPERGLUE_LOG_FORMAT") {
            config.logging.format = format.parse()?;
        }

        Ok(config)
    }
}
