//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file; the Redis URL may be
//! overridden through the `REDIS_URL` environment variable (a `.env`
//! file is honored at startup).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Supported cache backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the CSV seed files.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./seed_data"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    /// Redis connection URL; `REDIS_URL` wins over this when set.
    pub url: Option<String>,
    pub ttl_seconds: u64,
    pub op_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            url: None,
            ttl_seconds: 300,
            op_timeout_ms: 250,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Effective Redis URL: environment override first, then the file.
    #[must_use]
    pub fn redis_url(&self) -> Option<String> {
        std::env::var("REDIS_URL").ok().or_else(|| self.cache.url.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ttl_seconds",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.op_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "op_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.backend == CacheBackendKind::Redis
            && self.redis_url().map_or(true, |url| url.is_empty())
        {
            return Err(ConfigError::MissingField { field: "cache.url" }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_memory_backend() {
        let config = Config::default();
        assert_eq!(config.cache.backend, CacheBackendKind::Memory);
        assert_eq!(config.cache.ttl_seconds, 300);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config: Config = toml::from_str("[cache]\nttl_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn redis_backend_requires_a_url() {
        let config: Config = toml::from_str("[cache]\nbackend = \"redis\"\n").unwrap();
        // Only meaningful when REDIS_URL is not set in the environment.
        if std::env::var("REDIS_URL").is_err() {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let config: Config = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.cache.ttl_seconds, 300);
    }
}
