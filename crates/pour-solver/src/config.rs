//! `pour.toml` configuration
//!
//! Every field is optional. The file is found by searching upward from the
//! working directory; command line flags override what it sets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::DEFAULT_TTL;

pub const CONFIG_FILE: &str = "pour.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The main configuration file structure (pour.toml)
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Solution cache configuration
    pub cache: CacheConfig,

    /// Request limits
    pub limits: LimitsConfig,
}

/// HTTP server configuration
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: Option<String>,

    /// Port to listen on
    pub port: Option<u16>,

    /// Number of request threads (0 = number of CPU cores)
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Lifetime of a cached solution in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: DEFAULT_TTL.as_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest bucket capacity accepted over HTTP (0 = unlimited)
    pub max_capacity: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
        }
    }
}

impl LimitsConfig {
    /// Whether `capacity` is within the configured limit
    pub fn allows(&self, capacity: u32) -> bool {
        self.max_capacity == 0 || capacity <= self.max_capacity
    }
}

impl Config {
    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from pour.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.is_file() {
                log::debug!("Loading configuration from {}", config_path.display());
                return Self::from_file(&config_path).map(Some);
            }

            // Move to parent directory
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Self::load(&cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl(), Duration::from_secs(600));
        assert_eq!(config.limits.max_capacity, 100_000);
        assert!(config.server.port.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
workers = 2

[cache]
enabled = false
ttl_secs = 30

[limits]
max_capacity = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.server.workers, Some(2));
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl(), Duration::from_secs(30));
        assert!(config.limits.allows(u32::MAX));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config = toml::from_str("[cache]\nttl_secs = 5\n").unwrap();

        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 5);
    }

    #[test]
    fn test_limits_allows() {
        let limits = LimitsConfig { max_capacity: 10 };

        assert!(limits.allows(0));
        assert!(limits.allows(10));
        assert!(!limits.allows(11));
    }
}
