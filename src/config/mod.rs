//! Configuration loading and management
//!
//! Configuration is a YAML document. Every field has a default, so an empty
//! file (or no file at all) yields a runnable in-memory service.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "FOOD_SERVICE_CONFIG";
/// Environment override for `server.bind_address`
pub const BIND_ADDRESS_ENV: &str = "FOOD_BIND_ADDRESS";
/// Environment override for `store.uri`
pub const MONGODB_URI_ENV: &str = "FOOD_MONGODB_URI";

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:8080`
    pub bind_address: String,

    /// Allow any origin, method and header (for browser front-ends in development)
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            permissive_cors: false,
        }
    }
}

/// Which store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// MongoDB connection string (ignored by the in-memory backend)
    pub uri: String,

    pub database: String,

    pub collection: String,

    /// Upper bound for a single store call, in milliseconds
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::InMemory,
            uri: "mongodb://localhost:27017".to_string(),
            database: "food".to_string(),
            collection: "foods".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// How caller identity is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// Never resolve an identity
    #[default]
    None,
    /// Read `sub`/`name` from claims verified by an upstream layer
    Claims,
}

/// Identity settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub mode: IdentityMode,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document for a struct
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `FOOD_SERVICE_CONFIG` (or defaults), then
    /// apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "Loading configuration file");
                Self::from_yaml_file(&path)?
            }
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in `load`)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup(BIND_ADDRESS_ENV) {
            self.server.bind_address = addr;
        }
        if let Some(uri) = lookup(MONGODB_URI_ENV) {
            self.store.uri = uri;
        }
    }

    /// Check values that serde alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind_address".to_string(),
                value: self.server.bind_address.clone(),
                message: "expected host:port".to_string(),
            });
        }
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_ms".to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.store.collection.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.collection".to_string(),
                value: self.store.collection.clone(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
