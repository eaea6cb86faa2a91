//! # Configuration
//!
//! Runtime settings for the API server.
//!
//! Settings are resolved in three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML file named by `PRODUCT_API_CONFIG`
//! 3. `PRODUCT_API_*` environment variables
//!
//! ```yaml
//! database_url: "sqlite:products.db"
//! bind_address: "0.0.0.0:3000"
//! allowed_origin: "http://localhost:8080"
//! log_level: "debug"
//! ```

use axum::http::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "PRODUCT_API_CONFIG";
const DATABASE_URL_VAR: &str = "PRODUCT_API_DATABASE_URL";
const BIND_ADDRESS_VAR: &str = "PRODUCT_API_BIND_ADDRESS";
const ALLOWED_ORIGIN_VAR: &str = "PRODUCT_API_ALLOWED_ORIGIN";
const LOG_LEVEL_VAR: &str = "PRODUCT_API_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),
    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub allowed_origin: String,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:products.db".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_PATH_VAR).ok();
        Self::from_sources(file.as_deref().map(Path::new), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from an optional YAML file and an environment lookup
    pub fn from_sources<F>(file: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(value) = env(DATABASE_URL_VAR) {
            config.database_url = value;
        }
        if let Some(value) = env(BIND_ADDRESS_VAR) {
            config.bind_address = value;
        }
        if let Some(value) = env(ALLOWED_ORIGIN_VAR) {
            config.allowed_origin = value;
        }
        if let Some(value) = env(LOG_LEVEL_VAR) {
            config.log_level = value;
        }

        config.socket_addr()?;
        config.origin_header()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))
    }

    pub fn origin_header(&self) -> Result<HeaderValue, ConfigError> {
        self.allowed_origin
            .parse()
            .map_err(|_| ConfigError::InvalidOrigin(self.allowed_origin.clone()))
    }
}
