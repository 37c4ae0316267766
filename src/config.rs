//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0),
            port: 3000,
        }
    }
}

/// Remote Space Travel API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub api: ApiConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unparsable values fall back to defaults
    pub fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let server = ServerConfig {
            host: var("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.server.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.server.port),
        };

        let base_url = match var("SPACE_TRAVEL_API_URL") {
            Some(raw) => Self::parse_api_url(&raw)?,
            None => defaults.api.base_url,
        };

        let api = ApiConfig {
            base_url,
            timeout: var("SPACE_TRAVEL_API_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.api.timeout),
        };

        Ok(Self { server, api })
    }

    /// Validate the remote API base URL (http or https)
    fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
        let parsed = Url::parse(raw.trim()).map_err(|e| {
            ConfigError::InvalidValue(format!("SPACE_TRAVEL_API_URL is not a valid URL: {}", e))
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed.to_string()),
            other => Err(ConfigError::InvalidValue(format!(
                "SPACE_TRAVEL_API_URL must use http or https, got {}",
                other
            ))),
        }
    }
}
