//! Adapter configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREPULSE_API_URL` - Backend base URL (default: `http://localhost:8080`)
//! - `STOREPULSE_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard backend connection configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the dashboard backend.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when a variable is present but
    /// unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("STOREPULSE_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let base_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREPULSE_API_URL".to_owned(), e.to_string())
        })?;

        let timeout_secs = match std::env::var("STOREPULSE_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "STOREPULSE_HTTP_TIMEOUT_SECS".to_owned(),
                    e.to_string(),
                )
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration pointing at an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when the URL is unparseable.
    pub fn with_base_url(raw_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREPULSE_API_URL".to_owned(), e.to_string())
        })?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}
