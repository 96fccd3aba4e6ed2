//! Checkout API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};

/// Checkout API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// Where the storefront sends the shopper after a successful checkout
    pub success_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 3000,
            bind_addr: "0.0.0.0".to_string(),
            success_url: "/checkout/success".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            port: match lookup("CHECKOUT_PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("CHECKOUT_PORT".to_string()))?,
                None => defaults.port,
            },

            bind_addr: lookup("CHECKOUT_BIND_ADDR").unwrap_or(defaults.bind_addr),

            success_url: lookup("CHECKOUT_SUCCESS_URL").unwrap_or(defaults.success_url),
        };

        if config.success_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("CHECKOUT_SUCCESS_URL".to_string()));
        }

        Ok(config)
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
