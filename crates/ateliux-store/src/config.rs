//! # Storage Configuration
//!
//! Where persisted state lives and which keys it is stored under.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ATELIUX_DATA_DIR=/var/lib/ateliux                                  │
//! │     ATELIUX_CART_KEY / ATELIUX_USERS_KEY / ATELIUX_SESSION_KEY         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ateliux-storefront/storefront.toml (Linux)               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, *_v1 keys                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [storage]
//! data_dir = "/home/ana/.ateliux"
//! cart_key = "ateliux_cart_v1"
//! users_key = "ateliux_auth_users_v1"
//! session_key = "ateliux_auth_session_v1"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

pub const DEFAULT_CART_KEY: &str = "ateliux_cart_v1";
pub const DEFAULT_USERS_KEY: &str = "ateliux_auth_users_v1";
pub const DEFAULT_SESSION_KEY: &str = "ateliux_auth_session_v1";

// =============================================================================
// Storage Settings
// =============================================================================

/// Storage location and key names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for file-backed storage. `None` means the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    #[serde(default = "default_users_key")]
    pub users_key: String,

    #[serde(default = "default_session_key")]
    pub session_key: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_users_key() -> String {
    DEFAULT_USERS_KEY.to_string()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: None,
            cart_key: default_cart_key(),
            users_key: default_users_key(),
            session_key: default_session_key(),
        }
    }
}

impl StorageConfig {
    /// The directory file storage should use.
    pub fn resolve_data_dir(&self) -> StorageResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| StorageError::InvalidConfig("could not determine data directory".into()))
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Top-level contents of `storefront.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StorageResult<Self> {
        Self::load_with(config_path, |name| std::env::var(name).ok())
    }

    /// [`load`](Self::load) with `lookup` standing in for the environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> StorageResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Keys must be non-empty and distinct.
    pub fn validate(&self) -> StorageResult<()> {
        let keys = [
            ("cart_key", &self.storage.cart_key),
            ("users_key", &self.storage.users_key),
            ("session_key", &self.storage.session_key),
        ];

        for (name, key) in keys {
            if key.trim().is_empty() {
                return Err(StorageError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        if self.storage.cart_key == self.storage.users_key
            || self.storage.cart_key == self.storage.session_key
            || self.storage.users_key == self.storage.session_key
        {
            return Err(StorageError::InvalidConfig(
                "cart_key, users_key and session_key must be distinct".into(),
            ));
        }

        Ok(())
    }

    /// Applies `ATELIUX_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("ATELIUX_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("ATELIUX_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(key) = lookup("ATELIUX_USERS_KEY") {
            self.storage.users_key = key;
        }

        if let Some(key) = lookup("ATELIUX_SESSION_KEY") {
            self.storage.session_key = key;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "ateliux", "storefront")
}
