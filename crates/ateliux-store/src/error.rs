//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore / AuthStore ← logs at WARN and falls back to memory         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shopper never sees it                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration loading is the one place where these errors reach a caller.

use thiserror::Error;

/// Storage and configuration errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value is not the JSON we expect.
    #[error("Stored value is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refuses access (quota, private mode, test double).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The in-memory map's lock was poisoned by a panicking holder.
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// storefront.toml could not be parsed.
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
