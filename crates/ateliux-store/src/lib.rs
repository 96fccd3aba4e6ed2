//! # ateliux-store: Persisted Storefront State
//!
//! The cart and the mock auth session, each an explicit store object over an
//! injected [`KeyValueStorage`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Layer                                          │
//! │                                                                         │
//! │   UI / CLI                                                              │
//! │      │  add / remove / login / logout                                   │
//! │      ▼                                                                  │
//! │   ┌──────────────┐        ┌──────────────┐                              │
//! │   │  CartStore   │        │  AuthStore   │   in-memory state is         │
//! │   │  CartStatus  │        │  AuthStatus  │   authoritative              │
//! │   └──────┬───────┘        └──────┬───────┘                              │
//! │          │ JSON after every mutation                                    │
//! │          ▼                       ▼                                      │
//! │   ┌─────────────────────────────────────────┐                           │
//! │   │        KeyValueStorage (trait)          │                           │
//! │   │   MemoryStorage   │   FileStorage       │                           │
//! │   └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │   Keys: ateliux_cart_v1, ateliux_auth_users_v1,                         │
//! │         ateliux_auth_session_v1 (configurable via storefront.toml)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use ateliux_core::{Money, Product};
//! use ateliux_store::{CartStore, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! let lamp = Product::new("p1", "lamp", "Desk Lamp", Money::from_cents(4990));
//!
//! let mut cart = CartStore::new(storage.clone());
//! cart.add(&lamp, 1);
//!
//! // A second store over the same storage sees the persisted line.
//! let mut reopened = CartStore::new(storage);
//! reopened.hydrate();
//! assert_eq!(reopened.total_items(), 1);
//! ```

pub mod auth_store;
pub mod cart_store;
pub mod config;
pub mod error;
pub mod storage;

pub use auth_store::{AuthStatus, AuthStore};
pub use cart_store::{CartStatus, CartStore};
pub use config::{StorageConfig, StorefrontConfig};
pub use error::{StorageError, StorageResult};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

