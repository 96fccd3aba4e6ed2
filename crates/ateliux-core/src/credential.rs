//! # Mock Credentials
//!
//! Username normalization, user id generation and the placeholder
//! credential token used by the demo auth flow.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ⚠️  NOT A SECURITY MECHANISM                                           │
//! │                                                                         │
//! │  "  Secret1 "  ──trim+lowercase──►  "hashlike_secret1"                  │
//! │                                                                         │
//! │  The token is reversible and deterministic. A real deployment must     │
//! │  replace the whole auth store with a server-side credential store      │
//! │  (argon2/bcrypt hashes, httpOnly session cookies).                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_PREFIX: &str = "hashlike_";

/// Placeholder stand-in for a password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialToken(String);

impl CredentialToken {
    /// Derives the token from a plaintext password.
    ///
    /// ## Example
    /// ```rust
    /// use ateliux_core::credential::CredentialToken;
    ///
    /// assert_eq!(
    ///     CredentialToken::derive("  Secret1 "),
    ///     CredentialToken::derive("secret1"),
    /// );
    /// ```
    pub fn derive(password: &str) -> Self {
        CredentialToken(format!("{}{}", TOKEN_PREFIX, password.trim().to_lowercase()))
    }

    /// Checks a plaintext password against this token.
    pub fn matches(&self, password: &str) -> bool {
        *self == CredentialToken::derive(password)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trims and lowercases a username for storage and comparison.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Generates a fresh user id (`u_` + 32 hex chars).
pub fn generate_user_id() -> String {
    format!("u_{}", Uuid::new_v4().simple())
}
