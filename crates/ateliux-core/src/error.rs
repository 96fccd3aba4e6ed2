//! # Error Types
//!
//! Domain-specific error types for ateliux-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ateliux-core errors (this file)                                        │
//! │  ├── ValidationError  - Missing or malformed input                      │
//! │  └── AuthError        - Register/login failures                         │
//! │                                                                         │
//! │  ateliux-store errors (separate crate)                                  │
//! │  └── StorageError     - Absorbed inside the stores, never surfaced      │
//! │                                                                         │
//! │  checkout-api errors (in app)                                           │
//! │  └── ApiError         - What the HTTP client sees (serialized)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant's `Display` is the human-readable message shown to the
//! shopper, so callers can render `err.to_string()` directly.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Invalid format (e.g., an email without `@`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Auth Error
// =============================================================================

/// Failures of the mock register/login flow.
///
/// ## User Workflow
/// ```text
/// login("Ana", "wrong")
///      │
///      ├── blank field?        → Validation("password is required")
///      ├── no such username?   → UserNotFound("ana")
///      ├── token mismatch?     → InvalidCredential
///      └── OK → session stored, UI switches to "logged in"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Blank field or password too short.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Username already registered (compared case-insensitively).
    #[error("User '{username}' already exists")]
    DuplicateUser { username: String },

    /// No registered user with this username.
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    /// Password does not match the stored credential token.
    #[error("Incorrect password")]
    InvalidCredential,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type ValidationResult<T> = Result<T, ValidationError>;

pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Unit Tests
// =============================================================================
