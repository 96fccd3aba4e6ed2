//! # ateliux-core: Pure Business Logic for the Ateliux Storefront
//!
//! Everything the storefront decides without touching storage or the
//! network: cart math, credential placeholders, validation and checkout
//! pricing.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ateliux Storefront Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Front end / shopper-cli (presentation)               │   │
//! │  │    Shop ──► Product ──► Cart ──► Checkout ──► Login/Account     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ateliux-store (CartStore, AuthStore)               │   │
//! │  │          hydration status, persistence, swallowed I/O           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ ateliux-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌──────────┐          │   │
//! │  │   │  money  │ │  cart   │ │ credential │ │ checkout │          │   │
//! │  │   └─────────┘ └─────────┘ └────────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Session, UserRecord
//! - [`money`] - Integer-cents money type
//! - [`cart`] - Cart lines and the cart reducer
//! - [`credential`] - Placeholder credential token, username normalization
//! - [`checkout`] - Shipping, coupons, totals, checkout payload
//! - [`validation`] - Form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ateliux_core::{Cart, Money, Product};
//!
//! let headsound = Product::new("p2", "headsound", "Headsound", Money::from_cents(1200));
//!
//! let mut cart = Cart::new();
//! cart.add(&headsound, 2);
//! cart.add(&headsound, 3);
//!
//! assert_eq!(cart.total_items(), 5);
//! assert_eq!(cart.subtotal().to_string(), "$60.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod credential;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSnapshot};
pub use checkout::{CheckoutRequest, CheckoutTotals, Coupon, ShippingOption};
pub use credential::CredentialToken;
pub use error::{AuthError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest quantity a cart line can hold; going below removes the line.
pub const MIN_LINE_QUANTITY: u32 = 1;

/// Largest quantity a cart line can hold.
///
/// Matches the two-digit quantity stepper on the cart page.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Minimum password length (trimmed) for sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;
