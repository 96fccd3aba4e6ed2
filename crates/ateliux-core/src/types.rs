//! # Domain Types
//!
//! Core domain types shared by the stores, the checkout API and the
//! storefront front end (via generated TypeScript bindings).
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Product      │   │   UserRecord     │   │    Session      │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id             │   │  id              │   │  id             │      │
//! │  │  slug (key)     │   │  username        │   │  username       │      │
//! │  │  title          │   │  first/last name │   │  first/last name│      │
//! │  │  price (Money)  │   │  phone           │   │  phone          │      │
//! │  └─────────────────┘   │  credential_token│   └─────────────────┘      │
//! │                        └──────────────────┘    (no credential!)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart lines live in [`crate::cart`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::credential::CredentialToken;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// Storefront department a product is listed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    Home,
    Music,
    #[default]
    #[serde(other)]
    Other,
}

/// A product reference as held by a cart line.
///
/// The cart keeps the whole reference (not just the slug) so the cart page
/// can render titles and prices without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog id (e.g. `p1`)
    pub id: String,

    /// URL slug; the unique key for cart lines
    pub slug: String,

    pub title: String,

    #[serde(default)]
    pub category: Category,

    /// Unit price
    #[serde(rename = "priceCents")]
    pub price: Money,

    /// Previous price for "was $X" display
    #[serde(rename = "oldPriceCents", default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Creates a product with the required fields; optional ones empty.
    ///
    /// ## Example
    /// ```rust
    /// use ateliux_core::{Money, Product};
    ///
    /// let p = Product::new("p2", "headsound", "Headsound", Money::from_cents(1200));
    /// assert_eq!(p.slug, "headsound");
    /// ```
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        price: Money,
    ) -> Self {
        Product {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            category: Category::default(),
            price,
            old_price: None,
            image: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_old_price(mut self, old_price: Money) -> Self {
        self.old_price = Some(old_price);
        self
    }
}

// =============================================================================
// Users & Sessions
// =============================================================================

/// The authenticated user's public fields.
///
/// Its presence in storage is the only signal that someone is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl Session {
    /// "First Last" for greetings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A registered user as stored in the user table.
///
/// ## Security
/// `credential_token` is a reversible placeholder, NOT a password hash.
/// Never treat this record as protecting anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,

    /// Normalized (trimmed, lowercased) username
    pub username: String,

    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub credential_token: CredentialToken,
}

impl UserRecord {
    /// Copies the public fields into a session record.
    pub fn to_session(&self) -> Session {
        Session {
            id: self.id.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
