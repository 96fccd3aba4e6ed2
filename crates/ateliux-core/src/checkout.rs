//! # Checkout Pricing
//!
//! Shipping fees, demo coupons and the order-summary totals, plus the
//! payload shape exchanged with the stub checkout endpoint.
//!
//! ## Order Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal                         Σ line totals                         │
//! │  Shipping     Standard $9.90 | Express $19.90 | $0.00 if cart is empty  │
//! │  Discount     ATELIUX10   → min(10% of subtotal, $35.00)                │
//! │               FRETEGRATIS → min(shipping, $19.90)                       │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │  Total        max(0, subtotal + shipping - discount)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

const STANDARD_SHIPPING: Money = Money::from_cents(990);
const EXPRESS_SHIPPING: Money = Money::from_cents(1990);

const PERCENT_COUPON_BPS: u32 = 1000;
const PERCENT_COUPON_CAP: Money = Money::from_cents(3500);
const FREE_SHIPPING_CAP: Money = Money::from_cents(1990);

// =============================================================================
// Shipping
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ShippingOption {
    #[default]
    Standard,
    Express,
}

impl ShippingOption {
    /// Fee for this option; nothing ships for an empty cart.
    pub fn fee(&self, subtotal: Money) -> Money {
        if !subtotal.is_positive() {
            return Money::zero();
        }
        match self {
            ShippingOption::Standard => STANDARD_SHIPPING,
            ShippingOption::Express => EXPRESS_SHIPPING,
        }
    }
}

impl std::str::FromStr for ShippingOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ShippingOption::Standard),
            "express" => Ok(ShippingOption::Express),
            other => Err(ValidationError::invalid_format(
                "shipping",
                format!("unknown option '{}', expected standard or express", other),
            )),
        }
    }
}

// =============================================================================
// Coupons
// =============================================================================

/// A coupon code as entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coupon {
    /// No code entered
    None,
    /// `ATELIUX10`: 10% off the subtotal, capped at $35.00
    TenPercent,
    /// `FRETEGRATIS`: shipping refunded, capped at $19.90
    FreeShipping,
    /// Anything else; grants nothing
    Unknown(String),
}

impl Coupon {
    /// Parses a code (trimmed, case-insensitive).
    ///
    /// ## Example
    /// ```rust
    /// use ateliux_core::checkout::Coupon;
    ///
    /// assert_eq!(Coupon::parse(" ateliux10 "), Coupon::TenPercent);
    /// assert_eq!(Coupon::parse(""), Coupon::None);
    /// ```
    pub fn parse(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        match code.as_str() {
            "" => Coupon::None,
            "ATELIUX10" => Coupon::TenPercent,
            "FRETEGRATIS" => Coupon::FreeShipping,
            _ => Coupon::Unknown(code),
        }
    }

    pub fn discount(&self, subtotal: Money, shipping: Money) -> Money {
        match self {
            Coupon::TenPercent => subtotal.percentage(PERCENT_COUPON_BPS).min(PERCENT_COUPON_CAP),
            Coupon::FreeShipping => shipping.min(FREE_SHIPPING_CAP),
            Coupon::None | Coupon::Unknown(_) => Money::zero(),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Figures shown in the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutTotals {
    pub total_items: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
}

impl CheckoutTotals {
    pub fn compute(cart: &Cart, shipping: ShippingOption, coupon: &Coupon) -> Self {
        let subtotal = cart.subtotal();
        let shipping_fee = shipping.fee(subtotal);
        let discount = coupon.discount(subtotal, shipping_fee);

        CheckoutTotals {
            total_items: cart.total_items(),
            subtotal,
            shipping: shipping_fee,
            discount,
            total: (subtotal + shipping_fee - discount).non_negative(),
        }
    }
}

// =============================================================================
// Checkout Payload
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    pub slug: String,
    pub qty: u32,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub lines: Vec<CheckoutLine>,
}

/// Checks a raw checkout body.
///
/// ## Rules
/// - `lines` must be a non-empty array
/// - every line needs a string `slug` and a numeric `qty`
///
/// Only types are checked: the stub endpoint never looks up slugs.
pub fn validate_checkout_payload(body: &Value) -> ValidationResult<()> {
    let lines = body
        .get("lines")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::required("lines"))?;

    if lines.is_empty() {
        return Err(ValidationError::required("lines"));
    }

    for (i, line) in lines.iter().enumerate() {
        if !line.get("slug").is_some_and(Value::is_string) {
            return Err(ValidationError::invalid_format(
                format!("lines[{}].slug", i),
                "must be a string",
            ));
        }
        if !line.get("qty").is_some_and(Value::is_number) {
            return Err(ValidationError::invalid_format(
                format!("lines[{}].qty", i),
                "must be a number",
            ));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
