//! # Cart Reducer
//!
//! The pure, in-memory cart: an ordered list of lines keyed by product slug.
//! `ateliux-store` wraps it with persistence and hydration status.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add(p, n) ───────► line exists? qty = clamp(qty + clamp(n))            │
//! │                     otherwise    push { p, clamp(n) }                   │
//! │                                                                         │
//! │  increment(slug) ─► qty = min(qty + 1, 99)                              │
//! │                                                                         │
//! │  decrement(slug) ─► qty - 1 == 0 ? remove line : qty - 1                │
//! │                                                                         │
//! │  remove(slug) ────► retain lines with other slugs                       │
//! │                                                                         │
//! │  clear() ─────────► lines.clear()                                       │
//! │                                                                         │
//! │  NOTE: nothing here returns an error. Bad quantities are clamped.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per slug
//! - Every quantity is within [`MIN_LINE_QUANTITY`, `MAX_LINE_QUANTITY`]
//! - Subtotal and item count are always recomputed, never stored

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checkout::{CheckoutLine, CheckoutRequest};
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};

/// Clamps a requested quantity into `[1, 99]`.
///
/// ## Example
/// ```rust
/// use ateliux_core::cart::clamp_quantity;
///
/// assert_eq!(clamp_quantity(0), 1);
/// assert_eq!(clamp_quantity(5), 5);
/// assert_eq!(clamp_quantity(250), 99);
/// ```
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(MIN_LINE_QUANTITY as i64, MAX_LINE_QUANTITY as i64) as u32
}

// =============================================================================
// Cart Line
// =============================================================================

/// A (product, quantity) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,

    /// Always within [1, 99]
    pub qty: u32,
}

impl CartLine {
    pub fn slug(&self) -> &str {
        &self.product.slug
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.qty
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Derived totals for the cart badge and the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub line_count: usize,
    pub total_items: u32,
    pub subtotal: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The line collection and its pure operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from already-decoded lines, restoring the invariants.
    ///
    /// Quantities are re-clamped and duplicate slugs are merged into the
    /// first occurrence. Used when rehydrating persisted state.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            let qty = clamp_quantity(line.qty as i64);
            match cart.position(line.slug()) {
                Some(idx) => {
                    let existing = &mut cart.lines[idx];
                    existing.qty = clamp_quantity(existing.qty as i64 + qty as i64);
                }
                None => cart.lines.push(CartLine {
                    product: line.product,
                    qty,
                }),
            }
        }
        cart
    }

    fn position(&self, slug: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.slug() == slug)
    }

    /// Adds `quantity` of `product`, merging into an existing line.
    ///
    /// The added amount is clamped to [1, 99] before merging and the
    /// merged quantity is clamped again.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        let add_qty = clamp_quantity(quantity);

        match self.position(&product.slug) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.qty = clamp_quantity(line.qty as i64 + add_qty as i64);
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                qty: add_qty,
            }),
        }
    }

    /// Removes the line for `slug`. Returns whether a line was removed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.slug() != slug);
        self.lines.len() != before
    }

    /// Adds one to the line for `slug` (capped at 99).
    /// Returns whether a line matched.
    pub fn increment(&mut self, slug: &str) -> bool {
        match self.position(slug) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.qty = clamp_quantity(line.qty as i64 + 1);
                true
            }
            None => false,
        }
    }

    /// Subtracts one from the line for `slug`, removing it at zero.
    /// Returns whether a line matched.
    pub fn decrement(&mut self, slug: &str) -> bool {
        match self.position(slug) {
            Some(idx) => {
                if self.lines[idx].qty <= MIN_LINE_QUANTITY {
                    self.lines.remove(idx);
                } else {
                    self.lines[idx].qty -= 1;
                }
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, slug: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.slug() == slug)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ unit_price × qty
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ qty
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            line_count: self.lines.len(),
            total_items: self.total_items(),
            subtotal: self.subtotal(),
        }
    }

    /// The payload the checkout page posts to the checkout endpoint.
    pub fn checkout_request(&self) -> CheckoutRequest {
        CheckoutRequest {
            lines: self
                .lines
                .iter()
                .map(|l| CheckoutLine {
                    slug: l.slug().to_string(),
                    qty: l.qty,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
