//! # Cart Store
//!
//! The authoritative in-memory cart for the browsing session, mirrored to
//! key-value storage after every mutation.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Status                                    │
//! │                                                                         │
//! │   CartStore::new(storage)                                               │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   ┌─────────────┐   hydrate()   ┌─────────────┐  add()   ┌──────────┐  │
//! │   │   Unknown   │──────────────►│    Empty    │◄────────►│  Loaded  │  │
//! │   │ (not ready) │──────────────►│ (no lines)  │ remove() │ (lines)  │  │
//! │   └─────────────┘   stored      └─────────────┘ clear()  └──────────┘  │
//! │          │          lines found                               ▲         │
//! │          └────────────────────────────────────────────────────┘         │
//! │                                                                         │
//! │  Every mutation: hydrate if needed ─► apply to Cart ─► write storage    │
//! │  Storage failures are logged and swallowed; memory stays authoritative. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use ateliux_core::cart::clamp_quantity;
use ateliux_core::{Cart, CartLine, CartSnapshot, CheckoutRequest, Money, Product};

use crate::config::{StorageConfig, DEFAULT_CART_KEY};
use crate::storage::{write_json, KeyValueStorage};

/// Whether the cart has been loaded, and if so whether it holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    /// Hydration has not run; the cart contents are not known yet.
    Unknown,
    /// Hydrated, no lines.
    Empty,
    /// Hydrated, at least one line.
    Loaded,
}

/// Cart persisted in a [`KeyValueStorage`].
///
/// ## Example
/// ```rust
/// use ateliux_core::{Money, Product};
/// use ateliux_store::{CartStatus, CartStore, MemoryStorage};
///
/// let mut cart = CartStore::new(MemoryStorage::new());
/// assert_eq!(cart.status(), CartStatus::Unknown);
///
/// cart.hydrate();
/// assert_eq!(cart.status(), CartStatus::Empty);
///
/// let product = Product::new("p1", "phone-holder", "Phone Holder", Money::from_cents(2990));
/// cart.add(&product, 2);
/// assert_eq!(cart.total_items(), 2);
/// assert_eq!(cart.status(), CartStatus::Loaded);
/// ```
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    cart: Cart,
    hydrated: bool,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Creates an unhydrated store using the default storage key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        CartStore {
            storage,
            key: key.into(),
            cart: Cart::new(),
            hydrated: false,
        }
    }

    /// Creates a store using the configured cart key.
    pub fn from_config(storage: S, config: &StorageConfig) -> Self {
        Self::with_key(storage, config.cart_key.clone())
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Loads persisted lines once. Later calls are no-ops.
    ///
    /// Unreadable or malformed storage hydrates to an empty cart.
    pub fn hydrate(&mut self) -> CartStatus {
        if self.hydrated {
            return self.status();
        }

        self.cart = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => decode_cart(&raw),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart storage read failed, starting empty");
                Cart::new()
            }
        };
        self.hydrated = true;

        info!(lines = self.cart.lines().len(), "Cart hydrated");
        self.status()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn status(&self) -> CartStatus {
        if !self.hydrated {
            CartStatus::Unknown
        } else if self.cart.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::Loaded
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Totals for the cart badge; `None` until hydrated so callers never
    /// show "0 items" while the cart is still loading.
    pub fn snapshot(&self) -> Option<CartSnapshot> {
        self.hydrated.then(|| self.cart.snapshot())
    }

    /// Cart lines in insertion order.
    ///
    /// Empty until hydrated; check [`status`](Self::status) before treating
    /// an empty slice as an empty cart.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Zero until hydrated; see [`lines`](Self::lines).
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Zero until hydrated; see [`lines`](Self::lines).
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    pub fn checkout_request(&self) -> CheckoutRequest {
        self.cart.checkout_request()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of `product` (clamped to [1, 99]).
    pub fn add(&mut self, product: &Product, quantity: i64) {
        debug!(slug = %product.slug, quantity, "cart add");
        self.mutate(|cart| cart.add(product, quantity));
    }

    /// Adds a single unit, the default "Add to cart" button.
    pub fn add_one(&mut self, product: &Product) {
        self.add(product, 1);
    }

    pub fn remove(&mut self, slug: &str) {
        debug!(slug, "cart remove");
        self.mutate(|cart| {
            cart.remove(slug);
        });
    }

    pub fn increment(&mut self, slug: &str) {
        debug!(slug, "cart increment");
        self.mutate(|cart| {
            cart.increment(slug);
        });
    }

    /// Decrements by one; the line disappears when it would reach zero.
    pub fn decrement(&mut self, slug: &str) {
        debug!(slug, "cart decrement");
        self.mutate(|cart| {
            cart.decrement(slug);
        });
    }

    pub fn clear(&mut self) {
        debug!("cart clear");
        self.mutate(Cart::clear);
    }

    fn mutate<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Cart),
    {
        // Hydrate first so a mutation never overwrites persisted lines.
        self.hydrate();
        f(&mut self.cart);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = write_json(&self.storage, &self.key, &self.cart) {
            warn!(key = %self.key, error = %e, "Cart storage write failed, keeping in-memory cart");
        }
    }
}

// =============================================================================
// Lenient Decoding
// =============================================================================

#[derive(Deserialize)]
struct PersistedCart {
    #[serde(default)]
    lines: Vec<Value>,
}

/// Decodes a persisted cart document, dropping lines that cannot be used.
///
/// A line survives when it has a product with a non-empty slug and a
/// numeric `qty`. Quantities are clamped and duplicates merged.
fn decode_cart(raw: &str) -> Cart {
    let persisted: PersistedCart = match serde_json::from_str(raw) {
        Ok(persisted) => persisted,
        Err(e) => {
            warn!(error = %e, "Persisted cart is malformed, starting empty");
            return Cart::new();
        }
    };

    let total = persisted.lines.len();
    let lines: Vec<CartLine> = persisted.lines.into_iter().filter_map(decode_line).collect();
    if lines.len() != total {
        warn!(dropped = total - lines.len(), "Dropped unusable persisted cart lines");
    }

    Cart::from_lines(lines)
}

fn decode_line(value: Value) -> Option<CartLine> {
    let qty = value.get("qty")?.as_f64()?;
    let product: Product = serde_json::from_value(value.get("product")?.clone()).ok()?;
    if product.slug.is_empty() {
        return None;
    }

    // `as` saturates on infinities and maps NaN to 0, which clamps to 1
    let qty = clamp_quantity(qty.trunc() as i64);
    Some(CartLine { product, qty })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStorage;

    /// Storage where every operation fails.
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    fn product(slug: &str, price_cents: i64) -> Product {
        Product::new(format!("id-{}", slug), slug, slug, Money::from_cents(price_cents))
    }

    #[test]
    fn test_unknown_before_hydration() {
        let store = CartStore::new(MemoryStorage::new());
        assert_eq!(store.status(), CartStatus::Unknown);
        assert_eq!(store.snapshot(), None);
    }

    #[test]
    fn test_reads_before_hydration_are_not_authoritative() {
        let storage = MemoryStorage::new();
        CartStore::new(storage.clone()).add(&product("a", 100), 3);

        let mut store = CartStore::new(storage);
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.status(), CartStatus::Unknown);

        store.hydrate();
        assert_eq!(store.total_items(), 3);
        assert_eq!(store.snapshot().map(|s| s.total_items), Some(3));
    }

    #[test]
    fn test_status_transitions() {
        let mut store = CartStore::new(MemoryStorage::new());
        assert_eq!(store.hydrate(), CartStatus::Empty);

        store.add(&product("a", 100), 1);
        assert_eq!(store.status(), CartStatus::Loaded);

        store.clear();
        assert_eq!(store.status(), CartStatus::Empty);
    }

    #[test]
    fn test_persist_and_reload_roundtrip() {
        let storage = MemoryStorage::new();
        let mut first = CartStore::new(storage.clone());
        first.hydrate();
        first.add(&product("a", 2990), 2);
        first.add(&product("b", 1200), 1);
        first.increment("b");

        let mut second = CartStore::new(storage);
        assert_eq!(second.hydrate(), CartStatus::Loaded);
        assert_eq!(second.lines(), first.lines());
        assert_eq!(second.subtotal(), first.subtotal());
    }

    #[test]
    fn test_persisted_document_shape() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.add(&product("a", 500), 3);

        let raw = storage.get_item(DEFAULT_CART_KEY).unwrap().unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["lines"][0]["qty"], 3);
        assert_eq!(doc["lines"][0]["product"]["slug"], "a");
    }

    #[test]
    fn test_mutation_before_hydrate_keeps_persisted_lines() {
        let storage = MemoryStorage::new();
        let mut first = CartStore::new(storage.clone());
        first.add(&product("a", 100), 2);

        let mut second = CartStore::new(storage);
        second.add(&product("b", 100), 1);

        assert!(second.is_hydrated());
        assert_eq!(second.lines().len(), 2);
        assert_eq!(second.total_items(), 3);
    }

    #[test]
    fn test_add_merges_then_decrement_removes() {
        let mut store = CartStore::new(MemoryStorage::new());
        let a = product("a", 100);
        store.add(&a, 2);
        store.add(&a, 3);
        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.lines()[0].qty, 5);

        for _ in 0..5 {
            store.decrement("a");
        }
        assert!(store.lines().is_empty());
        assert_eq!(store.total_items(), 0);
    }

    #[test]
    fn test_broken_storage_is_swallowed() {
        let mut store = CartStore::new(BrokenStorage);
        assert_eq!(store.hydrate(), CartStatus::Empty);

        store.add(&product("a", 100), 4);
        store.remove("missing");
        assert_eq!(store.total_items(), 4);
        assert_eq!(store.status(), CartStatus::Loaded);
    }

    #[test]
    fn test_malformed_document_hydrates_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(DEFAULT_CART_KEY, "{\"lines\": oops").unwrap();

        let mut store = CartStore::new(storage);
        assert_eq!(store.hydrate(), CartStatus::Empty);
    }

    #[test]
    fn test_lenient_line_decoding() {
        let storage = MemoryStorage::new();
        let doc = serde_json::json!({
            "lines": [
                {"product": {"id": "1", "slug": "a", "title": "A", "priceCents": 100}, "qty": 250},
                {"product": {"id": "2", "slug": "", "title": "B", "priceCents": 100}, "qty": 1},
                {"product": {"id": "3", "slug": "c", "title": "C", "priceCents": 100}, "qty": "2"},
                {"product": {"id": "4", "slug": "d", "title": "D", "priceCents": 100}, "qty": 0},
                {"product": {"id": "5", "slug": "e", "title": "E", "priceCents": 100}, "qty": 2.7},
                {"product": {"id": "1", "slug": "a", "title": "A", "priceCents": 100}, "qty": 1},
                {"qty": 1},
                "garbage"
            ]
        });
        storage.set_item(DEFAULT_CART_KEY, &doc.to_string()).unwrap();

        let mut store = CartStore::new(storage);
        store.hydrate();

        let lines: Vec<(&str, u32)> = store.lines().iter().map(|l| (l.slug(), l.qty)).collect();
        assert_eq!(lines, [("a", 99), ("d", 1), ("e", 2)]);
    }

    #[test]
    fn test_huge_persisted_price_saturates() {
        let storage = MemoryStorage::new();
        let doc = serde_json::json!({
            "lines": [
                {"product": {"id": "1", "slug": "a", "title": "A", "priceCents": i64::MAX}, "qty": 2},
                {"product": {"id": "2", "slug": "b", "title": "B", "priceCents": 100}, "qty": 1}
            ]
        });
        storage.set_item(DEFAULT_CART_KEY, &doc.to_string()).unwrap();

        let mut store = CartStore::new(storage);
        store.hydrate();
        assert_eq!(store.subtotal(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.hydrate();

        storage
            .set_item(DEFAULT_CART_KEY, r#"{"lines":[{"product":{"id":"1","slug":"a","title":"A","priceCents":1},"qty":1}]}"#)
            .unwrap();
        assert_eq!(store.hydrate(), CartStatus::Empty);
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::with_key(storage.clone(), "cart_test");
        store.add(&product("a", 100), 1);

        assert!(storage.get_item("cart_test").unwrap().is_some());
        assert!(storage.get_item(DEFAULT_CART_KEY).unwrap().is_none());
    }
}
