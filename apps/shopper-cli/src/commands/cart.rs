//! Cart commands.

use std::fmt::Write as _;

use ateliux_core::{CheckoutTotals, Coupon, Money, Product, ShippingOption};
use ateliux_store::{CartStore, KeyValueStorage};

use super::CartAction;

pub fn run<S: KeyValueStorage>(
    cart: &mut CartStore<S>,
    action: CartAction,
) -> anyhow::Result<String> {
    cart.hydrate();

    match action {
        CartAction::Show => Ok(render_cart(cart)),
        CartAction::Add {
            slug,
            title,
            price_cents,
            qty,
        } => {
            if price_cents < 0 {
                anyhow::bail!("price must not be negative");
            }
            let product = Product::new(slug.clone(), slug, title, Money::from_cents(price_cents));
            cart.add(&product, qty);
            Ok(render_cart(cart))
        }
        CartAction::Remove { slug } => {
            cart.remove(&slug);
            Ok(render_cart(cart))
        }
        CartAction::Inc { slug } => {
            cart.increment(&slug);
            Ok(render_cart(cart))
        }
        CartAction::Dec { slug } => {
            cart.decrement(&slug);
            Ok(render_cart(cart))
        }
        CartAction::Clear => {
            cart.clear();
            Ok(render_cart(cart))
        }
        CartAction::Checkout { shipping, coupon } => {
            let shipping: ShippingOption = shipping.parse()?;
            render_checkout(cart, shipping, &Coupon::parse(&coupon))
        }
    }
}

fn render_cart<S: KeyValueStorage>(cart: &CartStore<S>) -> String {
    if cart.lines().is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:<24} {:>3} x {:>10} = {:>10}",
            line.slug(),
            line.qty,
            line.product.price.to_string(),
            line.line_total().to_string()
        );
    }
    let _ = write!(
        out,
        "{} item(s), subtotal {}",
        cart.total_items(),
        cart.subtotal()
    );
    out
}

fn render_checkout<S: KeyValueStorage>(
    cart: &CartStore<S>,
    shipping: ShippingOption,
    coupon: &Coupon,
) -> anyhow::Result<String> {
    if cart.lines().is_empty() {
        anyhow::bail!("cart is empty, nothing to check out");
    }

    let totals = CheckoutTotals::compute(cart.cart(), shipping, coupon);

    let mut out = String::new();
    let _ = writeln!(out, "Items     {:>10}", totals.total_items);
    let _ = writeln!(out, "Subtotal  {:>10}", totals.subtotal.to_string());
    let _ = writeln!(out, "Shipping  {:>10}", totals.shipping.to_string());
    let _ = writeln!(out, "Discount  {:>10}", totals.discount.to_string());
    let _ = writeln!(out, "Total     {:>10}", totals.total.to_string());
    if let Coupon::Unknown(code) = coupon {
        let _ = writeln!(out, "Coupon '{}' is not valid", code);
    }
    let _ = write!(
        out,
        "Payload   {}",
        serde_json::to_string(&cart.checkout_request())?
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ateliux_store::MemoryStorage;

    fn add(slug: &str, price_cents: i64, qty: i64) -> CartAction {
        CartAction::Add {
            slug: slug.to_string(),
            title: slug.to_string(),
            price_cents,
            qty,
        }
    }

    #[test]
    fn test_add_and_show() {
        let mut cart = CartStore::new(MemoryStorage::new());
        run(&mut cart, add("headsound", 1200, 2)).unwrap();
        run(&mut cart, add("headsound", 1200, 3)).unwrap();

        let out = run(&mut cart, CartAction::Show).unwrap();
        assert!(out.contains("headsound"));
        assert!(out.ends_with("5 item(s), subtotal $60.00"));
    }

    #[test]
    fn test_dec_removes_last_unit() {
        let mut cart = CartStore::new(MemoryStorage::new());
        run(&mut cart, add("lamp", 4990, 1)).unwrap();

        let out = run(&mut cart, CartAction::Dec { slug: "lamp".into() }).unwrap();
        assert_eq!(out, "Your cart is empty.");
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut cart = CartStore::new(MemoryStorage::new());
        assert!(run(&mut cart, add("lamp", -1, 1)).is_err());
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_huge_price_does_not_overflow() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let out = run(&mut cart, add("vault", i64::MAX, 2)).unwrap();
        assert!(out.contains("2 item(s)"));
    }

    #[test]
    fn test_checkout_summary() {
        let mut cart = CartStore::new(MemoryStorage::new());
        run(&mut cart, add("lamp", 10000, 1)).unwrap();

        let out = run(
            &mut cart,
            CartAction::Checkout {
                shipping: "express".into(),
                coupon: "ateliux10".into(),
            },
        )
        .unwrap();

        let row = |label: &str| {
            out.lines()
                .find(|l| l.starts_with(label))
                .map(|l| l[label.len()..].trim().to_string())
        };
        assert_eq!(row("Subtotal").as_deref(), Some("$100.00"));
        assert_eq!(row("Shipping").as_deref(), Some("$19.90"));
        assert_eq!(row("Discount").as_deref(), Some("$10.00"));
        assert_eq!(row("Total").as_deref(), Some("$109.90"));
        assert!(out.contains(r#"{"lines":[{"slug":"lamp","qty":1}]}"#));
    }

    #[test]
    fn test_checkout_rejects_bad_input() {
        let mut cart = CartStore::new(MemoryStorage::new());
        let checkout = |shipping: &str| CartAction::Checkout {
            shipping: shipping.into(),
            coupon: String::new(),
        };

        assert!(run(&mut cart, checkout("standard")).is_err());

        run(&mut cart, add("lamp", 100, 1)).unwrap();
        assert!(run(&mut cart, checkout("teleport")).is_err());
    }

    #[test]
    fn test_unknown_coupon_is_reported() {
        let mut cart = CartStore::new(MemoryStorage::new());
        run(&mut cart, add("lamp", 100, 1)).unwrap();

        let out = run(
            &mut cart,
            CartAction::Checkout {
                shipping: "standard".into(),
                coupon: "bogus".into(),
            },
        )
        .unwrap();
        assert!(out.contains("Coupon 'BOGUS' is not valid"));
    }
}
