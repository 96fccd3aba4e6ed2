//! Subcommand definitions and handlers.
//!
//! Handlers take a store and return the text to print, so they run the
//! same against file storage and the in-memory storage used in tests.

pub mod auth;
pub mod cart;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product slug (the cart key)
        slug: String,

        /// Product title
        title: String,

        /// Unit price in cents
        price_cents: i64,

        /// Quantity to add (clamped to 1..=99)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a line entirely
    Remove {
        slug: String,
    },
    /// Increase a line's quantity by one
    Inc {
        slug: String,
    },
    /// Decrease a line's quantity by one, removing it at zero
    Dec {
        slug: String,
    },
    /// Empty the cart
    Clear,
    /// Show the order summary and the payload sent to the checkout endpoint
    Checkout {
        /// Shipping option (`standard` or `express`)
        #[arg(short, long, default_value = "standard")]
        shipping: String,

        /// Coupon code
        #[arg(short, long, default_value = "")]
        coupon: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Create a demo account and sign in
    Register {
        username: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        password: String,
    },
    /// Sign in to an existing demo account
    Login {
        username: String,

        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
}
