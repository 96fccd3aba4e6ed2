//! Ateliux shopper CLI - cart and demo account management from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Put two Headsounds ($12.00 each) in the cart
//! ateliux cart add headsound "Headsound" 1200 --qty 2
//!
//! # Order summary with express shipping and a coupon
//! ateliux cart checkout --shipping express --coupon ATELIUX10
//!
//! # Create a demo account and check who is signed in
//! ateliux auth register ana --first-name Ana --last-name Souza --phone 11999990000 --password secret1
//! ateliux auth whoami
//! ```
//!
//! # Commands
//!
//! - `cart` - show, add, remove, inc, dec, clear, checkout
//! - `auth` - register, login, logout, whoami

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ateliux_store::{AuthStore, CartStore, FileStorage, StorefrontConfig};

mod commands;

use commands::{AuthAction, CartAction};

#[derive(Parser)]
#[command(name = "ateliux")]
#[command(author, version, about = "Ateliux storefront shopper CLI")]
struct Cli {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted cart and account files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the demo account session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config = StorefrontConfig::load(cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    let storage = FileStorage::new(config.storage.resolve_data_dir()?);
    tracing::debug!(dir = ?storage.dir(), "Using file storage");

    match cli.command {
        Commands::Cart { action } => {
            let mut cart = CartStore::from_config(storage, &config.storage);
            commands::cart::run(&mut cart, action)
        }
        Commands::Auth { action } => {
            let mut auth = AuthStore::from_config(storage, &config.storage);
            commands::auth::run(&mut auth, action)
        }
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
