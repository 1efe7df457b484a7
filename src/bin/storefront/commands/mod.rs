use std::io;

use clap::Subcommand;
use storefront::{
    cart::{CartStore, StoreConfig},
    catalog::Catalog,
    storage::FileStorage,
};
use tracing::info;

use crate::config::StoreSettings;

mod cart;
mod products;
mod wishlist;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List products, optionally filtered and sorted
    Products(products::ProductsArgs),

    /// List products related to a product
    Related(products::RelatedArgs),

    /// Inspect or change the cart
    Cart(cart::CartCommand),

    /// Inspect or change the wishlist
    Wishlist(wishlist::WishlistCommand),
}

/// Loaded catalog and hydrated store shared by every command.
#[derive(Debug)]
pub(crate) struct Context {
    catalog: Catalog,
    store: CartStore<FileStorage>,
}

impl Context {
    fn load(settings: &StoreSettings) -> Result<Self, String> {
        let catalog = Catalog::from_path(&settings.catalog).map_err(|error| {
            format!(
                "failed to load catalog {}: {error}",
                settings.catalog.display()
            )
        })?;

        let store = CartStore::hydrate(
            FileStorage::new(&settings.state_dir),
            StoreConfig::with_namespace(settings.namespace.clone()),
            catalog.currency(),
        );

        info!(
            catalog = %settings.catalog.display(),
            state_dir = %settings.state_dir.display(),
            products = catalog.len(),
            "storefront ready"
        );

        Ok(Self { catalog, store })
    }
}

pub(crate) fn run(command: Command, settings: &StoreSettings) -> Result<(), String> {
    let mut context = Context::load(settings)?;
    let mut out = io::stdout().lock();

    match command {
        Command::Products(args) => products::list(&context, args, &mut out),
        Command::Related(args) => products::related(&context, &args, &mut out),
        Command::Cart(command) => cart::run(&mut context, command, &mut out),
        Command::Wishlist(command) => wishlist::run(&mut context, command, &mut out),
    }
}

fn write_err(error: impl std::fmt::Display) -> String {
    format!("failed to write output: {error}")
}
