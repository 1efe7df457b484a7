use std::io;

use clap::{Args, Subcommand};
use storefront::{products::ProductId, summary::write_wishlist};

use super::{Context, write_err};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Show saved products
    Show,

    /// Save a product, or unsave it if already saved
    Toggle {
        /// Product id
        product_id: String,
    },
}

pub(crate) fn run(
    context: &mut Context,
    command: WishlistCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    if let WishlistSubcommand::Toggle { product_id } = command.command {
        let product_id = ProductId::new(product_id);

        // Saved ids that left the catalog can still be unsaved.
        if context.catalog.get(product_id.as_str()).is_none()
            && !context.store.is_in_wishlist(&product_id)
        {
            return Err(format!("unknown product {product_id}"));
        }

        context.store.toggle_wishlist(product_id);

        if let Some(toast) = context.store.notifications().latest() {
            writeln!(out, "{}", toast.kind).map_err(write_err)?;
        }
    }

    write_wishlist(out, context.store.wishlist(), &context.catalog).map_err(write_err)
}
