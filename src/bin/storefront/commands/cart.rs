use std::{io, time::Instant};

use clap::{Args, Subcommand};
use storefront::{products::ProductId, summary::write_cart, variants::Variant};

use super::{Context, write_err};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart lines and total
    Show,

    /// Add units of a product
    Add(AddArgs),

    /// Remove a line
    Remove(LineArgs),

    /// Set the quantity of a line; 0 removes it
    Set(SetArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Product id
    product_id: String,

    /// Size
    #[arg(long)]
    size: Option<String>,

    /// Color or material
    #[arg(long)]
    color: Option<String>,
}

impl LineArgs {
    fn into_parts(self) -> (ProductId, Variant) {
        (
            ProductId::new(self.product_id),
            Variant {
                size: self.size,
                color: self.color,
            },
        )
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    #[command(flatten)]
    line: LineArgs,

    /// Units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct SetArgs {
    #[command(flatten)]
    line: LineArgs,

    /// New quantity
    quantity: u32,
}

pub(crate) fn run(
    context: &mut Context,
    command: CartCommand,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let (product_id, variant) = args.line.into_parts();

            let product = context
                .catalog
                .get(product_id.as_str())
                .ok_or_else(|| format!("unknown product {product_id}"))?;

            context
                .store
                .add_product(product, variant, args.quantity)
                .map_err(|error| error.to_string())?;

            let now = Instant::now();

            for toast in context.store.notifications().active(now) {
                writeln!(out, "{}", toast.kind).map_err(write_err)?;
            }
        }
        CartSubcommand::Remove(args) => {
            let (product_id, variant) = args.into_parts();

            if context.store.remove_item(&product_id, &variant).is_none() {
                writeln!(out, "{product_id} is not in the cart").map_err(write_err)?;
            }
        }
        CartSubcommand::Set(args) => {
            let (product_id, variant) = args.line.into_parts();

            let changed = context
                .store
                .update_quantity(&product_id, &variant, args.quantity)
                .map_err(|error| error.to_string())?;

            if !changed {
                writeln!(out, "cart unchanged").map_err(write_err)?;
            }
        }
        CartSubcommand::Clear => {
            context.store.clear();
        }
    }

    write_cart(out, &context.store).map_err(write_err)
}
