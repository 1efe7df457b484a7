use std::io;

use clap::Args;
use rust_decimal::Decimal;
use storefront::{
    catalog::{ProductFilter, SortOrder, fixture::minor_units},
    summary::write_products,
};

use super::{Context, write_err};

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only products in this category
    #[arg(long)]
    category: Option<String>,

    /// Only products in this collection
    #[arg(long)]
    collection: Option<String>,

    /// Lowest price, in major units (e.g. 250.00)
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest price, in major units (e.g. 900.00)
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Sort order (featured, price-asc, price-desc, newest)
    #[arg(long, default_value_t = SortOrder::Featured)]
    sort: SortOrder,
}

#[derive(Debug, Args)]
pub(crate) struct RelatedArgs {
    /// Product id
    product_id: String,

    /// Maximum number of products to list
    #[arg(long, default_value_t = 4)]
    limit: usize,
}

pub(crate) fn list(
    context: &Context,
    args: ProductsArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let currency = context.catalog.currency();
    let to_minor = |amount: Option<Decimal>| {
        amount
            .map(|amount| {
                minor_units(amount, currency).ok_or_else(|| format!("price {amount} is out of range"))
            })
            .transpose()
    };

    let filter = ProductFilter {
        category: args.category,
        collection: args.collection,
        min_price: to_minor(args.min_price)?,
        max_price: to_minor(args.max_price)?,
    };

    let products = context.catalog.filter(&filter, args.sort);

    write_products(out, products, context.store.wishlist()).map_err(write_err)
}

pub(crate) fn related(
    context: &Context,
    args: &RelatedArgs,
    out: &mut impl io::Write,
) -> Result<(), String> {
    if context.catalog.get(&args.product_id).is_none() {
        return Err(format!("unknown product {}", args.product_id));
    }

    let products = context.catalog.related(&args.product_id, args.limit);

    write_products(out, products, context.store.wishlist()).map_err(write_err)
}
