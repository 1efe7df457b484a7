//! Summary
//!
//! Plain-text tables for carts, wishlists and product listings.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartStore, catalog::Catalog, products::Product, storage::StateStorage,
    wishlist::Wishlist,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write the cart as a table followed by item count and total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart<S: StateStorage>(
    mut out: impl io::Write,
    store: &CartStore<S>,
) -> Result<(), SummaryError> {
    if store.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let currency = store.currency();
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Variant", "Unit Price", "Qty", "Total"]);

    for (idx, line) in store.lines().iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            line.name().to_string(),
            line.variant().to_string(),
            format_minor(line.unit_price(), currency),
            line.quantity().to_string(),
            format_minor(line.line_total(), currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Items: {}", store.item_count())?;
    writeln!(out, " \x1b[1mTotal: {}\x1b[0m", store.total())?;

    Ok(())
}

/// Write a product listing, marking products saved in `wishlist`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_products<'p, 'a: 'p>(
    mut out: impl io::Write,
    products: impl IntoIterator<Item = &'p Product<'a>>,
    wishlist: &Wishlist,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Id", "Name", "Category", "Collection", "Price"]);

    let mut rows = 0_usize;

    for product in products {
        let marker = match (wishlist.contains(&product.id), product.is_new) {
            (true, true) => "♥ new",
            (true, false) => "♥",
            (false, true) => "new",
            (false, false) => "",
        };

        builder.push_record([
            marker.to_string(),
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.collection.clone().unwrap_or_default(),
            product.price.to_string(),
        ]);

        rows += 1;
    }

    if rows == 0 {
        writeln!(out, "No products match.")?;

        return Ok(());
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the wishlist, resolving names and prices through the catalog.
///
/// Saved ids that are no longer in the catalog are listed without details.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_wishlist(
    mut out: impl io::Write,
    wishlist: &Wishlist,
    catalog: &Catalog,
) -> Result<(), SummaryError> {
    if wishlist.is_empty() {
        writeln!(out, "Your wishlist is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Price"]);

    for id in wishlist.iter() {
        let (name, price) = catalog.get(id.as_str()).map_or_else(
            || ("<unavailable>".to_string(), String::new()),
            |product| (product.name.clone(), product.price.to_string()),
        );

        builder.push_record([id.to_string(), name, price]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn format_minor(minor: i64, currency: &Currency) -> String {
    Money::from_minor(minor, currency).to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{cart::NewCartLine, products::ProductId, variants::Variant};

    use super::*;

    const YAML: &str = r#"
products:
  - id: ring-1
    name: Aurora Ring
    category: rings
    price: "890.00 GBP"
    new: true
  - id: ring-2
    name: Solstice Band
    category: rings
    price: "320.00 GBP"
"#;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), SummaryError>) -> TestResult<String> {
        let mut out = Vec::new();

        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn empty_cart_has_placeholder() -> TestResult {
        let store = CartStore::in_memory(GBP);

        let text = render(|out| write_cart(out, &store))?;

        assert_eq!(text, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn cart_table_lists_lines_and_total() -> TestResult {
        let mut store = CartStore::in_memory(GBP);

        store.add_item(
            NewCartLine::new(
                "ring-1",
                Variant::new(Some("52"), Some("Gold")),
                "Aurora Ring",
                Money::from_minor(89_000, GBP),
            ),
            3,
        )?;

        let text = render(|out| write_cart(out, &store))?;

        assert!(text.contains("Aurora Ring"), "missing name in:\n{text}");
        assert!(text.contains("52 / Gold"), "missing variant in:\n{text}");
        assert!(text.contains("Items: 3"), "missing count in:\n{text}");
        assert!(
            text.contains(&store.total().to_string()),
            "missing total in:\n{text}"
        );

        Ok(())
    }

    #[test]
    fn product_listing_marks_saved_and_new() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new("ring-2"));

        let text = render(|out| write_products(out, catalog.iter(), &wishlist))?;

        assert!(text.contains("new"), "missing new marker in:\n{text}");
        assert!(text.contains('♥'), "missing saved marker in:\n{text}");

        Ok(())
    }

    #[test]
    fn empty_listing_has_placeholder() -> TestResult {
        let wishlist = Wishlist::new();

        let text = render(|out| write_products(out, [], &wishlist))?;

        assert_eq!(text, "No products match.\n");

        Ok(())
    }

    #[test]
    fn wishlist_marks_missing_products() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new("ring-1"));
        wishlist.toggle(ProductId::new("retired-9"));

        let text = render(|out| write_wishlist(out, &wishlist, &catalog))?;

        assert!(text.contains("Aurora Ring"), "missing name in:\n{text}");
        assert!(text.contains("<unavailable>"), "missing placeholder in:\n{text}");

        Ok(())
    }
}
