//! Catalog Fixtures
//!
//! YAML shape of a catalog document and its conversion into validated [`Product`]s.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    catalog::CatalogError,
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Product collection
    #[serde(default)]
    pub collection: Option<String>,

    /// Product price (e.g., "890.00 GBP")
    pub price: String,

    /// New arrival flag
    #[serde(default, rename = "new")]
    pub is_new: bool,

    /// Available sizes
    #[serde(default)]
    pub sizes: SmallVec<[String; 8]>,

    /// Available colors or materials
    #[serde(default)]
    pub colors: SmallVec<[String; 4]>,

    /// Image reference
    #[serde(default)]
    pub image: Option<String>,

    /// Fallback swatch
    #[serde(default)]
    pub swatch: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product {
            id: ProductId::new(fixture.id.trim()),
            name: fixture.name,
            category: fixture.category,
            collection: fixture.collection,
            price: Money::from_minor(minor_units, currency),
            is_new: fixture.is_new,
            sizes: fixture.sizes,
            colors: fixture.colors,
            image: fixture.image,
            swatch: fixture.swatch,
            description: fixture.description,
        })
    }
}

/// Parse price string (e.g., "890.00 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not a known ISO code.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = iso::find(code).ok_or_else(|| CatalogError::UnknownCurrency(code.to_string()))?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let minor_units =
        minor_units(amount, currency).ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Convert a major-unit amount (e.g. `890.00`) to minor units of `currency`,
/// rounding half to even.
///
/// Returns `None` if the result does not fit in an `i64`.
pub fn minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
}
