//! Products

use std::{borrow::Borrow, fmt};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use smallvec::SmallVec;
use thiserror::Error;

use crate::variants::Variant;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Stable catalog identifier for a product (e.g. `ring-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Reasons a variant does not fit a product's size and color axes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantMismatch {
    /// The product is sized but no size was chosen.
    #[error("a size must be selected")]
    SizeRequired,

    /// The chosen size is not offered.
    #[error("size {0} is not available")]
    UnknownSize(String),

    /// A size was chosen for a product without sizes.
    #[error("product is not sized, got size {0}")]
    UnexpectedSize(String),

    /// The product comes in colors but no color was chosen.
    #[error("a color must be selected")]
    ColorRequired,

    /// The chosen color is not offered.
    #[error("color {0} is not available")]
    UnknownColor(String),

    /// A color was chosen for a product without colors.
    #[error("product has no color options, got color {0}")]
    UnexpectedColor(String),
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Catalog identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category (e.g. `rings`)
    pub category: String,

    /// Collection the product belongs to, if any
    pub collection: Option<String>,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Flagged as a new arrival
    pub is_new: bool,

    /// Available sizes, empty when the product is not sized
    pub sizes: SmallVec<[String; 8]>,

    /// Available colors or materials, empty when there is no choice
    pub colors: SmallVec<[String; 4]>,

    /// Image reference
    pub image: Option<String>,

    /// Gradient or fallback swatch shown when no image is available
    pub swatch: Option<String>,

    /// Long-form description
    pub description: Option<String>,
}

impl Product<'_> {
    /// Price in minor units (pence, cents).
    pub fn price_minor(&self) -> i64 {
        self.price.to_minor_units()
    }

    /// Check that `variant` is a valid configuration of this product.
    ///
    /// # Errors
    ///
    /// Returns the first [`VariantMismatch`] found, checking size before color.
    pub fn accepts(&self, variant: &Variant) -> Result<(), VariantMismatch> {
        check_axis(
            &self.sizes,
            variant.size.as_deref(),
            VariantMismatch::SizeRequired,
            VariantMismatch::UnknownSize,
            VariantMismatch::UnexpectedSize,
        )?;

        check_axis(
            &self.colors,
            variant.color.as_deref(),
            VariantMismatch::ColorRequired,
            VariantMismatch::UnknownColor,
            VariantMismatch::UnexpectedColor,
        )
    }
}

fn check_axis(
    options: &[String],
    chosen: Option<&str>,
    required: VariantMismatch,
    unknown: fn(String) -> VariantMismatch,
    unexpected: fn(String) -> VariantMismatch,
) -> Result<(), VariantMismatch> {
    match (options.is_empty(), chosen) {
        (true, None) => Ok(()),
        (true, Some(value)) => Err(unexpected(value.to_string())),
        (false, None) => Err(required),
        (false, Some(value)) if options.iter().any(|option| option == value) => Ok(()),
        (false, Some(value)) => Err(unknown(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use smallvec::smallvec;

    use super::*;

    fn ring() -> Product<'static> {
        Product {
            id: ProductId::new("ring-1"),
            name: "Aurora Ring".to_string(),
            category: "rings".to_string(),
            collection: Some("aurora".to_string()),
            price: Money::from_minor(89_000, GBP),
            is_new: true,
            sizes: smallvec!["50".to_string(), "52".to_string()],
            colors: smallvec!["Gold".to_string()],
            image: None,
            swatch: None,
            description: None,
        }
    }

    #[test]
    fn accepts_listed_size_and_color() {
        assert_eq!(ring().accepts(&Variant::new(Some("52"), Some("Gold"))), Ok(()));
    }

    #[test]
    fn rejects_missing_size() {
        assert_eq!(
            ring().accepts(&Variant::new(None, Some("Gold"))),
            Err(VariantMismatch::SizeRequired)
        );
    }

    #[test]
    fn rejects_unknown_color() {
        assert_eq!(
            ring().accepts(&Variant::new(Some("50"), Some("Silver"))),
            Err(VariantMismatch::UnknownColor("Silver".to_string()))
        );
    }

    #[test]
    fn rejects_size_on_unsized_product() {
        let mut product = ring();
        product.sizes.clear();

        assert_eq!(
            product.accepts(&Variant::new(Some("52"), Some("Gold"))),
            Err(VariantMismatch::UnexpectedSize("52".to_string()))
        );
    }

    #[test]
    fn price_minor_matches_money() {
        assert_eq!(ring().price_minor(), 89_000);
    }

    #[test]
    fn product_id_display_and_borrow() {
        let id = ProductId::from("ring-1");
        let borrowed: &str = id.borrow();

        assert_eq!(id.to_string(), "ring-1");
        assert_eq!(borrowed, "ring-1");
    }

    #[test]
    fn mismatch_is_an_error_with_message() {
        let error: &dyn std::error::Error = &VariantMismatch::UnknownSize("60".to_string());

        assert_eq!(error.to_string(), "size 60 is not available");
        assert!(error.source().is_none());
    }
}
