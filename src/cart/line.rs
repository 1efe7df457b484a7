//! Cart Lines

use rusty_money::{Money, iso::Currency};

use crate::{
    products::{Product, ProductId},
    variants::{LineKey, Variant},
};

/// One distinct purchasable configuration in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub(crate) key: LineKey,
    pub(crate) name: String,
    pub(crate) unit_price: i64,
    pub(crate) quantity: u32,
    pub(crate) image: Option<String>,
    pub(crate) swatch: Option<String>,
}

impl CartLine {
    /// Line identity.
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// Product identifier.
    pub fn product_id(&self) -> &ProductId {
        &self.key.product_id
    }

    /// Chosen variant.
    pub fn variant(&self) -> &Variant {
        &self.key.variant
    }

    /// Product name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price in minor units.
    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    /// Units of this configuration in the cart, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Image reference.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Fallback swatch.
    pub fn swatch(&self) -> Option<&str> {
        self.swatch.as_deref()
    }

    /// Unit price times quantity, in minor units.
    ///
    /// Lines are only created or resized once this product is known to fit.
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// A line to add to the cart; quantity is supplied separately.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine<'a> {
    /// Product identifier
    pub product_id: ProductId,

    /// Chosen variant
    pub variant: Variant,

    /// Product name, used for display and notifications
    pub name: String,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Image reference
    pub image: Option<String>,

    /// Fallback swatch
    pub swatch: Option<String>,
}

impl<'a> NewCartLine<'a> {
    /// Create a line with no presentation metadata.
    pub fn new(
        product_id: impl Into<ProductId>,
        variant: Variant,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            variant,
            name: name.into(),
            unit_price,
            image: None,
            swatch: None,
        }
    }

    /// Create a line for a catalog product.
    ///
    /// The variant is taken as given; use [`Product::accepts`] to validate it.
    pub fn from_product(product: &Product<'a>, variant: Variant) -> Self {
        Self {
            product_id: product.id.clone(),
            variant,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            swatch: product.swatch.clone(),
        }
    }

    /// Line identity.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.variant.clone())
    }
}
