//! Variants

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::products::ProductId;

/// The size and color (or material) chosen for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Chosen size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Chosen color or material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Variant {
    /// Create a variant from optional size and color.
    pub fn new(size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            size: size.map(str::to_string),
            color: color.map(str::to_string),
        }
    }

    /// A variant with neither size nor color.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check whether neither axis is set.
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.color.is_none()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.size, &self.color) {
            (Some(size), Some(color)) => write!(f, "{size} / {color}"),
            (Some(value), None) | (None, Some(value)) => f.write_str(value),
            (None, None) => Ok(()),
        }
    }
}

/// Identity of a cart line: one per product and variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Product identifier
    pub product_id: ProductId,

    /// Chosen variant
    pub variant: Variant,
}

impl LineKey {
    /// Create a line key.
    pub fn new(product_id: impl Into<ProductId>, variant: Variant) -> Self {
        Self {
            product_id: product_id.into(),
            variant,
        }
    }

    /// Check whether this key identifies `product_id` in `variant`.
    pub fn matches(&self, product_id: &ProductId, variant: &Variant) -> bool {
        self.product_id == *product_id && self.variant == *variant
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variant.is_empty() {
            write!(f, "{}", self.product_id)
        } else {
            write!(f, "{} [{}]", self.product_id, self.variant)
        }
    }
}
