//! Persisted snapshots
//!
//! JSON documents written to [`StateStorage`](crate::storage::StateStorage).
//! Every document carries a schema `version`; a document with any other
//! version is treated the same as a corrupt one.
//!
//! Cart document:
//!
//! ```json
//! {"version":1,"currency":"GBP","lines":[{"product_id":"ring-1","size":"52",
//!  "color":"Gold","name":"Aurora Ring","unit_price":89000,"quantity":1}]}
//! ```
//!
//! Wishlist document:
//!
//! ```json
//! {"version":1,"products":["ring-1"]}
//! ```

use rusty_money::iso::Currency;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartLine,
    products::ProductId,
    variants::{LineKey, Variant},
    wishlist::Wishlist,
};

/// Current schema version of persisted documents.
pub const SCHEMA_VERSION: u32 = 1;

/// Reasons a persisted document was rejected.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not valid JSON, or not the expected shape
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Written by an incompatible schema
    #[error("Unsupported snapshot version {0}, expected {SCHEMA_VERSION}")]
    UnsupportedVersion(u32),

    /// Cart was priced in a different currency
    #[error("Snapshot currency {found} does not match store currency {expected}")]
    CurrencyMismatch {
        /// Store currency
        expected: &'static str,
        /// Currency in the document
        found: String,
    },

    /// A line breaks a cart invariant
    #[error("Invalid cart line {index}: {reason}")]
    InvalidLine {
        /// Position in the document
        index: usize,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Two lines share a key
    #[error("Duplicate cart line {0}")]
    DuplicateLine(String),

    /// Line totals add up to more than `i64::MAX` minor units
    #[error("Cart total is too large")]
    TotalOverflow,

    /// A product is listed twice
    #[error("Duplicate wishlist entry")]
    DuplicateWishlistEntry,
}

#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct CartDocument {
    version: u32,
    currency: String,
    lines: Vec<LineRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LineRecord {
    product_id: ProductId,
    #[serde(flatten)]
    variant: Variant,
    name: String,
    unit_price: i64,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    swatch: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WishlistDocument {
    version: u32,
    products: Vec<ProductId>,
}

impl From<&CartLine> for LineRecord {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.key.product_id.clone(),
            variant: line.key.variant.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            image: line.image.clone(),
            swatch: line.swatch.clone(),
        }
    }
}

impl LineRecord {
    fn into_line(self, index: usize) -> Result<CartLine, SnapshotError> {
        let reason = if self.quantity == 0 {
            Some("quantity must be positive")
        } else if self.unit_price <= 0 {
            Some("unit price must be positive")
        } else if self.product_id.as_str().is_empty() {
            Some("product id is empty")
        } else if self
            .unit_price
            .checked_mul(i64::from(self.quantity))
            .is_none()
        {
            Some("line total is too large")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SnapshotError::InvalidLine { index, reason });
        }

        Ok(CartLine {
            key: LineKey::new(self.product_id, self.variant),
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            image: self.image,
            swatch: self.swatch,
        })
    }
}

fn check_version(raw: &str) -> Result<(), SnapshotError> {
    let probe: VersionProbe = serde_json::from_str(raw)?;

    if probe.version == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(SnapshotError::UnsupportedVersion(probe.version))
    }
}

/// Serialize cart lines.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_cart(lines: &[CartLine], currency: &Currency) -> Result<String, SnapshotError> {
    let document = CartDocument {
        version: SCHEMA_VERSION,
        currency: currency.iso_alpha_code.to_string(),
        lines: lines.iter().map(LineRecord::from).collect(),
    };

    Ok(serde_json::to_string(&document)?)
}

/// Deserialize and validate cart lines.
///
/// # Errors
///
/// Returns an error if the document is malformed, has another version or
/// currency, any line breaks a cart invariant, or the total overflows.
pub fn decode_cart(raw: &str, currency: &'static Currency) -> Result<Vec<CartLine>, SnapshotError> {
    check_version(raw)?;

    let document: CartDocument = serde_json::from_str(raw)?;

    if document.currency != currency.iso_alpha_code {
        return Err(SnapshotError::CurrencyMismatch {
            expected: currency.iso_alpha_code,
            found: document.currency,
        });
    }

    let mut seen = FxHashSet::default();
    let mut lines = Vec::with_capacity(document.lines.len());
    let mut total = 0_i64;

    for (index, record) in document.lines.into_iter().enumerate() {
        let line = record.into_line(index)?;

        total = total
            .checked_add(line.line_total())
            .ok_or(SnapshotError::TotalOverflow)?;

        if !seen.insert(line.key.clone()) {
            return Err(SnapshotError::DuplicateLine(line.key.to_string()));
        }

        lines.push(line);
    }

    Ok(lines)
}

/// Serialize a wishlist.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_wishlist(wishlist: &Wishlist) -> Result<String, SnapshotError> {
    let document = WishlistDocument {
        version: SCHEMA_VERSION,
        products: wishlist.as_slice().to_vec(),
    };

    Ok(serde_json::to_string(&document)?)
}

/// Deserialize a wishlist.
///
/// # Errors
///
/// Returns an error if the document is malformed, has another version, or
/// lists a product twice.
pub fn decode_wishlist(raw: &str) -> Result<Wishlist, SnapshotError> {
    check_version(raw)?;

    let document: WishlistDocument = serde_json::from_str(raw)?;

    Wishlist::from_unique(document.products).ok_or(SnapshotError::DuplicateWishlistEntry)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, GBP};
    use testresult::TestResult;

    use super::*;

    fn ring(size: &str, quantity: u32) -> CartLine {
        CartLine {
            key: LineKey::new("ring-1", Variant::new(Some(size), Some("Gold"))),
            name: "Aurora Ring".to_string(),
            unit_price: 89_000,
            quantity,
            image: Some("/img/ring-1.webp".to_string()),
            swatch: None,
        }
    }

    #[test]
    fn cart_round_trip_preserves_lines() -> TestResult {
        let lines = vec![ring("50", 1), ring("52", 3)];

        let raw = encode_cart(&lines, GBP)?;

        assert_eq!(decode_cart(&raw, GBP)?, lines);

        Ok(())
    }

    #[test]
    fn cart_document_layout_is_flat() -> TestResult {
        let raw = encode_cart(&[ring("52", 1)], GBP)?;

        assert_eq!(
            raw,
            r#"{"version":1,"currency":"GBP","lines":[{"product_id":"ring-1","size":"52","color":"Gold","name":"Aurora Ring","unit_price":89000,"quantity":1,"image":"/img/ring-1.webp"}]}"#
        );

        Ok(())
    }

    #[test]
    fn unversioned_array_is_rejected() {
        let legacy = r#"[{"id":"ring-1","quantity":1}]"#;

        assert!(matches!(
            decode_cart(legacy, GBP),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let raw = r#"{"version":2,"currency":"GBP","lines":[]}"#;

        assert!(matches!(
            decode_cart(raw, GBP),
            Err(SnapshotError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn other_currency_is_rejected() -> TestResult {
        let raw = encode_cart(&[ring("52", 1)], GBP)?;

        assert!(matches!(
            decode_cart(&raw, EUR),
            Err(SnapshotError::CurrencyMismatch { expected: "EUR", .. })
        ));

        Ok(())
    }

    #[test]
    fn zero_quantity_line_is_rejected() -> TestResult {
        let raw = encode_cart(&[ring("52", 0)], GBP)?;

        assert!(matches!(
            decode_cart(&raw, GBP),
            Err(SnapshotError::InvalidLine { index: 0, .. })
        ));

        Ok(())
    }

    #[test]
    fn duplicate_lines_are_rejected() -> TestResult {
        let raw = encode_cart(&[ring("52", 1), ring("52", 2)], GBP)?;

        assert!(matches!(
            decode_cart(&raw, GBP),
            Err(SnapshotError::DuplicateLine(_))
        ));

        Ok(())
    }

    #[test]
    fn overflowing_totals_are_rejected() -> TestResult {
        let mut vault = ring("52", 1);
        vault.unit_price = i64::MAX / 2;

        let huge_line = CartLine {
            quantity: 3,
            ..vault.clone()
        };
        let raw = encode_cart(&[huge_line], GBP)?;

        assert!(matches!(
            decode_cart(&raw, GBP),
            Err(SnapshotError::InvalidLine { index: 0, .. })
        ));

        let other = CartLine {
            key: LineKey::new("ring-1", Variant::new(Some("50"), Some("Gold"))),
            ..vault.clone()
        };
        let third = CartLine {
            key: LineKey::new("ring-1", Variant::new(Some("48"), Some("Gold"))),
            ..vault.clone()
        };
        let raw = encode_cart(&[vault, other, third], GBP)?;

        assert!(matches!(
            decode_cart(&raw, GBP),
            Err(SnapshotError::TotalOverflow)
        ));

        Ok(())
    }

    #[test]
    fn wishlist_round_trip() -> TestResult {
        let mut wishlist = Wishlist::new();
        wishlist.toggle(ProductId::new("ring-1"));
        wishlist.toggle(ProductId::new("necklace-2"));

        let raw = encode_wishlist(&wishlist)?;

        assert_eq!(decode_wishlist(&raw)?, wishlist);

        Ok(())
    }

    #[test]
    fn wishlist_duplicates_are_rejected() {
        let raw = r#"{"version":1,"products":["a","a"]}"#;

        assert!(matches!(
            decode_wishlist(raw),
            Err(SnapshotError::DuplicateWishlistEntry)
        ));
    }
}
