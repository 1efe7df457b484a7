//! Catalog filtering and sorting

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::products::Product;

/// Ordering applied to a filtered product listing.
///
/// Every order is stable: products that compare equal keep catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order
    #[default]
    Featured,

    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// New arrivals first.
    ///
    /// Products only carry an `is_new` flag, so this is a partition rather
    /// than a chronological sort.
    Newest,
}

impl SortOrder {
    /// All sort orders, in menu order.
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Featured,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::Newest,
    ];

    /// Stable name used on the command line and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised sort order name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order {0:?}, expected one of: featured, price-asc, price-desc, newest")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

/// Optional predicates applied to a product listing.
///
/// Present predicates are combined with logical AND; an empty filter matches
/// every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<String>,

    /// Exact collection match
    pub collection: Option<String>,

    /// Inclusive lower price bound in minor units
    pub min_price: Option<i64>,

    /// Inclusive upper price bound in minor units
    pub max_price: Option<i64>,
}

impl ProductFilter {
    /// Filter by category only.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Filter by collection only.
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            ..Self::default()
        }
    }

    /// Check whether a product satisfies every present predicate.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        let price = product.price_minor();

        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && self
                .collection
                .as_deref()
                .is_none_or(|collection| product.collection.as_deref() == Some(collection))
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

/// Filter then sort products, preserving input order among equals.
pub fn filter_products<'p, 'a: 'p>(
    products: impl IntoIterator<Item = &'p Product<'a>>,
    filter: &ProductFilter,
    order: SortOrder,
) -> Vec<&'p Product<'a>> {
    let mut matched: Vec<&'p Product<'a>> = products
        .into_iter()
        .filter(|product| filter.matches(product))
        .collect();

    match order {
        SortOrder::Featured => {}
        SortOrder::PriceAsc => matched.sort_by_key(|product| product.price_minor()),
        SortOrder::PriceDesc => {
            matched.sort_by(|left, right| right.price_minor().cmp(&left.price_minor()));
        }
        SortOrder::Newest => matched.sort_by_key(|product| !product.is_new),
    }

    matched
}
