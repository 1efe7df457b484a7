//! Catalog
//!
//! The static, in-memory product list shipped with a storefront. Products are
//! validated when the catalog is loaded, so everything handed out by a
//! [`Catalog`] is known to have an id, a name, a category and a positive price
//! in the catalog currency.

use std::{fs, path::Path};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductId, ProductKey};

pub mod filter;
pub mod fixture;

pub use filter::{ProductFilter, SortOrder, filter_products};

/// Catalog loading and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Price is zero or negative
    #[error("Product {0} has a non-positive price")]
    NonPositivePrice(String),

    /// A required field is blank
    #[error("Product {id:?} is missing required field {field}")]
    MissingField {
        /// Product identifier as written in the document
        id: String,
        /// Name of the blank field
        field: &'static str,
    },

    /// The same id appears twice
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The document lists no products
    #[error("Catalog contains no products")]
    Empty,
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product<'static>>,
    order: Vec<ProductKey>,
    keys: FxHashMap<ProductId, ProductKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Build a catalog from products in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a product has a blank id, name
    /// or category or a non-positive price, an id repeats, or the products
    /// are not all priced in the same currency.
    pub fn new(products: impl IntoIterator<Item = Product<'static>>) -> Result<Self, CatalogError> {
        let mut meta = SlotMap::with_key();
        let mut order = Vec::new();
        let mut keys = FxHashMap::default();
        let mut currency: Option<&'static Currency> = None;

        for product in products {
            validate(&product)?;

            let product_currency = product.price.currency();

            if let Some(existing) = currency
                && existing != product_currency
            {
                return Err(CatalogError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    product_currency.iso_alpha_code.to_string(),
                ));
            }

            currency = Some(product_currency);

            if keys.contains_key(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.to_string()));
            }

            let id = product.id.clone();
            let key = meta.insert(product);

            order.push(key);
            keys.insert(id, key);
        }

        let currency = currency.ok_or(CatalogError::Empty)?;

        debug!(
            products = order.len(),
            currency = currency.iso_alpha_code,
            "catalog loaded"
        );

        Ok(Self {
            products: meta,
            order,
            keys,
            currency,
        })
    }

    /// Parse and validate a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or any product fails
    /// validation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document: fixture::CatalogFixture = serde_norway::from_str(yaml)?;

        let products = document
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(products)
    }

    /// Load a YAML catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Look up a product by its catalog id.
    pub fn get(&self, id: &str) -> Option<&Product<'static>> {
        self.keys
            .get(id)
            .and_then(|key| self.products.get(*key))
    }

    /// Look up a product by key.
    pub fn get_by_key(&self, key: ProductKey) -> Option<&Product<'static>> {
        self.products.get(key)
    }

    /// Key for a product id.
    pub fn key(&self, id: &str) -> Option<ProductKey> {
        self.keys.get(id).copied()
    }

    /// Iterate over products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'static>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.iter().map(|product| product.category.as_str()))
    }

    /// Distinct collections in first-seen order.
    pub fn collections(&self) -> Vec<&str> {
        distinct(self.iter().filter_map(|product| product.collection.as_deref()))
    }

    /// Filter and sort the catalog.
    pub fn filter(&self, filter: &ProductFilter, order: SortOrder) -> Vec<&Product<'static>> {
        filter_products(self.iter(), filter, order)
    }

    /// Other products from the same category, in catalog order.
    ///
    /// Returns an empty list when `id` is not in the catalog.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product<'static>> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        self.iter()
            .filter(|candidate| candidate.category == product.category && candidate.id != product.id)
            .take(limit)
            .collect()
    }
}

fn validate(product: &Product<'_>) -> Result<(), CatalogError> {
    let id = product.id.as_str();

    for (field, value) in [
        ("id", id),
        ("name", product.name.as_str()),
        ("category", product.category.as_str()),
    ] {
        if value.trim().is_empty() {
            return Err(CatalogError::MissingField {
                id: id.to_string(),
                field,
            });
        }
    }

    if product.price_minor() <= 0 {
        return Err(CatalogError::NonPositivePrice(id.to_string()));
    }

    Ok(())
}

fn distinct<'c>(values: impl Iterator<Item = &'c str>) -> Vec<&'c str> {
    let mut seen = FxHashSet::default();

    values.filter(|value| seen.insert(*value)).collect()
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{EUR, GBP},
    };
    use smallvec::SmallVec;
    use testresult::TestResult;

    use super::*;

    const YAML: &str = r#"
products:
  - id: ring-1
    name: Aurora Ring
    category: rings
    collection: aurora
    price: "890.00 GBP"
    new: true
    sizes: ["50", "52", "54"]
    colors: [Gold, Silver]
  - id: necklace-1
    name: Aurora Pendant
    category: necklaces
    collection: aurora
    price: "450.00 GBP"
  - id: ring-2
    name: Solstice Band
    category: rings
    price: "320.00 GBP"
"#;

    fn product(id: &str, price: Money<'static, Currency>) -> Product<'static> {
        Product {
            id: ProductId::new(id),
            name: id.to_string(),
            category: "rings".to_string(),
            collection: None,
            price,
            is_new: false,
            sizes: SmallVec::new(),
            colors: SmallVec::new(),
            image: None,
            swatch: None,
            description: None,
        }
    }

    #[test]
    fn loads_products_in_document_order() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        let ids: Vec<&str> = catalog.iter().map(|product| product.id.as_str()).collect();

        assert_eq!(ids, ["ring-1", "necklace-1", "ring-2"]);
        assert_eq!(catalog.currency(), GBP);
        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn parses_variant_axes_and_flags() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let ring = catalog.get("ring-1").ok_or("ring-1 missing")?;

        assert!(ring.is_new);
        assert_eq!(ring.sizes.as_slice(), ["50", "52", "54"]);
        assert_eq!(ring.colors.as_slice(), ["Gold", "Silver"]);
        assert_eq!(ring.price_minor(), 89_000);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new([
            product("ring-1", Money::from_minor(100, GBP)),
            product("ring-1", Money::from_minor(200, GBP)),
        ]);

        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "ring-1"));
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let result = Catalog::new([
            product("ring-1", Money::from_minor(100, GBP)),
            product("ring-2", Money::from_minor(200, EUR)),
        ]);

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(..))));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut unnamed = product("ring-1", Money::from_minor(100, GBP));
        unnamed.name = "  ".to_string();

        assert!(matches!(
            Catalog::new([unnamed]),
            Err(CatalogError::MissingField { field: "name", .. })
        ));

        let mut uncategorised = product("ring-1", Money::from_minor(100, GBP));
        uncategorised.category = String::new();

        assert!(matches!(
            Catalog::new([uncategorised]),
            Err(CatalogError::MissingField { field: "category", .. })
        ));

        assert!(matches!(
            Catalog::new([product(" ", Money::from_minor(100, GBP))]),
            Err(CatalogError::MissingField { field: "id", .. })
        ));
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        for minor in [0, -500] {
            let result = Catalog::new([product("ring-1", Money::from_minor(minor, GBP))]);

            assert!(
                matches!(&result, Err(CatalogError::NonPositivePrice(id)) if id == "ring-1"),
                "price {minor} accepted"
            );
        }
    }

    #[test]
    fn yaml_products_are_validated() {
        let yaml = r#"
products:
  - id: ring-1
    name: Aurora Ring
    category: "  "
    price: "890.00 GBP"
"#;

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::MissingField { field: "category", .. })
        ));
        assert!(matches!(
            Catalog::from_yaml_str(&yaml.replace("\"  \"", "rings").replace("890.00", "0.00")),
            Err(CatalogError::NonPositivePrice(_))
        ));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::new([]), Err(CatalogError::Empty)));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            Catalog::from_yaml_str("products: [ {id: 1"),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn categories_and_collections_are_distinct() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        assert_eq!(catalog.categories(), ["rings", "necklaces"]);
        assert_eq!(catalog.collections(), ["aurora"]);

        Ok(())
    }

    #[test]
    fn related_excludes_self() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        let related: Vec<&str> = catalog
            .related("ring-1", 4)
            .into_iter()
            .map(|product| product.id.as_str())
            .collect();

        assert_eq!(related, ["ring-2"]);
        assert!(catalog.related("missing", 4).is_empty());

        Ok(())
    }

    #[test]
    fn key_lookup_matches_id_lookup() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let key = catalog.key("ring-2").ok_or("ring-2 missing")?;

        assert_eq!(
            catalog.get_by_key(key).map(|product| product.name.as_str()),
            Some("Solstice Band")
        );

        Ok(())
    }
}
