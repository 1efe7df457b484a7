//! Integration tests for catalog loading and product listings, using the
//! jewelry storefront catalog.

use testresult::TestResult;

use storefront::{
    catalog::{Catalog, ProductFilter, SortOrder},
    products::Product,
};

const JEWELRY: &str = include_str!("../fixtures/catalog/jewelry.yml");
const FITNESS: &str = include_str!("../fixtures/catalog/fitness.yml");

fn ids(products: &[&Product<'_>]) -> Vec<String> {
    products.iter().map(|product| product.id.to_string()).collect()
}

#[test]
fn jewelry_catalog_loads_twelve_products() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.currency().iso_alpha_code, "GBP");
    assert_eq!(
        catalog.categories(),
        ["rings", "necklaces", "earrings", "bracelets", "gifts"]
    );

    Ok(())
}

#[test]
fn category_filter_keeps_catalog_order() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    let rings = catalog.filter(&ProductFilter::category("rings"), SortOrder::Featured);

    assert_eq!(ids(&rings), ["ring-1", "ring-2", "ring-3", "ring-4"]);
    assert!(rings.iter().all(|product| product.category == "rings"));

    Ok(())
}

#[test]
fn price_ascending_breaks_ties_by_catalog_order() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    let sorted = catalog.filter(&ProductFilter::default(), SortOrder::PriceAsc);

    assert_eq!(
        ids(&sorted),
        [
            "gift-card",
            "earrings-1",
            "necklace-2",
            "ring-2",
            "necklace-3",
            "earrings-2",
            "necklace-1",
            "bracelet-1",
            "ring-3",
            "ring-1",
            "bracelet-2",
            "ring-4",
        ]
    );

    Ok(())
}

#[test]
fn price_descending_within_collection() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    let aurora = catalog.filter(&ProductFilter::collection("aurora"), SortOrder::PriceDesc);

    assert_eq!(ids(&aurora), ["ring-4", "ring-1", "necklace-1", "earrings-2"]);

    Ok(())
}

#[test]
fn newest_lists_flagged_products_first() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    let sorted = catalog.filter(&ProductFilter::default(), SortOrder::Newest);
    let sorted_ids = ids(&sorted);

    assert_eq!(
        sorted_ids.get(..4),
        Some(
            [
                "ring-1".to_string(),
                "bracelet-1".to_string(),
                "necklace-2".to_string(),
                "earrings-2".to_string(),
            ]
            .as_slice()
        )
    );
    assert_eq!(sorted_ids.get(4).map(String::as_str), Some("necklace-1"));

    Ok(())
}

#[test]
fn combined_predicates_and_price_bounds() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    let filter = ProductFilter {
        category: Some("necklaces".to_string()),
        collection: Some("heritage".to_string()),
        min_price: Some(30_000),
        max_price: Some(32_000),
    };

    assert_eq!(ids(&catalog.filter(&filter, SortOrder::Featured)), ["necklace-3"]);

    let nothing = ProductFilter::category("watches");

    assert!(catalog.filter(&nothing, SortOrder::Featured).is_empty());

    Ok(())
}

#[test]
fn related_products_share_category() -> TestResult {
    let catalog = Catalog::from_yaml_str(JEWELRY)?;

    let related = catalog.related("ring-2", 2);

    assert_eq!(ids(&related), ["ring-1", "ring-3"]);

    Ok(())
}

#[test]
fn fitness_catalog_uses_its_own_currency() -> TestResult {
    let catalog = Catalog::from_yaml_str(FITNESS)?;

    assert_eq!(catalog.currency().iso_alpha_code, "USD");
    assert_eq!(catalog.collections(), ["unlimited", "studio"]);

    Ok(())
}
