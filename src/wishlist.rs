//! Wishlist

use crate::products::ProductId;

/// Saved products, each at most once, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    products: Vec<ProductId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a wishlist from ids, returning `None` if any id repeats.
    pub fn from_unique(products: Vec<ProductId>) -> Option<Self> {
        let mut wishlist = Self::new();

        for id in products {
            if wishlist.contains(&id) {
                return None;
            }

            wishlist.products.push(id);
        }

        Some(wishlist)
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns whether the product is saved after the call.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        if let Some(position) = self.position(&product_id) {
            self.products.remove(position);

            false
        } else {
            self.products.push(product_id);

            true
        }
    }

    /// Check whether a product is saved.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Iterate over saved product ids.
    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.products.iter()
    }

    /// Saved product ids as a slice.
    pub fn as_slice(&self) -> &[ProductId] {
        &self.products
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.products.iter().position(|id| id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new("ring-1");

        assert!(wishlist.toggle(id.clone()));
        assert!(wishlist.contains(&id));
        assert!(!wishlist.toggle(id.clone()));
        assert!(!wishlist.contains(&id));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut wishlist = Wishlist::new();

        wishlist.toggle(ProductId::new("b"));
        wishlist.toggle(ProductId::new("a"));
        wishlist.toggle(ProductId::new("c"));
        wishlist.toggle(ProductId::new("a"));

        let ids: Vec<&str> = wishlist.iter().map(ProductId::as_str).collect();

        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn from_unique_rejects_duplicates() {
        let ids = vec![ProductId::new("a"), ProductId::new("a")];

        assert!(Wishlist::from_unique(ids).is_none());
    }
}
