//! Storefront
//!
//! Cart, wishlist and catalog state for storefront templates: an explicitly
//! constructed [`CartStore`](cart::CartStore) persisted to key/value storage,
//! and a validated, in-memory [`Catalog`](catalog::Catalog) with filtering
//! and sorting for product listings.

pub mod cart;
pub mod catalog;
pub mod notifications;
pub mod prelude;
pub mod products;
pub mod storage;
pub mod summary;
pub mod variants;
pub mod wishlist;
