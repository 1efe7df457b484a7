//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartError, CartLine, CartStore, EventLog, NewCartLine, StoreConfig, StoreEvent,
        StoreObserver, SubscriptionKey,
    },
    catalog::{Catalog, CatalogError, ProductFilter, SortOrder, filter_products},
    notifications::{Notification, NotificationKind, Notifications},
    products::{Product, ProductId, ProductKey, VariantMismatch},
    storage::{FileStorage, MemoryStorage, StateStorage, StorageError},
    summary::{SummaryError, write_cart, write_products, write_wishlist},
    variants::{LineKey, Variant},
    wishlist::Wishlist,
};
