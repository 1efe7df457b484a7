//! Cart
//!
//! [`CartStore`] is the authoritative state for a shopper's session: cart
//! lines keyed by product and variant, the wishlist, and the toasts raised by
//! mutations. It is constructed explicitly with [`CartStore::hydrate`] and
//! passed to whatever needs it; there is no global instance.
//!
//! Every mutation that changes state rewrites the affected snapshot in
//! [`StateStorage`] and then notifies subscribers. Persistence is best
//! effort: storage failures are logged and never fail the mutation, and an
//! unreadable snapshot hydrates as an empty store.

use std::{
    fmt,
    time::{Duration, Instant},
};

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    notifications::{DEFAULT_TOAST_TTL, NotificationKind, Notifications},
    products::{Product, ProductId, VariantMismatch},
    storage::{
        MemoryStorage, StateStorage,
        snapshot::{self, SnapshotError},
    },
    variants::{LineKey, Variant},
    wishlist::Wishlist,
};

pub mod line;
pub mod observer;

pub use line::{CartLine, NewCartLine};
pub use observer::{EventLog, StoreEvent, StoreObserver, SubscriptionKey};

/// Errors returned by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Zero units were requested.
    #[error("Quantity must be at least one")]
    InvalidQuantity,

    /// The unit price is zero or negative (product id).
    #[error("Unit price for {0} must be positive")]
    InvalidPrice(String),

    /// The price currency differs from the cart currency (product id, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// The line quantity would exceed `u32::MAX` (line key).
    #[error("Quantity for {0} is too large")]
    QuantityOverflow(String),

    /// The line or cart total would exceed `i64::MAX` minor units (line key).
    #[error("Total for {0} is too large")]
    TotalOverflow(String),

    /// The variant is not offered for the product.
    #[error("Invalid variant for {product}: {reason}")]
    InvalidVariant {
        /// Product identifier
        product: String,
        /// What does not fit
        reason: VariantMismatch,
    },
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Prefix for storage keys, one per storefront instance.
    pub namespace: String,

    /// How long toasts stay visible.
    pub toast_ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: "storefront".to_string(),
            toast_ttl: DEFAULT_TOAST_TTL,
        }
    }
}

impl StoreConfig {
    /// Settings with the given namespace and default toast lifetime.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Storage key of the cart snapshot.
    pub fn cart_key(&self) -> String {
        format!("{}.cart", self.namespace)
    }

    /// Storage key of the wishlist snapshot.
    pub fn wishlist_key(&self) -> String {
        format!("{}.wishlist", self.namespace)
    }
}

/// Cart and wishlist state container.
pub struct CartStore<S: StateStorage = MemoryStorage> {
    config: StoreConfig,
    storage: S,
    currency: &'static Currency,
    lines: Vec<CartLine>,
    wishlist: Wishlist,
    notifications: Notifications,
    observers: SlotMap<SubscriptionKey, Box<dyn StoreObserver>>,
}

impl<S: StateStorage> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("config", &self.config)
            .field("storage", &self.storage)
            .field("currency", &self.currency.iso_alpha_code)
            .field("lines", &self.lines)
            .field("wishlist", &self.wishlist)
            .field("notifications", &self.notifications)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore<MemoryStorage> {
    /// A store backed by fresh in-memory storage.
    pub fn in_memory(currency: &'static Currency) -> Self {
        Self::hydrate(MemoryStorage::new(), StoreConfig::default(), currency)
    }
}

impl<S: StateStorage> CartStore<S> {
    /// Create a store, restoring any state previously persisted in `storage`.
    ///
    /// Missing, unreadable or invalid snapshots are logged and replaced with
    /// empty state.
    pub fn hydrate(storage: S, config: StoreConfig, currency: &'static Currency) -> Self {
        let lines = load_snapshot(&storage, &config.cart_key(), |raw| {
            snapshot::decode_cart(raw, currency)
        });

        let wishlist = load_snapshot(&storage, &config.wishlist_key(), snapshot::decode_wishlist);

        debug!(
            namespace = %config.namespace,
            lines = lines.len(),
            wishlist = wishlist.len(),
            "store hydrated"
        );

        Self {
            notifications: Notifications::new(config.toast_ttl),
            config,
            storage,
            currency,
            lines,
            wishlist,
            observers: SlotMap::with_key(),
        }
    }

    /// Add units of a product configuration, merging with an existing line.
    ///
    /// Returns the line's quantity after the call.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::CurrencyMismatch`]: the price is not in the cart currency.
    /// - [`CartError::InvalidPrice`]: the unit price is not positive.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit in a `u32`.
    /// - [`CartError::TotalOverflow`]: the line or cart total would not fit in an `i64`.
    pub fn add_item(&mut self, line: NewCartLine<'_>, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let item_currency = line.unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                line.product_id.to_string(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let unit_price = line.unit_price.to_minor_units();

        if unit_price <= 0 {
            return Err(CartError::InvalidPrice(line.product_id.to_string()));
        }

        let key = line.key();
        let position = self.lines.iter().position(|existing| existing.key == key);

        let (line_price, from) = position
            .and_then(|idx| self.lines.get(idx))
            .map_or((unit_price, 0), |existing| (existing.unit_price, existing.quantity));

        let to = from
            .checked_add(quantity)
            .ok_or_else(|| CartError::QuantityOverflow(key.to_string()))?;

        self.check_total(&key, line_price, to)?;

        let event = if let Some(existing) = position.and_then(|idx| self.lines.get_mut(idx)) {
            existing.quantity = to;

            StoreEvent::QuantityChanged { key, from, to }
        } else {
            self.lines.push(CartLine {
                key: key.clone(),
                name: line.name.clone(),
                unit_price,
                quantity,
                image: line.image,
                swatch: line.swatch,
            });

            StoreEvent::LineAdded { key, quantity }
        };

        debug!(%event, "cart updated");

        self.raise(NotificationKind::AddedToCart {
            name: line.name,
            quantity,
        });

        self.persist_cart();
        self.emit(&event);

        Ok(to)
    }

    /// Add a catalog product after checking the variant against its options.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidVariant`] if the product does not offer
    /// `variant`, otherwise the errors of [`CartStore::add_item`].
    pub fn add_product(
        &mut self,
        product: &Product<'_>,
        variant: Variant,
        quantity: u32,
    ) -> Result<u32, CartError> {
        product
            .accepts(&variant)
            .map_err(|reason| CartError::InvalidVariant {
                product: product.id.to_string(),
                reason,
            })?;

        self.add_item(NewCartLine::from_product(product, variant), quantity)
    }

    /// Remove the line for a product configuration.
    ///
    /// Returns the removed line, or `None` if there was no such line.
    pub fn remove_item(&mut self, product_id: &ProductId, variant: &Variant) -> Option<CartLine> {
        let position = self.position(product_id, variant)?;
        let removed = self.lines.remove(position);

        let event = StoreEvent::LineRemoved {
            key: removed.key.clone(),
        };

        debug!(%event, "cart updated");

        self.persist_cart();
        self.emit(&event);

        Some(removed)
    }

    /// Set the quantity of an existing line; zero removes it.
    ///
    /// Returns whether the cart changed. Unknown lines are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the line or cart total would
    /// not fit in an `i64`; the cart is left unchanged.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        variant: &Variant,
        quantity: u32,
    ) -> Result<bool, CartError> {
        if quantity == 0 {
            return Ok(self.remove_item(product_id, variant).is_some());
        }

        let Some(position) = self.position(product_id, variant) else {
            return Ok(false);
        };

        let Some((key, unit_price, from)) = self
            .lines
            .get(position)
            .map(|line| (line.key.clone(), line.unit_price, line.quantity))
        else {
            return Ok(false);
        };

        if from == quantity {
            return Ok(false);
        }

        self.check_total(&key, unit_price, quantity)?;

        if let Some(line) = self.lines.get_mut(position) {
            line.quantity = quantity;
        }

        let event = StoreEvent::QuantityChanged {
            key,
            from,
            to: quantity,
        };

        debug!(%event, "cart updated");

        self.persist_cart();
        self.emit(&event);

        Ok(true)
    }

    /// Remove every line. The wishlist is kept.
    ///
    /// Returns whether the cart changed.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }

        self.lines.clear();

        debug!("cart cleared");

        self.persist_cart();
        self.emit(&StoreEvent::Cleared);

        true
    }

    /// Save the product if absent, unsave it if present.
    ///
    /// Returns whether the product is saved after the call.
    pub fn toggle_wishlist(&mut self, product_id: impl Into<ProductId>) -> bool {
        let product_id = product_id.into();
        let saved = self.wishlist.toggle(product_id.clone());

        let (event, toast) = if saved {
            (
                StoreEvent::WishlistAdded {
                    product_id: product_id.clone(),
                },
                NotificationKind::AddedToWishlist { product_id },
            )
        } else {
            (
                StoreEvent::WishlistRemoved {
                    product_id: product_id.clone(),
                },
                NotificationKind::RemovedFromWishlist { product_id },
            )
        };

        debug!(%event, "wishlist updated");

        self.raise(toast);
        self.persist_wishlist();
        self.emit(&event);

        saved
    }

    /// Check whether a product is saved.
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Saved products.
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Sum of unit price times quantity over every line.
    pub fn total(&self) -> Money<'static, Currency> {
        let minor: i64 = self.lines.iter().map(CartLine::line_total).sum();

        Money::from_minor(minor, self.currency)
    }

    /// Sum of quantities over every line.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by key.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key == *key)
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Store settings.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Toasts raised by mutations.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Toasts raised by mutations, mutably (to dismiss or prune).
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register an observer for store events.
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionKey {
        self.observers.insert(Box::new(observer))
    }

    /// Drop an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.observers.remove(key).is_some()
    }

    /// Tear down the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, product_id: &ProductId, variant: &Variant) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.key.matches(product_id, variant))
    }

    /// Check that `key` at `unit_price` × `quantity` keeps every total within `i64`.
    fn check_total(
        &self,
        key: &LineKey,
        unit_price: i64,
        quantity: u32,
    ) -> Result<(), CartError> {
        let overflow = || CartError::TotalOverflow(key.to_string());

        let line_total = unit_price
            .checked_mul(i64::from(quantity))
            .ok_or_else(overflow)?;

        self.lines
            .iter()
            .filter(|line| line.key != *key)
            .try_fold(line_total, |acc, line| acc.checked_add(line.line_total()))
            .map(|_total| ())
            .ok_or_else(overflow)
    }

    /// Queue a toast, dropping the ones that have expired.
    fn raise(&mut self, kind: NotificationKind) {
        let now = Instant::now();

        self.notifications.prune(now);
        self.notifications.push(kind, now);
    }

    fn emit(&mut self, event: &StoreEvent) {
        for observer in self.observers.values_mut() {
            observer.on_event(event);
        }
    }

    fn persist_cart(&mut self) {
        let key = self.config.cart_key();
        let result = snapshot::encode_cart(&self.lines, self.currency);

        self.write_snapshot(&key, result);
    }

    fn persist_wishlist(&mut self) {
        let key = self.config.wishlist_key();
        let result = snapshot::encode_wishlist(&self.wishlist);

        self.write_snapshot(&key, result);
    }

    fn write_snapshot(&mut self, key: &str, encoded: Result<String, SnapshotError>) {
        let raw = match encoded {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %err, "failed to encode snapshot");
                return;
            }
        };

        if let Err(err) = self.storage.write(key, &raw) {
            warn!(key, error = %err, "failed to persist snapshot");
        }
    }
}

fn load_snapshot<T: Default>(
    storage: &impl StateStorage,
    key: &str,
    decode: impl FnOnce(&str) -> Result<T, SnapshotError>,
) -> T {
    match storage.read(key) {
        Ok(Some(raw)) => decode(&raw).unwrap_or_else(|err| {
            warn!(key, error = %err, "discarding unreadable snapshot");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "failed to read snapshot");
            T::default()
        }
    }
}
