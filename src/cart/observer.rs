//! Store observers
//!
//! UI components subscribe to a [`CartStore`](crate::cart::CartStore) to
//! learn about mutations. Observers are called only for mutations that
//! changed state, after the change has been applied and persisted.

use std::{cell::RefCell, fmt, rc::Rc};

use slotmap::new_key_type;

use crate::{products::ProductId, variants::LineKey};

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe.
    pub struct SubscriptionKey;
}

/// A change applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new line was created.
    LineAdded {
        /// Line identity
        key: LineKey,
        /// Initial quantity
        quantity: u32,
    },

    /// An existing line's quantity changed.
    QuantityChanged {
        /// Line identity
        key: LineKey,
        /// Quantity before the change
        from: u32,
        /// Quantity after the change
        to: u32,
    },

    /// A line was removed.
    LineRemoved {
        /// Line identity
        key: LineKey,
    },

    /// Every line was removed.
    Cleared,

    /// A product was saved to the wishlist.
    WishlistAdded {
        /// Product identifier
        product_id: ProductId,
    },

    /// A product was removed from the wishlist.
    WishlistRemoved {
        /// Product identifier
        product_id: ProductId,
    },
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineAdded { key, quantity } => write!(f, "added {quantity} × {key}"),
            Self::QuantityChanged { key, from, to } => write!(f, "{key}: {from} → {to}"),
            Self::LineRemoved { key } => write!(f, "removed {key}"),
            Self::Cleared => f.write_str("cart cleared"),
            Self::WishlistAdded { product_id } => write!(f, "saved {product_id}"),
            Self::WishlistRemoved { product_id } => write!(f, "unsaved {product_id}"),
        }
    }
}

/// Receives store events.
pub trait StoreObserver {
    /// Called once per applied change.
    fn on_event(&mut self, event: &StoreEvent);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreEvent),
{
    fn on_event(&mut self, event: &StoreEvent) {
        self(event);
    }
}

/// Observer that records every event.
///
/// Clones share the same log, so keep one clone and subscribe the other.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<StoreEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.borrow().clone()
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl StoreObserver for EventLog {
    fn on_event(&mut self, event: &StoreEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
