//! Notifications
//!
//! Transient toast messages raised by store mutations. Toasts expire after a
//! fixed time-to-live; expiry only affects what is shown and never touches
//! cart or wishlist state.

use std::{
    fmt,
    time::{Duration, Instant},
};

use crate::products::ProductId;

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

/// What a toast is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    /// Units of a product were added to the cart.
    AddedToCart {
        /// Product name
        name: String,
        /// Units added
        quantity: u32,
    },

    /// A product was saved to the wishlist.
    AddedToWishlist {
        /// Product identifier
        product_id: ProductId,
    },

    /// A product was removed from the wishlist.
    RemovedFromWishlist {
        /// Product identifier
        product_id: ProductId,
    },
}

impl NotificationKind {
    /// Message shown to the shopper.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddedToCart { name, quantity: 1 } => write!(f, "{name} added to cart"),
            Self::AddedToCart { name, quantity } => write!(f, "{quantity} × {name} added to cart"),
            Self::AddedToWishlist { product_id } => write!(f, "{product_id} saved to wishlist"),
            Self::RemovedFromWishlist { product_id } => {
                write!(f, "{product_id} removed from wishlist")
            }
        }
    }
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic id, unique within a queue
    pub id: u64,

    /// Payload
    pub kind: NotificationKind,

    /// When the toast was raised
    pub created_at: Instant,
}

/// Queue of live toasts.
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    next_id: u64,
    queue: Vec<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl Notifications {
    /// Create a queue whose toasts live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 0,
            queue: Vec::new(),
        }
    }

    /// Raise a toast and return its id.
    pub fn push(&mut self, kind: NotificationKind, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        self.queue.push(Notification {
            id,
            kind,
            created_at: now,
        });

        id
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.queue
            .iter()
            .filter(move |notification| !self.is_expired(notification, now))
    }

    /// Dismiss a toast early. Returns whether it was still queued.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.queue.len();

        self.queue.retain(|notification| notification.id != id);

        self.queue.len() != before
    }

    /// Drop expired toasts, returning how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.queue.len();
        let ttl = self.ttl;

        self.queue
            .retain(|notification| now.saturating_duration_since(notification.created_at) < ttl);

        before - self.queue.len()
    }

    /// Toasts currently queued, expired or not.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Most recently raised toast.
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.last()
    }

    fn is_expired(&self, notification: &Notification, now: Instant) -> bool {
        now.saturating_duration_since(notification.created_at) >= self.ttl
    }
}
