//! The shopping cart: line items, derived totals, and durable persistence.
//!
//! The cart is a plain owned value ([`CartStore`]) injected wherever it is
//! needed - there is no ambient singleton. Every mutation applies to memory
//! first, then synchronously writes the whole collection to a
//! [`StorageBackend`] under one namespaced key, then notifies subscribed
//! [`CartObserver`]s. In-memory state stays authoritative when a write
//! fails; the failure is reported, never retried, and never rolled back.

mod storage;
mod store;

pub use storage::{FileBackend, MemoryBackend, StorageBackend, StorageError};
pub use store::{
    CartError, CartLineItem, CartStore, LineItemDraft, LineItemPatch, PersistenceError,
};

use sticker_craft_core::LineItemId;

/// Default storage key the storefront persists its cart under.
pub const DEFAULT_CART_NAMESPACE: &str = "sticker-craft-cart";

/// A mutation applied to the cart, delivered to observers after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded(LineItemId),
    ItemUpdated(LineItemId),
    ItemRemoved(LineItemId),
    Cleared,
}

/// Explicit subscription interface for cart changes.
///
/// Observers run synchronously on the mutating call, after the in-memory
/// mutation and the persistence attempt.
pub trait CartObserver {
    fn cart_changed(&self, event: &CartEvent);
}
