//! The checkout gate: from cart review to order placement.
//!
//! Gating never touches the cart - a refused checkout leaves every line item
//! (and the persisted copy) exactly as it was, and the caller redirects to
//! the sign-in flow. The cart is cleared only after the document store has
//! accepted the order.

use chrono::{DateTime, Utc};
use sticker_craft_core::OrderId;
use thiserror::Error;
use tracing::warn;

use crate::cart::{CartStore, StorageBackend};
use crate::documents::{DocumentStore, DocumentStoreError, OrderItem, OrderRecord, OrderStatus};
use crate::identity::IdentityProvider;

/// Errors surfaced when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No signed-in user; the caller should route to the sign-in flow. The
    /// cart is untouched.
    #[error("sign-in required before checkout")]
    SignInRequired,

    /// There is nothing to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The document store did not accept the order. The cart is untouched.
    #[error("order submission failed: {0}")]
    Submit(#[from] DocumentStoreError),
}

/// Decides whether the user may proceed from cart review to placing an
/// order, and drives the placement itself.
pub struct CheckoutGate<'a> {
    identity: &'a dyn IdentityProvider,
    documents: &'a dyn DocumentStore,
}

impl<'a> CheckoutGate<'a> {
    /// Create a gate over the given collaborators.
    #[must_use]
    pub const fn new(identity: &'a dyn IdentityProvider, documents: &'a dyn DocumentStore) -> Self {
        Self {
            identity,
            documents,
        }
    }

    /// Whether checkout may proceed: true iff a user is signed in.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        self.identity.current_user().is_some()
    }

    /// Submit the cart as an order and, once it is accepted, clear the cart.
    ///
    /// If clearing the cart afterwards fails to persist, the accepted order
    /// stands: the failure is logged and the in-memory (authoritative) cart
    /// is empty.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::SignInRequired`] while signed out,
    /// [`CheckoutError::EmptyCart`] with nothing to order, and
    /// [`CheckoutError::Submit`] if the document store refuses the order.
    /// In every error case the cart is left untouched.
    pub fn place_order<B: StorageBackend>(
        &self,
        cart: &mut CartStore<B>,
    ) -> Result<OrderRecord, CheckoutError> {
        let user = self
            .identity
            .current_user()
            .ok_or(CheckoutError::SignInRequired)?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let now = Utc::now();
        let order = OrderRecord {
            id: OrderId::generate(),
            user_id: user.uid,
            status: OrderStatus::Processing,
            amount: cart.total_price(),
            items: cart.items().iter().map(OrderItem::from).collect(),
            placed_at: DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now),
        };

        self.documents.submit_order(&order)?;

        if let Err(e) = cart.clear() {
            warn!(order_id = %order.id, error = %e, "order accepted but clearing the persisted cart failed");
        }

        Ok(order)
    }
}
