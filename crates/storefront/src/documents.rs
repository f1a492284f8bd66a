//! Interface to the remote document store.
//!
//! The remote store is an optional sink for user profiles and historical
//! order records. Pricing and cart logic never depend on it being reachable;
//! only checkout submission and the order-history views talk to it.
//! [`MemoryDocumentStore`] is the in-process implementation used by tests
//! and the demo dashboard.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sticker_craft_core::{OrderId, Price, UserId};
use thiserror::Error;

use crate::cart::CartLineItem;
use crate::identity::AuthUser;

/// Errors that can occur talking to the document store.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// The remote store could not be reached.
    #[error("document store unreachable: {0}")]
    Unreachable(String),
}

/// Fulfillment status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Processing,
    Completed,
    Cancelled,
}

/// One product line inside an order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
}

impl From<&CartLineItem> for OrderItem {
    fn from(item: &CartLineItem) -> Self {
        Self {
            name: format!("{} Stickers", item.shape.label()),
            quantity: item.quantity.get(),
        }
    }
}

/// A placed order, as stored in the remote document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub amount: Price,
    pub items: Vec<OrderItem>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub placed_at: DateTime<Utc>,
}

/// Remote sink for user profiles and order records.
///
/// Methods take `&self` - implementations are client-shaped and manage their
/// own interior state or connections.
pub trait DocumentStore {
    /// Upsert the user's profile document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`] if the store cannot be reached.
    fn save_profile(&self, user: &AuthUser) -> Result<(), DocumentStoreError>;

    /// Persist a placed order and return its ID.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`] if the store cannot be reached.
    fn submit_order(&self, order: &OrderRecord) -> Result<OrderId, DocumentStoreError>;

    /// All orders placed by one user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`] if the store cannot be reached.
    fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<OrderRecord>, DocumentStoreError>;

    /// Every stored order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`] if the store cannot be reached.
    fn all_orders(&self) -> Result<Vec<OrderRecord>, DocumentStoreError>;
}

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    profiles: Mutex<HashMap<UserId, AuthUser>>,
    orders: Mutex<Vec<OrderRecord>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo order history the dashboard
    /// shows. Mock data only - none of it ever came from a real checkout.
    #[must_use]
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        {
            let mut orders = store.orders.lock().expect("document mutex poisoned");
            orders.push(demo_order(
                "order-1",
                "u-2",
                OrderStatus::Completed,
                25_99,
                "Die Cut Stickers",
                10,
                demo_date(2023, 6, 10),
            ));
            orders.push(demo_order(
                "order-2",
                "u-3",
                OrderStatus::Processing,
                34_50,
                "Holographic Stickers",
                15,
                demo_date(2023, 6, 15),
            ));
            orders.push(demo_order(
                "order-3",
                "u-2",
                OrderStatus::Completed,
                19_99,
                "Matte Stickers",
                8,
                demo_date(2023, 7, 2),
            ));
            orders.push(demo_order(
                "order-4",
                "u-4",
                OrderStatus::Completed,
                45_75,
                "Sticker Sheet",
                5,
                demo_date(2023, 7, 10),
            ));
        }
        store
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn save_profile(&self, user: &AuthUser) -> Result<(), DocumentStoreError> {
        self.profiles
            .lock()
            .expect("document mutex poisoned")
            .insert(user.uid.clone(), user.clone());
        Ok(())
    }

    fn submit_order(&self, order: &OrderRecord) -> Result<OrderId, DocumentStoreError> {
        self.orders
            .lock()
            .expect("document mutex poisoned")
            .push(order.clone());
        Ok(order.id.clone())
    }

    fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<OrderRecord>, DocumentStoreError> {
        Ok(self
            .orders
            .lock()
            .expect("document mutex poisoned")
            .iter()
            .filter(|order| &order.user_id == user_id)
            .cloned()
            .collect())
    }

    fn all_orders(&self) -> Result<Vec<OrderRecord>, DocumentStoreError> {
        Ok(self
            .orders
            .lock()
            .expect("document mutex poisoned")
            .clone())
    }
}

fn demo_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn demo_order(
    id: &str,
    user_id: &str,
    status: OrderStatus,
    amount_cents: i64,
    item_name: &str,
    item_quantity: u32,
    placed_at: DateTime<Utc>,
) -> OrderRecord {
    OrderRecord {
        id: OrderId::new(id),
        user_id: UserId::new(user_id),
        status,
        amount: Price::from_cents(amount_cents),
        items: vec![OrderItem {
            name: item_name.to_owned(),
            quantity: item_quantity,
        }],
        placed_at,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sticker_craft_core::Email;

    use super::*;

    #[test]
    fn test_sample_data_shape() {
        let store = MemoryDocumentStore::with_sample_data();
        let orders = store.all_orders().unwrap();
        assert_eq!(orders.len(), 4);

        let revenue: Price = orders.iter().map(|o| o.amount).sum();
        assert_eq!(revenue, Price::from_cents(126_23));
    }

    #[test]
    fn test_orders_filtered_by_user() {
        let store = MemoryDocumentStore::with_sample_data();
        let orders = store.orders_for_user(&UserId::new("u-2")).unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.user_id == UserId::new("u-2")));
    }

    #[test]
    fn test_submit_then_query() {
        let store = MemoryDocumentStore::new();
        let order = demo_order(
            "order-x",
            "u-9",
            OrderStatus::Processing,
            12_50,
            "Square Stickers",
            5,
            demo_date(2024, 1, 2),
        );

        let id = store.submit_order(&order).unwrap();
        assert_eq!(id, order.id);
        assert_eq!(store.orders_for_user(&UserId::new("u-9")).unwrap(), vec![order]);
    }

    #[test]
    fn test_save_profile_upserts() {
        let store = MemoryDocumentStore::new();
        let user = AuthUser {
            uid: UserId::new("u-1"),
            email: Email::parse("a@example.com").unwrap(),
            display_name: None,
        };
        store.save_profile(&user).unwrap();
        store.save_profile(&user).unwrap();
    }

    #[test]
    fn test_order_item_from_cart_line_names_by_shape() {
        use std::num::NonZeroU32;

        use sticker_craft_core::{
            Border, ImageRef, Price, StickerMaterial, StickerShape, Transform,
        };

        use crate::cart::LineItemDraft;
        use crate::cart::{CartStore, DEFAULT_CART_NAMESPACE, MemoryBackend};

        let backend = MemoryBackend::new();
        let mut cart = CartStore::open(&backend, DEFAULT_CART_NAMESPACE).unwrap();
        cart.add_item(LineItemDraft {
            image: ImageRef::new("processed_upload_1", "p"),
            transform: Transform::default(),
            border: Border::default(),
            shape: StickerShape::KissCut,
            material: StickerMaterial::Gloss,
            quantity: NonZeroU32::new(3).unwrap(),
            price: Price::from_cents(10_50),
            text_overlay: None,
        })
        .unwrap();

        let item = OrderItem::from(&cart.items()[0]);
        assert_eq!(item.name, "Kiss Cut Stickers");
        assert_eq!(item.quantity, 3);
    }
}
