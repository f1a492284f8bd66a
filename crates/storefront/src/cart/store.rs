//! The cart store and its line items.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sticker_craft_core::{
    Border, ImageRef, LineItemId, Price, StickerMaterial, StickerShape, TextOverlay, Transform,
};
use thiserror::Error;
use tracing::{debug, warn};

use super::storage::{StorageBackend, StorageError};
use super::{CartEvent, CartObserver};

/// One orderable product in the cart.
///
/// `price` is the pricing engine's output for `(shape, material, quantity)`
/// at the moment the item was added. It is a snapshot: pricing-rule changes
/// after that never touch existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: LineItemId,
    pub image: ImageRef,
    pub transform: Transform,
    pub border: Border,
    pub shape: StickerShape,
    pub material: StickerMaterial,
    pub quantity: NonZeroU32,
    pub price: Price,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text_overlay: Option<TextOverlay>,
}

/// Everything the caller supplies for a new line item; the store generates
/// the ID and timestamp. The price must already be computed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemDraft {
    pub image: ImageRef,
    pub transform: Transform,
    pub border: Border,
    pub shape: StickerShape,
    pub material: StickerMaterial,
    pub quantity: NonZeroU32,
    pub price: Price,
    pub text_overlay: Option<TextOverlay>,
}

impl LineItemDraft {
    fn into_item(self, id: LineItemId, created_at: DateTime<Utc>) -> CartLineItem {
        CartLineItem {
            id,
            image: self.image,
            transform: self.transform,
            border: self.border,
            shape: self.shape,
            material: self.material,
            quantity: self.quantity,
            price: self.price,
            created_at,
            text_overlay: self.text_overlay,
        }
    }
}

/// Partial update merged into an existing line item.
///
/// Absent fields are left untouched. A patch can replace the text overlay
/// but not remove it; overlay removal is an editor concern, before the item
/// is priced. Changing `quantity` does not re-price the line - `price` stays
/// a snapshot unless the caller supplies a new one alongside it.
#[derive(Debug, Clone, Default)]
pub struct LineItemPatch {
    pub image: Option<ImageRef>,
    pub transform: Option<Transform>,
    pub border: Option<Border>,
    pub shape: Option<StickerShape>,
    pub material: Option<StickerMaterial>,
    pub quantity: Option<NonZeroU32>,
    pub price: Option<Price>,
    pub text_overlay: Option<TextOverlay>,
}

impl LineItemPatch {
    fn apply(self, item: &mut CartLineItem) {
        if let Some(image) = self.image {
            item.image = image;
        }
        if let Some(transform) = self.transform {
            item.transform = transform;
        }
        if let Some(border) = self.border {
            item.border = border;
        }
        if let Some(shape) = self.shape {
            item.shape = shape;
        }
        if let Some(material) = self.material {
            item.material = material;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(text_overlay) = self.text_overlay {
            item.text_overlay = Some(text_overlay);
        }
    }
}

/// Errors that can occur while serializing the cart into the backend.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Encoding the collection as JSON failed.
    #[error("encoding cart for storage failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors surfaced by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The in-memory mutation was applied, but writing the collection to
    /// durable storage failed. `line_id` identifies the item the mutation
    /// touched, when there is one, so callers still learn the generated ID
    /// of an unpersisted add.
    #[error("cart persistence failed: {source}")]
    PersistenceWrite {
        line_id: Option<LineItemId>,
        #[source]
        source: PersistenceError,
    },
}

/// Single source of truth for the pending order, persisted across sessions
/// on the same device.
///
/// All operations are synchronous and run to completion on the calling
/// thread; readers never observe a partial mutation.
pub struct CartStore<B: StorageBackend> {
    backend: B,
    namespace: String,
    items: Vec<CartLineItem>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<B: StorageBackend> CartStore<B> {
    /// Open the cart stored under `namespace`, hydrating from the backend.
    ///
    /// A missing key yields an empty cart. A payload that no longer decodes
    /// is discarded with a warning and replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] only if the backend itself cannot be read.
    pub fn open(backend: B, namespace: impl Into<String>) -> Result<Self, StorageError> {
        let namespace = namespace.into();
        let items = match backend.read(&namespace)? {
            None => Vec::new(),
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(items) => items,
                Err(e) => {
                    warn!(namespace = %namespace, error = %e, "persisted cart could not be decoded; starting empty");
                    Vec::new()
                }
            },
        };

        Ok(Self {
            backend,
            namespace,
            items,
            observers: Vec::new(),
        })
    }

    /// Register an observer; it is notified after every applied mutation.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of line items (not stickers).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of stickers across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of the snapshot prices of all line items, to cents.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::from_decimal(self.items.iter().map(|item| item.price.amount()).sum())
    }

    /// Append a new line item and return its generated ID.
    ///
    /// # Errors
    ///
    /// [`CartError::PersistenceWrite`] if the durable write fails. The item
    /// is in the cart regardless; the error carries its ID.
    pub fn add_item(&mut self, draft: LineItemDraft) -> Result<LineItemId, CartError> {
        let id = LineItemId::generate();
        // Truncated to milliseconds so the persisted epoch-millis form
        // round-trips to an equal value.
        let now = Utc::now();
        let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        self.items.push(draft.into_item(id, created_at));
        let persisted = self.persist();
        self.notify(&CartEvent::ItemAdded(id));

        match persisted {
            Ok(()) => Ok(id),
            Err(source) => Err(CartError::PersistenceWrite {
                line_id: Some(id),
                source,
            }),
        }
    }

    /// Merge `patch` into the matching item.
    ///
    /// Returns `Ok(false)` without persisting if `id` is no longer in the
    /// cart - a stale reference is a benign no-op, not an error.
    ///
    /// # Errors
    ///
    /// [`CartError::PersistenceWrite`] if the durable write fails.
    pub fn update_item(&mut self, id: LineItemId, patch: LineItemPatch) -> Result<bool, CartError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(%id, "update for line item no longer in cart; ignoring");
            return Ok(false);
        };
        patch.apply(item);

        let persisted = self.persist();
        self.notify(&CartEvent::ItemUpdated(id));

        match persisted {
            Ok(()) => Ok(true),
            Err(source) => Err(CartError::PersistenceWrite {
                line_id: Some(id),
                source,
            }),
        }
    }

    /// Remove the matching item.
    ///
    /// Returns `Ok(false)` without persisting if `id` is no longer in the
    /// cart.
    ///
    /// # Errors
    ///
    /// [`CartError::PersistenceWrite`] if the durable write fails.
    pub fn remove_item(&mut self, id: LineItemId) -> Result<bool, CartError> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!(%id, "removal of line item no longer in cart; ignoring");
            return Ok(false);
        };
        self.items.remove(index);

        let persisted = self.persist();
        self.notify(&CartEvent::ItemRemoved(id));

        match persisted {
            Ok(()) => Ok(true),
            Err(source) => Err(CartError::PersistenceWrite {
                line_id: Some(id),
                source,
            }),
        }
    }

    /// Empty the cart and persist the empty collection.
    ///
    /// # Errors
    ///
    /// [`CartError::PersistenceWrite`] if the durable write fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();

        let persisted = self.persist();
        self.notify(&CartEvent::Cleared);

        persisted.map_err(|source| CartError::PersistenceWrite {
            line_id: None,
            source,
        })
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        let payload = serde_json::to_string(&self.items)?;
        self.backend.write(&self.namespace, &payload)?;
        Ok(())
    }

    fn notify(&self, event: &CartEvent) {
        for observer in &self.observers {
            observer.cart_changed(event);
        }
    }
}
