//! Shared fixtures for the StickerCraft integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroU32;
use std::path::PathBuf;

use sticker_craft_core::{
    Border, Email, ImageRef, StickerMaterial, StickerShape, Transform, UserId,
};
use sticker_craft_storefront::cart::LineItemDraft;
use sticker_craft_storefront::identity::{AuthObserver, AuthUser, IdentityProvider};
use sticker_craft_storefront::pricing::calculate_price;

/// Identity provider pinned to one state for the duration of a test.
pub struct StaticIdentity(Option<AuthUser>);

impl StaticIdentity {
    /// A provider reporting the given signed-in user.
    ///
    /// # Panics
    ///
    /// Panics if `email` is not a structurally valid email address.
    #[must_use]
    pub fn signed_in(uid: &str, email: &str) -> Self {
        Self(Some(AuthUser {
            uid: UserId::new(uid),
            email: Email::parse(email).expect("fixture email must be valid"),
            display_name: None,
        }))
    }

    /// A provider reporting nobody signed in.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<AuthUser> {
        self.0.clone()
    }

    fn subscribe(&mut self, _observer: Box<dyn AuthObserver>) {}
}

/// A priced line-item draft for the given selection.
///
/// # Panics
///
/// Panics if `quantity` is zero.
#[must_use]
pub fn priced_draft(
    shape: StickerShape,
    material: StickerMaterial,
    quantity: u32,
) -> LineItemDraft {
    let quantity = NonZeroU32::new(quantity).expect("fixture quantity must be nonzero");
    LineItemDraft {
        image: ImageRef::new("processed_upload_1", "https://cdn.example/p1.png"),
        transform: Transform::default(),
        border: Border::default(),
        shape,
        material,
        quantity,
        price: calculate_price(shape, material, quantity),
        text_overlay: None,
    }
}

/// A unique scratch directory under the system temp dir.
#[must_use]
pub fn temp_storage_dir() -> PathBuf {
    std::env::temp_dir().join(format!("sticker-craft-it-{}", uuid::Uuid::new_v4()))
}
