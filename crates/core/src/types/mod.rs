//! Core types for StickerCraft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod design;
pub mod email;
pub mod id;
pub mod price;
pub mod sticker;

pub use design::{Border, HexColor, HexColorError, ImageRef, TextOverlay, Transform};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use sticker::{InvalidMaterial, InvalidShape, StickerMaterial, StickerShape};
