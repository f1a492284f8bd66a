//! StickerCraft Core - Shared types library.
//!
//! This crate provides common types used across all StickerCraft components:
//! - `storefront` - Cart, pricing, and design-session engine
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, the closed sticker enumerations, and
//!   the design primitives (transform, border, text overlay)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
