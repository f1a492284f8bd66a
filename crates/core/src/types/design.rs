//! Design primitives for one sticker: image reference, transform, border,
//! and text overlay.
//!
//! These are the fields the design editor manipulates and the cart persists.
//! They carry only data; rendering them is the job of the canvas collaborator.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ImageId;

/// Reference to a stored visual asset plus the URL used to preview it.
///
/// The image-processing service issues the identifier; the preview URL may be
/// a remote location or an inline data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub id: ImageId,
    pub preview_url: String,
}

impl ImageRef {
    /// Create an image reference.
    pub fn new(id: impl Into<ImageId>, preview_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preview_url: preview_url.into(),
        }
    }
}

/// Placement transform applied to the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Rotation in degrees, always within `[0, 360)`.
    pub rotation_degrees: f64,
}

impl Transform {
    /// Create a transform, normalizing the rotation into `[0, 360)`.
    #[must_use]
    pub fn new(rotation_degrees: f64) -> Self {
        Self {
            rotation_degrees: rotation_degrees.rem_euclid(360.0),
        }
    }
}

/// Errors that can occur when parsing a [`HexColor`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexColorError {
    /// The input does not start with `#`.
    #[error("hex color must start with '#'")]
    MissingHash,
    /// The input is not 3 or 6 hex digits after the `#`.
    #[error("hex color must be #RGB or #RRGGBB, got {0} digits")]
    BadLength(usize),
    /// A character after the `#` is not a hex digit.
    #[error("invalid hex digit: {0}")]
    BadDigit(char),
}

/// A CSS-style hex color (`#RGB` or `#RRGGBB`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a hex color from a string.
    ///
    /// # Errors
    ///
    /// Returns a [`HexColorError`] if the input is not `#` followed by
    /// exactly 3 or 6 hex digits.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let digits = s.strip_prefix('#').ok_or(HexColorError::MissingHash)?;

        if digits.len() != 3 && digits.len() != 6 {
            return Err(HexColorError::BadLength(digits.len()));
        }

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(HexColorError::BadDigit(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// The color as written, including the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Opaque black, the editor's starting border color.
    #[must_use]
    pub fn black() -> Self {
        Self("#000000".to_owned())
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Border drawn around the artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    /// Border width in pixels; 0 means no border.
    pub width_px: u32,
    pub color: HexColor,
}

impl Border {
    /// Create a border spec.
    #[must_use]
    pub const fn new(width_px: u32, color: HexColor) -> Self {
        Self { width_px, color }
    }
}

/// A single text overlay composited onto the sticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub content: String,
    pub font_family: String,
    pub font_size_px: u32,
    pub color: HexColor,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextOverlay {
    /// Create a plain (non-bold, non-italic, non-underlined) overlay.
    pub fn plain(
        content: impl Into<String>,
        font_family: impl Into<String>,
        font_size_px: u32,
        color: HexColor,
    ) -> Self {
        Self {
            content: content.into(),
            font_family: font_family.into(),
            font_size_px,
            color,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}
