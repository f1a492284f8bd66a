//! The canvas collaborator that flattens an edited design into one preview.

use sticker_craft_core::{Border, ImageRef, StickerShape, TextOverlay, Transform};
use thiserror::Error;

/// The canvas surface failed to produce a flattened preview.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("canvas flatten failed: {0}")]
pub struct RenderError(pub String);

/// Everything the canvas needs to composite one sticker design.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenRequest<'a> {
    pub image: &'a ImageRef,
    pub transform: Transform,
    pub border: &'a Border,
    /// Clip region applied to the artwork.
    pub shape: StickerShape,
    pub text_overlay: Option<&'a TextOverlay>,
}

/// Black-box renderer collaborator.
///
/// Implementations bake the rotation, border, clip shape, and text overlay
/// into a single preview asset and return its reference.
pub trait CanvasRenderer {
    /// Flatten the request into one preview image reference.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the surface cannot produce the preview.
    fn flatten(&self, request: &FlattenRequest<'_>) -> Result<ImageRef, RenderError>;
}

/// Renderer that hands the source image straight back.
///
/// This is what the shipped editor does while the real compositing service
/// is simulated: edits are kept as metadata and the preview stays the
/// processed upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl CanvasRenderer for PassthroughRenderer {
    fn flatten(&self, request: &FlattenRequest<'_>) -> Result<ImageRef, RenderError> {
        Ok(request.image.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_returns_source_image() {
        let image = ImageRef::new("processed_upload_9", "https://cdn.example/9.png");
        let border = Border::default();
        let request = FlattenRequest {
            image: &image,
            transform: Transform::new(45.0),
            border: &border,
            shape: StickerShape::Circular,
            text_overlay: None,
        };

        assert_eq!(PassthroughRenderer.flatten(&request).unwrap(), image);
    }
}
