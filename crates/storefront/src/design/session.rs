//! The Upload -> Edit -> Customize design session.

use std::num::NonZeroU32;

use sticker_craft_core::{
    Border, ImageRef, LineItemId, Price, StickerMaterial, StickerShape, TextOverlay, Transform,
};
use thiserror::Error;

use super::renderer::{CanvasRenderer, FlattenRequest, RenderError};
use crate::cart::{CartError, CartStore, LineItemDraft, StorageBackend};
use crate::pricing::calculate_price;

/// Material preselected when the customize step opens.
const DEFAULT_MATERIAL: StickerMaterial = StickerMaterial::Gloss;
/// Quantity preselected when the customize step opens.
const DEFAULT_QUANTITY: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// The step a design session is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignStep {
    Upload,
    Edit,
    Customize,
}

impl std::fmt::Display for DesignStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Upload => "upload",
            Self::Edit => "edit",
            Self::Customize => "customize",
        };
        write!(f, "{s}")
    }
}

/// The in-progress, not-yet-priced description of one sticker design.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuConfiguration {
    pub image: ImageRef,
    pub transform: Transform,
    pub border: Border,
    pub shape: StickerShape,
    pub text_overlay: Option<TextOverlay>,
}

impl SkuConfiguration {
    /// The configuration a fresh edit step starts from.
    fn with_defaults(image: ImageRef) -> Self {
        Self {
            image,
            transform: Transform::default(),
            border: Border::default(),
            shape: StickerShape::DieCut,
            text_overlay: None,
        }
    }
}

/// Errors surfaced by design-session operations.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The operation belongs to a different step of the flow.
    #[error("operation requires the {expected} step, but the session is in {actual}")]
    WrongStep {
        expected: DesignStep,
        actual: DesignStep,
    },

    /// The canvas collaborator failed to flatten the design.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Adding the finished design to the cart reported a failure.
    #[error(transparent)]
    Cart(#[from] CartError),
}

enum StepState {
    Upload,
    Edit(SkuConfiguration),
    Customize {
        config: SkuConfiguration,
        material: StickerMaterial,
        quantity: NonZeroU32,
    },
}

impl StepState {
    const fn step(&self) -> DesignStep {
        match self {
            Self::Upload => DesignStep::Upload,
            Self::Edit(_) => DesignStep::Edit,
            Self::Customize { .. } => DesignStep::Customize,
        }
    }
}

/// One sticker design in flight, from image selection to add-to-cart.
///
/// The flow is linear with no branching back: the only way out of Edit or
/// Customize, other than forward, is [`cancel`](Self::cancel), which
/// discards everything. At most one session is in flight per user session;
/// that is a UI constraint, not enforced here.
pub struct DesignSession {
    state: StepState,
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignSession {
    /// Start a session at the upload step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: StepState::Upload,
        }
    }

    /// The step the session is currently in.
    #[must_use]
    pub const fn step(&self) -> DesignStep {
        self.state.step()
    }

    /// The draft configuration, once an image has been attached.
    #[must_use]
    pub const fn configuration(&self) -> Option<&SkuConfiguration> {
        match &self.state {
            StepState::Upload => None,
            StepState::Edit(config) | StepState::Customize { config, .. } => Some(config),
        }
    }

    /// Attach the resolved image (a processed upload or a gallery sample)
    /// and move to the edit step with a default configuration.
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Upload.
    pub fn begin_edit(&mut self, image: ImageRef) -> Result<(), DesignError> {
        match &self.state {
            StepState::Upload => {
                self.state = StepState::Edit(SkuConfiguration::with_defaults(image));
                Ok(())
            }
            other => Err(DesignError::WrongStep {
                expected: DesignStep::Upload,
                actual: other.step(),
            }),
        }
    }

    /// Set the artwork rotation (edit step).
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Edit.
    pub fn set_rotation(&mut self, degrees: f64) -> Result<(), DesignError> {
        self.edit_config()?.transform = Transform::new(degrees);
        Ok(())
    }

    /// Set the border spec (edit step).
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Edit.
    pub fn set_border(&mut self, border: Border) -> Result<(), DesignError> {
        self.edit_config()?.border = border;
        Ok(())
    }

    /// Replace the text overlay (edit step). At most one overlay is active.
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Edit.
    pub fn set_text_overlay(&mut self, overlay: TextOverlay) -> Result<(), DesignError> {
        self.edit_config()?.text_overlay = Some(overlay);
        Ok(())
    }

    /// Remove the text overlay (edit step).
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Edit.
    pub fn clear_text_overlay(&mut self) -> Result<(), DesignError> {
        self.edit_config()?.text_overlay = None;
        Ok(())
    }

    /// Select the clip shape. Available while editing and, like the shipped
    /// shape grid, still on the customize step.
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] in Upload.
    pub fn set_shape(&mut self, shape: StickerShape) -> Result<(), DesignError> {
        match &mut self.state {
            StepState::Edit(config) | StepState::Customize { config, .. } => {
                config.shape = shape;
                Ok(())
            }
            StepState::Upload => Err(DesignError::WrongStep {
                expected: DesignStep::Edit,
                actual: DesignStep::Upload,
            }),
        }
    }

    /// Flatten the current edits into one preview asset and move to the
    /// customize step with the default material and quantity.
    ///
    /// The flattened reference replaces the working image; everything
    /// downstream (cart, order history) shows the composited preview.
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Edit;
    /// [`DesignError::Render`] if the canvas fails, in which case the
    /// session stays in Edit.
    pub fn continue_to_customize<R: CanvasRenderer>(
        &mut self,
        renderer: &R,
    ) -> Result<(), DesignError> {
        match std::mem::replace(&mut self.state, StepState::Upload) {
            StepState::Edit(mut config) => {
                let flattened = {
                    let request = FlattenRequest {
                        image: &config.image,
                        transform: config.transform,
                        border: &config.border,
                        shape: config.shape,
                        text_overlay: config.text_overlay.as_ref(),
                    };
                    renderer.flatten(&request)
                };

                match flattened {
                    Ok(image) => {
                        config.image = image;
                        self.state = StepState::Customize {
                            config,
                            material: DEFAULT_MATERIAL,
                            quantity: DEFAULT_QUANTITY,
                        };
                        Ok(())
                    }
                    Err(e) => {
                        self.state = StepState::Edit(config);
                        Err(e.into())
                    }
                }
            }
            other => {
                let actual = other.step();
                self.state = other;
                Err(DesignError::WrongStep {
                    expected: DesignStep::Edit,
                    actual,
                })
            }
        }
    }

    /// Select the material finish (customize step).
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Customize.
    pub fn set_material(&mut self, material: StickerMaterial) -> Result<(), DesignError> {
        *self.customize_material()? = material;
        Ok(())
    }

    /// Select the order quantity (customize step).
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Customize.
    pub fn set_quantity(&mut self, quantity: NonZeroU32) -> Result<(), DesignError> {
        match &mut self.state {
            StepState::Customize { quantity: q, .. } => {
                *q = quantity;
                Ok(())
            }
            other => Err(DesignError::WrongStep {
                expected: DesignStep::Customize,
                actual: other.step(),
            }),
        }
    }

    /// The live order total for the current selection (customize step).
    ///
    /// Recomputed on every call, so callers re-read it after each change to
    /// shape, material, or quantity.
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Customize.
    pub fn quote(&self) -> Result<Price, DesignError> {
        match &self.state {
            StepState::Customize {
                config,
                material,
                quantity,
            } => Ok(calculate_price(config.shape, *material, *quantity)),
            other => Err(DesignError::WrongStep {
                expected: DesignStep::Customize,
                actual: other.step(),
            }),
        }
    }

    /// Price the finished design, append it to the cart, and reset the
    /// session to the upload step.
    ///
    /// # Errors
    ///
    /// [`DesignError::WrongStep`] unless the session is in Customize;
    /// [`DesignError::Cart`] if the cart reports a persistence failure (the
    /// item is in the cart regardless, and the session still resets).
    pub fn add_to_cart<B: StorageBackend>(
        &mut self,
        cart: &mut CartStore<B>,
    ) -> Result<LineItemId, DesignError> {
        match std::mem::replace(&mut self.state, StepState::Upload) {
            StepState::Customize {
                config,
                material,
                quantity,
            } => {
                let price = calculate_price(config.shape, material, quantity);
                let draft = LineItemDraft {
                    image: config.image,
                    transform: config.transform,
                    border: config.border,
                    shape: config.shape,
                    material,
                    quantity,
                    price,
                    text_overlay: config.text_overlay,
                };
                cart.add_item(draft).map_err(DesignError::Cart)
            }
            other => {
                let actual = other.step();
                self.state = other;
                Err(DesignError::WrongStep {
                    expected: DesignStep::Customize,
                    actual,
                })
            }
        }
    }

    /// Abandon the draft and return to the upload step. Nothing is saved.
    pub fn cancel(&mut self) {
        self.state = StepState::Upload;
    }

    fn edit_config(&mut self) -> Result<&mut SkuConfiguration, DesignError> {
        match &mut self.state {
            StepState::Edit(config) => Ok(config),
            other => Err(DesignError::WrongStep {
                expected: DesignStep::Edit,
                actual: other.step(),
            }),
        }
    }

    fn customize_material(&mut self) -> Result<&mut StickerMaterial, DesignError> {
        match &mut self.state {
            StepState::Customize { material, .. } => Ok(material),
            other => Err(DesignError::WrongStep {
                expected: DesignStep::Customize,
                actual: other.step(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sticker_craft_core::HexColor;

    use super::super::renderer::PassthroughRenderer;
    use super::*;
    use crate::cart::{DEFAULT_CART_NAMESPACE, MemoryBackend};

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn upload() -> ImageRef {
        ImageRef::new("processed_upload_7", "https://cdn.example/7.png")
    }

    fn session_in_customize() -> DesignSession {
        let mut session = DesignSession::new();
        session.begin_edit(upload()).unwrap();
        session.continue_to_customize(&PassthroughRenderer).unwrap();
        session
    }

    #[test]
    fn test_begin_edit_applies_defaults() {
        let mut session = DesignSession::new();
        assert_eq!(session.step(), DesignStep::Upload);
        assert!(session.configuration().is_none());

        session.begin_edit(upload()).unwrap();

        assert_eq!(session.step(), DesignStep::Edit);
        let config = session.configuration().unwrap();
        assert_eq!(config.shape, StickerShape::DieCut);
        assert_eq!(config.border, Border::default());
        assert!(config.transform.rotation_degrees.abs() < f64::EPSILON);
        assert!(config.text_overlay.is_none());
    }

    #[test]
    fn test_edit_operations_mutate_the_draft() {
        let mut session = DesignSession::new();
        session.begin_edit(upload()).unwrap();

        session.set_rotation(380.0).unwrap();
        session
            .set_border(Border::new(4, HexColor::parse("#ff0000").unwrap()))
            .unwrap();
        session.set_shape(StickerShape::Oval).unwrap();
        session
            .set_text_overlay(TextOverlay::plain("yay", "Arial", 16, HexColor::black()))
            .unwrap();

        let config = session.configuration().unwrap();
        assert!((config.transform.rotation_degrees - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.border.width_px, 4);
        assert_eq!(config.shape, StickerShape::Oval);
        assert!(config.text_overlay.is_some());

        session.clear_text_overlay().unwrap();
        assert!(session.configuration().unwrap().text_overlay.is_none());
    }

    #[test]
    fn test_customize_defaults_and_live_quote() {
        let session = session_in_customize();
        assert_eq!(session.step(), DesignStep::Customize);
        // die-cut x gloss x 5, no tier discount
        assert_eq!(session.quote().unwrap(), Price::from_cents(17_50));
    }

    #[test]
    fn test_quote_reacts_to_every_selection() {
        let mut session = session_in_customize();

        session.set_material(StickerMaterial::Holographic).unwrap();
        session.set_quantity(qty(50)).unwrap();
        assert_eq!(session.quote().unwrap(), Price::from_cents(210_00));

        session.set_shape(StickerShape::Square).unwrap();
        // 2.50 x 1.5 x 50 x 0.8
        assert_eq!(session.quote().unwrap(), Price::from_cents(150_00));
    }

    #[test]
    fn test_operations_outside_their_step_fail() {
        let mut session = DesignSession::new();

        assert!(matches!(
            session.set_rotation(10.0),
            Err(DesignError::WrongStep {
                expected: DesignStep::Edit,
                actual: DesignStep::Upload,
            })
        ));
        assert!(matches!(
            session.quote(),
            Err(DesignError::WrongStep { .. })
        ));

        session.begin_edit(upload()).unwrap();
        assert!(matches!(
            session.begin_edit(upload()),
            Err(DesignError::WrongStep {
                expected: DesignStep::Upload,
                actual: DesignStep::Edit,
            })
        ));
        assert!(matches!(
            session.set_quantity(qty(10)),
            Err(DesignError::WrongStep { .. })
        ));
    }

    #[test]
    fn test_cancel_discards_everything() {
        let mut session = session_in_customize();
        session.cancel();

        assert_eq!(session.step(), DesignStep::Upload);
        assert!(session.configuration().is_none());

        // A fresh draft starts from defaults again.
        session.begin_edit(upload()).unwrap();
        assert_eq!(
            session.configuration().unwrap().shape,
            StickerShape::DieCut
        );
    }

    #[test]
    fn test_render_failure_stays_in_edit() {
        struct BrokenCanvas;
        impl CanvasRenderer for BrokenCanvas {
            fn flatten(&self, _: &FlattenRequest<'_>) -> Result<ImageRef, RenderError> {
                Err(RenderError("surface lost".to_owned()))
            }
        }

        let mut session = DesignSession::new();
        session.begin_edit(upload()).unwrap();

        assert!(matches!(
            session.continue_to_customize(&BrokenCanvas),
            Err(DesignError::Render(_))
        ));
        assert_eq!(session.step(), DesignStep::Edit);
    }

    #[test]
    fn test_add_to_cart_prices_appends_and_resets() {
        let backend = MemoryBackend::new();
        let mut cart = CartStore::open(&backend, DEFAULT_CART_NAMESPACE).unwrap();

        let mut session = session_in_customize();
        session.set_shape(StickerShape::Square).unwrap();
        // keep gloss, quantity 5 -> the 12.50 square order
        let id = session.add_to_cart(&mut cart).unwrap();

        assert_eq!(session.step(), DesignStep::Upload);
        let item = &cart.items()[0];
        assert_eq!(item.id, id);
        assert_eq!(item.shape, StickerShape::Square);
        assert_eq!(item.price, Price::from_cents(12_50));
        assert_eq!(item.quantity, qty(5));
    }
}
