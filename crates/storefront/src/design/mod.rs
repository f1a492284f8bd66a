//! The design session: one sticker from upload to cart.
//!
//! [`DesignSession`] walks the linear Upload -> Edit -> Customize flow,
//! holding the in-progress [`SkuConfiguration`] and converting it into a
//! cart line item at the end. The canvas that actually draws previews is a
//! black-box collaborator behind [`CanvasRenderer`]; the session only deals
//! in image references.

mod gallery;
mod renderer;
mod session;

pub use gallery::{SAMPLE_GALLERY, SampleArt};
pub use renderer::{CanvasRenderer, FlattenRequest, PassthroughRenderer, RenderError};
pub use session::{DesignError, DesignSession, DesignStep, SkuConfiguration};
