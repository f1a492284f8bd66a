//! Built-in sample artwork for the upload step.
//!
//! Users who have nothing to upload can start from one of these; selecting
//! one feeds the design session exactly like a processed upload would.

use sticker_craft_core::ImageRef;

/// One entry in the sample gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleArt {
    pub id: &'static str,
    pub title: &'static str,
    pub preview_url: &'static str,
}

impl SampleArt {
    /// The image reference a session starts from when this sample is picked.
    #[must_use]
    pub fn image_ref(&self) -> ImageRef {
        ImageRef::new(self.id, self.preview_url)
    }
}

/// The samples shown on the upload step.
pub const SAMPLE_GALLERY: &[SampleArt] = &[
    SampleArt {
        id: "sample_sunburst",
        title: "Sunburst",
        preview_url: "/samples/sunburst.png",
    },
    SampleArt {
        id: "sample_peak",
        title: "Mountain Peak",
        preview_url: "/samples/peak.png",
    },
    SampleArt {
        id: "sample_wave",
        title: "Retro Wave",
        preview_url: "/samples/wave.png",
    },
    SampleArt {
        id: "sample_leaf",
        title: "Monstera Leaf",
        preview_url: "/samples/leaf.png",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ids_are_unique() {
        let mut ids: Vec<_> = SAMPLE_GALLERY.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SAMPLE_GALLERY.len());
    }
}
