//! The closed sticker enumerations.
//!
//! [`StickerShape`] and [`StickerMaterial`] are the two axes every orderable
//! sticker is described by. Both are closed sum types: the pricing engine
//! matches on them exhaustively, so adding a variant is a compile-time-visible
//! change everywhere it matters. Unrecognized text only exists at the parse
//! boundary, where it fails with [`InvalidShape`] / [`InvalidMaterial`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unrecognized sticker shape text reached the parse boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized sticker shape: {0}")]
pub struct InvalidShape(pub String);

/// Unrecognized sticker material text reached the parse boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized sticker material: {0}")]
pub struct InvalidMaterial(pub String);

/// The cut/format of a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StickerShape {
    #[default]
    DieCut,
    KissCut,
    Circular,
    Oval,
    Square,
    Rectangle,
    Sheet,
}

impl StickerShape {
    /// All shape variants, in display order.
    pub const ALL: [Self; 7] = [
        Self::DieCut,
        Self::KissCut,
        Self::Circular,
        Self::Oval,
        Self::Square,
        Self::Rectangle,
        Self::Sheet,
    ];

    /// Human-readable label (e.g., "Die Cut").
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DieCut => "Die Cut",
            Self::KissCut => "Kiss Cut",
            Self::Circular => "Circular",
            Self::Oval => "Oval",
            Self::Square => "Square",
            Self::Rectangle => "Rectangle",
            Self::Sheet => "Sheet",
        }
    }
}

impl std::fmt::Display for StickerShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DieCut => "die-cut",
            Self::KissCut => "kiss-cut",
            Self::Circular => "circular",
            Self::Oval => "oval",
            Self::Square => "square",
            Self::Rectangle => "rectangle",
            Self::Sheet => "sheet",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for StickerShape {
    type Err = InvalidShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "die-cut" => Ok(Self::DieCut),
            "kiss-cut" => Ok(Self::KissCut),
            "circular" => Ok(Self::Circular),
            "oval" => Ok(Self::Oval),
            "square" => Ok(Self::Square),
            "rectangle" => Ok(Self::Rectangle),
            "sheet" => Ok(Self::Sheet),
            _ => Err(InvalidShape(s.to_owned())),
        }
    }
}

/// The vinyl finish of a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StickerMaterial {
    #[default]
    Gloss,
    Matte,
    Holographic,
}

impl StickerMaterial {
    /// All material variants, in display order.
    pub const ALL: [Self; 3] = [Self::Gloss, Self::Matte, Self::Holographic];

    /// Human-readable label (e.g., "Gloss Vinyl").
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gloss => "Gloss Vinyl",
            Self::Matte => "Matte Vinyl",
            Self::Holographic => "Holographic",
        }
    }
}

impl std::fmt::Display for StickerMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Gloss => "gloss",
            Self::Matte => "matte",
            Self::Holographic => "holographic",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for StickerMaterial {
    type Err = InvalidMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gloss" => Ok(Self::Gloss),
            "matte" => Ok(Self::Matte),
            "holographic" => Ok(Self::Holographic),
            _ => Err(InvalidMaterial(s.to_owned())),
        }
    }
}
