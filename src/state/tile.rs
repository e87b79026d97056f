/// Tile data model
///
/// These structs represent the data that flows between the tile store,
/// the manipulation widget and the UI layer.

use std::fmt;

use iced::ContentFit;
use rand::seq::IndexedRandom;

use crate::geometry::Geometry;

/// Unique, random tile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the image is fitted into the tile's box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Fill,
    Contain,
    Cover,
    None,
    ScaleDown,
}

impl FitMode {
    pub const ALL: [FitMode; 5] = [
        FitMode::Fill,
        FitMode::Contain,
        FitMode::Cover,
        FitMode::None,
        FitMode::ScaleDown,
    ];

    /// Pick one of the five modes uniformly
    pub fn random() -> Self {
        *Self::ALL.choose(&mut rand::rng()).unwrap_or(&FitMode::Fill)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FitMode::Fill => "fill",
            FitMode::Contain => "contain",
            FitMode::Cover => "cover",
            FitMode::None => "none",
            FitMode::ScaleDown => "scale-down",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<FitMode> for ContentFit {
    fn from(fit: FitMode) -> Self {
        match fit {
            FitMode::Fill => ContentFit::Fill,
            FitMode::Contain => ContentFit::Contain,
            FitMode::Cover => ContentFit::Cover,
            FitMode::None => ContentFit::None,
            FitMode::ScaleDown => ContentFit::ScaleDown,
        }
    }
}

/// A positioned, sized, image-bearing tile on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub geometry: Geometry,
    /// URL of the tile's image
    pub image: String,
    pub fit: FitMode,
    /// false while a drag/resize gesture is still in progress
    pub committed: bool,
}
