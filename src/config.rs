use std::time::Duration;

use clap::Parser;

use crate::geometry::SnapGuides;
use crate::moveable::MoveableOptions;
use crate::photos::{DEFAULT_ENDPOINT, PHOTO_ID_RANGE};
use crate::state::store::DEFAULT_TILE_SIZE;

/// A board of draggable, resizable image tiles
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Base URL of the placeholder photo API
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Photo ids are drawn from [0, photo-id-range)
    #[arg(long, default_value_t = PHOTO_ID_RANGE)]
    pub photo_id_range: u32,

    /// Side length of a new tile
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: f32,

    /// Distance within which tile edges snap to guides
    #[arg(long, default_value_t = 5.0)]
    pub snap_threshold: f32,

    /// Timeout for each photo request, in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            photo_id_range: PHOTO_ID_RANGE,
            tile_size: DEFAULT_TILE_SIZE,
            snap_threshold: 5.0,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn moveable_options(&self) -> MoveableOptions {
        MoveableOptions {
            guides: SnapGuides::with_threshold(self.snap_threshold),
            ..MoveableOptions::default()
        }
    }
}
