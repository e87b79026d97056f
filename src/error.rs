use thiserror::Error;

use crate::state::tile::TileId;

/// Errors from tile store mutations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("select a moveable to remove")]
    NothingSelected,

    #[error("no tile with id {0}")]
    UnknownTile(TileId),
}

/// Errors from fetching a photo for a new tile
///
/// Carries rendered messages instead of the source errors so it can travel
/// inside iced messages, which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected photo record from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("failed to decode image from {url}: {reason}")]
    Image { url: String, reason: String },

    #[error("background task failed: {0}")]
    Join(String),
}
