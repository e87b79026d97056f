/// State management module
///
/// This module handles all application state, including:
/// - The tile data model (tile.rs)
/// - The ordered tile collection and selection slot (store.rs)
/// - Clamped application of manipulation proposals (board.rs)

pub mod board;
pub mod store;
pub mod tile;
