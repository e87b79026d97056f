/// Board widgets
///
/// - `tiles.rs` - positioned tile images, one stack layer per tile
/// - `surface.rs` - canvas overlay driving the manipulation widget

pub mod surface;
pub mod tiles;
