/// Board geometry
///
/// Plain arithmetic on tile rectangles:
/// - Keeping tiles inside the board container (clamp.rs)
/// - Snapping tile edges to the fixed guide lines (snap.rs)

pub mod clamp;
pub mod snap;

pub use clamp::{clamp_drag, clamp_resize, ContainerBounds};
pub use snap::SnapGuides;

use iced::{Point, Rectangle, Size};

use clamp::DragBox;

/// Position and size of a tile, relative to the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self { top, left, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Does this rectangle contain the point (container coordinates)?
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Same rectangle, moved to a new top-left corner
    pub fn moved_to(self, top: f32, left: f32) -> Self {
        Self { top, left, ..self }
    }

    /// Same rectangle, resized around its fixed top-left corner
    pub fn resized_to(self, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..self
        }
    }

    /// Describe this rectangle as a drag proposal inside `bounds`
    pub fn drag_box(&self, bounds: ContainerBounds) -> DragBox {
        DragBox {
            top: self.top,
            left: self.left,
            bottom: bounds.height - self.bottom(),
            right: bounds.width - self.right(),
            width: self.width,
            height: self.height,
        }
    }
}

impl From<Geometry> for Rectangle {
    fn from(g: Geometry) -> Self {
        Rectangle::new(Point::new(g.left, g.top), g.size())
    }
}
