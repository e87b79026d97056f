/// Interactive manipulation of the selected tile
///
/// The board talks to its drag/resize widget only through [`Manipulator`]:
/// the widget is told which tile it is attached to, receives pointer
/// events in container coordinates and answers with [`Proposal`]s. The
/// board then clamps and stores them. [`Moveable`] is the built-in widget
/// (resize handles, snapping, fixed aspect ratio).

pub mod controller;

pub use controller::{handle_rects, Moveable, MoveableOptions};

use iced::{Point, Size};

use crate::geometry::Geometry;
use crate::state::tile::TileId;

/// Tile the manipulator is attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: TileId,
    pub geometry: Geometry,
}

/// One of the eight resize handles around the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::West,
        Handle::East,
        Handle::SouthWest,
        Handle::South,
        Handle::SouthEast,
    ];

    /// Direction of growth on each axis: -1 towards west/north, 1 towards
    /// east/south, 0 when the handle does not drive that axis
    pub fn direction(&self) -> (f32, f32) {
        match self {
            Handle::NorthWest => (-1.0, -1.0),
            Handle::North => (0.0, -1.0),
            Handle::NorthEast => (1.0, -1.0),
            Handle::West => (-1.0, 0.0),
            Handle::East => (1.0, 0.0),
            Handle::SouthWest => (-1.0, 1.0),
            Handle::South => (0.0, 1.0),
            Handle::SouthEast => (1.0, 1.0),
        }
    }

    /// Where the handle sits on the target's outline
    pub fn anchor(&self, g: &Geometry) -> Point {
        let (dx, dy) = self.direction();
        let x = g.left + g.width * (dx + 1.0) / 2.0;
        let y = g.top + g.height * (dy + 1.0) / 2.0;
        Point::new(x, y)
    }
}

/// A geometry change proposed by the manipulator
///
/// `committed` is true for the last proposal of a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proposal {
    Drag {
        id: TileId,
        geometry: Geometry,
        committed: bool,
    },
    Resize {
        id: TileId,
        size: Size,
        committed: bool,
    },
}

impl Proposal {
    pub fn id(&self) -> TileId {
        match self {
            Proposal::Drag { id, .. } | Proposal::Resize { id, .. } => *id,
        }
    }
}

/// A drag/resize widget attached to at most one tile at a time
pub trait Manipulator {
    /// Attach to a tile, or detach with `None`
    fn set_target(&mut self, target: Option<Target>);

    fn target(&self) -> Option<Target>;

    /// Pointer pressed. Returns true if a gesture started.
    fn press(&mut self, at: Point) -> bool;

    /// Pointer moved while pressed
    fn drag_to(&mut self, at: Point) -> Option<Proposal>;

    /// Pointer released. Ends the gesture with a committed proposal.
    fn release(&mut self, at: Point) -> Option<Proposal>;

    fn is_active(&self) -> bool;
}
