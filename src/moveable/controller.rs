use iced::{Point, Rectangle, Size};
use log::debug;

use super::{Handle, Manipulator, Proposal, Target};
use crate::geometry::{Geometry, SnapGuides};
use crate::state::tile::TileId;

/// Side length of a resize handle square
pub const HANDLE_SIZE: f32 = 8.0;

/// Extra grab distance around each handle
const HANDLE_SLOP: f32 = 2.0;

/// Smallest width/height a resize may propose
const MIN_SIZE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MoveableOptions {
    pub guides: SnapGuides,
    /// Resize keeps the aspect ratio the tile had when the gesture began
    pub keep_ratio: bool,
    /// Resize sizes are rounded to multiples of this step (0 disables)
    pub throttle_resize: f32,
}

impl Default for MoveableOptions {
    fn default() -> Self {
        Self {
            guides: SnapGuides::default(),
            keep_ratio: true,
            throttle_resize: 1.0,
        }
    }
}

/// The eight handle squares around a tile
pub fn handle_rects(g: &Geometry) -> Vec<(Handle, Rectangle)> {
    Handle::ALL
        .iter()
        .map(|handle| {
            let center = handle.anchor(g);
            let rect = Rectangle::new(
                Point::new(center.x - HANDLE_SIZE / 2.0, center.y - HANDLE_SIZE / 2.0),
                Size::new(HANDLE_SIZE, HANDLE_SIZE),
            );
            (*handle, rect)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureKind {
    Drag,
    Resize(Handle),
}

/// An in-progress gesture, measured from where it started
#[derive(Debug, Clone, Copy)]
struct Gesture {
    kind: GestureKind,
    origin: Point,
    start: Geometry,
    id: TileId,
}

/// Built-in drag/resize widget with snapping and eight resize handles
#[derive(Debug, Clone, Default)]
pub struct Moveable {
    options: MoveableOptions,
    target: Option<Target>,
    gesture: Option<Gesture>,
}

impl Moveable {
    pub fn options(&self) -> &MoveableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: MoveableOptions) {
        self.options = options;
    }

    /// Hit areas of the handles around the current target
    pub fn handles(&self) -> Vec<(Handle, Rectangle)> {
        match self.target {
            Some(target) => handle_rects(&target.geometry),
            None => Vec::new(),
        }
    }

    fn handle_at(&self, at: Point) -> Option<Handle> {
        self.handles()
            .into_iter()
            .find(|(_, rect)| rect.expand(HANDLE_SLOP).contains(at))
            .map(|(handle, _)| handle)
    }

    fn propose(&self, gesture: Gesture, at: Point, committed: bool) -> Proposal {
        let dx = at.x - gesture.origin.x;
        let dy = at.y - gesture.origin.y;
        let start = gesture.start;

        match gesture.kind {
            GestureKind::Drag => {
                let moved = start.moved_to(start.top + dy, start.left + dx);
                Proposal::Drag {
                    id: gesture.id,
                    geometry: self.options.guides.snap_drag(moved),
                    committed,
                }
            }
            GestureKind::Resize(handle) => Proposal::Resize {
                id: gesture.id,
                size: self.resize(start, handle, dx, dy),
                committed,
            },
        }
    }

    /// New size for a resize by (dx, dy) from `handle`
    fn resize(&self, start: Geometry, handle: Handle, dx: f32, dy: f32) -> Size {
        let (sx, sy) = handle.direction();
        let ratio = if start.height > 0.0 { start.width / start.height } else { 1.0 };

        let grown_width = start.width + sx * dx;
        let grown_height = start.height + sy * dy;

        let (width, height) = if !self.options.keep_ratio {
            (
                if sx != 0.0 { grown_width } else { start.width },
                if sy != 0.0 { grown_height } else { start.height },
            )
        } else if sx != 0.0 && (sy == 0.0 || dx.abs() >= dy.abs()) {
            (grown_width, grown_width / ratio)
        } else {
            (grown_height * ratio, grown_height)
        };

        let size = Size::new(self.throttle(width), self.throttle(height));
        let snapped = self.options.guides.snap_resize(start.resized_to(size));

        if !self.options.keep_ratio {
            return snapped.size();
        }
        if snapped.width != size.width {
            Size::new(snapped.width, self.throttle(snapped.width / ratio))
        } else if snapped.height != size.height {
            Size::new(self.throttle(snapped.height * ratio), snapped.height)
        } else {
            size
        }
    }

    fn throttle(&self, value: f32) -> f32 {
        let step = self.options.throttle_resize;
        let stepped = if step > 0.0 { (value / step).round() * step } else { value };
        stepped.max(MIN_SIZE)
    }
}

impl Manipulator for Moveable {
    fn set_target(&mut self, target: Option<Target>) {
        let retargeted = self.target.map(|t| t.id) != target.map(|t| t.id);
        if retargeted && self.gesture.take().is_some() {
            debug!("Gesture cancelled: target changed");
        }
        self.target = target;
    }

    fn target(&self) -> Option<Target> {
        self.target
    }

    fn press(&mut self, at: Point) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let kind = if let Some(handle) = self.handle_at(at) {
            GestureKind::Resize(handle)
        } else if target.geometry.contains(at) {
            GestureKind::Drag
        } else {
            return false;
        };

        debug!("Gesture {:?} started on tile {}", kind, target.id);
        self.gesture = Some(Gesture {
            kind,
            origin: at,
            start: target.geometry,
            id: target.id,
        });
        true
    }

    fn drag_to(&mut self, at: Point) -> Option<Proposal> {
        let gesture = self.gesture?;
        Some(self.propose(gesture, at, false))
    }

    fn release(&mut self, at: Point) -> Option<Proposal> {
        let gesture = self.gesture.take()?;
        debug!("Gesture {:?} ended on tile {}", gesture.kind, gesture.id);
        Some(self.propose(gesture, at, true))
    }

    fn is_active(&self) -> bool {
        self.gesture.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(geometry: Geometry) -> Moveable {
        let mut moveable = Moveable::default();
        moveable.set_target(Some(Target { id: TileId(1), geometry }));
        moveable
    }

    fn resized(moveable: &mut Moveable, handle: Handle, to: Point) -> Size {
        let target = moveable.target().unwrap();
        assert!(moveable.press(handle.anchor(&target.geometry)));
        match moveable.drag_to(to) {
            Some(Proposal::Resize { size, committed: false, .. }) => size,
            other => panic!("expected a resize proposal, got {:?}", other),
        }
    }

    #[test]
    fn test_press_outside_target_starts_nothing() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        assert!(!moveable.press(Point::new(10.0, 10.0)));
        assert!(!moveable.is_active());
        assert_eq!(moveable.drag_to(Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn test_press_without_target_starts_nothing() {
        let mut moveable = Moveable::default();
        assert!(!moveable.press(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_drag_moves_by_pointer_offset_then_commits() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        assert!(moveable.press(Point::new(350.0, 350.0)));

        let step = moveable.drag_to(Point::new(370.0, 380.0)).unwrap();
        assert_eq!(
            step,
            Proposal::Drag {
                id: TileId(1),
                geometry: Geometry::new(330.0, 320.0, 100.0, 100.0),
                committed: false,
            }
        );

        let last = moveable.release(Point::new(370.0, 380.0));
        assert!(matches!(last, Some(Proposal::Drag { committed: true, .. })));
        assert!(!moveable.is_active());
    }

    #[test]
    fn test_drag_snaps_to_guides() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        moveable.press(Point::new(350.0, 350.0));

        // left edge lands at 447, next to the guide at 450
        match moveable.drag_to(Point::new(497.0, 350.0)) {
            Some(Proposal::Drag { geometry, .. }) => assert_eq!(geometry.left, 450.0),
            other => panic!("expected a drag proposal, got {:?}", other),
        }
    }

    #[test]
    fn test_corner_resize_keeps_ratio() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        let size = resized(&mut moveable, Handle::SouthEast, Point::new(460.0, 420.0));
        assert_eq!(size, Size::new(160.0, 160.0));
    }

    #[test]
    fn test_edge_resize_follows_ratio() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 200.0, 100.0));
        let size = resized(&mut moveable, Handle::East, Point::new(530.0, 350.0));
        assert_eq!(size, Size::new(230.0, 115.0));
    }

    #[test]
    fn test_north_west_resize_grows_when_moving_out() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        let size = resized(&mut moveable, Handle::NorthWest, Point::new(280.0, 290.0));
        assert_eq!(size, Size::new(120.0, 120.0));
    }

    #[test]
    fn test_resize_is_throttled_to_whole_units() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        let size = resized(&mut moveable, Handle::SouthEast, Point::new(410.4, 400.0));
        assert_eq!(size, Size::new(110.0, 110.0));
    }

    #[test]
    fn test_resize_never_collapses() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        let size = resized(&mut moveable, Handle::SouthEast, Point::new(0.0, 400.0));
        assert!(size.width >= MIN_SIZE && size.height >= MIN_SIZE);
    }

    #[test]
    fn test_retarget_cancels_gesture() {
        let mut moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        moveable.press(Point::new(350.0, 350.0));

        moveable.set_target(Some(Target {
            id: TileId(2),
            geometry: Geometry::new(0.0, 0.0, 100.0, 100.0),
        }));

        assert!(!moveable.is_active());
        assert_eq!(moveable.release(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_handles_surround_target() {
        let moveable = attached(Geometry::new(300.0, 300.0, 100.0, 100.0));
        let handles = moveable.handles();
        assert_eq!(handles.len(), 8);
        let (_, se) = handles
            .iter()
            .find(|(handle, _)| *handle == Handle::SouthEast)
            .unwrap();
        assert_eq!(se.center(), Point::new(400.0, 400.0));
    }
}
