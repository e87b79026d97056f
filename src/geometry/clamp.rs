/// Boundary clamping for tiles
///
/// Pure functions that correct a proposed drag or resize so the tile never
/// leaves the container. When the container has not been laid out yet the
/// bounds are unknown and every proposal passes through unchanged.

use iced::Size;

use super::Geometry;

/// Live size of the board container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub width: f32,
    pub height: f32,
}

impl ContainerBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<Size> for ContainerBounds {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// A proposed tile position during a drag
///
/// `bottom` and `right` are the distances from the tile's bottom/right edge
/// to the container's bottom/right edge; negative means the tile overflows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBox {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub width: f32,
    pub height: f32,
}

/// Clamp a proposed size so the tile, anchored at its current top/left,
/// stays inside the container.
///
/// A dimension that already fits is returned unchanged; a violating one is
/// cut back to the space left between the tile's origin and the far edge.
pub fn clamp_resize(bounds: Option<ContainerBounds>, current: Geometry, proposed: Size) -> Size {
    let Some(bounds) = bounds else {
        return proposed;
    };

    let mut size = proposed;
    if current.top + size.height > bounds.height {
        size.height = bounds.height - current.top;
    }
    if current.left + size.width > bounds.width {
        size.width = bounds.width - current.left;
    }
    size
}

/// Clamp a proposed drag position so the tile stays inside the container.
///
/// Width and height are carried over from the proposal untouched.
pub fn clamp_drag(bounds: Option<ContainerBounds>, proposed: DragBox) -> Geometry {
    let Some(bounds) = bounds else {
        return Geometry::new(proposed.top, proposed.left, proposed.width, proposed.height);
    };

    let top = clamp_axis(proposed.top, proposed.bottom, proposed.height, bounds.height);
    let left = clamp_axis(proposed.left, proposed.right, proposed.width, bounds.width);

    Geometry::new(top, left, proposed.width, proposed.height)
}

/// One axis of the drag clamp. `near` is top/left, `far` is bottom/right.
fn clamp_axis(near: f32, far: f32, extent: f32, limit: f32) -> f32 {
    let aligned_far = limit - extent;

    let corrected = if near < 0.0 {
        if far < 0.0 {
            aligned_far
        } else {
            0.0
        }
    } else if far < 0.0 || near + extent > limit {
        aligned_far
    } else {
        near
    };

    corrected.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Option<ContainerBounds> {
        Some(ContainerBounds::new(800.0, 600.0))
    }

    fn origin_tile() -> Geometry {
        Geometry::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_resize_that_fits_is_unchanged() {
        let size = clamp_resize(board(), origin_tile(), Size::new(750.0, 50.0));
        assert_eq!(size, Size::new(750.0, 50.0));
    }

    #[test]
    fn test_resize_wider_than_board_is_cut_to_board_width() {
        let size = clamp_resize(board(), origin_tile(), Size::new(900.0, 50.0));
        assert_eq!(size, Size::new(800.0, 50.0));
    }

    #[test]
    fn test_resize_respects_tile_origin() {
        let tile = Geometry::new(550.0, 700.0, 50.0, 50.0);
        let size = clamp_resize(board(), tile, Size::new(200.0, 200.0));
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_resize_without_bounds_passes_through() {
        let size = clamp_resize(None, origin_tile(), Size::new(5000.0, 5000.0));
        assert_eq!(size, Size::new(5000.0, 5000.0));
    }

    #[test]
    fn test_drag_above_top_with_bottom_inside_snaps_to_zero() {
        let proposal = DragBox {
            top: -20.0,
            left: 0.0,
            bottom: 80.0,
            right: 700.0,
            width: 100.0,
            height: 100.0,
        };
        let g = clamp_drag(board(), proposal);
        assert_eq!(g.top, 0.0);
        assert_eq!(g.left, 0.0);
    }

    #[test]
    fn test_drag_with_both_edges_negative_aligns_to_bottom() {
        let proposal = DragBox {
            top: -620.0,
            left: 0.0,
            bottom: -20.0,
            right: 700.0,
            width: 100.0,
            height: 100.0,
        };
        let g = clamp_drag(board(), proposal);
        assert_eq!(g.top, 500.0);
    }

    #[test]
    fn test_drag_past_bottom_right_is_pulled_back() {
        let tile = Geometry::new(580.0, 790.0, 100.0, 100.0);
        let bounds = board().unwrap();
        let g = clamp_drag(Some(bounds), tile.drag_box(bounds));
        assert_eq!(g.top, 500.0);
        assert_eq!(g.left, 700.0);
    }

    #[test]
    fn test_drag_left_of_board_snaps_to_zero() {
        let tile = Geometry::new(10.0, -35.0, 100.0, 100.0);
        let bounds = board().unwrap();
        let g = clamp_drag(Some(bounds), tile.drag_box(bounds));
        assert_eq!(g.left, 0.0);
        assert_eq!(g.top, 10.0);
    }

    #[test]
    fn test_drag_inside_is_unchanged() {
        let tile = Geometry::new(120.0, 340.0, 100.0, 60.0);
        let bounds = board().unwrap();
        assert_eq!(clamp_drag(Some(bounds), tile.drag_box(bounds)), tile);
    }

    #[test]
    fn test_drag_without_bounds_passes_through() {
        let proposal = DragBox {
            top: -620.0,
            left: -5.0,
            bottom: -20.0,
            right: 3.0,
            width: 100.0,
            height: 100.0,
        };
        let g = clamp_drag(None, proposal);
        assert_eq!(g, Geometry::new(-620.0, -5.0, 100.0, 100.0));
    }

    #[test]
    fn test_clamped_drags_stay_inside_board() {
        let bounds = board().unwrap();
        let mut top = -900.0;
        while top <= 900.0 {
            let mut left = -900.0;
            while left <= 900.0 {
                let tile = Geometry::new(top, left, 100.0, 100.0);
                let g = clamp_drag(Some(bounds), tile.drag_box(bounds));
                assert!(g.top >= 0.0 && g.left >= 0.0, "{:?} -> {:?}", tile, g);
                assert!(g.bottom() <= bounds.height, "{:?} -> {:?}", tile, g);
                assert!(g.right() <= bounds.width, "{:?} -> {:?}", tile, g);
                left += 37.0;
            }
            top += 41.0;
        }
    }
}
