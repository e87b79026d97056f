/// Snapping tile edges to fixed guide lines
///
/// Vertical guides are x positions, horizontal guides are y positions.
/// An edge within `threshold` of a guide is pulled onto it. Drags move the
/// whole tile; resizes only move the right/bottom edge.

use super::Geometry;

/// x positions of the vertical guide lines
pub const VERTICAL_GUIDES: [f32; 6] = [50.0, 150.0, 250.0, 450.0, 550.0, 650.0];

/// y positions of the horizontal guide lines
pub const HORIZONTAL_GUIDES: [f32; 9] = [0.0, 100.0, 200.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0];

/// Default snapping distance
pub const SNAP_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapGuides {
    pub vertical: Vec<f32>,
    pub horizontal: Vec<f32>,
    pub threshold: f32,
}

impl Default for SnapGuides {
    fn default() -> Self {
        Self {
            vertical: VERTICAL_GUIDES.to_vec(),
            horizontal: HORIZONTAL_GUIDES.to_vec(),
            threshold: SNAP_THRESHOLD,
        }
    }
}

impl SnapGuides {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Move the tile so its nearest edge sits on a guide, per axis.
    /// Leading edges (top/left) win over trailing edges on ties.
    pub fn snap_drag(&self, g: Geometry) -> Geometry {
        let left = match self.offset(&self.vertical, g.left, g.right()) {
            Some(dx) => g.left + dx,
            None => g.left,
        };
        let top = match self.offset(&self.horizontal, g.top, g.bottom()) {
            Some(dy) => g.top + dy,
            None => g.top,
        };
        g.moved_to(top, left)
    }

    /// Extend or shrink the tile so its right/bottom edge sits on a guide.
    pub fn snap_resize(&self, g: Geometry) -> Geometry {
        let mut snapped = g;
        if let Some(x) = self.nearest(&self.vertical, g.right()) {
            let width = x - g.left;
            if width > 0.0 {
                snapped.width = width;
            }
        }
        if let Some(y) = self.nearest(&self.horizontal, g.bottom()) {
            let height = y - g.top;
            if height > 0.0 {
                snapped.height = height;
            }
        }
        snapped
    }

    /// Shift needed to put either edge on its closest guide
    fn offset(&self, guides: &[f32], near: f32, far: f32) -> Option<f32> {
        let near_shift = self.nearest(guides, near).map(|guide| guide - near);
        let far_shift = self.nearest(guides, far).map(|guide| guide - far);

        match (near_shift, far_shift) {
            (Some(a), Some(b)) => Some(if b.abs() < a.abs() { b } else { a }),
            (a, b) => a.or(b),
        }
    }

    /// Closest guide within the threshold
    fn nearest(&self, guides: &[f32], position: f32) -> Option<f32> {
        guides
            .iter()
            .copied()
            .filter(|guide| (guide - position).abs() <= self.threshold)
            .min_by(|a, b| (a - position).abs().total_cmp(&(b - position).abs()))
    }
}
