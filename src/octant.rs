/// One of the eight 45-degree wedges around a source cell.
///
/// Canonical octant space is (depth, row): depth counts cells outward along
/// the octant's primary axis, row counts sideways from that axis toward the
/// diagonal, with 0 <= row <= depth. The transform back to world space is a
/// pair of signs plus an optional axis swap, so the inner scan loop never
/// dispatches dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Octant {
    /// Swap the depth/row axes (depth runs along y instead of x).
    swap: bool,
    sign_x: i32,
    sign_y: i32,
}

impl Octant {
    const fn new(swap: bool, sign_x: i32, sign_y: i32) -> Self {
        Octant {
            swap,
            sign_x,
            sign_y,
        }
    }

    /// World coordinates of canonical (depth, row) relative to (px, py).
    pub fn world(&self, px: i32, py: i32, depth: i32, row: i32) -> (i32, i32) {
        if self.swap {
            (px + self.sign_x * row, py + self.sign_y * depth)
        } else {
            (px + self.sign_x * depth, py + self.sign_y * row)
        }
    }
}

// Named for the axis the octant's row-0 edge lies on and the side its rows
// grow toward, with y growing downward. EAST_UP covers the wedge between the
// east axis and the northeast diagonal.
pub(crate) const EAST_UP: Octant = Octant::new(false, 1, -1);
pub(crate) const EAST_DOWN: Octant = Octant::new(false, 1, 1);
pub(crate) const WEST_UP: Octant = Octant::new(false, -1, -1);
pub(crate) const WEST_DOWN: Octant = Octant::new(false, -1, 1);
pub(crate) const NORTH_EAST: Octant = Octant::new(true, 1, -1);
pub(crate) const NORTH_WEST: Octant = Octant::new(true, -1, -1);
pub(crate) const SOUTH_EAST: Octant = Octant::new(true, 1, 1);
pub(crate) const SOUTH_WEST: Octant = Octant::new(true, -1, 1);
