/// Geometric region bounding which cells may be lit for a given radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Chebyshev square of side 2*radius + 1.
    Square,
    /// Euclidean circle, extents computed on the fly.
    Circle,
    /// Euclidean circle served from a lazily grown per-radius table.
    CirclePrecalculate,
    /// Square with the four corners clipped at 45 degrees.
    Octagon,
}

/// Radius-keyed table of circular row extents.
///
/// Entry r-1 holds, for each canonical depth d in 0..=r, the largest row
/// with d^2 + row^2 <= r^2. Rows are filled on first use of a radius and
/// kept for the lifetime of the owning settings, so repeat scans at the
/// same radius cost one lookup.
#[derive(Debug, Default)]
pub(crate) struct CircleTable {
    rows: Vec<Option<Vec<i32>>>,
}

impl CircleTable {
    pub fn new() -> Self {
        CircleTable { rows: Vec::new() }
    }

    /// Extent at `depth` for `radius`, extending the table if needed.
    pub fn extent(&mut self, radius: u32, depth: i32) -> i32 {
        let index = radius as usize - 1;
        if index >= self.rows.len() {
            self.rows.resize_with(index + 1, || None);
        }
        let row = self.rows[index].get_or_insert_with(|| precalculate_extents(radius));
        row[depth as usize]
    }

    #[cfg(test)]
    pub fn cached_radii(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}

fn precalculate_extents(radius: u32) -> Vec<i32> {
    (0..=radius as i32)
        .map(|depth| circle_extent_at(radius, depth))
        .collect()
}

fn circle_extent_at(radius: u32, depth: i32) -> i32 {
    let r = radius as i64;
    let d = depth as i64;
    ((r * r - d * d) as f64).sqrt() as i32
}

/// Largest admissible canonical row at `depth` for the shape.
///
/// A result of 0 means only the octant's axis edge survives at this depth;
/// the scanner stops descending entirely when the clamp lands on 0, which
/// leaves the axis tips at exact circle/octagon radius unlit.
pub(crate) fn row_extent(
    shape: Shape,
    circle: &mut CircleTable,
    radius: u32,
    depth: i32,
) -> i32 {
    match shape {
        Shape::Square => radius as i32,
        Shape::Circle => circle_extent_at(radius, depth),
        Shape::CirclePrecalculate => circle.extent(radius, depth),
        Shape::Octagon => (radius as i32 - depth) * 2,
    }
}
