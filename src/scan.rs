use crate::direction::Direction;
use crate::octant::{self, Octant};
use crate::settings::{FovSettings, OpaqueApply};
use crate::shape::{self, CircleTable, Shape};

/// Calculate a full field of view around (px, py).
///
/// Every cell the scan finds visible inside the settings' shape is reported
/// through the apply callback exactly once; cells on the axes and diagonals
/// between octants are handed to exactly one of the two octants sharing
/// them. The source cell itself is not reported. A scan with either
/// callback unset returns without visiting any cell.
pub fn fov_circle<M, S>(
    settings: &mut FovSettings<M, S>,
    map: &mut M,
    src: &S,
    px: i32,
    py: i32,
    radius: u32,
) {
    settings.ensure_heights(radius);
    if let Some(mut scan) = Scan::begin(settings, map, src, px, py, radius) {
        scan.circle();
    }
}

/// Calculate a beam of view: the wedge of `angle` degrees centred on
/// `direction`, out to `radius`.
///
/// An angle of 360 or more is the same as [`fov_circle`]; an angle of zero
/// or less lights nothing. The centre ray of the beam is always lit.
pub fn fov_beam<M, S>(
    settings: &mut FovSettings<M, S>,
    map: &mut M,
    src: &S,
    px: i32,
    py: i32,
    radius: u32,
    direction: Direction,
    angle: f32,
) {
    if angle <= 0.0 {
        return;
    }
    if angle >= 360.0 {
        fov_circle(settings, map, src, px, py, radius);
        return;
    }
    settings.ensure_heights(radius);
    if let Some(mut scan) = Scan::begin(settings, map, src, px, py, radius) {
        scan.beam(direction, angle);
    }
}

/// Per-scan state: the settings fields split into disjoint borrows plus the
/// caller's map, payload and source position.
struct Scan<'a, M, S> {
    shape: Shape,
    opaque_apply: OpaqueApply,
    opacity_test: &'a dyn Fn(&M, i32, i32) -> bool,
    apply_lighting: &'a mut dyn FnMut(&mut M, i32, i32, i32, i32, &S),
    heights: &'a mut Vec<f32>,
    circle: &'a mut CircleTable,
    map: &'a mut M,
    src: &'a S,
    px: i32,
    py: i32,
    radius: u32,
}

fn slope(run: f32, rise: f32) -> f32 {
    if run != 0.0 {
        rise / run
    } else {
        0.0
    }
}

impl<'a, M, S> Scan<'a, M, S> {
    fn begin(
        settings: &'a mut FovSettings<M, S>,
        map: &'a mut M,
        src: &'a S,
        px: i32,
        py: i32,
        radius: u32,
    ) -> Option<Self> {
        let FovSettings {
            shape,
            opaque_apply,
            opacity_test,
            apply_lighting,
            heights,
            circle,
        } = settings;
        Some(Scan {
            shape: *shape,
            opaque_apply: *opaque_apply,
            opacity_test: opacity_test.as_deref()?,
            apply_lighting: apply_lighting.as_deref_mut()?,
            heights,
            circle,
            map,
            src,
            px,
            py,
            radius,
        })
    }

    fn apply(&mut self, x: i32, y: i32) {
        (self.apply_lighting)(&mut *self.map, x, y, x - self.px, y - self.py, self.src);
    }

    /// Scan one octant from `depth` outward between two slopes.
    ///
    /// `start_slope` bounds the near (axis) side of the visible wedge,
    /// `end_slope` the far side; both are rise/run in canonical octant
    /// space. The descent walks depths in a loop; on a transparent-to-
    /// opaque transition the still-visible sub-wedge beyond the new shadow
    /// is scanned by a narrowed recursive call, and the current wedge
    /// resumes below it once the opaque run ends. `apply_edge` and
    /// `apply_diag` say whether this invocation owns the row-0 edge and
    /// the diagonal it shares with its neighbours.
    fn octant(
        &mut self,
        oct: Octant,
        mut depth: i32,
        mut start_slope: f32,
        end_slope: f32,
        apply_edge: bool,
        apply_diag: bool,
    ) {
        while depth as u32 <= self.radius {
            let low = (0.5 + depth as f32 * start_slope) as i32;
            let mut high = (0.5 + depth as f32 * end_slope) as i32;
            if !apply_diag && high == depth {
                // Diagonals belong to every second octant.
                high -= 1;
            }

            let limit = shape::row_extent(self.shape, self.circle, self.radius, depth);
            if high > limit {
                if limit == 0 {
                    return;
                }
                high = limit;
            }

            self.heights[(depth - 1) as usize] = start_slope;

            let mut prev_opaque = None;
            for row in low..=high {
                let (x, y) = oct.world(self.px, self.py, depth, row);
                if (self.opacity_test)(&*self.map, x, y) {
                    if self.opaque_apply == OpaqueApply::Apply && (row > 0 || apply_edge) {
                        self.apply(x, y);
                    }
                    if prev_opaque == Some(false) {
                        let shadow = slope(depth as f32 + 0.5, row as f32 - 0.5);
                        self.octant(oct, depth + 1, start_slope, shadow, apply_edge, apply_diag);
                    }
                    prev_opaque = Some(true);
                } else {
                    if row > 0 || apply_edge {
                        self.apply(x, y);
                    }
                    if prev_opaque == Some(true) {
                        start_slope = slope(depth as f32 - 0.5, row as f32 - 0.5);
                    }
                    prev_opaque = Some(false);
                }
            }

            // A row ending on an opaque run (or yielding no cells at all)
            // shadows everything beyond it.
            if prev_opaque != Some(false) {
                return;
            }
            depth += 1;
        }
    }

    fn circle(&mut self) {
        // Counter-clockwise from the east axis. Each axis and each diagonal
        // is owned by exactly one of the two octants touching it.
        self.octant(octant::EAST_UP, 1, 0.0, 1.0, true, true);
        self.octant(octant::NORTH_EAST, 1, 0.0, 1.0, true, false);
        self.octant(octant::NORTH_WEST, 1, 0.0, 1.0, false, false);
        self.octant(octant::WEST_UP, 1, 0.0, 1.0, true, true);
        self.octant(octant::WEST_DOWN, 1, 0.0, 1.0, false, true);
        self.octant(octant::SOUTH_WEST, 1, 0.0, 1.0, false, false);
        self.octant(octant::SOUTH_EAST, 1, 0.0, 1.0, true, false);
        self.octant(octant::EAST_DOWN, 1, 0.0, 1.0, false, true);
    }

    /// Dispatch a beam as up to four pairs of clamped octant scans.
    ///
    /// The angle is folded into quarter-of-90-degree units: `a = angle/90`
    /// is how far each half of the beam reaches, measured in octants. Band
    /// by band the fan widens symmetrically around the centre line, each
    /// band entering the next pair of octants with slope clamps covering
    /// the remaining arc. Edge and diagonal ownership is fixed so that a
    /// band meeting its neighbour (or closing the full circle at 360
    /// degrees) never lights a shared cell twice, while a beam that stops
    /// exactly on an octant boundary still lights the boundary cells.
    fn beam(&mut self, direction: Direction, angle: f32) {
        let a = angle / 90.0;
        let [o0, o1, o2, o3, o4, o5, o6, o7] = beam_fan(direction);
        if direction.is_diagonal() {
            let start = (1.0 - a).clamp(0.0, 1.0);
            self.octant(o0, 1, start, 1.0, true, true);
            self.octant(o1, 1, start, 1.0, true, false);
            if a > 1.0 {
                let end = (a - 1.0).clamp(0.0, 1.0);
                self.octant(o2, 1, 0.0, end, false, true);
                self.octant(o3, 1, 0.0, end, false, true);
            }
            if a > 2.0 {
                let start = (3.0 - a).clamp(0.0, 1.0);
                self.octant(o4, 1, start, 1.0, true, false);
                self.octant(o5, 1, start, 1.0, true, false);
            }
            if a > 3.0 {
                let end = (a - 3.0).clamp(0.0, 1.0);
                self.octant(o6, 1, 0.0, end, false, true);
                self.octant(o7, 1, 0.0, end, false, false);
            }
        } else {
            let end = a.clamp(0.0, 1.0);
            self.octant(o0, 1, 0.0, end, true, true);
            self.octant(o1, 1, 0.0, end, false, true);
            if a > 1.0 {
                let start = (2.0 - a).clamp(0.0, 1.0);
                self.octant(o2, 1, start, 1.0, true, false);
                self.octant(o3, 1, start, 1.0, true, false);
            }
            if a > 2.0 {
                let end = (a - 2.0).clamp(0.0, 1.0);
                self.octant(o4, 1, 0.0, end, false, true);
                self.octant(o5, 1, 0.0, end, false, true);
            }
            if a > 3.0 {
                let start = (4.0 - a).clamp(0.0, 1.0);
                self.octant(o6, 1, start, 1.0, true, false);
                self.octant(o7, 1, start, 1.0, false, false);
            }
        }
    }
}

/// Octants fanning out from the beam's centre line, innermost pair first.
fn beam_fan(direction: Direction) -> [Octant; 8] {
    use crate::octant::*;
    match direction {
        Direction::East => [
            EAST_UP, EAST_DOWN, NORTH_EAST, SOUTH_EAST, NORTH_WEST, SOUTH_WEST, WEST_UP,
            WEST_DOWN,
        ],
        Direction::West => [
            WEST_UP, WEST_DOWN, NORTH_WEST, SOUTH_WEST, NORTH_EAST, SOUTH_EAST, EAST_UP,
            EAST_DOWN,
        ],
        Direction::North => [
            NORTH_EAST, NORTH_WEST, EAST_UP, WEST_UP, EAST_DOWN, WEST_DOWN, SOUTH_EAST,
            SOUTH_WEST,
        ],
        Direction::South => [
            SOUTH_EAST, SOUTH_WEST, EAST_DOWN, WEST_DOWN, EAST_UP, WEST_UP, NORTH_EAST,
            NORTH_WEST,
        ],
        Direction::Northeast => [
            EAST_UP, NORTH_EAST, EAST_DOWN, NORTH_WEST, SOUTH_EAST, WEST_UP, SOUTH_WEST,
            WEST_DOWN,
        ],
        Direction::Southeast => [
            EAST_DOWN, SOUTH_EAST, EAST_UP, SOUTH_WEST, NORTH_EAST, WEST_DOWN, NORTH_WEST,
            WEST_UP,
        ],
        Direction::Southwest => [
            WEST_DOWN, SOUTH_WEST, WEST_UP, SOUTH_EAST, NORTH_WEST, EAST_DOWN, NORTH_EAST,
            EAST_UP,
        ],
        Direction::Northwest => [
            NORTH_WEST, WEST_UP, NORTH_EAST, WEST_DOWN, EAST_UP, SOUTH_WEST, EAST_DOWN,
            SOUTH_EAST,
        ],
    }
}
