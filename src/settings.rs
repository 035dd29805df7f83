use crate::shape::{CircleTable, Shape};

/// Whether opaque cells facing the source receive the apply callback.
///
/// With `Apply` (the default) the wall cell that terminates a ray is lit,
/// so walls show up as surfaces rather than invisible edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpaqueApply {
    Apply,
    NoApply,
}

/// Opacity query: true if the cell at (x, y) blocks light.
///
/// Conforming callbacks must also return true for off-map coordinates; the
/// engine has no notion of map extent.
pub type OpacityTest<M> = Box<dyn Fn(&M, i32, i32) -> bool>;

/// Lit-cell notification: (map, x, y, dx, dy, src), where (dx, dy) is the
/// signed offset of the cell from the scan source.
pub type ApplyLighting<M, S> = Box<dyn FnMut(&mut M, i32, i32, i32, i32, &S)>;

/// Configuration consumed by every scan.
///
/// `M` is the caller's map type, `S` an optional per-source payload that is
/// forwarded verbatim to the apply callback. Besides the shape and policy
/// selectors the settings own two growable scratch structures: the heights
/// buffer of per-depth slope stops and the precomputed circle table. Both
/// grow monotonically over the settings' lifetime and are mutated during a
/// scan, which is why a single settings value must not serve two scans at
/// once. Dropping the settings releases them.
pub struct FovSettings<M, S = ()> {
    pub(crate) shape: Shape,
    pub(crate) opaque_apply: OpaqueApply,
    pub(crate) opacity_test: Option<OpacityTest<M>>,
    pub(crate) apply_lighting: Option<ApplyLighting<M, S>>,
    pub(crate) heights: Vec<f32>,
    pub(crate) circle: CircleTable,
}

impl<M, S> FovSettings<M, S> {
    /// Settings with default shape (square), default wall-face policy
    /// (apply) and no callbacks. Both callbacks must be set before a scan.
    pub fn new() -> Self {
        FovSettings {
            shape: Shape::Square,
            opaque_apply: OpaqueApply::Apply,
            opacity_test: None,
            apply_lighting: None,
            heights: Vec::new(),
            circle: CircleTable::new(),
        }
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_opaque_apply(&mut self, policy: OpaqueApply) {
        self.opaque_apply = policy;
    }

    pub fn opaque_apply(&self) -> OpaqueApply {
        self.opaque_apply
    }

    /// Install the opacity query used by subsequent scans.
    pub fn set_opacity_test<F>(&mut self, test: F)
    where
        F: Fn(&M, i32, i32) -> bool + 'static,
    {
        self.opacity_test = Some(Box::new(test));
    }

    /// Install the lit-cell callback used by subsequent scans.
    pub fn set_apply_lighting<F>(&mut self, apply: F)
    where
        F: FnMut(&mut M, i32, i32, i32, i32, &S) + 'static,
    {
        self.apply_lighting = Some(Box::new(apply));
    }

    /// Grow the heights scratch buffer to cover `radius` depths.
    ///
    /// Called at the start of every scan, before any octant descends; the
    /// buffer never shrinks.
    pub(crate) fn ensure_heights(&mut self, radius: u32) {
        let needed = radius as usize;
        if self.heights.len() < needed {
            self.heights.resize(needed, 0.0);
        }
    }
}

impl<M, S> Default for FovSettings<M, S> {
    fn default() -> Self {
        FovSettings::new()
    }
}
