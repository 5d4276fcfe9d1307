//! Grid-snapped, optionally axis-constrained drag displacement.

use glam::Vec3;

use crate::axis::ResolvedAxes;
use crate::math::{isolate_greatest_component, snap_to_grid};

/// State for one drag gesture.
///
/// Created when the gesture begins, updated once per tick through
/// [`DragSession::displacement`], and discarded whenever the gesture ends
/// or aborts; dropping it is the only cleanup.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Grabbed model-space point, frozen at gesture start.
    anchor: Vec3,
    /// Reference point from the previous tick.
    reference: Vec3,
    /// Total displacement handed out so far.
    applied: Vec3,
}

impl DragSession {
    /// Starts a gesture at the grabbed point.
    pub fn begin(anchor: Vec3) -> Self {
        Self {
            anchor,
            reference: anchor,
            applied: Vec3::ZERO,
        }
    }

    /// The frozen gesture-start point.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Displacement to apply for this tick, snapped to `grid_spacing`.
    ///
    /// Unconstrained, the element follows the pointer: the displacement
    /// is the delta from the previous reference point. Constrained, the
    /// dominant axis is re-derived from the cumulative offset against
    /// the frozen anchor on every call and the element is steered toward
    /// `anchor + constrained cumulative` from wherever previous ticks
    /// left it, so the axis decision never drifts with accumulated
    /// increments.
    ///
    /// A zero return means "no movement"; callers must not mutate the
    /// scene or mark anything dirty for it.
    pub fn displacement(&mut self, current: Vec3, constrain: bool, grid_spacing: f32) -> Vec3 {
        let raw = if constrain {
            isolate_greatest_component(current - self.anchor) - self.applied
        } else {
            current - self.reference
        };
        let snapped = snap_to_grid(raw, grid_spacing);
        self.reference = current;
        self.applied += snapped;
        snapped
    }
}

/// Displacement for a keyboard nudge along the resolved axes.
///
/// `step` is the nudge in screen terms (x right, y up, z out of the
/// screen); the result moves the element by one grid unit per step along
/// whichever model axes currently face those directions.
pub fn nudge_displacement(axes: &ResolvedAxes, step: Vec3, grid_spacing: f32) -> Vec3 {
    (axes.x * step.x + axes.y * step.y + axes.z * step.z) * grid_spacing
}
