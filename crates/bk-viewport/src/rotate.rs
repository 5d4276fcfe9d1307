//! Trackball-style rotation from pointer deltas.

use glam::Vec2;

use crate::axis::ResolvedAxes;
use crate::camera::ViewTransform;

/// Rotation angles derived from one pointer drag, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRotation {
    /// Turn about the resolved vertical axis (horizontal pointer motion).
    pub about_y_degrees: f32,
    /// Turn about the resolved horizontal axis (vertical pointer motion).
    pub about_x_degrees: f32,
}

/// Converts a pointer delta into rotation angles.
///
/// Dragging all the way across the viewport turns the model a half
/// revolution. The delta is in screen coordinates (y down); dragging
/// down tips the model's top toward the viewer.
pub fn rotation_for_drag(delta: Vec2, viewport: Vec2) -> DragRotation {
    if viewport.min_element() <= 0.0 {
        tracing::warn!("rotation requested for an empty viewport");
        return DragRotation {
            about_y_degrees: 0.0,
            about_x_degrees: 0.0,
        };
    }
    DragRotation {
        about_y_degrees: 180.0 * delta.x / viewport.x,
        about_x_degrees: -180.0 * -delta.y / viewport.y,
    }
}

/// Applies a drag rotation about the resolved model axes.
///
/// Rotating about the resolved axes rather than fixed screen axes keeps
/// the object turning in the dragged direction whatever the current
/// orientation. Degenerate resolver output (coincident axes) skips the
/// affected turn.
pub fn apply_drag_rotation(view: &mut ViewTransform, axes: &ResolvedAxes, rotation: DragRotation) {
    view.rotate_about(axes.y, rotation.about_y_degrees);
    view.rotate_about(axes.x, rotation.about_x_degrees);
}
