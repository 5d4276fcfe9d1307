//! Screen point plus depth reference to model-space point.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::axis::ResolvedAxes;
use crate::error::ViewportError;
use crate::math::{ndc_from_screen, COMPONENT_EPSILON};

/// Maps a screen point back into model space.
///
/// The screen point pins two of the three model coordinates; the third
/// comes from `depth_reference`, the model-space point whose depth the
/// result should share (typically the dragged element's position).
///
/// The viewing ray is intersected with the near and far clipping planes
/// through the inverse combined transform, then the line parameter is
/// solved so the result matches `depth_reference` along the axis most
/// nearly parallel to the line of sight. If that axis has no usable ray
/// component the solver falls through x, y, z in order; exhausting all
/// three is [`ViewportError::AmbiguousDepth`] and never a division by
/// zero.
pub fn unproject(
    point: Vec2,
    depth_reference: Vec3,
    view: &Mat4,
    projection: &Mat4,
    viewport: Vec2,
) -> Result<Vec3, ViewportError> {
    let combined = *projection * *view;
    let inverse = combined.inverse();
    let ndc = ndc_from_screen(point, viewport);

    let near = plane_point(&inverse, ndc, 0.0)?;
    let far = plane_point(&inverse, ndc, 1.0)?;

    let axes = ResolvedAxes::from_inverse_view(&view.inverse());
    solve_along_axes(near, far, axes.z, depth_reference)
}

/// Model-space point for an NDC position on the given depth plane.
pub(crate) fn plane_point(inverse: &Mat4, ndc: Vec2, depth: f32) -> Result<Vec3, ViewportError> {
    let h = *inverse * Vec4::new(ndc.x, ndc.y, depth, 1.0);
    if h.w.abs() < COMPONENT_EPSILON {
        return Err(ViewportError::DegenerateGeometry(
            "clip-space point has no perspective weight",
        ));
    }
    Ok(h.truncate() / h.w)
}

/// Solves `L(t) = near + t (far - near)` so the coordinate along the
/// dominant axis equals the reference, falling back x, y, z.
fn solve_along_axes(
    near: Vec3,
    far: Vec3,
    dominant: Vec3,
    reference: Vec3,
) -> Result<Vec3, ViewportError> {
    let direction = far - near;

    let dominant_index = if dominant.length_squared() < COMPONENT_EPSILON {
        // Degenerate resolver output; start the fallback chain at x.
        0
    } else {
        let a = dominant.abs();
        if a.x >= a.y && a.x >= a.z {
            0
        } else if a.y >= a.z {
            1
        } else {
            2
        }
    };

    for index in [dominant_index, 0, 1, 2] {
        let component = direction[index];
        if component.abs() > COMPONENT_EPSILON {
            let t = (reference[index] - near[index]) / component;
            return Ok(near + direction * t);
        }
    }
    Err(ViewportError::AmbiguousDepth)
}
