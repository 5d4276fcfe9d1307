//! Screen axes resolved onto model principal axes.

use glam::{Mat4, Vec3};

use crate::math::{nearest_axis, COMPONENT_EPSILON};

/// The model-space principal axes nearest to the screen's right, up and
/// out directions under the current view.
///
/// Drag and rotation gestures consume these so that "drag right" always
/// moves or turns the model toward screen right, whatever the camera
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAxes {
    /// Model axis nearest screen right.
    pub x: Vec3,
    /// Model axis nearest screen up.
    pub y: Vec3,
    /// Line-of-sight axis, `x × y`, completing a right-handed triple.
    pub z: Vec3,
}

impl ResolvedAxes {
    /// Resolves the screen axes through the inverse view matrix.
    ///
    /// Screen unit vectors are unprojected as directions (translation
    /// ignored) and snapped to the nearest signed principal axis.
    ///
    /// Under oblique rotations the independently-resolved x and y can
    /// land on the same model axis; the triple then degenerates
    /// (`z = 0`). That outcome is part of the contract and is reported
    /// by [`ResolvedAxes::is_degenerate`], not corrected here.
    pub fn from_inverse_view(inverse_view: &Mat4) -> Self {
        let x = nearest_axis(inverse_view.transform_vector3(Vec3::X));
        let y = nearest_axis(inverse_view.transform_vector3(Vec3::Y));
        Self { x, y, z: x.cross(y) }
    }

    /// True when x and y collapsed onto one axis and z vanished.
    pub fn is_degenerate(&self) -> bool {
        self.z.length_squared() < COMPONENT_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec4};

    use crate::camera::{ViewOrientation, ViewTransform};

    use super::*;

    fn axes_for(orientation: ViewOrientation) -> ResolvedAxes {
        let mut view = ViewTransform::new();
        view.set_orientation(orientation);
        ResolvedAxes::from_inverse_view(&view.inverse_view_matrix())
    }

    #[test]
    fn front_view_resolves_identity_axes() {
        let axes = axes_for(ViewOrientation::Front);
        assert_eq!(axes.x, Vec3::X);
        assert_eq!(axes.y, Vec3::Y);
        assert_eq!(axes.z, Vec3::Z);
    }

    #[test]
    fn right_view_swaps_sight_axis_into_x() {
        let axes = axes_for(ViewOrientation::Right);
        // Looking at the +x face: screen right runs along model -z and
        // the viewer sits on the +x side.
        assert_eq!(axes.x, Vec3::NEG_Z);
        assert_eq!(axes.y, Vec3::Y);
        assert_eq!(axes.z, Vec3::X);
        assert!(!axes.is_degenerate());
    }

    #[test]
    fn top_view_keeps_right_handed_triple() {
        let axes = axes_for(ViewOrientation::Top);
        assert_eq!(axes.x, Vec3::X);
        assert_eq!(axes.y, Vec3::NEG_Z);
        assert_eq!(axes.z, Vec3::Y);
        assert!(!axes.is_degenerate());
    }

    #[test]
    fn oblique_rotation_can_collapse_both_axes() {
        // A rotation whose screen right AND screen up both lean mostly
        // along model x: the independent per-axis resolution coincides
        // and the triple degenerates. Accepted behavior, asserted so
        // nobody "fixes" it silently.
        let r1 = Vec3::new(1.0, 0.9, 0.9).normalize();
        let r2 = Vec3::new(0.95, -0.85, -0.2).normalize();
        let r2 = (r2 - r1 * r1.dot(r2)).normalize();
        let r3 = r1.cross(r2);
        let rotation = Mat4::from_cols(
            Vec4::new(r1.x, r2.x, r3.x, 0.0),
            Vec4::new(r1.y, r2.y, r3.y, 0.0),
            Vec4::new(r1.z, r2.z, r3.z, 0.0),
            Vec4::W,
        );
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -100.0)) * rotation;

        let axes = ResolvedAxes::from_inverse_view(&view.inverse());
        assert_eq!(axes.x, Vec3::X);
        assert_eq!(axes.y, Vec3::X);
        assert!(axes.is_degenerate());
    }
}
