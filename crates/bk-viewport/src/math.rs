//! Vector and matrix helpers glam does not provide.
//!
//! Conventions used throughout the engine: screen origin top-left with y
//! down, NDC depth in `[0, 1]` (near plane 0, far plane 1), right-handed
//! view space looking down -Z.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Components below this magnitude count as zero when solving for ray
/// parameters or normalizing resolved axes.
pub const COMPONENT_EPSILON: f32 = 1e-6;

/// Zeroes all but the component of largest magnitude, keeping its value.
///
/// Ties resolve in x, y, z priority order. The zero vector maps to zero.
pub fn isolate_greatest_component(v: Vec3) -> Vec3 {
    let a = v.abs();
    if a.x >= a.y && a.x >= a.z {
        Vec3::new(v.x, 0.0, 0.0)
    } else if a.y >= a.z {
        Vec3::new(0.0, v.y, 0.0)
    } else {
        Vec3::new(0.0, 0.0, v.z)
    }
}

/// Snaps an arbitrary direction to the nearest principal axis.
///
/// Returns a unit vector along exactly one axis with matching sign, or
/// zero for the zero vector.
pub fn nearest_axis(v: Vec3) -> Vec3 {
    isolate_greatest_component(v).normalize_or_zero()
}

/// Rounds each component to the nearest multiple of `spacing`.
///
/// A non-positive spacing disables snapping. Snapping is idempotent:
/// already-snapped values pass through unchanged.
pub fn snap_to_grid(v: Vec3, spacing: f32) -> Vec3 {
    if spacing <= 0.0 {
        return v;
    }
    (v / spacing).round() * spacing
}

/// Normalized device coordinates for a screen point, y flipped.
pub fn ndc_from_screen(point: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        2.0 * point.x / viewport.x - 1.0,
        1.0 - 2.0 * point.y / viewport.y,
    )
}

/// Off-center right-handed perspective frustum with `[0, 1]` depth.
///
/// glam only ships symmetric perspective constructors; the camera needs
/// the general form to shrink the near rectangle independently of the
/// viewport.
pub fn frustum_rh(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let two_n = 2.0 * near;
    let inv_w = 1.0 / (right - left);
    let inv_h = 1.0 / (top - bottom);
    let inv_d = 1.0 / (near - far);
    Mat4::from_cols(
        Vec4::new(two_n * inv_w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, two_n * inv_h, 0.0, 0.0),
        Vec4::new(
            (right + left) * inv_w,
            (top + bottom) * inv_h,
            far * inv_d,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, near * far * inv_d, 0.0),
    )
}

/// Rotation built from per-axis angles in degrees, x applied first.
pub fn rotation_from_euler_degrees(angles: Vec3) -> Mat4 {
    Mat4::from_rotation_z(angles.z.to_radians())
        * Mat4::from_rotation_y(angles.y.to_radians())
        * Mat4::from_rotation_x(angles.x.to_radians())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn nearest_axis_is_unit_along_one_axis_with_sign() {
        let cases = [
            (Vec3::new(0.9, 0.1, -0.2), Vec3::X),
            (Vec3::new(-0.9, 0.1, 0.2), Vec3::NEG_X),
            (Vec3::new(0.1, -5.0, 0.2), Vec3::NEG_Y),
            (Vec3::new(0.0, 0.0, 0.3), Vec3::Z),
        ];
        for (input, expected) in cases {
            let axis = nearest_axis(input);
            assert_eq!(axis, expected);
            assert_relative_eq!(axis.length(), 1.0);
        }
    }

    #[test]
    fn nearest_axis_of_zero_is_zero() {
        assert_eq!(nearest_axis(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn isolate_keeps_raw_magnitude() {
        assert_eq!(
            isolate_greatest_component(Vec3::new(3.0, -7.5, 1.0)),
            Vec3::new(0.0, -7.5, 0.0)
        );
    }

    #[test]
    fn isolate_ties_prefer_x_then_y() {
        assert_eq!(
            isolate_greatest_component(Vec3::new(2.0, -2.0, 2.0)),
            Vec3::new(2.0, 0.0, 0.0)
        );
        assert_eq!(
            isolate_greatest_component(Vec3::new(0.0, 2.0, -2.0)),
            Vec3::new(0.0, 2.0, 0.0)
        );
    }

    #[test]
    fn snapping_is_idempotent() {
        let v = Vec3::new(47.0, -12.0, 0.0);
        let once = snap_to_grid(v, 20.0);
        assert_eq!(once, Vec3::new(40.0, -20.0, 0.0));
        assert_eq!(snap_to_grid(once, 20.0), once);
    }

    #[test]
    fn zero_spacing_disables_snapping() {
        let v = Vec3::new(3.7, -1.2, 9.9);
        assert_eq!(snap_to_grid(v, 0.0), v);
    }

    #[test]
    fn frustum_maps_near_and_far_to_unit_depth() {
        let m = frustum_rh(-1.0, 1.0, -1.0, 1.0, 10.0, 1000.0);

        let near = m * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-6);

        let far = m * Vec4::new(0.0, 0.0, -1000.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);

        // The near-plane corner lands on the NDC corner.
        let corner = m * Vec4::new(1.0, 1.0, -10.0, 1.0);
        assert_relative_eq!(corner.x / corner.w, 1.0, epsilon = 1e-6);
        assert_relative_eq!(corner.y / corner.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn screen_center_maps_to_ndc_origin() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(
            ndc_from_screen(Vec2::new(400.0, 300.0), viewport),
            Vec2::ZERO
        );
        // Top-left corner, y flipped.
        assert_eq!(ndc_from_screen(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
    }
}
