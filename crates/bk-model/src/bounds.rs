//! Axis-aligned bounding boxes for bricks and aggregates.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in model space.
///
/// An empty box is inverted (`min > max` on every axis) so that any union
/// or point expansion produces a valid result without special casing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a bounding box from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (inverted) bounding box.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Creates the smallest box containing all given points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox = bbox.expanded_to_include(point);
        }
        bbox
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extents along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the union of two boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns a box grown to contain `point`.
    pub fn expanded_to_include(&self, point: Vec3) -> BoundingBox {
        BoundingBox {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned box containing this box transformed by `transform`.
    ///
    /// The result bounds the transformed corners and may be larger than
    /// the tightest possible box for rotated content.
    pub fn transformed(&self, transform: &Mat4) -> BoundingBox {
        if !self.is_valid() {
            return *self;
        }
        Self::from_points(self.corners().map(|c| transform.transform_point3(c)))
    }

    /// True if the point lies inside or on the boundary.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// True if `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// True if the box is empty, inverted, or has zero volume.
    ///
    /// Degenerate boxes must not drive camera framing or projection
    /// sizing; callers fall back to their current state instead.
    pub fn is_degenerate(&self) -> bool {
        !self.is_valid() || self.size().min_element() <= 0.0
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_is_degenerate() {
        assert!(BoundingBox::empty().is_degenerate());
        assert!(!BoundingBox::empty().is_valid());
    }

    #[test]
    fn union_covers_both() {
        let a = BoundingBox::new(Vec3::splat(-1.0), Vec3::ZERO);
        let b = BoundingBox::new(Vec3::ZERO, Vec3::splat(1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::splat(1.0));
    }

    #[test]
    fn flat_box_is_degenerate_but_valid() {
        let flat = BoundingBox::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.is_valid());
        assert!(flat.is_degenerate());
    }

    #[test]
    fn transform_keeps_containment() {
        let bbox = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotated = bbox.transformed(&Mat4::from_rotation_z(45.0_f32.to_radians()));
        // A rotated cube needs a larger axis-aligned envelope.
        assert!(rotated.max.x > 1.0);
        assert!(rotated.contains_point(Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn from_points_matches_extremes() {
        let bbox = BoundingBox::from_points([
            Vec3::new(2.0, -3.0, 0.5),
            Vec3::new(-1.0, 4.0, 0.0),
        ]);
        assert_eq!(bbox.min, Vec3::new(-1.0, -3.0, 0.0));
        assert_eq!(bbox.max, Vec3::new(2.0, 4.0, 0.5));
    }
}
