//! Camera orientation, projection and content framing.

use bk_model::BoundingBox;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::{frustum_rh, rotation_from_euler_degrees};

/// Padding added around framed content, in model units.
pub const FIT_MARGIN: f32 = 40.0;

/// Framing radii round up to the next multiple of this, so small edits
/// near the old radius do not re-size the view every frame.
pub const FIT_GRANULARITY: f32 = 384.0;

/// Camera distance per unit of framed radius.
pub const CAMERA_DISTANCE_FACTOR: f32 = 6.5;

/// Smallest usable camera distance magnitude.
const MIN_CAMERA_DISTANCE: f32 = 1.0;

/// Angle tolerance (degrees) when classifying a rotation as canonical.
const ANGLE_TOLERANCE: f32 = 1e-3;

/// The named viewing directions.
///
/// Tags are stable across releases; persisted view state stores them as
/// raw integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewOrientation {
    /// Free rotation, no canonical direction.
    #[default]
    ThreeD,
    /// Looking at the front face.
    Front,
    /// Looking at the back face.
    Back,
    /// Looking at the left face.
    Left,
    /// Looking at the right face.
    Right,
    /// Looking straight down.
    Top,
    /// Looking straight up.
    Bottom,
}

impl ViewOrientation {
    /// Stable integer tag for persistence.
    pub fn tag(self) -> u32 {
        match self {
            ViewOrientation::ThreeD => 0,
            ViewOrientation::Front => 1,
            ViewOrientation::Back => 2,
            ViewOrientation::Left => 3,
            ViewOrientation::Right => 4,
            ViewOrientation::Top => 5,
            ViewOrientation::Bottom => 6,
        }
    }

    /// Inverse of [`ViewOrientation::tag`].
    pub fn from_tag(tag: u32) -> Option<Self> {
        Some(match tag {
            0 => ViewOrientation::ThreeD,
            1 => ViewOrientation::Front,
            2 => ViewOrientation::Back,
            3 => ViewOrientation::Left,
            4 => ViewOrientation::Right,
            5 => ViewOrientation::Top,
            6 => ViewOrientation::Bottom,
            _ => return None,
        })
    }

    /// Canonical model rotation for this orientation, degrees per axis,
    /// x applied first.
    pub fn angles(self) -> Vec3 {
        match self {
            // Isometric-ish home view: tilt down, quarter turn.
            ViewOrientation::ThreeD => Vec3::new(-35.264_39, 45.0, 0.0),
            ViewOrientation::Front => Vec3::ZERO,
            ViewOrientation::Back => Vec3::new(0.0, 180.0, 0.0),
            ViewOrientation::Left => Vec3::new(0.0, 90.0, 0.0),
            ViewOrientation::Right => Vec3::new(0.0, -90.0, 0.0),
            ViewOrientation::Top => Vec3::new(90.0, 0.0, 0.0),
            ViewOrientation::Bottom => Vec3::new(-90.0, 0.0, 0.0),
        }
    }

    /// Classifies an angle triple: the canonical orientation it matches,
    /// or [`ViewOrientation::ThreeD`] for everything else.
    pub fn from_angles(angles: Vec3) -> Self {
        let wrapped = |a: f32, b: f32| {
            let d = (a - b).rem_euclid(360.0);
            d.min(360.0 - d) <= ANGLE_TOLERANCE
        };
        for orientation in [
            ViewOrientation::Front,
            ViewOrientation::Back,
            ViewOrientation::Left,
            ViewOrientation::Right,
            ViewOrientation::Top,
            ViewOrientation::Bottom,
        ] {
            let canonical = orientation.angles();
            if wrapped(angles.x, canonical.x)
                && wrapped(angles.y, canonical.y)
                && wrapped(angles.z, canonical.z)
            {
                return orientation;
            }
        }
        ViewOrientation::ThreeD
    }

    /// True for every orientation except free rotation.
    pub fn is_canonical(self) -> bool {
        self != ViewOrientation::ThreeD
    }
}

/// Orthographic or perspective projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Parallel projection, one model unit per pixel at any depth.
    #[default]
    Orthographic,
    /// Perspective projection sized to match orthographic at the origin.
    Perspective,
}

impl ProjectionMode {
    /// Stable integer tag for persistence.
    pub fn tag(self) -> u32 {
        match self {
            ProjectionMode::Orthographic => 0,
            ProjectionMode::Perspective => 1,
        }
    }

    /// Inverse of [`ProjectionMode::tag`].
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(ProjectionMode::Orthographic),
            1 => Some(ProjectionMode::Perspective),
            _ => None,
        }
    }
}

/// The camera: a pure rotation, a dolly along the view axis, and the two
/// mode tags.
///
/// The rotation never carries scale, so the view matrix is always
/// invertible and its rotational determinant stays at magnitude one.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    rotation: Mat4,
    orientation: ViewOrientation,
    projection: ProjectionMode,
    /// Signed dolly; negative places the camera behind the origin along
    /// the view z axis.
    distance: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        let mut view = Self {
            rotation: Mat4::IDENTITY,
            orientation: ViewOrientation::ThreeD,
            projection: ProjectionMode::Perspective,
            distance: -FIT_GRANULARITY * CAMERA_DISTANCE_FACTOR,
        };
        view.set_orientation(ViewOrientation::ThreeD);
        view
    }
}

impl ViewTransform {
    /// Camera at the default home orientation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current orientation tag.
    pub fn orientation(&self) -> ViewOrientation {
        self.orientation
    }

    /// Current projection mode.
    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    /// Signed camera distance.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The model rotation part of the view.
    pub fn rotation(&self) -> &Mat4 {
        &self.rotation
    }

    /// Replaces the rotation wholesale with the canonical angle set for
    /// `orientation`. Never additive to the prior rotation.
    pub fn set_orientation(&mut self, orientation: ViewOrientation) {
        self.rotation = rotation_from_euler_degrees(orientation.angles());
        self.orientation = orientation;
    }

    /// Switches projection mode; apparent content size at the origin is
    /// identical in both modes, so this never visually jumps the model.
    pub fn set_projection(&mut self, projection: ProjectionMode) {
        self.projection = projection;
    }

    /// Applies an additional rotation about a model-space axis.
    ///
    /// Degenerate axes (resolver coincidence) are skipped rather than
    /// poisoning the rotation with NaN.
    pub fn rotate_about(&mut self, axis: Vec3, degrees: f32) {
        if axis.length_squared() < f32::EPSILON {
            tracing::warn!("skipping rotation about a zero axis");
            return;
        }
        self.rotation =
            self.rotation * Mat4::from_axis_angle(axis.normalize(), degrees.to_radians());
    }

    /// Marks the view as freely rotated.
    pub(crate) fn mark_free(&mut self) {
        self.orientation = ViewOrientation::ThreeD;
    }

    /// Dollies the camera back far enough to show everything in `bbox`.
    ///
    /// The framing radius rounds up to [`FIT_GRANULARITY`] so repeated
    /// framing of slightly-changed content keeps a stable distance.
    /// Degenerate bounds leave the camera untouched and return the
    /// current distance.
    pub fn frame_to_fit(&mut self, bbox: &BoundingBox) -> f32 {
        if bbox.is_degenerate() {
            tracing::debug!("frame_to_fit on degenerate bounds; keeping current distance");
            return self.distance;
        }
        let radius = bbox.min.length().max(bbox.max.length()) + FIT_MARGIN;
        let radius = (radius / FIT_GRANULARITY).ceil() * FIT_GRANULARITY;
        self.distance = -radius * CAMERA_DISTANCE_FACTOR;
        self.distance
    }

    /// World-to-view matrix: the rotation followed by the dolly.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.distance)) * self.rotation
    }

    /// Inverse of [`ViewTransform::view_matrix`]; exists for every legal
    /// state since the view is rotation plus translation only.
    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Projection matrix sized to the viewport.
    ///
    /// The clip range spans `max(width, height)` model units on either
    /// side of the origin plane: an effectively infinite far plane for
    /// brick-scale content without destabilizing depth precision (model
    /// extents up to roughly 1e6 units stay safe). In perspective mode
    /// the near rectangle shrinks by `(|d| - depth) / |d|` so content at
    /// the origin keeps its orthographic apparent size.
    pub fn projection_matrix(&self, viewport: Vec2) -> Mat4 {
        if viewport.min_element() <= 0.0 {
            tracing::warn!("projection requested for an empty viewport");
            return Mat4::IDENTITY;
        }
        let content_depth = viewport.x.max(viewport.y);
        let d = self.distance.abs().max(MIN_CAMERA_DISTANCE);
        let half = viewport * 0.5;
        match self.projection {
            ProjectionMode::Orthographic => Mat4::orthographic_rh(
                -half.x,
                half.x,
                -half.y,
                half.y,
                d - content_depth,
                d + content_depth,
            ),
            ProjectionMode::Perspective => {
                // Clamp keeps the near plane in front of the camera even
                // when the dolly sits inside the content envelope.
                let near = (d - content_depth).max(d * 1e-3);
                let far = d + content_depth;
                let visible_proportion = near / d;
                let n = half * visible_proportion;
                frustum_rh(-n.x, n.x, -n.y, n.y, near, far)
            }
        }
    }

    /// Combined projection-view matrix for the viewport.
    pub fn view_projection(&self, viewport: Vec2) -> Mat4 {
        self.projection_matrix(viewport) * self.view_matrix()
    }
}
