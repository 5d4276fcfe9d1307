//! Ray-based hit testing with ordered, decodable hit records.
//!
//! Picking is a two-phase contract. Callers first test with
//! `precise = false`, which culls candidates against bounding boxes only,
//! then re-test the survivors with `precise = true` against full shape
//! geometry. Both phases restrict the test to the viewing ray through the
//! center of a 1x1 device-independent-pixel region at the pick point and
//! record, per candidate, the minimum depth of any fragment there.

use bk_model::{
    Boundable, BoundingBox, DrawOptions, DrawSink, Drawable, ElementHandle, Model, SelectionName,
};
use glam::{Mat4, Vec2, Vec3};

use crate::error::ViewportError;
use crate::math::{ndc_from_screen, COMPONENT_EPSILON};
use crate::unproject::plane_point;

/// The viewing ray through a pick point, as the segment from the near to
/// the far clipping plane in model space.
#[derive(Debug, Clone, Copy)]
pub struct PickRay {
    /// Intersection with the near clipping plane.
    pub near: Vec3,
    /// Intersection with the far clipping plane.
    pub far: Vec3,
}

impl PickRay {
    /// Builds the ray through `point`, the center of the pick region.
    pub fn through(
        point: Vec2,
        view: &Mat4,
        projection: &Mat4,
        viewport: Vec2,
    ) -> Result<Self, ViewportError> {
        let inverse = (*projection * *view).inverse();
        let ndc = ndc_from_screen(point, viewport);
        Ok(Self {
            near: plane_point(&inverse, ndc, 0.0)?,
            far: plane_point(&inverse, ndc, 1.0)?,
        })
    }

    /// Unnormalized direction from near to far plane.
    pub fn direction(&self) -> Vec3 {
        self.far - self.near
    }
}

/// One candidate's contribution to a pick: its encoded name and the
/// minimum fragment depth, scaled to the full `u32` range (0 = near
/// plane, `u32::MAX` = far plane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRecord {
    /// Packed (group, element) selection name.
    pub name: SelectionName,
    /// Minimum fragment depth in the pick region.
    pub depth: u32,
}

/// A hit together with the handle it was tested under.
#[derive(Debug, Clone, Copy)]
pub struct PickHit {
    /// Position of the element in the model.
    pub handle: ElementHandle,
    /// Name and depth recorded for it.
    pub record: HitRecord,
}

/// Ordered pick outcome: the globally nearest hit first, all remaining
/// hits in encounter order. The tail is deliberately not depth-sorted.
#[derive(Debug, Clone, Default)]
pub struct PickResult {
    /// Hits, nearest first.
    pub hits: Vec<PickHit>,
}

impl PickResult {
    /// The nearest hit, if anything was hit at all.
    pub fn first(&self) -> Option<&PickHit> {
        self.hits.first()
    }

    /// Handles in result order.
    pub fn handles(&self) -> Vec<ElementHandle> {
        self.hits.iter().map(|h| h.handle).collect()
    }

    /// True when nothing was hit.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Tests `candidates` against the ray and returns the ordered result.
///
/// Candidates that no longer resolve in the model are skipped as "no
/// match" rather than failing the whole pick. Hidden elements never
/// hit, mirroring the reduced draw-option set used for picking renders.
pub fn pick(
    model: &Model,
    ray: &PickRay,
    candidates: &[ElementHandle],
    precise: bool,
) -> Result<PickResult, ViewportError> {
    let mut hits = Vec::new();

    for &handle in candidates {
        let Some(brick) = model.brick(handle) else {
            tracing::warn!(group = handle.group, element = handle.element,
                "pick candidate does not resolve to a scene element");
            continue;
        };
        if brick.hidden {
            continue;
        }

        let parameter = if precise {
            let mut sink = NearestFragment { ray, best: None };
            brick.draw(DrawOptions::picking(), &mut sink);
            sink.best
        } else {
            segment_aabb(ray, &brick.bounding_box())
        };

        if let Some(t) = parameter {
            let name = handle.selection_name()?;
            hits.push(PickHit {
                handle,
                record: HitRecord {
                    name,
                    depth: depth_from_parameter(t),
                },
            });
        }
    }

    promote_nearest(&mut hits);
    Ok(PickResult { hits })
}

/// Resolves a hit record back to its brick, or "no match" for encodings
/// that fall outside the current model.
pub fn resolve_hit<'m>(model: &'m Model, record: &HitRecord) -> Option<&'m bk_model::Brick> {
    let (group, element) = record.name.decode();
    let brick = model.element_at(group, element);
    if brick.is_none() {
        tracing::warn!(group, element, "hit record does not match any scene element");
    }
    brick
}

/// Moves the globally nearest hit to the front, leaving every other hit
/// in encounter order.
fn promote_nearest(hits: &mut Vec<PickHit>) {
    let Some(nearest) = hits
        .iter()
        .enumerate()
        .min_by_key(|(_, h)| h.record.depth)
        .map(|(i, _)| i)
    else {
        return;
    };
    if nearest > 0 {
        let hit = hits.remove(nearest);
        hits.insert(0, hit);
    }
}

/// Scales a near-to-far segment parameter onto the full depth range.
fn depth_from_parameter(t: f32) -> u32 {
    (f64::from(t.clamp(0.0, 1.0)) * f64::from(u32::MAX)).round() as u32
}

/// Slab test of the ray segment against an axis-aligned box.
///
/// Returns the entry parameter in `[0, 1]`, clamped to the near plane
/// for boxes straddling it.
fn segment_aabb(ray: &PickRay, bbox: &BoundingBox) -> Option<f32> {
    if !bbox.is_valid() {
        return None;
    }
    let direction = ray.direction();
    let inv = direction.recip();

    let t1 = (bbox.min - ray.near) * inv;
    let t2 = (bbox.max - ray.near) * inv;

    let t_enter = t1.min(t2).max_element();
    let t_exit = t1.max(t2).min_element();

    if t_exit < 0.0 || t_enter > t_exit || t_enter > 1.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}

/// Moller-Trumbore test of the ray segment against one triangle.
///
/// Works directly on the unnormalized near-to-far direction so the
/// returned parameter is in segment units; hits outside `(eps, 1]` are
/// behind the near plane or beyond the far plane and rejected.
fn segment_triangle(ray: &PickRay, corners: &[Vec3; 3]) -> Option<f32> {
    let direction = ray.direction();
    let edge1 = corners[1] - corners[0];
    let edge2 = corners[2] - corners[0];

    let h = direction.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < COMPONENT_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.near - corners[0];
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    if t > COMPONENT_EPSILON && t <= 1.0 {
        Some(t)
    } else {
        None
    }
}

/// Draw sink that keeps the nearest fragment parameter on the pick ray.
struct NearestFragment<'r> {
    ray: &'r PickRay,
    best: Option<f32>,
}

impl DrawSink for NearestFragment<'_> {
    fn triangle(&mut self, corners: [Vec3; 3]) {
        if let Some(t) = segment_triangle(self.ray, &corners) {
            self.best = Some(self.best.map_or(t, |b| b.min(t)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bk_model::{model_from_placements, Brick, Group, TriangleMesh, Vertex};
    use glam::Vec2;

    use crate::camera::{ProjectionMode, ViewOrientation, ViewTransform};

    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn front_ray(point: Vec2) -> PickRay {
        let mut view = ViewTransform::new();
        view.set_orientation(ViewOrientation::Front);
        view.set_projection(ProjectionMode::Orthographic);
        PickRay::through(
            point,
            &view.view_matrix(),
            &view.projection_matrix(VIEWPORT),
            VIEWPORT,
        )
        .unwrap()
    }

    #[test]
    fn ray_spans_near_to_far_through_the_content() {
        let ray = front_ray(Vec2::new(400.0, 300.0));
        // Model +z faces the camera in the front view.
        assert!(ray.near.z > 0.0);
        assert!(ray.far.z < 0.0);
        assert!(ray.near.z > ray.far.z);
    }

    #[test]
    fn nearer_of_two_overlapping_candidates_comes_first() {
        let size = glam::Vec3::splat(20.0);
        // Encounter order deliberately lists the farther brick first.
        let model = model_from_placements([
            (size, glam::Vec3::new(0.0, 0.0, 100.0)),
            (size, glam::Vec3::new(0.0, 0.0, 200.0)),
        ]);
        let ray = front_ray(Vec2::new(400.0, 300.0));
        let candidates = model.handles();

        for precise in [false, true] {
            let result = pick(&model, &ray, &candidates, precise).unwrap();
            assert_eq!(result.hits.len(), 2);
            // z=200 sits closer to the front-view camera.
            assert_eq!(result.hits[0].handle.element, 1);
            assert_eq!(result.hits[1].handle.element, 0);
            assert!(result.hits[0].record.depth < result.hits[1].record.depth);
        }
    }

    #[test]
    fn tail_keeps_encounter_order() {
        let size = glam::Vec3::splat(20.0);
        let model = model_from_placements([
            (size, glam::Vec3::new(0.0, 0.0, 50.0)),
            (size, glam::Vec3::new(0.0, 0.0, 300.0)),
            (size, glam::Vec3::new(0.0, 0.0, 150.0)),
        ]);
        let ray = front_ray(Vec2::new(400.0, 300.0));
        let result = pick(&model, &ray, &model.handles(), false).unwrap();

        let elements: Vec<u32> = result.hits.iter().map(|h| h.handle.element).collect();
        // Nearest (z=300) promoted; the rest stay as encountered.
        assert_eq!(elements, vec![1, 0, 2]);
    }

    #[test]
    fn bounds_phase_overmatches_where_geometry_underfills_the_box() {
        // A single triangle occupies half its bounding square; a ray
        // through the empty half must pass the cull yet fail precisely.
        let mesh = TriangleMesh {
            vertices: vec![
                Vertex::new(glam::Vec3::new(-50.0, -50.0, 0.0), glam::Vec3::Z, [1.0; 4]),
                Vertex::new(glam::Vec3::new(50.0, -50.0, 0.0), glam::Vec3::Z, [1.0; 4]),
                Vertex::new(glam::Vec3::new(-50.0, 50.0, 0.0), glam::Vec3::Z, [1.0; 4]),
            ],
            indices: vec![0, 1, 2],
        };
        let mut group = Group::new("step 1");
        group
            .bricks
            .push(Brick::new("wedge", Arc::new(mesh), glam::Mat4::IDENTITY));
        let mut model = Model::new();
        model.add_group(group);

        // Inside the hypotenuse-cut corner: x + y > 0.
        let ray = front_ray(Vec2::new(430.0, 270.0));
        let candidates = model.handles();

        let coarse = pick(&model, &ray, &candidates, false).unwrap();
        assert_eq!(coarse.hits.len(), 1);

        let fine = pick(&model, &ray, &candidates, true).unwrap();
        assert!(fine.is_empty());

        // Through the solid half both phases agree.
        let ray = front_ray(Vec2::new(370.0, 330.0));
        assert_eq!(pick(&model, &ray, &candidates, true).unwrap().hits.len(), 1);
    }

    #[test]
    fn hidden_and_unresolvable_candidates_never_hit() {
        let size = glam::Vec3::splat(20.0);
        let mut model = model_from_placements([(size, glam::Vec3::ZERO)]);
        model.element_at_mut(0, 0).unwrap().hidden = true;

        let ray = front_ray(Vec2::new(400.0, 300.0));
        let mut candidates = model.handles();
        candidates.push(ElementHandle {
            group: 9,
            element: 9,
        });

        let result = pick(&model, &ray, &candidates, false).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn hit_records_decode_back_to_their_brick() {
        let size = glam::Vec3::splat(20.0);
        let model = model_from_placements([(size, glam::Vec3::ZERO)]);
        let ray = front_ray(Vec2::new(400.0, 300.0));
        let result = pick(&model, &ray, &model.handles(), true).unwrap();

        let record = result.first().unwrap().record;
        let brick = resolve_hit(&model, &record).unwrap();
        assert_eq!(brick.name, "brick 0");

        let stale = HitRecord {
            name: SelectionName(record.name.0 + 500),
            depth: 0,
        };
        assert!(resolve_hit(&model, &stale).is_none());
    }

    #[test]
    fn depth_scaling_is_monotonic_and_clamped() {
        assert_eq!(depth_from_parameter(0.0), 0);
        assert_eq!(depth_from_parameter(1.0), u32::MAX);
        assert_eq!(depth_from_parameter(2.0), u32::MAX);
        assert!(depth_from_parameter(0.25) < depth_from_parameter(0.75));
    }
}
