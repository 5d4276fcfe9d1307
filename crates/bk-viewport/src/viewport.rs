//! The viewport engine and its shared-context wrapper.

use std::sync::Arc;

use bk_model::{BoundingBox, ElementHandle, GridSpacing, Model};
use glam::{Vec2, Vec3};
use parking_lot::Mutex;

use crate::axis::ResolvedAxes;
use crate::camera::{ProjectionMode, ViewOrientation, ViewTransform};
use crate::drag::{nudge_displacement, DragSession};
use crate::error::ViewportError;
use crate::pick::{self, PickRay, PickResult};
use crate::rotate::{apply_drag_rotation, rotation_for_drag};
use crate::settings::{SettingsError, ViewSnapshot};
use crate::unproject;

/// The engine state behind one interactive viewport.
///
/// This is the exclusively-shared resource of the interaction model:
/// hosts wrap it in [`SharedViewport`] and every camera read, pick, drag
/// computation or rotation happens under that scoped lock. Operations
/// are synchronous and complete before returning; the only multi-call
/// state is the active drag, which may be abandoned at any point by
/// calling [`Viewport::end_drag`] (or dropping the whole engine).
pub struct Viewport {
    view: ViewTransform,
    size: Vec2,
    grid: GridSpacing,
    drag: Option<ActiveDrag>,
}

struct ActiveDrag {
    session: DragSession,
    target: Option<ElementHandle>,
}

impl Viewport {
    /// Engine for a viewport of the given pixel size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            view: ViewTransform::new(),
            size: Vec2::new(width, height),
            grid: GridSpacing::default(),
            drag: None,
        }
    }

    /// Current view transform.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Current viewport size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Active grid spacing mode.
    pub fn grid(&self) -> GridSpacing {
        self.grid
    }

    /// Changes the grid spacing mode.
    pub fn set_grid(&mut self, grid: GridSpacing) {
        self.grid = grid;
    }

    /// Tracks a viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Jumps to a named orientation, replacing any free rotation.
    pub fn set_orientation(&mut self, orientation: ViewOrientation) {
        self.view.set_orientation(orientation);
    }

    /// Switches projection mode.
    pub fn set_projection(&mut self, projection: ProjectionMode) {
        self.view.set_projection(projection);
    }

    /// Frames the given bounds; returns the resulting camera distance.
    pub fn frame_to_fit(&mut self, bbox: &BoundingBox) -> f32 {
        self.view.frame_to_fit(bbox)
    }

    /// Model principal axes for the current orientation.
    pub fn resolved_axes(&self) -> ResolvedAxes {
        ResolvedAxes::from_inverse_view(&self.view.inverse_view_matrix())
    }

    /// Maps a screen point to model space at the reference depth.
    pub fn unproject(&self, point: Vec2, depth_reference: Vec3) -> Result<Vec3, ViewportError> {
        unproject::unproject(
            point,
            depth_reference,
            &self.view.view_matrix(),
            &self.view.projection_matrix(self.size),
            self.size,
        )
    }

    /// Viewing ray through a screen point.
    pub fn pick_ray(&self, point: Vec2) -> Result<PickRay, ViewportError> {
        PickRay::through(
            point,
            &self.view.view_matrix(),
            &self.view.projection_matrix(self.size),
            self.size,
        )
    }

    /// Single-phase pick over the given candidates.
    pub fn pick(
        &self,
        model: &Model,
        point: Vec2,
        candidates: &[ElementHandle],
        precise: bool,
    ) -> Result<PickResult, ViewportError> {
        let ray = self.pick_ray(point)?;
        pick::pick(model, &ray, candidates, precise)
    }

    /// Two-phase pick over the whole model: bounding boxes cull the
    /// candidate set, full geometry decides among the survivors.
    pub fn pick_at(&self, model: &Model, point: Vec2) -> Result<PickResult, ViewportError> {
        let coarse = self.pick(model, point, &model.handles(), false)?;
        if coarse.is_empty() {
            return Ok(coarse);
        }
        self.pick(model, point, &coarse.handles(), true)
    }

    /// Applies a trackball rotation for a pointer delta.
    ///
    /// Rotating out of a canonical orientation is a one-way transition:
    /// the view becomes free and the projection switches to perspective.
    /// Nothing switches back implicitly.
    pub fn rotate(&mut self, delta: Vec2) -> &ViewTransform {
        if self.view.orientation().is_canonical() {
            self.view.mark_free();
            self.view.set_projection(ProjectionMode::Perspective);
        }
        let axes = self.resolved_axes();
        apply_drag_rotation(&mut self.view, &axes, rotation_for_drag(delta, self.size));
        &self.view
    }

    /// Starts a drag at a screen point; returns the model-space anchor.
    ///
    /// `depth_reference` fixes the plane the gesture moves in, typically
    /// the grabbed element's position. The optional target is carried
    /// for the host's scene mutation and has no effect on geometry.
    pub fn begin_drag(
        &mut self,
        point: Vec2,
        depth_reference: Vec3,
        target: Option<ElementHandle>,
    ) -> Result<Vec3, ViewportError> {
        let anchor = self.unproject(point, depth_reference)?;
        self.drag = Some(ActiveDrag {
            session: DragSession::begin(anchor),
            target,
        });
        Ok(anchor)
    }

    /// Advances the active drag; returns the snapped displacement.
    ///
    /// A zero vector means no movement and must not cause any scene
    /// mutation. On [`ViewportError::AmbiguousDepth`] the element's
    /// position is left untouched by contract. Without an active drag
    /// this is a no-op.
    pub fn drag_to(&mut self, point: Vec2, constrain: bool) -> Result<Vec3, ViewportError> {
        let Some(anchor) = self.drag.as_ref().map(|d| d.session.anchor()) else {
            tracing::warn!("drag update without an active drag session");
            return Ok(Vec3::ZERO);
        };
        let current = self.unproject(point, anchor)?;
        let spacing = self.grid.units();
        match self.drag.as_mut() {
            Some(drag) => Ok(drag.session.displacement(current, constrain, spacing)),
            None => Ok(Vec3::ZERO),
        }
    }

    /// Target element of the active drag, if any.
    pub fn drag_target(&self) -> Option<ElementHandle> {
        self.drag.as_ref().and_then(|d| d.target)
    }

    /// True while a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Ends or abandons the active drag. No further cleanup is needed.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Grid-sized nudge along the resolved axes for a screen-space step.
    pub fn nudge(&self, step: Vec3) -> Vec3 {
        nudge_displacement(&self.resolved_axes(), step, self.grid.units())
    }

    /// Captures the persistable part of the view.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::capture(&self.view)
    }

    /// Restores a persisted snapshot.
    pub fn restore(&mut self, snapshot: &ViewSnapshot) -> Result<(), SettingsError> {
        snapshot.apply(&mut self.view)
    }
}

/// The exclusively-shared engine: one scoped guard per operation, held
/// for the duration of the call and released on every exit path.
pub type SharedViewport = Arc<Mutex<Viewport>>;
