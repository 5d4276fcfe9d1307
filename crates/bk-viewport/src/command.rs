//! Host-facing command protocol.
//!
//! Hosts drive the engine with explicit command values and receive
//! explicit responses; there is no event dispatch or responder chain to
//! subscribe to. Commands serialize, so a host can script, log or replay
//! an interaction session.

use bk_model::{Boundable, ElementHandle, GridSpacing, Model, Selectable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{ProjectionMode, ViewOrientation};
use crate::settings::ViewSettingsStore;
use crate::viewport::Viewport;

/// One engine operation requested by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewportCommand {
    /// Track a viewport resize.
    Resize {
        /// New width in pixels.
        width: f32,
        /// New height in pixels.
        height: f32,
    },
    /// Jump to a named orientation.
    SetOrientation {
        /// Target orientation.
        orientation: ViewOrientation,
    },
    /// Switch projection mode.
    SetProjection {
        /// Target projection.
        projection: ProjectionMode,
    },
    /// Change the snapping grid.
    SetGrid {
        /// Target grid spacing mode.
        grid: GridSpacing,
    },
    /// Dolly the camera to show the whole model.
    FrameToFit,
    /// Trackball rotation for a pointer delta.
    Rotate {
        /// Horizontal pointer delta in pixels.
        dx: f32,
        /// Vertical pointer delta in pixels (positive = down).
        dy: f32,
    },
    /// Two-phase pick; the nearest hit becomes the selection.
    Pick {
        /// Screen x of the pick point.
        x: f32,
        /// Screen y of the pick point.
        y: f32,
    },
    /// Start dragging an element under the pointer.
    BeginDrag {
        /// Screen x of the grab point.
        x: f32,
        /// Screen y of the grab point.
        y: f32,
        /// Element being dragged.
        target: ElementHandle,
    },
    /// Advance the active drag.
    DragTo {
        /// Screen x of the pointer.
        x: f32,
        /// Screen y of the pointer.
        y: f32,
        /// Constrain movement to the dominant axis.
        constrain: bool,
    },
    /// Finish or abandon the active drag.
    EndDrag,
    /// Keyboard nudge along the resolved axes.
    Nudge {
        /// Element to nudge.
        target: ElementHandle,
        /// Steps along screen right.
        step_x: f32,
        /// Steps along screen up.
        step_y: f32,
        /// Steps out of the screen.
        step_z: f32,
    },
    /// Persist the current orientation/projection under a key.
    SaveView {
        /// Caller-chosen view name.
        key: String,
    },
    /// Restore a previously saved view.
    RestoreView {
        /// Caller-chosen view name.
        key: String,
    },
}

/// Outcome of one command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum ViewportResponse {
    /// The command completed with nothing further to report.
    Done,
    /// Camera distance after a framing command.
    CameraDistance {
        /// Signed camera distance.
        distance: f32,
    },
    /// Ordered pick outcome, nearest first.
    Picked {
        /// Handles of every hit.
        handles: Vec<ElementHandle>,
    },
    /// An element moved by the given displacement.
    Moved {
        /// The element that moved.
        target: ElementHandle,
        /// Model-space displacement applied.
        displacement: [f32; 3],
    },
    /// The gesture produced no movement; nothing was mutated.
    Unmoved,
    /// Orientation and projection after a view change.
    View {
        /// Current orientation tag.
        orientation: ViewOrientation,
        /// Current projection mode.
        projection: ProjectionMode,
    },
    /// The command failed; scene state is unchanged.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl ViewportResponse {
    fn view_of(viewport: &Viewport) -> Self {
        ViewportResponse::View {
            orientation: viewport.view().orientation(),
            projection: viewport.view().projection(),
        }
    }

    fn failed(reason: impl ToString) -> Self {
        ViewportResponse::Failed {
            reason: reason.to_string(),
        }
    }
}

/// Executes a single command against the engine, model and settings.
pub fn execute(
    viewport: &mut Viewport,
    model: &mut Model,
    store: &mut ViewSettingsStore,
    command: ViewportCommand,
) -> ViewportResponse {
    match command {
        ViewportCommand::Resize { width, height } => {
            viewport.resize(width, height);
            ViewportResponse::Done
        }
        ViewportCommand::SetOrientation { orientation } => {
            viewport.set_orientation(orientation);
            ViewportResponse::view_of(viewport)
        }
        ViewportCommand::SetProjection { projection } => {
            viewport.set_projection(projection);
            ViewportResponse::view_of(viewport)
        }
        ViewportCommand::SetGrid { grid } => {
            viewport.set_grid(grid);
            ViewportResponse::Done
        }
        ViewportCommand::FrameToFit => {
            let distance = viewport.frame_to_fit(&model.bounding_box());
            ViewportResponse::CameraDistance { distance }
        }
        ViewportCommand::Rotate { dx, dy } => {
            viewport.rotate(Vec2::new(dx, dy));
            ViewportResponse::view_of(viewport)
        }
        ViewportCommand::Pick { x, y } => {
            match viewport.pick_at(model, Vec2::new(x, y)) {
                Ok(result) => {
                    model.deselect_all();
                    if let Some(first) = result.first()
                        && let Some(brick) = model.brick_mut(first.handle)
                    {
                        brick.set_selected(true);
                    }
                    ViewportResponse::Picked {
                        handles: result.handles(),
                    }
                }
                Err(e) => ViewportResponse::failed(e),
            }
        }
        ViewportCommand::BeginDrag { x, y, target } => {
            let Some(reference) = model.brick(target).map(|b| b.position()) else {
                return ViewportResponse::failed("drag target does not resolve");
            };
            match viewport.begin_drag(Vec2::new(x, y), reference, Some(target)) {
                Ok(_) => ViewportResponse::Done,
                Err(e) => ViewportResponse::failed(e),
            }
        }
        ViewportCommand::DragTo { x, y, constrain } => {
            let target = viewport.drag_target();
            match viewport.drag_to(Vec2::new(x, y), constrain) {
                // Zero displacement is a contract-level no-op: the scene
                // must not be touched or dirtied.
                Ok(d) if d == Vec3::ZERO => ViewportResponse::Unmoved,
                Ok(d) => {
                    if let Some(t) = target
                        && let Some(brick) = model.brick_mut(t)
                    {
                        brick.move_by(d);
                        ViewportResponse::Moved {
                            target: t,
                            displacement: d.to_array(),
                        }
                    } else {
                        ViewportResponse::Unmoved
                    }
                }
                // On ambiguous depth the element stays exactly where the
                // previous tick left it.
                Err(e) => ViewportResponse::failed(e),
            }
        }
        ViewportCommand::EndDrag => {
            viewport.end_drag();
            ViewportResponse::Done
        }
        ViewportCommand::Nudge {
            target,
            step_x,
            step_y,
            step_z,
        } => {
            let d = viewport.nudge(Vec3::new(step_x, step_y, step_z));
            if d == Vec3::ZERO {
                return ViewportResponse::Unmoved;
            }
            match model.brick_mut(target) {
                Some(brick) => {
                    brick.move_by(d);
                    ViewportResponse::Moved {
                        target,
                        displacement: d.to_array(),
                    }
                }
                None => ViewportResponse::failed("nudge target does not resolve"),
            }
        }
        ViewportCommand::SaveView { key } => {
            store.set(key, viewport.snapshot());
            ViewportResponse::Done
        }
        ViewportCommand::RestoreView { key } => {
            let Some(snapshot) = store.get(&key) else {
                return ViewportResponse::failed(format!("no saved view named {key:?}"));
            };
            match viewport.restore(&snapshot) {
                Ok(()) => ViewportResponse::view_of(viewport),
                Err(e) => ViewportResponse::failed(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bk_model::model_from_placements;
    use glam::Vec3;

    use super::*;

    fn session() -> (Viewport, Model, ViewSettingsStore) {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_orientation(ViewOrientation::Front);
        viewport.set_projection(ProjectionMode::Orthographic);
        let model = model_from_placements([(Vec3::splat(20.0), Vec3::ZERO)]);
        (viewport, model, ViewSettingsStore::new())
    }

    #[test]
    fn pick_selects_the_nearest_element() {
        let (mut viewport, mut model, mut store) = session();
        let response = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::Pick { x: 400.0, y: 300.0 },
        );
        match response {
            ViewportResponse::Picked { handles } => assert_eq!(handles.len(), 1),
            other => panic!("unexpected response: {other:?}"),
        }
        assert!(model.element_at(0, 0).unwrap().is_selected());
    }

    #[test]
    fn drag_session_moves_the_target_by_grid_multiples() {
        let (mut viewport, mut model, mut store) = session();
        viewport.set_grid(GridSpacing::Coarse);
        let target = ElementHandle { group: 0, element: 0 };

        let begun = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::BeginDrag { x: 400.0, y: 300.0, target },
        );
        assert!(matches!(begun, ViewportResponse::Done));

        let moved = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::DragTo { x: 450.0, y: 300.0, constrain: false },
        );
        match moved {
            ViewportResponse::Moved { displacement, .. } => {
                assert!(displacement[0] != 0.0);
                assert_eq!(displacement[0] % 20.0, 0.0);
                assert_eq!(displacement[1], 0.0);
                assert_eq!(displacement[2], 0.0);
                assert_eq!(
                    model.element_at(0, 0).unwrap().position(),
                    Vec3::new(displacement[0], 0.0, 0.0)
                );
            }
            other => panic!("unexpected response: {other:?}"),
        }

        // Holding the pointer still is a no-op, not a zero-sized move.
        let still = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::DragTo { x: 450.0, y: 300.0, constrain: false },
        );
        assert!(matches!(still, ViewportResponse::Unmoved));

        let ended = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::EndDrag,
        );
        assert!(matches!(ended, ViewportResponse::Done));
    }

    #[test]
    fn save_and_restore_round_trip_the_view() {
        let (mut viewport, mut model, mut store) = session();
        execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::SaveView { key: "main".into() },
        );

        // Rotate away (one-way into free perspective)...
        execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::Rotate { dx: 55.0, dy: -20.0 },
        );
        assert_eq!(viewport.view().orientation(), ViewOrientation::ThreeD);

        // ...then restore the saved canonical view explicitly.
        let restored = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::RestoreView { key: "main".into() },
        );
        match restored {
            ViewportResponse::View {
                orientation,
                projection,
            } => {
                assert_eq!(orientation, ViewOrientation::Front);
                assert_eq!(projection, ProjectionMode::Orthographic);
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let missing = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::RestoreView { key: "gone".into() },
        );
        assert!(matches!(missing, ViewportResponse::Failed { .. }));
    }

    #[test]
    fn nudge_moves_along_resolved_axes() {
        let (mut viewport, mut model, mut store) = session();
        viewport.set_grid(GridSpacing::Coarse);
        let target = ElementHandle { group: 0, element: 0 };

        let response = execute(
            &mut viewport,
            &mut model,
            &mut store,
            ViewportCommand::Nudge { target, step_x: 1.0, step_y: 0.0, step_z: 0.0 },
        );
        match response {
            ViewportResponse::Moved { displacement, .. } => {
                assert_eq!(displacement, [20.0, 0.0, 0.0]);
            }
            other => panic!("unexpected response: {other:?}"),
        }
        assert_eq!(
            model.element_at(0, 0).unwrap().position(),
            Vec3::new(20.0, 0.0, 0.0)
        );
    }

    #[test]
    fn commands_serialize_for_session_replay() {
        let command = ViewportCommand::DragTo {
            x: 450.0,
            y: 300.0,
            constrain: true,
        };
        let text = ron::to_string(&command).unwrap();
        let parsed: ViewportCommand = ron::from_str(&text).unwrap();
        assert!(matches!(
            parsed,
            ViewportCommand::DragTo { constrain: true, .. }
        ));
    }
}
