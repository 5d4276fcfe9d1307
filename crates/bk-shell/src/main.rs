//! Headless demo host for the viewport engine.
//!
//! Builds a small brick model and drives the engine through the same
//! command protocol a windowed host would use, logging every response.

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use bk_model::{model_from_placements, GridSpacing, Model};
use bk_viewport::{
    execute, SharedViewport, ViewSettingsStore, Viewport, ViewportCommand, ViewportResponse,
};

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bk_shell=info,bk_viewport=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting brick viewport shell");

    // A 2x4 plate wall: three studs-wide bricks in one group.
    let mut model = model_from_placements([
        (Vec3::new(40.0, 8.0, 20.0), Vec3::new(-40.0, 0.0, 0.0)),
        (Vec3::new(40.0, 8.0, 20.0), Vec3::ZERO),
        (Vec3::new(40.0, 8.0, 20.0), Vec3::new(40.0, 0.0, 0.0)),
    ]);
    let mut store = ViewSettingsStore::new();

    let viewport: SharedViewport = Arc::new(Mutex::new(Viewport::new(1024.0, 768.0)));

    let session = [
        ViewportCommand::SetOrientation {
            orientation: bk_viewport::ViewOrientation::Front,
        },
        ViewportCommand::SetProjection {
            projection: bk_viewport::ProjectionMode::Orthographic,
        },
        ViewportCommand::SetGrid {
            grid: GridSpacing::Coarse,
        },
        ViewportCommand::FrameToFit,
        ViewportCommand::SaveView { key: "main".into() },
        ViewportCommand::Pick { x: 512.0, y: 384.0 },
        ViewportCommand::BeginDrag {
            x: 512.0,
            y: 384.0,
            target: bk_model::ElementHandle {
                group: 0,
                element: 1,
            },
        },
        ViewportCommand::DragTo {
            x: 562.0,
            y: 384.0,
            constrain: false,
        },
        ViewportCommand::DragTo {
            x: 580.0,
            y: 350.0,
            constrain: true,
        },
        ViewportCommand::EndDrag,
        ViewportCommand::Rotate { dx: 96.0, dy: -40.0 },
        ViewportCommand::RestoreView { key: "main".into() },
    ];

    for command in session {
        run(&viewport, &mut model, &mut store, command);
    }

    tracing::info!(
        bricks = model.brick_count(),
        "Session complete; final brick positions:"
    );
    for handle in model.handles() {
        if let Some(brick) = model.brick(handle) {
            tracing::info!(
                group = handle.group,
                element = handle.element,
                position = ?brick.position(),
                name = brick.name.as_str(),
                "brick"
            );
        }
    }
}

/// Executes one command under the scoped viewport lock and logs the
/// response, the way an event loop would per input event.
fn run(
    viewport: &SharedViewport,
    model: &mut Model,
    store: &mut ViewSettingsStore,
    command: ViewportCommand,
) {
    tracing::info!(?command, "->");
    let response = {
        let mut guard = viewport.lock();
        execute(&mut guard, model, store, command)
    };
    match &response {
        ViewportResponse::Failed { reason } => tracing::warn!(reason = %reason, "<- failed"),
        other => tracing::info!(response = ?other, "<-"),
    }
}
