//! Brick Editor Viewport Engine
//!
//! Translates 2-D pointer input into 3-D model-space effects and back:
//! camera and projection modeling, screen-to-model unprojection, picking
//! with hit decoding, grid-snapped drag displacement, and trackball-style
//! rotation.
//!
//! # Module Structure
//!
//! ```text
//! bk-viewport/
//! ├── math.rs       # Greatest-component isolation, grid snapping, frustum
//! ├── camera.rs     # ViewTransform, orientations, framing, matrices
//! ├── axis.rs       # Screen axes resolved onto model principal axes
//! ├── unproject.rs  # Screen point + depth reference -> model point
//! ├── pick.rs       # Ray-based hit testing, hit records, ordering
//! ├── drag.rs       # Drag sessions, constrained/snapped displacement
//! ├── rotate.rs     # Pointer-delta rotation about resolved axes
//! ├── settings.rs   # Persisted per-view orientation/projection state
//! ├── command.rs    # Host-facing command/response dispatch
//! ├── viewport.rs   # The engine proper plus the shared-context alias
//! └── error.rs      # Typed numeric-domain failures
//! ```
//!
//! # Concurrency
//!
//! The engine state is one exclusively-shared mutable resource. Hosts
//! wrap it in [`SharedViewport`] and take the scoped mutex guard around
//! every camera read, pick, or drag computation; the guard releases on
//! every exit path. All operations are synchronous; a [`drag::DragSession`]
//! may be abandoned between calls with no cleanup beyond dropping it.

pub mod axis;
pub mod camera;
pub mod command;
pub mod drag;
pub mod error;
pub mod math;
pub mod pick;
pub mod rotate;
pub mod settings;
pub mod unproject;
pub mod viewport;

pub use axis::ResolvedAxes;
pub use camera::{ProjectionMode, ViewOrientation, ViewTransform};
pub use command::{execute, ViewportCommand, ViewportResponse};
pub use drag::DragSession;
pub use error::ViewportError;
pub use pick::{HitRecord, PickHit, PickRay, PickResult};
pub use settings::{ViewSettingsStore, ViewSnapshot};
pub use viewport::{SharedViewport, Viewport};
