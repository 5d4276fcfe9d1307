//! Capability traits the viewport engine dispatches on.
//!
//! The engine never asks a scene element what it can do at runtime; each
//! capability is a separate trait and the scene decides statically which
//! of its variants implement which.

use glam::Vec3;

use crate::bounds::BoundingBox;

/// Options narrowing what [`Drawable::draw`] emits.
///
/// Picking uses the reduced set: hidden elements stay invisible to the
/// hit test exactly as they are invisible on screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOptions {
    /// Emit geometry for elements flagged hidden.
    pub include_hidden: bool,
}

impl DrawOptions {
    /// Option set used during picking renders.
    pub fn picking() -> Self {
        Self {
            include_hidden: false,
        }
    }
}

/// Receives model-space triangles from a draw call.
pub trait DrawSink {
    /// Accepts one triangle, corners in model space.
    fn triangle(&mut self, corners: [Vec3; 3]);
}

/// Anything with model-space bounds.
pub trait Boundable {
    /// Axis-aligned bounds in model space.
    fn bounding_box(&self) -> BoundingBox;
}

/// Anything that can emit its geometry into a sink.
pub trait Drawable {
    /// Emits model-space triangles honoring `options`.
    fn draw(&self, options: DrawOptions, sink: &mut dyn DrawSink);
}

/// Anything that carries a selection flag.
pub trait Selectable {
    /// Current selection state.
    fn is_selected(&self) -> bool;
    /// Replaces the selection state.
    fn set_selected(&mut self, selected: bool);
}
