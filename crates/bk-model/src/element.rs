//! Leaf scene elements.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::mesh::TriangleMesh;
use crate::traits::{Boundable, DrawOptions, DrawSink, Drawable, Selectable};

/// A placed brick: shared mesh plus a model-space placement.
#[derive(Debug, Clone)]
pub struct Brick {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Mesh-space to model-space placement.
    pub transform: Mat4,
    /// Geometry shared with every other placement of the same part.
    pub mesh: Arc<TriangleMesh>,
    /// RGBA display color.
    pub color: [f32; 4],
    /// Hidden bricks neither draw nor pick.
    pub hidden: bool,
    selected: bool,
}

impl Brick {
    /// Creates a brick at the given placement.
    pub fn new(name: impl Into<String>, mesh: Arc<TriangleMesh>, transform: Mat4) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform,
            mesh,
            color: [0.7, 0.7, 0.7, 1.0],
            hidden: false,
            selected: false,
        }
    }

    /// Model-space position (translation part of the placement).
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Translates the brick by `displacement` in model space.
    ///
    /// This is the single mutation the viewport engine hands back after a
    /// drag or nudge; a zero displacement must not reach this call.
    pub fn move_by(&mut self, displacement: Vec3) {
        self.transform = Mat4::from_translation(displacement) * self.transform;
    }
}

impl Boundable for Brick {
    fn bounding_box(&self) -> BoundingBox {
        self.mesh.bounding_box().transformed(&self.transform)
    }
}

impl Drawable for Brick {
    fn draw(&self, options: DrawOptions, sink: &mut dyn DrawSink) {
        if self.hidden && !options.include_hidden {
            return;
        }
        for tri in self.mesh.triangles() {
            sink.triangle(tri.map(|v| self.transform.transform_point3(v)));
        }
    }
}

impl Selectable for Brick {
    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
