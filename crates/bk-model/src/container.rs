//! Groups and the model root.

use glam::Mat4;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::element::Brick;
use crate::name::{NameError, SelectionName};
use crate::traits::{Boundable, DrawOptions, DrawSink, Drawable};

/// Position of a brick inside the model hierarchy.
///
/// Handles are positional, not identity-based: they stay meaningful only
/// as long as the model is not restructured, which holds for the duration
/// of any single engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Index of the group in the model.
    pub group: u32,
    /// Index of the brick in the group.
    pub element: u32,
}

impl ElementHandle {
    /// Packs the handle into a selection name.
    pub fn selection_name(self) -> Result<SelectionName, NameError> {
        SelectionName::encode(self.group, self.element)
    }

    /// Unpacks a selection name into a handle.
    pub fn from_selection_name(name: SelectionName) -> Self {
        let (group, element) = name.decode();
        Self { group, element }
    }
}

/// An ordered sequence of bricks, typically one building step.
#[derive(Debug, Clone)]
pub struct Group {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Child bricks in authoring order.
    pub bricks: Vec<Brick>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bricks: Vec::new(),
        }
    }
}

impl Boundable for Group {
    fn bounding_box(&self) -> BoundingBox {
        self.bricks
            .iter()
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b.bounding_box()))
    }
}

impl Drawable for Group {
    fn draw(&self, options: DrawOptions, sink: &mut dyn DrawSink) {
        for brick in &self.bricks {
            brick.draw(options, sink);
        }
    }
}

/// The scene-graph root the engine borrows during picking and framing.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Groups in authoring order.
    pub groups: Vec<Group>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group and returns its index.
    pub fn add_group(&mut self, group: Group) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Reverse lookup for decoded hit names.
    pub fn element_at(&self, group: u32, element: u32) -> Option<&Brick> {
        self.groups
            .get(group as usize)
            .and_then(|g| g.bricks.get(element as usize))
    }

    /// Mutable reverse lookup.
    pub fn element_at_mut(&mut self, group: u32, element: u32) -> Option<&mut Brick> {
        self.groups
            .get_mut(group as usize)
            .and_then(|g| g.bricks.get_mut(element as usize))
    }

    /// Resolves a handle to its brick.
    pub fn brick(&self, handle: ElementHandle) -> Option<&Brick> {
        self.element_at(handle.group, handle.element)
    }

    /// Mutable handle resolution.
    pub fn brick_mut(&mut self, handle: ElementHandle) -> Option<&mut Brick> {
        self.element_at_mut(handle.group, handle.element)
    }

    /// Handles of every brick in encounter order.
    pub fn handles(&self) -> Vec<ElementHandle> {
        let mut handles = Vec::with_capacity(self.brick_count());
        for (g, group) in self.groups.iter().enumerate() {
            for e in 0..group.bricks.len() {
                handles.push(ElementHandle {
                    group: g as u32,
                    element: e as u32,
                });
            }
        }
        handles
    }

    /// Total brick count across all groups.
    pub fn brick_count(&self) -> usize {
        self.groups.iter().map(|g| g.bricks.len()).sum()
    }

    /// True if the model holds no bricks.
    pub fn is_empty(&self) -> bool {
        self.brick_count() == 0
    }

    /// Clears every brick's selection flag.
    pub fn deselect_all(&mut self) {
        use crate::traits::Selectable;
        for group in &mut self.groups {
            for brick in &mut group.bricks {
                brick.set_selected(false);
            }
        }
    }
}

impl Boundable for Model {
    fn bounding_box(&self) -> BoundingBox {
        self.groups
            .iter()
            .fold(BoundingBox::empty(), |acc, g| acc.union(&g.bounding_box()))
    }
}

impl Drawable for Model {
    fn draw(&self, options: DrawOptions, sink: &mut dyn DrawSink) {
        for group in &self.groups {
            group.draw(options, sink);
        }
    }
}

/// Convenience builder: one group holding cuboid bricks at the given
/// placements. Test and demo scaffolding.
pub fn model_from_placements(
    placements: impl IntoIterator<Item = (glam::Vec3, glam::Vec3)>,
) -> Model {
    use std::sync::Arc;

    use crate::mesh::TriangleMesh;

    let mut group = Group::new("step 1");
    for (i, (size, position)) in placements.into_iter().enumerate() {
        let mesh = Arc::new(TriangleMesh::cuboid(size, [0.7, 0.7, 0.7, 1.0]));
        group.bricks.push(Brick::new(
            format!("brick {i}"),
            mesh,
            Mat4::from_translation(position),
        ));
    }
    let mut model = Model::new();
    model.add_group(group);
    model
}
