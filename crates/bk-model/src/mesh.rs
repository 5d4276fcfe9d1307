//! Triangle meshes backing pickable bricks.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::bounds::BoundingBox;

/// Vertex layout shared with the rendering collaborator.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    /// Position in mesh space.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// RGBA color.
    pub color: [f32; 4],
}

impl Vertex {
    /// Creates a vertex with the given position, normal and color.
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }

    /// Position as a vector.
    pub fn pos(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Indexed triangle mesh in mesh-local space.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Index buffer; every three indices form one triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].pos(),
                self.vertices[tri[1] as usize].pos(),
                self.vertices[tri[2] as usize].pos(),
            ]
        })
    }

    /// Bounds of all vertices in mesh space.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().map(Vertex::pos))
    }

    /// Builds an axis-aligned cuboid centered at the origin.
    ///
    /// Stud-scale bricks are cuboids at this level of detail; the part
    /// library supplies full shapes.
    pub fn cuboid(size: Vec3, color: [f32; 4]) -> Self {
        let h = size * 0.5;
        // One quad per face, normals outward, CCW winding seen from outside.
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (
                Vec3::X,
                [
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(h.x, -h.y, h.z),
                ],
            ),
            (
                Vec3::NEG_X,
                [
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(-h.x, -h.y, -h.z),
                ],
            ),
            (
                Vec3::Y,
                [
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(-h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(h.x, h.y, -h.z),
                ],
            ),
            (
                Vec3::NEG_Y,
                [
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(h.x, -h.y, h.z),
                ],
            ),
            (
                Vec3::Z,
                [
                    Vec3::new(-h.x, -h.y, h.z),
                    Vec3::new(h.x, -h.y, h.z),
                    Vec3::new(h.x, h.y, h.z),
                    Vec3::new(-h.x, h.y, h.z),
                ],
            ),
            (
                Vec3::NEG_Z,
                [
                    Vec3::new(h.x, -h.y, -h.z),
                    Vec3::new(-h.x, -h.y, -h.z),
                    Vec3::new(-h.x, h.y, -h.z),
                    Vec3::new(h.x, h.y, -h.z),
                ],
            ),
        ];

        let mut mesh = Self::default();
        for (normal, quad) in faces {
            let base = mesh.vertices.len() as u32;
            for corner in quad {
                mesh.vertices.push(Vertex::new(corner, normal, color));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_twelve_triangles() {
        let mesh = TriangleMesh::cuboid(Vec3::splat(2.0), [1.0; 4]);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices.len(), 24);
    }

    #[test]
    fn cuboid_bounds_match_size() {
        let mesh = TriangleMesh::cuboid(Vec3::new(20.0, 8.0, 20.0), [1.0; 4]);
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Vec3::new(-10.0, -4.0, -10.0));
        assert_eq!(bbox.max, Vec3::new(10.0, 4.0, 10.0));
    }

    #[test]
    fn triangles_iterate_positions() {
        let mesh = TriangleMesh::cuboid(Vec3::splat(1.0), [1.0; 4]);
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 12);
        for tri in tris {
            for v in tri {
                assert!(mesh.bounding_box().contains_point(v));
            }
        }
    }
}
