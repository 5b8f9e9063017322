//! Triangle meshes, vertex welding, primitives and OBJ parsing

mod normals;
mod obj;
mod primitive;
mod weld;

use glam::Vec3;

pub use normals::{compute_vertex_normals, face_normal};
pub use obj::{NamedMesh, load_obj, load_obj_from_bytes};
pub use primitive::{
    PrimitiveKind, generate_cone, generate_cylinder, generate_dodecahedron,
    generate_icosahedron, generate_octahedron, generate_primitive, generate_torus,
};
pub use weld::{VertexWelder, merge_vertices};

/// An indexed triangle mesh.
///
/// Normals and UVs are per-vertex and optional: an empty vector means the
/// attribute is absent. Positions are always present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (empty or one per position)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (empty or one per position)
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from positions and indices only
    pub fn from_positions(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals: Vec::new(),
            uvs: Vec::new(),
            indices,
        }
    }

    /// Create a non-indexed mesh: every three positions form a triangle
    pub fn from_triangle_soup(positions: Vec<[f32; 3]>) -> Self {
        let indices = (0..positions.len() as u32).collect();
        Self::from_positions(positions, indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles in the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.positions.len()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && self.uvs.len() == self.positions.len()
    }

    /// Copy of this mesh with every attribute except position removed
    pub fn position_only(&self) -> Self {
        Self::from_positions(self.positions.clone(), self.indices.clone())
    }

    /// Iterate over triangles as index triples. A trailing partial triangle is ignored.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Position of a vertex, or None if the index is out of range
    pub fn position(&self, index: u32) -> Option<Vec3> {
        self.positions.get(index as usize).map(|p| Vec3::from(*p))
    }

    /// Axis-aligned bounds of all positions
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

/// Mesh-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_only_strips_attributes() {
        let mut mesh = SurfaceMesh::from_positions(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        mesh.normals = vec![[0.0, 0.0, 1.0]; 3];
        mesh.uvs = vec![[0.0, 0.0]; 3];

        let stripped = mesh.position_only();
        assert!(!stripped.has_normals());
        assert!(!stripped.has_uvs());
        assert_eq!(stripped.positions, mesh.positions);
        assert_eq!(stripped.indices, mesh.indices);
    }

    #[test]
    fn test_triangles_ignore_partial() {
        let mesh = SurfaceMesh::from_positions(vec![[0.0; 3]; 4], vec![0, 1, 2, 3]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn test_bounds() {
        let mesh = SurfaceMesh::from_triangle_soup(vec![
            [-1.0, 0.0, 2.0],
            [3.0, -2.0, 0.0],
            [0.0, 5.0, 1.0],
        ]);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 5.0, 2.0));
        assert!(SurfaceMesh::new().bounds().is_none());
    }
}
