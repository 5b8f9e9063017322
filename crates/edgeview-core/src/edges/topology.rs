//! Welded edge/face adjacency

use std::collections::HashMap;

use glam::Vec3;

use crate::mesh::{SurfaceMesh, VertexWelder, face_normal};

pub(crate) struct Face {
    pub vertices: [u32; 3],
    pub normal: Vec3,
}

impl Face {
    /// The vertex of this face that is not on edge (a, b)
    pub fn opposite(&self, a: u32, b: u32) -> u32 {
        self.vertices
            .into_iter()
            .find(|&v| v != a && v != b)
            .unwrap_or(self.vertices[0])
    }
}

pub(crate) struct EdgeRecord {
    /// Endpoints in the orientation the edge was first seen
    pub a: u32,
    pub b: u32,
    /// Indices into `Topology::faces`
    pub faces: Vec<usize>,
}

/// Adjacency of a mesh after welding, in triangle order
pub(crate) struct Topology {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub edges: Vec<EdgeRecord>,
}

impl Topology {
    pub fn build(mesh: &SurfaceMesh, weld_tolerance: f32) -> Self {
        let mut welder = VertexWelder::new(weld_tolerance);
        let mut faces = Vec::new();
        let mut edges: Vec<EdgeRecord> = Vec::new();
        let mut edge_index: HashMap<(u32, u32), usize> = HashMap::new();

        for [i0, i1, i2] in mesh.triangles() {
            let (Some(p0), Some(p1), Some(p2)) =
                (mesh.position(i0), mesh.position(i1), mesh.position(i2))
            else {
                continue;
            };
            if !(p0.is_finite() && p1.is_finite() && p2.is_finite()) {
                continue;
            }

            let v = [welder.insert(p0), welder.insert(p1), welder.insert(p2)];
            if v[0] == v[1] || v[1] == v[2] || v[2] == v[0] {
                continue;
            }
            let positions = welder.positions();
            let Some(normal) = face_normal(
                positions[v[0] as usize],
                positions[v[1] as usize],
                positions[v[2] as usize],
            ) else {
                continue;
            };

            let face = faces.len();
            faces.push(Face {
                vertices: v,
                normal,
            });

            for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
                let key = (a.min(b), a.max(b));
                let index = *edge_index.entry(key).or_insert_with(|| {
                    edges.push(EdgeRecord {
                        a,
                        b,
                        faces: Vec::with_capacity(2),
                    });
                    edges.len() - 1
                });
                edges[index].faces.push(face);
            }
        }

        Self {
            positions: welder.into_positions(),
            faces,
            edges,
        }
    }

    pub fn position(&self, index: u32) -> Vec3 {
        self.positions[index as usize]
    }
}
