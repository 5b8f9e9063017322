//! Vertex welding
//!
//! Coincident vertices are matched with a spatial hash whose cell size equals
//! the weld tolerance. Lookups probe the 27 neighbouring cells so two points
//! that straddle a cell boundary still weld.

use std::collections::HashMap;

use glam::Vec3;

use super::SurfaceMesh;

/// Incrementally welds positions that lie within a tolerance of each other
#[derive(Debug, Clone)]
pub struct VertexWelder {
    tolerance: f32,
    cells: HashMap<[i64; 3], Vec<u32>>,
    positions: Vec<Vec3>,
}

impl VertexWelder {
    /// Create a welder. Non-positive tolerances are raised to `f32::EPSILON`.
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance: tolerance.max(f32::EPSILON),
            cells: HashMap::new(),
            positions: Vec::new(),
        }
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    fn cell_of(&self, p: Vec3) -> [i64; 3] {
        let q = p / self.tolerance;
        [q.x.floor() as i64, q.y.floor() as i64, q.z.floor() as i64]
    }

    /// Return the index of an existing position within tolerance, if any
    pub fn find(&self, p: Vec3) -> Option<u32> {
        let cell = self.cell_of(p);
        let tol2 = self.tolerance * self.tolerance;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    // Cells of huge or infinite coordinates saturate at the i64 range
                    let Some(key) = neighbour_cell(cell, [dx, dy, dz]) else {
                        continue;
                    };
                    let Some(candidates) = self.cells.get(&key) else {
                        continue;
                    };
                    if let Some(&found) = candidates
                        .iter()
                        .find(|&&i| self.positions[i as usize].distance_squared(p) <= tol2)
                    {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Weld a position, returning the index of the representative vertex
    pub fn insert(&mut self, p: Vec3) -> u32 {
        if let Some(existing) = self.find(p) {
            return existing;
        }

        let index = self.positions.len() as u32;
        let cell = self.cell_of(p);
        self.positions.push(p);
        self.cells.entry(cell).or_default().push(index);
        index
    }

    /// Number of unique positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<Vec3> {
        self.positions
    }
}

fn neighbour_cell(cell: [i64; 3], offset: [i64; 3]) -> Option<[i64; 3]> {
    Some([
        cell[0].checked_add(offset[0])?,
        cell[1].checked_add(offset[1])?,
        cell[2].checked_add(offset[2])?,
    ])
}

/// Merge vertices whose attributes all match within `tolerance`.
///
/// Positions are welded spatially; if the mesh also carries normals or UVs,
/// those must agree too, so stripping attributes first (see
/// [`SurfaceMesh::position_only`]) merges purely by position. Triangles that
/// reference missing vertices are dropped. Attribute values of the first
/// occurrence are kept.
pub fn merge_vertices(mesh: &SurfaceMesh, tolerance: f32) -> SurfaceMesh {
    let has_normals = mesh.has_normals();
    let has_uvs = mesh.has_uvs();

    let mut welder = VertexWelder::new(tolerance);
    let scale = 1.0 / welder.tolerance();
    let quantize = |v: f32| (v * scale).round() as i64;

    let mut key_map: HashMap<(u32, [i64; 3], [i64; 2]), u32> = HashMap::new();
    let mut remap: Vec<u32> = Vec::with_capacity(mesh.positions.len());
    let mut merged = SurfaceMesh::new();

    for (i, p) in mesh.positions.iter().enumerate() {
        let position_id = welder.insert(Vec3::from(*p));
        let normal_key = if has_normals {
            let n = mesh.normals[i];
            [quantize(n[0]), quantize(n[1]), quantize(n[2])]
        } else {
            [0; 3]
        };
        let uv_key = if has_uvs {
            let uv = mesh.uvs[i];
            [quantize(uv[0]), quantize(uv[1])]
        } else {
            [0; 2]
        };

        let next = merged.positions.len() as u32;
        let index = *key_map
            .entry((position_id, normal_key, uv_key))
            .or_insert_with(|| {
                merged.positions.push(*p);
                if has_normals {
                    merged.normals.push(mesh.normals[i]);
                }
                if has_uvs {
                    merged.uvs.push(mesh.uvs[i]);
                }
                next
            });
        remap.push(index);
    }

    for tri in mesh.triangles() {
        let mapped: Option<Vec<u32>> = tri
            .iter()
            .map(|&i| remap.get(i as usize).copied())
            .collect();
        if let Some(mapped) = mapped {
            merged.indices.extend(mapped);
        }
    }

    merged
}
