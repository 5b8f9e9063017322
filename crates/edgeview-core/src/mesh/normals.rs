//! Face and vertex normal calculation

use glam::Vec3;

use super::SurfaceMesh;

/// Unit normal of a counter-clockwise triangle, or None if it has no area
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    (b - a).cross(c - a).try_normalize()
}

/// Recompute smooth per-vertex normals by accumulating area-weighted face normals
pub fn compute_vertex_normals(mesh: &mut SurfaceMesh) {
    let mut accum = vec![Vec3::ZERO; mesh.positions.len()];

    for [i0, i1, i2] in mesh.triangles() {
        let (Some(a), Some(b), Some(c)) = (mesh.position(i0), mesh.position(i1), mesh.position(i2))
        else {
            continue;
        };
        // Unnormalized cross product weights by area
        let n = (b - a).cross(c - a);
        accum[i0 as usize] += n;
        accum[i1 as usize] += n;
        accum[i2 as usize] += n;
    }

    mesh.normals = accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect();
}
