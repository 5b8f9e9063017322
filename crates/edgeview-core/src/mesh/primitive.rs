//! Procedural primitive meshes

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::SurfaceMesh;
use super::normals::face_normal;

/// Built-in primitive shapes that can stand in for a loaded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    Cylinder,
    Torus,
    Cone,
    Icosahedron,
    Octahedron,
    Dodecahedron,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Cylinder,
        PrimitiveKind::Torus,
        PrimitiveKind::Cone,
        PrimitiveKind::Icosahedron,
        PrimitiveKind::Octahedron,
        PrimitiveKind::Dodecahedron,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Icosahedron => "icosahedron",
            PrimitiveKind::Octahedron => "octahedron",
            PrimitiveKind::Dodecahedron => "dodecahedron",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| format!("Unknown primitive: {s}"))
    }
}

/// Generate a primitive with its stock dimensions
pub fn generate_primitive(kind: PrimitiveKind) -> SurfaceMesh {
    match kind {
        PrimitiveKind::Cylinder => generate_cylinder(1.0, 1.0, 2.0, 20),
        PrimitiveKind::Torus => generate_torus(2.0, 0.5, 8, 24),
        PrimitiveKind::Cone => generate_cone(1.0, 2.0, 10),
        PrimitiveKind::Icosahedron => generate_icosahedron(2.0, 2),
        PrimitiveKind::Octahedron => generate_octahedron(2.0, 0),
        PrimitiveKind::Dodecahedron => generate_dodecahedron(2.0, 0),
    }
}

/// Cylinder along Y centered at the origin. A zero radius omits that cap.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> SurfaceMesh {
    let segments = radial_segments.max(3);
    let half = height / 2.0;
    let slope = if height.abs() > f32::EPSILON {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    let mut mesh = SurfaceMesh::new();
    let mut rows: [Vec<u32>; 2] = [Vec::new(), Vec::new()];

    // Side wall: row 0 is the top ring, row 1 the bottom ring
    for (row, (y, radius)) in [(half, radius_top), (-half, radius_bottom)]
        .into_iter()
        .enumerate()
    {
        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            rows[row].push(mesh.positions.len() as u32);
            mesh.positions.push([radius * sin, y, radius * cos]);
            mesh.normals
                .push(Vec3::new(sin, slope, cos).normalize().to_array());
            mesh.uvs.push([x as f32 / segments as f32, 1.0 - row as f32]);
        }
    }

    for x in 0..segments as usize {
        let a = rows[0][x];
        let b = rows[1][x];
        let c = rows[1][x + 1];
        let d = rows[0][x + 1];
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if radius_top > 0.0 {
        push_cap(&mut mesh, radius_top, half, segments, true);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut mesh, radius_bottom, -half, segments, false);
    }

    mesh
}

fn push_cap(mesh: &mut SurfaceMesh, radius: f32, y: f32, segments: u32, top: bool) {
    let normal = if top { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = mesh.positions.len() as u32;
    mesh.positions.push([0.0, y, 0.0]);
    mesh.normals.push(normal);
    mesh.uvs.push([0.5, 0.5]);

    for x in 0..=segments {
        let theta = x as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.positions.push([radius * sin, y, radius * cos]);
        mesh.normals.push(normal);
        mesh.uvs.push([cos * 0.5 + 0.5, sin * 0.5 + 0.5]);
    }

    for x in 0..segments {
        let i = center + 1 + x;
        if top {
            mesh.indices.extend_from_slice(&[center, i, i + 1]);
        } else {
            mesh.indices.extend_from_slice(&[center, i + 1, i]);
        }
    }
}

/// Cone along Y with its apex up
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> SurfaceMesh {
    generate_cylinder(0.0, radius, height, radial_segments)
}

/// Torus in the XY plane
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> SurfaceMesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = SurfaceMesh::new();

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let v = j as f32 / radial as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.positions.push(position.to_array());
            mesh.normals
                .push((position - center).normalize_or_zero().to_array());
            mesh.uvs
                .push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    let stride = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

const ICOSAHEDRON_INDICES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const OCTAHEDRON_INDICES: [u32; 24] = [
    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
];

const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13, 7, 19, 17, 7, 17, 6, 7, 6, 15, 17, 4, 8, 17, 8, 10, 17, 10, 6,
    8, 0, 16, 8, 16, 2, 8, 2, 10, 0, 12, 1, 0, 1, 18, 0, 18, 16, 6, 10, 2, 6, 2, 13, 6, 13, 15, 2,
    16, 18, 2, 18, 3, 2, 3, 13, 18, 1, 9, 18, 9, 11, 18, 11, 3, 4, 14, 12, 4, 12, 0, 4, 0, 8, 11, 9,
    5, 11, 5, 19, 11, 19, 7, 19, 5, 14, 19, 14, 4, 19, 4, 17, 1, 12, 14, 1, 14, 5, 1, 5, 9,
];

fn golden_ratio() -> f32 {
    (1.0 + 5.0_f32.sqrt()) / 2.0
}

/// Icosahedron of the given circumradius, subdivided `detail` times
pub fn generate_icosahedron(radius: f32, detail: u32) -> SurfaceMesh {
    let t = golden_ratio();
    let vertices = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    generate_polyhedron(&vertices, &ICOSAHEDRON_INDICES, radius, detail)
}

/// Octahedron of the given circumradius, subdivided `detail` times
pub fn generate_octahedron(radius: f32, detail: u32) -> SurfaceMesh {
    generate_polyhedron(&OCTAHEDRON_VERTICES, &OCTAHEDRON_INDICES, radius, detail)
}

/// Dodecahedron of the given circumradius, subdivided `detail` times
pub fn generate_dodecahedron(radius: f32, detail: u32) -> SurfaceMesh {
    let t = golden_ratio();
    let r = 1.0 / t;
    let vertices = [
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        [0.0, -r, -t],
        [0.0, -r, t],
        [0.0, r, -t],
        [0.0, r, t],
        [-r, -t, 0.0],
        [-r, t, 0.0],
        [r, -t, 0.0],
        [r, t, 0.0],
        [-t, 0.0, -r],
        [t, 0.0, -r],
        [-t, 0.0, r],
        [t, 0.0, r],
    ];
    generate_polyhedron(&vertices, &DODECAHEDRON_INDICES, radius, detail)
}

/// Build a polyhedron by subdividing each face and projecting onto a sphere.
///
/// The result is a triangle soup: flat normals when `detail == 0`, smooth
/// spherical normals otherwise.
fn generate_polyhedron(
    vertices: &[[f32; 3]],
    indices: &[u32],
    radius: f32,
    detail: u32,
) -> SurfaceMesh {
    let mut soup: Vec<Vec3> = Vec::new();

    for face in indices.chunks_exact(3) {
        let a = Vec3::from(vertices[face[0] as usize]);
        let b = Vec3::from(vertices[face[1] as usize]);
        let c = Vec3::from(vertices[face[2] as usize]);
        subdivide_face(a, b, c, detail, &mut soup);
    }

    let projected: Vec<Vec3> = soup
        .into_iter()
        .map(|p| p.normalize_or_zero() * radius)
        .collect();

    let mut mesh = SurfaceMesh::from_triangle_soup(projected.iter().map(|p| p.to_array()).collect());
    mesh.normals = if detail == 0 {
        projected
            .chunks_exact(3)
            .flat_map(|tri| {
                let n = face_normal(tri[0], tri[1], tri[2]).unwrap_or(Vec3::Y);
                [n.to_array(); 3]
            })
            .collect()
    } else {
        projected
            .iter()
            .map(|p| p.normalize_or_zero().to_array())
            .collect()
    };
    mesh
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    let cols = detail as usize + 1;
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);

    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if rows == 0 {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}
