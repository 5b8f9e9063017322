//! Hard (crease and boundary) edges

use glam::Vec3;

use super::topology::Topology;
use super::{EdgeOptions, EdgePair};
use crate::mesh::SurfaceMesh;
use crate::scene::{LineGeometry, Transform};

/// Segments of all boundary edges and of all edges whose two faces meet at
/// more than `options.threshold_degrees`. Edges shared by more than two faces
/// are skipped.
pub fn hard_edge_segments(mesh: &SurfaceMesh, options: &EdgeOptions) -> Vec<[Vec3; 2]> {
    let topology = Topology::build(mesh, options.weld_tolerance);
    let threshold_dot = options.threshold_degrees.to_radians().cos();

    topology
        .edges
        .iter()
        .filter(|edge| match edge.faces.as_slice() {
            [_] => true,
            [f0, f1] => {
                let n0 = topology.faces[*f0].normal;
                let n1 = topology.faces[*f1].normal;
                n0.dot(n1) <= threshold_dot
            }
            _ => false,
        })
        .map(|edge| [topology.position(edge.a), topology.position(edge.b)])
        .collect()
}

/// Extract hard edges with default weld tolerance
pub fn extract_hard_edges(
    mesh: &SurfaceMesh,
    transform: &Transform,
    angle_threshold_degrees: f32,
) -> EdgePair {
    let options = EdgeOptions {
        threshold_degrees: angle_threshold_degrees,
        ..EdgeOptions::default()
    };
    extract_hard_edges_with(mesh, transform, &options)
}

/// Extract hard edges as a thin/thick pair carrying the mesh transform
pub fn extract_hard_edges_with(
    mesh: &SurfaceMesh,
    transform: &Transform,
    options: &EdgeOptions,
) -> EdgePair {
    let thin = LineGeometry::segments(&hard_edge_segments(mesh, options));
    let thick = thin.to_instanced();
    EdgePair {
        thin,
        thick,
        transform: *transform,
    }
}
