//! Conditional (view-dependent) edges

use super::topology::Topology;
use super::{EdgeOptions, EdgePair};
use crate::mesh::{SurfaceMesh, merge_vertices};
use crate::scene::{ConditionalSegment, LineGeometry, Transform};

/// Conditional segments of a mesh.
///
/// The mesh is reduced to positions and its coincident vertices merged first,
/// so vertices split only by normals or UVs do not break adjacency. Every edge
/// shared by exactly two faces that are not coplanar yields one segment.
pub fn conditional_edge_segments(
    mesh: &SurfaceMesh,
    options: &EdgeOptions,
) -> Vec<ConditionalSegment> {
    let merged = merge_vertices(&mesh.position_only(), options.weld_tolerance);
    let topology = Topology::build(&merged, options.weld_tolerance);
    let coplanar_dot = options.coplanar_epsilon_degrees.to_radians().cos();

    topology
        .edges
        .iter()
        .filter_map(|edge| {
            let [f0, f1] = edge.faces.as_slice() else {
                return None;
            };
            let face0 = &topology.faces[*f0];
            let face1 = &topology.faces[*f1];
            if face0.normal.dot(face1.normal) >= coplanar_dot {
                return None;
            }

            Some(ConditionalSegment {
                start: topology.position(edge.a).to_array(),
                end: topology.position(edge.b).to_array(),
                control0: topology.position(face0.opposite(edge.a, edge.b)).to_array(),
                control1: topology.position(face1.opposite(edge.a, edge.b)).to_array(),
                normal0: face0.normal.to_array(),
                normal1: face1.normal.to_array(),
            })
        })
        .collect()
}

/// Extract conditional edges with default tolerances
pub fn extract_conditional_edges(mesh: &SurfaceMesh, transform: &Transform) -> EdgePair {
    extract_conditional_edges_with(mesh, transform, &EdgeOptions::default())
}

/// Extract conditional edges as a thin/thick pair carrying the mesh transform
pub fn extract_conditional_edges_with(
    mesh: &SurfaceMesh,
    transform: &Transform,
    options: &EdgeOptions,
) -> EdgePair {
    let segments = conditional_edge_segments(mesh, options);
    EdgePair {
        thin: LineGeometry::conditional(&segments),
        thick: LineGeometry::ConditionalInstances(segments),
        transform: *transform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{compute_vertex_normals, generate_cylinder, generate_octahedron};
    use glam::Vec3;

    #[test]
    fn test_empty_mesh_yields_no_edges() {
        let pair = extract_conditional_edges(&SurfaceMesh::new(), &Transform::IDENTITY);
        assert!(pair.is_empty());
        assert_eq!(pair.thick.segment_count(), 0);
        assert!(pair.thin.is_conditional());
        assert!(pair.thick.is_conditional());
    }

    #[test]
    fn test_cylinder_side_edges_are_conditional() {
        let mesh = generate_cylinder(1.0, 1.0, 2.0, 20);
        let segments = conditional_edge_segments(&mesh, &EdgeOptions::default());
        // 20 vertical side edges + 40 rim edges; diagonals and cap spokes are coplanar
        assert_eq!(segments.len(), 60);
    }

    #[test]
    fn test_split_normals_do_not_split_edges() {
        // Flat-shaded octahedron: every face has its own vertices and normals
        let mut mesh = generate_octahedron(1.0, 0);
        assert_eq!(mesh.vertex_count(), 24);
        compute_vertex_normals(&mut mesh);

        let segments = conditional_edge_segments(&mesh, &EdgeOptions::default());
        assert_eq!(segments.len(), 12);
    }

    #[test]
    fn test_segment_controls_and_normals() {
        // Two triangles folded along the X axis
        let mesh = SurfaceMesh::from_positions(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.5, 1.0, 0.0],
                [0.5, 0.0, 1.0],
            ],
            vec![0, 1, 2, 1, 0, 3],
        );
        let segments = conditional_edge_segments(&mesh, &EdgeOptions::default());
        assert_eq!(segments.len(), 1);

        let s = segments[0];
        assert_eq!(s.start, [0.0, 0.0, 0.0]);
        assert_eq!(s.end, [1.0, 0.0, 0.0]);
        assert_eq!(s.control0, [0.5, 1.0, 0.0]);
        assert_eq!(s.control1, [0.5, 0.0, 1.0]);
        assert_eq!(Vec3::from(s.normal0), Vec3::Z);
        assert_eq!(Vec3::from(s.normal1), Vec3::Y);
    }

    #[test]
    fn test_thin_and_thick_agree() {
        let mesh = generate_octahedron(1.0, 0);
        let pair = extract_conditional_edges(&mesh, &Transform::IDENTITY);
        assert_eq!(pair.thin.segment_count(), pair.thick.segment_count());
        assert_eq!(pair, extract_conditional_edges(&mesh, &Transform::IDENTITY));
    }

    #[test]
    fn test_huge_and_infinite_coordinates() {
        // A folded pair plus one stray triangle far out or at infinity
        for stray in [1e15, f32::INFINITY] {
            let mesh = SurfaceMesh::from_positions(
                vec![
                    [0.0, 0.0, 0.0],
                    [1.0, 0.0, 0.0],
                    [0.5, 1.0, 0.0],
                    [0.5, 0.0, 1.0],
                    [stray, 0.0, 0.0],
                    [stray, 1.0, 0.0],
                    [stray, 0.0, 1.0],
                ],
                vec![0, 1, 2, 1, 0, 3, 4, 5, 6],
            );
            let pair = extract_conditional_edges(&mesh, &Transform::IDENTITY);
            assert_eq!(pair.segment_count(), 1);
        }
    }
}
