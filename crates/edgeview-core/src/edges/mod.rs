//! Edge extraction
//!
//! Two line representations are derived from a triangle surface:
//!
//! - **Hard edges**: boundary edges plus edges whose adjacent faces meet at
//!   more than a threshold angle. Always drawn.
//! - **Conditional edges**: every non-coplanar interior edge, tagged with both
//!   adjacent faces so the renderer can keep only the ones on the current
//!   silhouette.
//!
//! Extraction is pure and deterministic. Degenerate input (no faces, zero-area
//! triangles, non-manifold edges, bad indices) contributes nothing instead of
//! failing.

mod conditional;
mod hard;
mod topology;

pub use conditional::{
    conditional_edge_segments, extract_conditional_edges, extract_conditional_edges_with,
};
pub use hard::{extract_hard_edges, extract_hard_edges_with, hard_edge_segments};

use serde::{Deserialize, Serialize};

use crate::scene::{LineGeometry, LineMaterial, LineNode, LineWeight, Node, Transform};

/// Default crease angle in degrees
pub const DEFAULT_THRESHOLD_DEGREES: f32 = 40.0;

/// Default tolerance for welding coincident vertices
pub const DEFAULT_WELD_TOLERANCE: f32 = 1e-4;

/// Tuning for edge extraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Faces meeting at more than this angle produce a hard edge
    pub threshold_degrees: f32,
    /// Weld tolerance used to find shared edges
    pub weld_tolerance: f32,
    /// Faces closer than this angle count as coplanar for conditional edges
    pub coplanar_epsilon_degrees: f32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            threshold_degrees: DEFAULT_THRESHOLD_DEGREES,
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            coplanar_epsilon_degrees: 0.5,
        }
    }
}

/// The thin and thick renderings of one edge set, with the transform of the
/// mesh they were extracted from
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePair {
    pub thin: LineGeometry,
    pub thick: LineGeometry,
    pub transform: Transform,
}

impl EdgePair {
    /// Number of segments (identical for both variants)
    pub fn segment_count(&self) -> usize {
        self.thin.segment_count()
    }

    pub fn is_empty(&self) -> bool {
        self.thin.is_empty()
    }

    /// Turn the pair into two sibling line nodes, thin first
    pub fn into_nodes(
        self,
        name: &str,
        thin_material: LineMaterial,
        thick_material: LineMaterial,
    ) -> [Node; 2] {
        let thin = Node::line(
            format!("{name}-thin"),
            LineNode {
                weight: LineWeight::Thin,
                geometry: self.thin,
                material: thin_material,
            },
        )
        .with_transform(self.transform);

        let thick = Node::line(
            format!("{name}-thick"),
            LineNode {
                weight: LineWeight::Thick,
                geometry: self.thick,
                material: thick_material,
            },
        )
        .with_transform(self.transform);

        [thin, thick]
    }
}
