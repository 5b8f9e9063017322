//! Line geometry for thin and screen-space (thick) edge rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::LineMaterial;

/// Per-instance data of a screen-space segment (24 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

/// One endpoint of a thin conditional segment (48 bytes)
///
/// Two vertices per segment; both carry the same control points so the
/// vertex stage can test which side of the edge each adjacent face lies on.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ConditionalVertex {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub control0: [f32; 3],
    pub control1: [f32; 3],
}

/// A conditional edge: an edge shared by two faces whose visibility is
/// decided per frame from the view direction (72 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ConditionalSegment {
    pub start: [f32; 3],
    pub end: [f32; 3],
    /// Vertex of the first adjacent face opposite the edge
    pub control0: [f32; 3],
    /// Vertex of the second adjacent face opposite the edge
    pub control1: [f32; 3],
    /// Normal of the first adjacent face
    pub normal0: [f32; 3],
    /// Normal of the second adjacent face
    pub normal1: [f32; 3],
}

impl ConditionalSegment {
    /// `end - start`
    pub fn direction(&self) -> Vec3 {
        Vec3::from(self.end) - Vec3::from(self.start)
    }

    /// The two per-vertex records used by thin conditional lines
    pub fn vertices(&self) -> [ConditionalVertex; 2] {
        let direction = self.direction().to_array();
        [self.start, self.end].map(|position| ConditionalVertex {
            position,
            direction,
            control0: self.control0,
            control1: self.control1,
        })
    }
}

/// Line geometry variants
#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    /// Endpoint pairs for hardware lines, two positions per segment
    Segments(Vec<[f32; 3]>),
    /// Instanced screen-space segments
    SegmentInstances(Vec<SegmentInstance>),
    /// Per-vertex conditional segments for hardware lines
    Conditional(Vec<ConditionalVertex>),
    /// Instanced screen-space conditional segments
    ConditionalInstances(Vec<ConditionalSegment>),
}

impl LineGeometry {
    /// Thin geometry from a list of segments
    pub fn segments(segments: &[[Vec3; 2]]) -> Self {
        LineGeometry::Segments(
            segments
                .iter()
                .flat_map(|[a, b]| [a.to_array(), b.to_array()])
                .collect(),
        )
    }

    /// Thin geometry from conditional segments
    pub fn conditional(segments: &[ConditionalSegment]) -> Self {
        LineGeometry::Conditional(segments.iter().flat_map(|s| s.vertices()).collect())
    }

    /// Convert thin segment geometry to instanced screen-space geometry.
    ///
    /// Any other variant is returned unchanged: thin conditional vertices no
    /// longer carry face normals, so conditional instances are built from
    /// the segments directly.
    pub fn to_instanced(&self) -> Self {
        match self {
            LineGeometry::Segments(positions) => LineGeometry::SegmentInstances(
                positions
                    .chunks_exact(2)
                    .map(|pair| SegmentInstance {
                        start: pair[0],
                        end: pair[1],
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        match self {
            LineGeometry::Segments(positions) => positions.len() / 2,
            LineGeometry::SegmentInstances(instances) => instances.len(),
            LineGeometry::Conditional(vertices) => vertices.len() / 2,
            LineGeometry::ConditionalInstances(segments) => segments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            LineGeometry::Conditional(_) | LineGeometry::ConditionalInstances(_)
        )
    }

    /// Raw bytes of the vertex or instance buffer, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            LineGeometry::Segments(positions) => bytemuck::cast_slice(positions),
            LineGeometry::SegmentInstances(instances) => bytemuck::cast_slice(instances),
            LineGeometry::Conditional(vertices) => bytemuck::cast_slice(vertices),
            LineGeometry::ConditionalInstances(segments) => bytemuck::cast_slice(segments),
        }
    }
}

/// Whether a line node is the lightweight or the screen-space variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineWeight {
    Thin,
    Thick,
}

/// Renderable line segments
#[derive(Debug, Clone, PartialEq)]
pub struct LineNode {
    pub weight: LineWeight,
    pub geometry: LineGeometry,
    pub material: LineMaterial,
}

impl LineNode {
    pub fn is_thick(&self) -> bool {
        self.weight == LineWeight::Thick
    }
}
