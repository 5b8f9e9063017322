//! Edgeview Core Data Structures
//!
//! This crate contains the data shared by the edgeview display pipeline:
//! - Color: packed RGB colors used by materials
//! - SurfaceMesh: indexed triangle meshes, vertex welding, primitives, OBJ parsing
//! - Node: owned scene-graph tree with surface and line materials
//! - edges: hard-edge and conditional-edge extraction

pub mod color;
pub mod edges;
pub mod mesh;
pub mod scene;

pub use color::*;
pub use edges::{
    EdgeOptions, EdgePair, extract_conditional_edges, extract_conditional_edges_with,
    extract_hard_edges, extract_hard_edges_with,
};
pub use mesh::*;
pub use scene::*;
