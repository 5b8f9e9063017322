//! Owned scene-graph nodes
//!
//! A [`Node`] owns its children, geometry and materials outright. Cloning a
//! subtree with [`Node::deep_clone`] therefore never aliases resources, so
//! each derived representation can be mutated independently.

mod line;
mod material;

pub use line::*;
pub use material::*;

use std::fmt;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mesh::SurfaceMesh;

/// Unique identifier of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Local transform (translation, rotation, scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A surface mesh with its material
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub geometry: SurfaceMesh,
    pub material: SurfaceMaterial,
}

/// What a node draws
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure container
    Group,
    /// Filled triangle surface
    Mesh(MeshNode),
    /// Line segments
    Line(LineNode),
}

/// A node in an owned scene-graph tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    /// Draw-order hint; higher values are drawn later
    pub render_order: i32,
    pub receive_shadow: bool,
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            render_order: 0,
            receive_shadow: false,
            kind,
            children: Vec::new(),
        }
    }

    /// Create an empty group
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, geometry: SurfaceMesh, material: SurfaceMaterial) -> Self {
        Self::with_kind(name, NodeKind::Mesh(MeshNode { geometry, material }))
    }

    /// Create a line node
    pub fn line(name: impl Into<String>, line: LineNode) -> Self {
        Self::with_kind(name, NodeKind::Line(line))
    }

    /// Sets the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineNode> {
        match &self.kind {
            NodeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineNode> {
        match &mut self.kind {
            NodeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Copy the whole subtree, giving every copied node a fresh id
    pub fn deep_clone(&self) -> Self {
        Self {
            id: NodeId::new(),
            name: self.name.clone(),
            transform: self.transform,
            visible: self.visible,
            render_order: self.render_order,
            receive_shadow: self.receive_shadow,
            kind: self.kind.clone(),
            children: self.children.iter().map(Node::deep_clone).collect(),
        }
    }

    /// Visit this node and all descendants depth-first
    pub fn traverse(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        for child in &self.children {
            child.traverse(f);
        }
    }

    /// Mutable depth-first traversal
    pub fn traverse_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.traverse_mut(f);
        }
    }

    /// Visit nodes that are actually drawn: a hidden node hides its subtree
    pub fn traverse_visible(&self, f: &mut impl FnMut(&Node)) {
        if !self.visible {
            return;
        }
        f(self);
        for child in &self.children {
            child.traverse_visible(f);
        }
    }

    /// Find a node in this subtree by id
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of mesh nodes in this subtree
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.is_mesh() {
                count += 1;
            }
        });
        count
    }

    /// Number of line nodes in this subtree
    pub fn line_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.as_line().is_some() {
                count += 1;
            }
        });
        count
    }
}
