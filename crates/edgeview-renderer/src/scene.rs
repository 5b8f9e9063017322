//! Scene registry shared between the dispatcher and the renderer.
//!
//! The scene owns a flat list of root nodes plus the lights. The dispatcher
//! is the only writer; the renderer reads it once per frame.

use std::collections::HashMap;

use edgeview_core::{Node, NodeId};

use crate::light::Light;

/// Root nodes and lights to be drawn.
///
/// Roots are kept in insertion order so draws are deterministic.
#[derive(Debug, Default)]
pub struct Scene {
    roots: HashMap<NodeId, Node>,
    order: Vec<NodeId>,
    lights: Vec<Light>,
    dirty: bool,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the scene has been modified since last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the scene as clean (called after rendering).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Marks the scene as dirty (needs re-render).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Adds a root node and returns its handle.
    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = node.id;
        if self.roots.insert(id, node).is_none() {
            self.order.push(id);
        }
        self.dirty = true;
        id
    }

    /// Gets a root by handle.
    pub fn root(&self, id: NodeId) -> Option<&Node> {
        self.roots.get(&id)
    }

    /// Gets a mutable root by handle.
    pub fn root_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.dirty = true;
        self.roots.get_mut(&id)
    }

    /// Removes a root from the scene.
    pub fn remove_root(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.roots.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        self.dirty = true;
        Some(removed)
    }

    /// Returns true if the scene contains a root with the given handle.
    pub fn contains(&self, id: NodeId) -> bool {
        self.roots.contains_key(&id)
    }

    /// Returns the number of roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Removes every root and light.
    pub fn clear(&mut self) {
        self.roots.clear();
        self.order.clear();
        self.lights.clear();
        self.dirty = true;
    }

    /// Roots in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.roots.get(id))
    }

    /// Handles of all roots in insertion order.
    pub fn root_ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
        self.dirty = true;
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Visit every node that is actually drawn, root by root.
    pub fn traverse_visible(&self, f: &mut impl FnMut(&Node)) {
        for root in self.roots() {
            root.traverse_visible(f);
        }
    }
}
