//! Re-applying display state to the registered roots

use glam::Vec2;

use edgeview_core::Node;

use super::{DerivedRepresentationSet, Representation};
use crate::camera::Viewport;
use crate::scene::Scene;
use crate::state::RenderState;

impl DerivedRepresentationSet {
    /// Push `state` into every registered derived root.
    ///
    /// Only visibility flags and scalar material properties are assigned, so
    /// calling this twice with the same inputs leaves the scene unchanged.
    /// Absent representations are skipped.
    pub fn apply_state(&self, scene: &mut Scene, state: &RenderState, viewport: &Viewport) {
        let resolution = viewport.resolution();

        for representation in [Representation::Model, Representation::Conditional] {
            if let Some(root) = self.root_mut(scene, representation) {
                apply_lines(root, state, resolution);
            }
        }

        if let Some(root) = self.root_mut(scene, Representation::Background) {
            root.visible = !state.lit;
            apply_opacity(root, state.opacity);
        }

        if let Some(root) = self.root_mut(scene, Representation::Shadow) {
            root.visible = state.lit;
            apply_opacity(root, state.opacity);
        }

        if let Some(root) = self.root_mut(scene, Representation::Conditional) {
            root.visible = true;
        }
    }

    fn root_mut<'a>(&self, scene: &'a mut Scene, representation: Representation) -> Option<&'a mut Node> {
        self.handle(representation).and_then(|id| scene.root_mut(id))
    }
}

fn apply_lines(root: &mut Node, state: &RenderState, resolution: Vec2) {
    root.traverse_mut(&mut |node| {
        let Some(line) = node.as_line_mut() else {
            return;
        };
        if let Some(uniform) = line.material.resolution.as_mut() {
            *uniform = resolution;
            line.material.linewidth = state.thickness;
        }
        line.material.color = state.line_color;
        let thick = line.is_thick();
        node.visible = thick == state.use_thick_lines;
    });
}

fn apply_opacity(root: &mut Node, opacity: f32) {
    root.traverse_mut(&mut |node| {
        if let Some(mesh) = node.as_mesh_mut() {
            mesh.material.set_opacity(opacity);
        }
    });
}
