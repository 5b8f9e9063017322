//! One-time construction of the derived roots

use edgeview_core::{
    Color, EdgeOptions, LineMaterial, MeshNode, Node, PolygonOffset, SurfaceMaterial, Transform,
    extract_conditional_edges_with, extract_hard_edges_with,
};
use glam::Vec3;
use tracing::debug;

use super::DerivedRepresentationSet;
use crate::config::RendererConfig;
use crate::traits::LoadedMesh;

/// Render order of the filled proxies so they draw after the wireframes
pub const FILL_RENDER_ORDER: i32 = 2;

/// Parameters of the one-time build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    pub edges: EdgeOptions,
    pub line_color: Color,
    pub thin_linewidth: f32,
    pub thick_linewidth: f32,
    pub conditional_thick_linewidth: f32,
    pub fill_color: Color,
    pub shadow_roughness: f32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::from_config(&RendererConfig::default())
    }
}

impl BuildOptions {
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            edges: config.edges.options,
            line_color: config.display.line_color,
            thin_linewidth: config.edges.thin_linewidth,
            thick_linewidth: config.edges.thick_linewidth,
            conditional_thick_linewidth: config.edges.conditional_thick_linewidth,
            fill_color: config.display.fill_color,
            shadow_roughness: config.display.shadow_roughness,
        }
    }

    fn thin_material(&self) -> LineMaterial {
        LineMaterial {
            linewidth: self.thin_linewidth,
            ..LineMaterial::basic(self.line_color)
        }
    }
}

/// The four derived roots, ready to be registered in a scene
#[derive(Debug, Clone)]
pub struct DerivedModels {
    pub model: Node,
    pub background: Node,
    pub shadow: Node,
    pub conditional: Node,
}

/// Normalize loader output into an ORIGINAL model: one group holding every
/// mesh, positioned at `offset`
pub fn source_model(name: impl Into<String>, meshes: Vec<LoadedMesh>, offset: Vec3) -> Node {
    let mut root = Node::group(name).with_transform(Transform::from_position(offset));
    for LoadedMesh {
        name,
        mesh,
        transform,
    } in meshes
    {
        root.add_child(Node::mesh(name, mesh, SurfaceMaterial::default()).with_transform(transform));
    }
    root
}

impl DerivedRepresentationSet {
    /// Build every derived root from `original`.
    ///
    /// Each root is an independent deep clone; `original` is left untouched.
    pub fn build(original: &Node, options: &BuildOptions) -> DerivedModels {
        let models = DerivedModels {
            model: build_model(original, options),
            background: build_background(original, options),
            shadow: build_shadow(original, options),
            conditional: build_conditional(original, options),
        };
        debug!(
            "Built derived models for '{}': {} hard-edge lines, {} conditional lines",
            original.name,
            models.model.line_count(),
            models.conditional.line_count()
        );
        models
    }
}

/// Deep clone with a group at the top, so a bare mesh root can be replaced
fn clone_root(original: &Node) -> Node {
    let root = original.deep_clone();
    if root.is_mesh() {
        Node::group(root.name.clone()).with_child(root)
    } else {
        root
    }
}

/// Swap every mesh under `node` for the line nodes produced by `replace`.
///
/// Lines take the mesh's place in its parent. Descendants of a replaced
/// mesh are kept under a group carrying the mesh's transform.
fn replace_meshes(node: &mut Node, replace: &mut impl FnMut(&Node, &MeshNode) -> [Node; 2]) {
    let children = std::mem::take(&mut node.children);
    for mut child in children {
        let Some(mesh) = child.as_mesh() else {
            replace_meshes(&mut child, replace);
            node.children.push(child);
            continue;
        };

        node.children.extend(replace(&child, mesh));

        if !child.children.is_empty() {
            let mut holder = Node::group(child.name.clone()).with_transform(child.transform);
            holder.children = std::mem::take(&mut child.children);
            replace_meshes(&mut holder, replace);
            node.children.push(holder);
        }
    }
}

fn build_model(original: &Node, options: &BuildOptions) -> Node {
    let mut root = clone_root(original);
    replace_meshes(&mut root, &mut |node, mesh| {
        extract_hard_edges_with(&mesh.geometry, &node.transform, &options.edges).into_nodes(
            &node.name,
            options.thin_material(),
            LineMaterial::screen_space(options.line_color, options.thick_linewidth),
        )
    });
    root
}

fn build_conditional(original: &Node, options: &BuildOptions) -> Node {
    let mut root = clone_root(original);
    replace_meshes(&mut root, &mut |node, mesh| {
        extract_conditional_edges_with(&mesh.geometry, &node.transform, &options.edges)
            .into_nodes(
                &node.name,
                options.thin_material(),
                LineMaterial::screen_space(options.line_color, options.conditional_thick_linewidth),
            )
    });
    root.visible = false;
    root
}

fn build_background(original: &Node, options: &BuildOptions) -> Node {
    let mut root = clone_root(original);
    root.traverse_mut(&mut |node| {
        let Some(mesh) = node.as_mesh_mut() else {
            return;
        };
        mesh.material =
            SurfaceMaterial::unlit(options.fill_color).with_polygon_offset(PolygonOffset::default());
        node.receive_shadow = true;
        node.render_order = FILL_RENDER_ORDER;
    });
    root
}

fn build_shadow(original: &Node, options: &BuildOptions) -> Node {
    let mut root = clone_root(original);
    root.traverse_mut(&mut |node| {
        let Some(mesh) = node.as_mesh_mut() else {
            return;
        };
        mesh.material = SurfaceMaterial::standard(options.fill_color, options.shadow_roughness)
            .with_polygon_offset(PolygonOffset::default());
        node.render_order = FILL_RENDER_ORDER;
    });
    root
}
