//! Derived representations of the loaded model.
//!
//! One ORIGINAL model fans out into four scene roots, each dedicated to a
//! single visual treatment:
//!
//! - MODEL: hard-edge wireframe
//! - BACKGROUND: unlit tinted fill, shown when unlit
//! - SHADOW: light-reactive tinted fill, shown when lit
//! - CONDITIONAL: silhouette-aware wireframe
//!
//! Geometry is built once per model by [`DerivedRepresentationSet::build`].
//! Toggle changes only go through [`DerivedRepresentationSet::apply_state`],
//! which touches visibility flags and scalar material properties.

mod apply;
mod build;

pub use build::*;

use std::fmt;

use edgeview_core::{Node, NodeId};
use tracing::debug;

use crate::scene::Scene;

/// The closed set of representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Original,
    Model,
    Background,
    Shadow,
    Conditional,
}

impl Representation {
    pub const ALL: [Representation; 5] = [
        Representation::Original,
        Representation::Model,
        Representation::Background,
        Representation::Shadow,
        Representation::Conditional,
    ];

    /// Representations that live in the scene
    pub const DERIVED: [Representation; 4] = [
        Representation::Model,
        Representation::Background,
        Representation::Shadow,
        Representation::Conditional,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Representation::Original => "ORIGINAL",
            Representation::Model => "MODEL",
            Representation::Background => "BACKGROUND",
            Representation::Shadow => "SHADOW",
            Representation::Conditional => "CONDITIONAL",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ORIGINAL model plus scene handles of the derived roots.
///
/// ORIGINAL is owned here and never registered in the scene. Derived roots
/// are owned by the [`Scene`]; this set only remembers their handles.
#[derive(Debug, Default)]
pub struct DerivedRepresentationSet {
    original: Option<Node>,
    model: Option<NodeId>,
    background: Option<NodeId>,
    shadow: Option<NodeId>,
    conditional: Option<NodeId>,
}

impl DerivedRepresentationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original(&self) -> Option<&Node> {
        self.original.as_ref()
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }

    /// Replace ORIGINAL. Derived roots stay until the next `install`.
    pub fn set_original(&mut self, original: Node) {
        debug!("ORIGINAL set to '{}' ({} meshes)", original.name, original.mesh_count());
        self.original = Some(original);
    }

    /// Scene handle of a derived representation
    pub fn handle(&self, representation: Representation) -> Option<NodeId> {
        match representation {
            Representation::Original => None,
            Representation::Model => self.model,
            Representation::Background => self.background,
            Representation::Shadow => self.shadow,
            Representation::Conditional => self.conditional,
        }
    }

    /// Look a representation up; ORIGINAL comes from this set, the rest from the scene
    pub fn get<'a>(&'a self, scene: &'a Scene, representation: Representation) -> Option<&'a Node> {
        match representation {
            Representation::Original => self.original.as_ref(),
            other => self.handle(other).and_then(|id| scene.root(id)),
        }
    }

    /// True once derived roots are registered
    pub fn is_built(&self) -> bool {
        self.model.is_some()
    }

    /// Register freshly built roots, removing any previously registered ones first
    pub fn install(&mut self, scene: &mut Scene, models: DerivedModels) {
        self.uninstall(scene);

        let DerivedModels {
            model,
            background,
            shadow,
            conditional,
        } = models;

        self.model = Some(scene.add_root(model));
        self.background = Some(scene.add_root(background));
        self.shadow = Some(scene.add_root(shadow));
        self.conditional = Some(scene.add_root(conditional));
    }

    /// Remove every derived root from the scene
    pub fn uninstall(&mut self, scene: &mut Scene) {
        for slot in [
            &mut self.model,
            &mut self.background,
            &mut self.shadow,
            &mut self.conditional,
        ] {
            if let Some(id) = slot.take() {
                scene.remove_root(id);
            }
        }
    }
}
