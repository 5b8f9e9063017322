//! Model loading and derived construction

use std::path::PathBuf;

use edgeview_core::{Node, PrimitiveKind, SurfaceMaterial, generate_primitive};
use tracing::{debug, info, warn};

use super::{DispatchOutcome, Dispatcher, Event};
use crate::config::StaleLoadPolicy;
use crate::representation::{DerivedRepresentationSet, source_model};
use crate::traits::{LoadId, LoadRequest, LoadResult};

impl Dispatcher {
    pub(super) fn handle_load_model(&mut self, path: PathBuf) -> DispatchOutcome {
        let id = LoadId(self.session.next_load);
        self.session.next_load += 1;
        self.session.latest_load = Some(id);
        self.session.pending_loads += 1;

        info!("Loading model {:?} ({})", path, id);
        let completion = self.queue.sender();
        self.collaborators
            .loader
            .load(LoadRequest { id, path }, completion);
        DispatchOutcome::None
    }

    pub(super) fn handle_model_loaded(
        &mut self,
        request: LoadRequest,
        result: LoadResult,
    ) -> DispatchOutcome {
        self.session.pending_loads = self.session.pending_loads.saturating_sub(1);

        if self.session.latest_load != Some(request.id) {
            match self.config.models.stale_loads {
                StaleLoadPolicy::Discard => {
                    debug!("Discarding stale completion {} for {:?}", request.id, request.path);
                    return DispatchOutcome::None;
                }
                StaleLoadPolicy::Apply => {
                    debug!("Applying out-of-order completion {} for {:?}", request.id, request.path);
                }
            }
        }

        let meshes = match result {
            Ok(meshes) => meshes,
            Err(err) => {
                warn!("Failed to load model: {}", err);
                return DispatchOutcome::None;
            }
        };
        if meshes.is_empty() {
            warn!("Model {:?} contains no meshes", request.path);
            return DispatchOutcome::None;
        }

        let name = request
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let original = source_model(name, meshes, self.config.models.offset);
        info!(
            "Loaded model {:?} ({} meshes)",
            request.path,
            original.mesh_count()
        );

        self.session.representations.set_original(original);
        self.dispatch(Event::PreProcessModels)
    }

    pub(super) fn handle_add_primitive(&mut self, kind: PrimitiveKind) -> DispatchOutcome {
        let original = Node::group(kind.name()).with_child(Node::mesh(
            kind.name(),
            generate_primitive(kind),
            SurfaceMaterial::default(),
        ));
        info!("Adding primitive {}", kind);

        // Outstanding loads no longer correspond to the displayed model
        self.session.latest_load = None;
        self.session.representations.set_original(original);
        self.dispatch(Event::PreProcessModels)
    }

    pub(super) fn handle_cycle_model(&mut self, forward: bool) -> DispatchOutcome {
        let catalogue = &self.config.models.catalogue;
        if catalogue.is_empty() {
            debug!("Model catalogue is empty, nothing to cycle");
            return DispatchOutcome::None;
        }

        let len = catalogue.len();
        let index = match (self.session.catalogue_index, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(current), true) => (current + 1) % len,
            (Some(current), false) => (current + len - 1) % len,
        };
        let path = catalogue[index].clone();
        self.session.catalogue_index = Some(index);

        self.dispatch(Event::LoadModel { path })
    }

    pub(super) fn handle_pre_process(&mut self) -> DispatchOutcome {
        let Some(original) = self.session.representations.original() else {
            debug!("No model loaded, skipping pre-processing");
            return DispatchOutcome::None;
        };

        let models = DerivedRepresentationSet::build(original, &self.build_options);
        self.session
            .representations
            .install(&mut self.session.scene, models);
        info!("Derived representations registered");

        self.dispatch(Event::PostProcessModels)
    }

    pub(super) fn handle_post_process(&mut self) -> DispatchOutcome {
        let viewport = self.collaborators.surface.viewport();
        self.session.representations.apply_state(
            &mut self.session.scene,
            &self.session.state,
            &viewport,
        );
        self.dispatch(Event::Render)
    }
}
