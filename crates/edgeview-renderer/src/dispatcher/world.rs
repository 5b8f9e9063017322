//! World setup and rendering

use tracing::{debug, info};

use super::{DispatchOutcome, Dispatcher, Event};
use crate::camera::Camera;
use crate::light::lights_from_config;
use crate::traits::DistanceLimits;

impl Dispatcher {
    pub(super) fn handle_init(&mut self) -> DispatchOutcome {
        info!("Initializing session");
        self.dispatch(Event::SetUpWorld);
        let path = self.config.models.default_model.clone();
        self.dispatch(Event::LoadModel { path });
        self.dispatch(Event::PreProcessModels);
        DispatchOutcome::None
    }

    pub(super) fn handle_set_up_world(&mut self) -> DispatchOutcome {
        if self.session.world_ready {
            debug!("World already set up, ignoring");
            return DispatchOutcome::None;
        }

        let viewport = self.collaborators.surface.viewport();
        self.session.camera = Camera::from_config(&self.config.camera, viewport.aspect());

        for light in lights_from_config(&self.config.lighting) {
            self.session.scene.add_light(light);
        }

        let limits = DistanceLimits::from(&self.config.controls);
        self.collaborators
            .controls
            .attach(self.session.camera, limits, self.queue.sender());

        self.session.world_ready = true;
        info!(
            "World set up: {}x{} @{}x, camera at {}",
            viewport.width, viewport.height, viewport.device_pixel_ratio, self.session.camera.position
        );
        DispatchOutcome::None
    }

    pub(super) fn handle_view_changed(&mut self, camera: Camera) -> DispatchOutcome {
        self.session.camera = camera;
        self.dispatch(Event::Render)
    }

    pub(super) fn handle_render(&mut self) -> DispatchOutcome {
        if !self.session.world_ready {
            debug!("World not set up, skipping render");
            return DispatchOutcome::None;
        }

        self.collaborators
            .renderer
            .render(&self.session.scene, &self.session.camera);
        self.session.scene.mark_clean();
        DispatchOutcome::None
    }
}
