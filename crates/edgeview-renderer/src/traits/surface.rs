//! Host surface, renderer and view control seams.

use crate::camera::{Camera, Viewport};
use crate::config::ControlsConfig;
use crate::dispatcher::EventSender;
use crate::scene::Scene;

/// The container the renderer draws into.
pub trait RenderSurface {
    /// Logical size in pixels
    fn render_size(&self) -> (u32, u32);

    fn device_pixel_ratio(&self) -> f32;

    fn viewport(&self) -> Viewport {
        let (width, height) = self.render_size();
        Viewport::new(width, height, self.device_pixel_ratio())
    }
}

/// Draws the scene. Called after every state change and view change.
pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// Orbit distance limits for interactive controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceLimits {
    pub min: f32,
    pub max: f32,
}

impl From<&ControlsConfig> for DistanceLimits {
    fn from(config: &ControlsConfig) -> Self {
        Self {
            min: config.min_distance,
            max: config.max_distance,
        }
    }
}

/// User camera manipulation.
///
/// After `attach`, the control posts [`crate::dispatcher::Event::ViewChanged`]
/// through `notify` whenever the user moves the camera.
pub trait InteractiveViewControl {
    fn attach(&mut self, camera: Camera, limits: DistanceLimits, notify: EventSender);
}
