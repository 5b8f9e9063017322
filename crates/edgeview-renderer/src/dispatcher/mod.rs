//! Event-driven state machine.
//!
//! The [`Dispatcher`] owns the whole viewing session and is its only writer.
//! Collaborators (loaders, view controls) run wherever they like and post
//! [`Event`]s through an [`EventSender`]; the host drains them on the owning
//! thread with [`Dispatcher::pump`].
//!
//! Handlers may dispatch follow-up events synchronously, e.g. a toggle runs
//! `PostProcessModels`, which in turn runs `Render`.

mod event;
mod models;
mod queue;
mod toggles;
mod world;

pub use event::*;
pub use queue::EventSender;

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::representation::{BuildOptions, DerivedRepresentationSet};
use crate::scene::Scene;
use crate::state::RenderState;
use crate::traits::{InteractiveViewControl, LoadId, ModelLoader, RenderSurface, Renderer};

pub(crate) use queue::EventQueue;

/// External implementations the dispatcher drives
pub struct Collaborators {
    pub loader: Box<dyn ModelLoader>,
    pub surface: Box<dyn RenderSurface>,
    pub renderer: Box<dyn Renderer>,
    pub controls: Box<dyn InteractiveViewControl>,
}

/// Everything mutated by event handlers
#[derive(Debug, Default)]
pub struct Session {
    pub state: RenderState,
    pub representations: DerivedRepresentationSet,
    pub scene: Scene,
    pub camera: Camera,
    world_ready: bool,
    next_load: u64,
    latest_load: Option<LoadId>,
    pending_loads: usize,
    catalogue_index: Option<usize>,
}

impl Session {
    fn new(state: RenderState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }
}

/// Sequences world setup, model loading, derived construction and state
/// re-application
pub struct Dispatcher {
    config: RendererConfig,
    build_options: BuildOptions,
    session: Session,
    collaborators: Collaborators,
    queue: EventQueue,
}

impl Dispatcher {
    pub fn new(config: RendererConfig, collaborators: Collaborators) -> Self {
        let session = Session::new(RenderState::from(&config.display));
        Self {
            build_options: BuildOptions::from_config(&config),
            config,
            session,
            collaborators,
            queue: EventQueue::new(),
        }
    }

    /// Run the `Init` event
    pub fn init(&mut self) {
        self.dispatch(Event::Init);
    }

    /// Handle for posting events from collaborators
    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    /// Handle one event to completion, including synchronous follow-ups
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        debug!("Dispatching {}", event.name());

        match event {
            Event::Init => self.handle_init(),
            Event::SetUpWorld => self.handle_set_up_world(),
            Event::LoadModel { path } => self.handle_load_model(path),
            Event::ModelLoaded { request, result } => self.handle_model_loaded(request, result),
            Event::AddPrimitive(kind) => self.handle_add_primitive(kind),
            Event::NextModel => self.handle_cycle_model(true),
            Event::PreviousModel => self.handle_cycle_model(false),
            Event::PreProcessModels => self.handle_pre_process(),
            Event::PostProcessModels => self.handle_post_process(),
            Event::ToggleOpacity => self.handle_toggle_opacity(),
            Event::ToggleLight => self.handle_toggle_light(),
            Event::ToggleThickLines => self.handle_toggle_thick_lines(),
            Event::LineThickness(thickness) => self.handle_line_thickness(thickness),
            Event::LineColors(color) => self.handle_line_colors(color),
            Event::ViewChanged(camera) => self.handle_view_changed(camera),
            Event::Render => self.handle_render(),
        }
    }

    /// Dispatch every queued event in arrival order. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.queue.try_next() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Pump until no load is outstanding or `timeout` elapses
    pub fn pump_wait(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut processed = self.pump();

        while self.session.pending_loads > 0 {
            let now = Instant::now();
            if now >= deadline {
                warn!(
                    "Timed out with {} model load(s) outstanding",
                    self.session.pending_loads
                );
                break;
            }
            if let Some(event) = self.queue.next_timeout(deadline - now) {
                self.dispatch(event);
                processed += 1;
                processed += self.pump();
            }
        }

        processed
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &RenderState {
        &self.session.state
    }

    pub fn scene(&self) -> &Scene {
        &self.session.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.session.camera
    }

    pub fn representations(&self) -> &DerivedRepresentationSet {
        &self.session.representations
    }

    pub fn is_world_ready(&self) -> bool {
        self.session.world_ready
    }

    /// Number of load requests without a completion yet
    pub fn pending_loads(&self) -> usize {
        self.session.pending_loads
    }
}
