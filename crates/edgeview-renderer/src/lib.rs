//! Edgeview Renderer
//!
//! Derived-representation pipeline and event dispatcher for edgeview.
//!
//! # Architecture
//!
//! - [`dispatcher::Dispatcher`] - Event-driven state machine owning the session
//! - [`representation::DerivedRepresentationSet`] - ORIGINAL model plus the
//!   MODEL, BACKGROUND, SHADOW and CONDITIONAL scene roots
//! - [`state::RenderState`] - Display toggles re-applied after every change
//! - [`scene::Scene`] - Root nodes and lights read by the renderer
//! - [`traits`] - Loader, surface, renderer and view control seams
//!
//! # Example
//!
//! ```ignore
//! use edgeview_renderer::{Collaborators, Dispatcher, Event, ObjModelLoader, RendererConfig};
//!
//! let mut dispatcher = Dispatcher::new(RendererConfig::default(), Collaborators {
//!     loader: Box::new(ObjModelLoader::new()),
//!     surface: Box::new(surface),
//!     renderer: Box::new(renderer),
//!     controls: Box::new(controls),
//! });
//!
//! dispatcher.init();
//! dispatcher.pump_wait(std::time::Duration::from_secs(5));
//! let opaque = dispatcher.dispatch(Event::ToggleOpacity).flag();
//! ```

pub mod camera;
pub mod config;
pub mod dispatcher;
pub mod light;
pub mod obj_loader;
pub mod representation;
pub mod scene;
pub mod state;
pub mod traits;

// Re-exports for convenience
pub use camera::{Camera, Viewport};
pub use config::{
    CameraConfig, ControlsConfig, DisplayConfig, EdgeConfig, LightingConfig, ModelsConfig,
    RendererConfig, StaleLoadPolicy,
};
pub use dispatcher::{Collaborators, DispatchOutcome, Dispatcher, Event, EventSender, Session};
pub use light::Light;
pub use obj_loader::{LoadMode, ObjModelLoader};
pub use representation::{BuildOptions, DerivedModels, DerivedRepresentationSet, Representation};
pub use scene::Scene;
pub use state::RenderState;
pub use traits::{
    DistanceLimits, InteractiveViewControl, LoadError, LoadId, LoadRequest, LoadResult,
    LoadedMesh, ModelLoader, RenderSurface, Renderer,
};
