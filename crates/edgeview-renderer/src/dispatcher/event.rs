//! Events understood by the dispatcher

use std::path::PathBuf;

use edgeview_core::{Color, PrimitiveKind};

use crate::camera::Camera;
use crate::traits::{LoadRequest, LoadResult};

/// Every input the dispatcher reacts to.
///
/// Any event is legal at any time; handlers whose preconditions are not met
/// return without effect.
#[derive(Debug, Clone)]
pub enum Event {
    /// Set up the world, request the default model, then pre-process
    Init,
    /// Create camera and lights and attach the view control (once)
    SetUpWorld,
    /// Ask the loader for a model file
    LoadModel { path: PathBuf },
    /// Loader completion
    ModelLoaded {
        request: LoadRequest,
        result: LoadResult,
    },
    /// Replace ORIGINAL with a stock primitive
    AddPrimitive(PrimitiveKind),
    NextModel,
    PreviousModel,
    /// Build and register the derived representations
    PreProcessModels,
    /// Apply display state, then render
    PostProcessModels,
    ToggleOpacity,
    ToggleLight,
    ToggleThickLines,
    LineThickness(f32),
    LineColors(Color),
    /// Posted by the view control when the user moves the camera
    ViewChanged(Camera),
    Render,
}

impl Event {
    /// Short kebab-case name used in logs and scripts
    pub fn name(&self) -> &'static str {
        match self {
            Event::Init => "init",
            Event::SetUpWorld => "set-up-world",
            Event::LoadModel { .. } => "load-model",
            Event::ModelLoaded { .. } => "model-loaded",
            Event::AddPrimitive(_) => "add-primitive",
            Event::NextModel => "next-model",
            Event::PreviousModel => "previous-model",
            Event::PreProcessModels => "pre-process-models",
            Event::PostProcessModels => "post-process-models",
            Event::ToggleOpacity => "toggle-opacity",
            Event::ToggleLight => "toggle-light",
            Event::ToggleThickLines => "toggle-thick-lines",
            Event::LineThickness(_) => "line-thickness",
            Event::LineColors(_) => "line-colors",
            Event::ViewChanged(_) => "view-changed",
            Event::Render => "render",
        }
    }

    pub fn load_model(path: impl Into<PathBuf>) -> Self {
        Event::LoadModel { path: path.into() }
    }
}

/// Value returned by [`super::Dispatcher::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    None,
    Flag(bool),
    Scalar(f32),
    Color(Color),
}

impl DispatchOutcome {
    pub fn flag(&self) -> Option<bool> {
        match self {
            DispatchOutcome::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<f32> {
        match self {
            DispatchOutcome::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            DispatchOutcome::Color(value) => Some(*value),
            _ => None,
        }
    }
}
