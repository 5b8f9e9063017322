//! Asynchronous model loading.

use std::fmt;
use std::path::PathBuf;

use edgeview_core::{MeshError, SurfaceMesh, Transform};

use crate::dispatcher::{Event, EventSender};

/// Monotonic identifier of a load request within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// A request handed to a [`ModelLoader`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: LoadId,
    pub path: PathBuf,
}

/// One surface mesh produced by a loader
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMesh {
    pub name: String,
    pub mesh: SurfaceMesh,
    pub transform: Transform,
}

impl LoadedMesh {
    pub fn new(name: impl Into<String>, mesh: SurfaceMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Transform::IDENTITY,
        }
    }
}

/// Why a model could not be loaded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{0:?} contains no meshes")]
    Empty(PathBuf),
    #[error("unsupported model format: {0:?}")]
    UnsupportedFormat(PathBuf),
}

impl LoadError {
    /// Attach the requested path to a mesh parsing error
    pub fn from_mesh_error(path: impl Into<PathBuf>, error: MeshError) -> Self {
        let path = path.into();
        match error {
            MeshError::Io(message) => LoadError::Io { path, message },
            MeshError::Parse(message) => LoadError::Parse { path, message },
            MeshError::EmptyMesh => LoadError::Empty(path),
        }
    }
}

pub type LoadResult = Result<Vec<LoadedMesh>, LoadError>;

/// Loads model files and reports completion as an event.
///
/// `load` must return promptly. The result is delivered later (or inline,
/// before `load` returns) by sending [`Event::ModelLoaded`] through
/// `completion`; use [`complete`] to do so.
pub trait ModelLoader {
    fn load(&mut self, request: LoadRequest, completion: EventSender);
}

/// Post the outcome of `request` back to the dispatcher
pub fn complete(completion: &EventSender, request: LoadRequest, result: LoadResult) {
    completion.send(Event::ModelLoaded { request, result });
}
