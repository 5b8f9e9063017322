//! OBJ-backed [`ModelLoader`].

use std::path::{Path, PathBuf};
use std::thread;

use edgeview_core::{NamedMesh, load_obj};
use tracing::{debug, warn};

use crate::dispatcher::EventSender;
use crate::traits::{LoadError, LoadRequest, LoadResult, LoadedMesh, ModelLoader, complete};

/// Where parsing happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Parse on a worker thread and post the completion from there
    #[default]
    Background,
    /// Parse inside `load`; the completion is queued before `load` returns
    Inline,
}

/// Loads Wavefront OBJ files from disk
#[derive(Debug, Clone, Default)]
pub struct ObjModelLoader {
    mode: LoadMode,
    base_dir: Option<PathBuf>,
}

impl ObjModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inline() -> Self {
        Self {
            mode: LoadMode::Inline,
            base_dir: None,
        }
    }

    /// Resolve relative request paths against `dir`
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Parse an OBJ file into loader meshes
pub fn read_obj_model(path: &Path) -> LoadResult {
    let is_obj = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
    if !is_obj {
        return Err(LoadError::UnsupportedFormat(path.to_path_buf()));
    }

    let meshes = load_obj(path).map_err(|err| LoadError::from_mesh_error(path, err))?;
    debug!("Parsed {:?}: {} object(s)", path, meshes.len());

    Ok(meshes
        .into_iter()
        .map(|NamedMesh { name, mesh }| LoadedMesh::new(name, mesh))
        .collect())
}

impl ModelLoader for ObjModelLoader {
    fn load(&mut self, request: LoadRequest, completion: EventSender) {
        let path = self.resolve(&request.path);

        match self.mode {
            LoadMode::Inline => {
                let result = read_obj_model(&path);
                complete(&completion, request, result);
            }
            LoadMode::Background => {
                let fallback = (request.clone(), completion.clone());
                let spawned = thread::Builder::new()
                    .name(format!("edgeview-{}", request.id))
                    .spawn(move || {
                        let result = read_obj_model(&path);
                        complete(&completion, request, result);
                    });

                if let Err(err) = spawned {
                    warn!("Failed to spawn loader thread: {}", err);
                    let (request, completion) = fallback;
                    let result = Err(LoadError::Io {
                        path: request.path.clone(),
                        message: err.to_string(),
                    });
                    complete(&completion, request, result);
                }
            }
        }
    }
}
