//! OBJ file loading

use std::io::{BufReader, Cursor};
use std::path::Path;

use super::{MeshError, SurfaceMesh};

/// A mesh read from a file together with its object name
#[derive(Debug, Clone)]
pub struct NamedMesh {
    pub name: String,
    pub mesh: SurfaceMesh,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load every object of an OBJ file as a separate mesh.
///
/// Materials referenced by the file are ignored. Objects without triangles
/// are skipped; a file with no triangles at all is an error.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<NamedMesh>, MeshError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options()).map_err(|e| match e {
        tobj::LoadError::OpenFileFailed => MeshError::Io(format!("cannot open {}", path.display())),
        tobj::LoadError::ReadError => MeshError::Io(format!("cannot read {}", path.display())),
        other => MeshError::Parse(other.to_string()),
    })?;

    convert_models(models)
}

/// Load OBJ data from an in-memory buffer
pub fn load_obj_from_bytes(bytes: &[u8]) -> Result<Vec<NamedMesh>, MeshError> {
    let mut reader = BufReader::new(Cursor::new(bytes));
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| MeshError::Parse(e.to_string()))?;

    convert_models(models)
}

fn convert_models(models: Vec<tobj::Model>) -> Result<Vec<NamedMesh>, MeshError> {
    let meshes: Vec<NamedMesh> = models
        .into_iter()
        .enumerate()
        .filter_map(|(i, model)| {
            let mesh = convert_mesh(&model.mesh);
            if mesh.is_empty() {
                tracing::debug!("Skipping OBJ object '{}' without triangles", model.name);
                return None;
            }
            let name = if model.name.is_empty() {
                format!("object_{i}")
            } else {
                model.name
            };
            Some(NamedMesh { name, mesh })
        })
        .collect();

    if meshes.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(meshes)
}

fn convert_mesh(mesh: &tobj::Mesh) -> SurfaceMesh {
    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    // With single_index, attribute arrays are either empty or aligned with positions
    let normals: Vec<[f32; 3]> = mesh
        .normals
        .chunks_exact(3)
        .map(|n| [n[0], n[1], n[2]])
        .collect();
    let uvs: Vec<[f32; 2]> = mesh
        .texcoords
        .chunks_exact(2)
        .map(|t| [t[0], t[1]])
        .collect();

    SurfaceMesh {
        normals: if normals.len() == positions.len() {
            normals
        } else {
            Vec::new()
        },
        uvs: if uvs.len() == positions.len() {
            uvs
        } else {
            Vec::new()
        },
        positions,
        indices: mesh.indices.clone(),
    }
}
