//! Wavefront OBJ ingestion.
//!
//! Only positions and faces matter to the tracer: every model in the file is
//! triangulated and merged into a single [`Mesh`] with face normals derived
//! from the winding order.

use std::io::BufRead;
use std::path::Path;

use thiserror::Error;

use crate::mesh::Mesh;
use lumen_math::Vec3;

/// Errors that can occur while ingesting mesh geometry.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No geometry found in mesh source")]
    NoGeometry,

    #[error("Index list length {0} is not a multiple of 3")]
    IncompleteFace(usize),

    #[error("Vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file into a validated [`Mesh`].
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = merge_models(&models)?;

    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load OBJ data from an in-memory reader. Material libraries are ignored.
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> LoadResult<Mesh> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;
    merge_models(&models)
}

/// Load OBJ data from a string.
pub fn load_obj_from_str(source: &str) -> LoadResult<Mesh> {
    load_obj_from_reader(&mut source.as_bytes())
}

fn merge_models(models: &[tobj::Model]) -> LoadResult<Mesh> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let base = positions.len() as u32;
        positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(Vec3::from_slice),
        );
        indices.extend(model.mesh.indices.iter().map(|&i| base + i));
    }

    let mesh = Mesh::new(positions, indices, None);
    mesh.validate()?;
    Ok(mesh)
}
