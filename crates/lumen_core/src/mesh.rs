//! Object-space mesh geometry.
//!
//! A `Mesh` is what asset ingestion hands to the renderer: vertex positions,
//! a flattened triangle index list and one normal per triangle. The renderer
//! turns it into a transformable, intersectable triangle mesh.

use lumen_math::{Aabb, Vec3};

use crate::obj::LoadError;

/// A mesh consisting of vertex positions, triangle indices and face normals.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// One unit normal per triangle, following the winding of its indices
    pub normals: Vec<Vec3>,

    /// Axis-aligned bounding box of `positions`
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    ///
    /// Face normals are derived from the winding when none are given, or when
    /// the given list does not hold exactly one normal per triangle.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        let bounds = Aabb::from_point_cloud(&positions);
        let mut mesh = Self {
            positions,
            indices,
            normals: normals.unwrap_or_default(),
            bounds,
        };

        if mesh.normals.len() != mesh.triangle_count() {
            if !mesh.normals.is_empty() {
                log::debug!(
                    "Normals array length ({}) doesn't match triangle count ({}), computing face normals",
                    mesh.normals.len(),
                    mesh.triangle_count()
                );
            }
            mesh.compute_normals();
        } else {
            for normal in &mut mesh.normals {
                *normal = normal.normalize_or_zero();
            }
        }

        mesh
    }

    /// Compute one face normal per triangle with the right-hand rule over
    /// `(v1 - v0, v2 - v0)`.
    ///
    /// Zero-area triangles (and triangles with out-of-range indices) get a
    /// zero normal, which the intersection code rejects as parallel.
    pub fn compute_normals(&mut self) {
        self.normals = self
            .triangles()
            .map(|tri| match tri {
                Some([p0, p1, p2]) => face_normal(p0, p1, p2),
                None => Vec3::ZERO,
            })
            .collect();
    }

    /// Iterate triangles as vertex triplets. `None` marks a triangle with an
    /// out-of-range index.
    pub fn triangles(&self) -> impl Iterator<Item = Option<[Vec3; 3]>> + '_ {
        self.indices.chunks_exact(3).map(|face| {
            let p0 = self.positions.get(face[0] as usize)?;
            let p1 = self.positions.get(face[1] as usize)?;
            let p2 = self.positions.get(face[2] as usize)?;
            Some([*p0, *p1, *p2])
        })
    }

    /// Check the structural invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.indices.is_empty() {
            return Err(LoadError::NoGeometry);
        }
        if self.indices.len() % 3 != 0 {
            return Err(LoadError::IncompleteFace(self.indices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(LoadError::IndexOutOfRange {
                index,
                vertex_count: self.positions.len(),
            });
        }
        Ok(())
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Unit normal of a triangle, or zero for a degenerate one.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}
