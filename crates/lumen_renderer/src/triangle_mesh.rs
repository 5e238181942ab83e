//! Indexed triangle mesh with its own transform.
//!
//! Base geometry lives in object space. `update_transforms` bakes the current
//! translation / rotation / scale into cached world-space positions, normals
//! and bounds; ray queries only ever read those caches.

use crate::hittable::{HitRecord, Hittable};
use crate::triangle::{CullMode, Triangle};
use lumen_core::{face_normal, Mesh, Transform};
use lumen_math::{Aabb, Mat3, Mat4Ext, Ray, Vec3};

/// A triangle mesh that can be moved, rotated and scaled as a whole.
///
/// The world-space caches are only valid after [`TriangleMesh::update_transforms`]
/// has run since the last change to geometry or transform.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    /// One normal per triangle
    normals: Vec<Vec3>,
    /// Flattened, three indices per triangle
    indices: Vec<u32>,

    pub cull_mode: CullMode,
    pub material: usize,

    transform: Transform,

    transformed_positions: Vec<Vec3>,
    transformed_normals: Vec<Vec3>,

    /// Object-space bounds
    bounds: Aabb,
    /// Bounds of the transformed object box
    world_bounds: Aabb,
}

impl TriangleMesh {
    /// Create a mesh from positions and indices, deriving face normals from
    /// the winding.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, cull_mode: CullMode, material: usize) -> Self {
        let mut mesh = Self::empty(cull_mode, material);
        mesh.positions = positions;
        mesh.indices = indices;
        mesh.calculate_normals();
        mesh.update_aabb();
        mesh.update_transforms();
        mesh
    }

    /// Build from a loaded [`Mesh`], reusing its normals and bounds.
    pub fn from_mesh(mesh: Mesh, cull_mode: CullMode, material: usize) -> Self {
        let mut tri_mesh = Self::empty(cull_mode, material);
        tri_mesh.positions = mesh.positions;
        tri_mesh.indices = mesh.indices;
        tri_mesh.normals = mesh.normals;
        tri_mesh.bounds = mesh.bounds;
        tri_mesh.update_transforms();
        tri_mesh
    }

    /// A mesh with no triangles, to be filled with `append_triangle`.
    pub fn empty(cull_mode: CullMode, material: usize) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            cull_mode,
            material,
            transform: Transform::default(),
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            bounds: Aabb::EMPTY,
            world_bounds: Aabb::EMPTY,
        }
    }

    /// Append a triangle as three new vertices.
    ///
    /// The object bounds grow immediately. Pass `defer_update` when adding
    /// many triangles in a row and call `update_transforms` once at the end.
    pub fn append_triangle(&mut self, triangle: &Triangle, defer_update: bool) {
        let start = self.positions.len() as u32;
        let vertices = [triangle.v0, triangle.v1, triangle.v2];

        self.positions.extend_from_slice(&vertices);
        self.indices.extend_from_slice(&[start, start + 1, start + 2]);
        self.normals.push(triangle.normal);

        let added = Aabb::from_point_cloud(&vertices);
        self.bounds = if self.bounds == Aabb::EMPTY {
            added
        } else {
            Aabb::surrounding(&self.bounds, &added)
        };

        if !defer_update {
            self.update_transforms();
        }
    }

    /// Replace the normals with one face normal per triangle.
    ///
    /// Triangles with out-of-range indices get a zero normal and never hit.
    pub fn calculate_normals(&mut self) {
        self.normals = self
            .indices
            .chunks_exact(3)
            .map(|face| {
                match (
                    self.positions.get(face[0] as usize),
                    self.positions.get(face[1] as usize),
                    self.positions.get(face[2] as usize),
                ) {
                    (Some(&v0), Some(&v1), Some(&v2)) => face_normal(v0, v1, v2),
                    _ => Vec3::ZERO,
                }
            })
            .collect();
    }

    /// Set the translation. Takes effect on the next `update_transforms`.
    pub fn translate(&mut self, translation: Vec3) {
        self.transform.set_translation(translation);
    }

    /// Set the rotation to `pitch` radians about X.
    pub fn rotate_x(&mut self, pitch: f32) {
        self.transform.set_rotation_x(pitch);
    }

    /// Set the rotation to `yaw` radians about Y.
    pub fn rotate_y(&mut self, yaw: f32) {
        self.transform.set_rotation_y(yaw);
    }

    /// Set the rotation to `roll` radians about Z.
    pub fn rotate_z(&mut self, roll: f32) {
        self.transform.set_rotation_z(roll);
    }

    /// Set the scale.
    pub fn scale(&mut self, scale: Vec3) {
        self.transform.set_scale(scale);
    }

    /// Recompute the object-space bounds from the base positions.
    pub fn update_aabb(&mut self) {
        self.bounds = Aabb::from_point_cloud(&self.positions);
    }

    /// Bake the current transform into the world-space caches.
    pub fn update_transforms(&mut self) {
        let matrix = self.transform.to_matrix();

        self.transformed_positions.clear();
        self.transformed_positions
            .extend(self.positions.iter().map(|&p| matrix.transform_point3(p)));

        // A mirroring transform reverses the winding, so the normals flip with it
        let handedness = if Mat3::from_mat4(matrix).determinant() < 0.0 {
            -1.0
        } else {
            1.0
        };
        self.transformed_normals.clear();
        self.transformed_normals
            .extend(self.normals.iter().map(|&n| matrix.transform_normal(n) * handedness));

        self.world_bounds = matrix.transform_aabb(&self.bounds);

        log::trace!(
            "Updated mesh transforms: {} vertices, world bounds {:?}",
            self.transformed_positions.len(),
            self.world_bounds
        );
    }

    /// World-space triangles from the cached arrays.
    ///
    /// Faces with an out-of-range index or without a normal are skipped.
    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices
            .chunks_exact(3)
            .zip(self.transformed_normals.iter())
            .filter_map(move |(face, &normal)| {
                let v0 = *self.transformed_positions.get(face[0] as usize)?;
                let v1 = *self.transformed_positions.get(face[1] as usize)?;
                let v2 = *self.transformed_positions.get(face[2] as usize)?;
                Some(Triangle::with_normal(v0, v1, v2, normal, self.cull_mode, self.material))
            })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        if !self.world_bounds.hit(ray) {
            return None;
        }

        let mut closest = None;
        let mut clipped = *ray;

        for triangle in self.world_triangles() {
            if let Some(rec) = triangle.hit(&clipped) {
                clipped = clipped.clipped(rec.t);
                closest = Some(rec);
            }
        }

        closest
    }

    fn occludes(&self, ray: &Ray) -> bool {
        self.world_bounds.hit(ray) && self.world_triangles().any(|triangle| triangle.occludes(ray))
    }
}
