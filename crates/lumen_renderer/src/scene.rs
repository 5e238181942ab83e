//! Scene container: primitives, lights, materials and the camera.
//!
//! Primitives are stored per type and scanned linearly. Only meshes carry
//! a bounding box; everything else is cheap enough to test directly.

use std::path::Path;

use crate::camera::Camera;
use crate::hittable::{self, HitRecord, Hittable};
use crate::light::Light;
use crate::material::Material;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::{CullMode, Triangle};
use crate::triangle_mesh::TriangleMesh;
use lumen_math::Ray;

/// Everything one render session draws.
pub struct Scene {
    name: String,
    camera: Camera,

    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    triangles: Vec<Triangle>,
    meshes: Vec<TriangleMesh>,

    lights: Vec<Light>,
    materials: Vec<Box<dyn Material>>,
}

impl Scene {
    /// Create an empty scene with a default camera.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: Camera::default(),
            spheres: Vec::new(),
            planes: Vec::new(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: impl Material + 'static) -> usize {
        self.materials.push(Box::new(material));
        self.materials.len() - 1
    }

    pub fn add_sphere(&mut self, sphere: Sphere) -> &mut Sphere {
        self.spheres.push(sphere);
        let last = self.spheres.len() - 1;
        &mut self.spheres[last]
    }

    pub fn add_plane(&mut self, plane: Plane) -> &mut Plane {
        self.planes.push(plane);
        let last = self.planes.len() - 1;
        &mut self.planes[last]
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> &mut Triangle {
        self.triangles.push(triangle);
        let last = self.triangles.len() - 1;
        &mut self.triangles[last]
    }

    /// Add a mesh and return its index for later `mesh_mut` access.
    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Load an OBJ file as a mesh.
    ///
    /// A file that cannot be loaded is logged and skipped; the return value
    /// tells the caller whether the mesh was added.
    pub fn add_obj_mesh<P: AsRef<Path>>(&mut self, path: P, cull_mode: CullMode, material: usize) -> bool {
        let path = path.as_ref();
        match lumen_core::load_obj(path) {
            Ok(mesh) => {
                self.add_mesh(TriangleMesh::from_mesh(mesh, cull_mode, material));
                true
            }
            Err(e) => {
                log::warn!("Skipping mesh {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Nearest hit over every primitive in the scene.
    ///
    /// Strictly closer hits replace earlier ones, so the result does not
    /// depend on insertion order except for exact distance ties.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        hittable::closest_hit(self.objects(), ray)
    }

    /// True if anything blocks the ray inside its `(min, max)` range.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        hittable::any_hit(self.objects(), ray)
    }

    fn objects(&self) -> impl Iterator<Item = &dyn Hittable> + '_ {
        let spheres = self.spheres.iter().map(|s| s as &dyn Hittable);
        let planes = self.planes.iter().map(|p| p as &dyn Hittable);
        let triangles = self.triangles.iter().map(|t| t as &dyn Hittable);
        let meshes = self.meshes.iter().map(|m| m as &dyn Hittable);

        spheres.chain(planes).chain(triangles).chain(meshes)
    }

    /// Settle per-frame derived state: mesh world caches and the camera
    /// matrix. Call between frames, never during a render.
    pub fn update(&mut self) {
        for mesh in &mut self.meshes {
            mesh.update_transforms();
        }
        self.camera.calculate_camera_to_world();
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn materials(&self) -> &[Box<dyn Material>] {
        &self.materials
    }

    /// Material by index, if it exists.
    pub fn material(&self, index: usize) -> Option<&dyn Material> {
        self.materials.get(index).map(|m| m.as_ref())
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut TriangleMesh> {
        self.meshes.get_mut(index)
    }

    /// Number of top-level primitives (a mesh counts once).
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len() + self.meshes.len()
    }

    /// Total triangle count across standalone triangles and meshes.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() + self.meshes.iter().map(TriangleMesh::triangle_count).sum::<usize>()
    }
}
