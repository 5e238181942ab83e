//! Lumen renderer - Whitted-style CPU ray tracing
//!
//! Primary rays only: every pixel finds its closest hit among spheres,
//! planes, triangles and triangle meshes, then sums the direct contribution
//! of each light with optional hard shadows.

mod camera;
mod framebuffer;
mod hittable;
mod light;
mod material;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;
mod triangle_mesh;

pub use camera::{Camera, CameraInput};
pub use framebuffer::{pack_rgb, unpack_rgb, FrameBuffer};
pub use hittable::{any_hit, closest_hit, HitRecord, Hittable};
pub use light::{direction_to_light, lambert_cosine, radiance, shadow_ray_max, Light, LightType};
pub use material::{Color, Lambert, LambertPhong, Material, SolidColor};
pub use plane::Plane;
pub use renderer::{
    color_to_rgb, max_to_one, render_pixel, shade_hit, LightingMode, RenderSettings, Renderer, Threads,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::{CullMode, Triangle};
pub use triangle_mesh::TriangleMesh;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Ray, Vec3};
