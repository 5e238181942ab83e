//! Per-pixel Whitted-style renderer.
//!
//! For every pixel a primary ray is traced to the closest hit, each light is
//! optionally tested for occlusion, and the contributions are combined
//! according to the active [`LightingMode`]. Rows are rendered in parallel
//! with rayon; the sequential path produces identical output.

use std::fmt;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::framebuffer::{pack_rgb, FrameBuffer};
use crate::hittable::HitRecord;
use crate::light::{direction_to_light, lambert_cosine, radiance, shadow_ray_max};
use crate::material::Color;
use crate::scene::Scene;
use lumen_math::{Mat4, Ray, Vec3, RAY_T_MIN};

/// Offset along the normal for shadow ray origins.
const SHADOW_BIAS: f32 = 1e-2;

/// Which lighting term ends up in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    /// Lambert cosine only, grayscale
    ObservedArea,
    /// Incident radiance only
    Radiance,
    /// Material BRDF only
    Brdf,
    /// `radiance * brdf * cosine`
    #[default]
    Combined,
}

impl LightingMode {
    pub const ALL: [LightingMode; 4] = [
        LightingMode::ObservedArea,
        LightingMode::Radiance,
        LightingMode::Brdf,
        LightingMode::Combined,
    ];

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightingMode::ObservedArea => "Observed Area",
            LightingMode::Radiance => "Radiance",
            LightingMode::Brdf => "BRDF",
            LightingMode::Combined => "Combined",
        };
        f.write_str(name)
    }
}

/// Render toggles. Changed between frames only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub shadows: bool,
    pub lighting_mode: LightingMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadows: true,
            lighting_mode: LightingMode::Combined,
        }
    }
}

impl RenderSettings {
    /// Flip shadows on/off and return the new status line.
    pub fn toggle_shadows(&mut self) -> String {
        self.shadows = !self.shadows;
        let status = self.status_line();
        log::info!("{status}");
        status
    }

    /// Advance to the next lighting mode and return the new status line.
    pub fn cycle_lighting_mode(&mut self) -> String {
        self.lighting_mode = self.lighting_mode.next();
        let status = self.status_line();
        log::info!("{status}");
        status
    }

    pub fn status_line(&self) -> String {
        format!(
            "Shadows: {} | Lighting: {}",
            if self.shadows { "on" } else { "off" },
            self.lighting_mode
        )
    }
}

/// How pixel rows are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threads {
    /// Rayon's global pool
    #[default]
    Global,
    /// Dedicated pool with this many workers
    Fixed(usize),
    /// Plain loop on the calling thread
    Sequential,
}

/// Renders frames of a scene into a [`FrameBuffer`].
#[derive(Debug)]
pub struct Renderer {
    threads: Threads,
    pool: Option<rayon::ThreadPool>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Threads::Global)
    }
}

impl Renderer {
    /// Create a renderer. A dedicated pool is built once here; if that is
    /// not possible the renderer runs sequentially.
    pub fn new(threads: Threads) -> Self {
        match threads {
            Threads::Fixed(0) => {
                log::warn!("Zero worker threads requested, rendering sequentially");
                Self::sequential()
            }
            Threads::Fixed(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Self {
                    threads,
                    pool: Some(pool),
                },
                Err(e) => {
                    log::warn!("Failed to build {n}-thread pool ({e}), rendering sequentially");
                    Self::sequential()
                }
            },
            Threads::Global | Threads::Sequential => Self { threads, pool: None },
        }
    }

    fn sequential() -> Self {
        Self {
            threads: Threads::Sequential,
            pool: None,
        }
    }

    /// The threading mode actually in use.
    pub fn threads(&self) -> Threads {
        self.threads
    }

    /// Render one frame.
    ///
    /// The scene must be settled (`Scene::update`) before this is called;
    /// it is only read during the pass.
    pub fn render(&self, scene: &Scene, settings: &RenderSettings, buffer: &mut FrameBuffer) {
        if buffer.width == 0 || buffer.height == 0 {
            return;
        }

        let start = Instant::now();
        let width = buffer.width as usize;
        buffer.pixels.resize(width * buffer.height as usize, 0);

        let frame = FrameContext::new(scene, settings, buffer.width, buffer.height);
        let render_row = |(y, row): (usize, &mut [u32])| frame.render_row(y, row);

        match (self.threads, &self.pool) {
            (Threads::Fixed(_), Some(pool)) => pool.install(|| {
                buffer.pixels.par_chunks_mut(width).enumerate().for_each(render_row)
            }),
            (Threads::Global, _) => buffer.pixels.par_chunks_mut(width).enumerate().for_each(render_row),
            _ => buffer.pixels.chunks_mut(width).enumerate().for_each(render_row),
        }

        log::debug!(
            "Rendered {}x{} frame in {:.2?} ({:?})",
            buffer.width,
            buffer.height,
            start.elapsed(),
            self.threads
        );
    }
}

/// Read-only state shared by every pixel of one frame.
struct FrameContext<'a> {
    scene: &'a Scene,
    settings: &'a RenderSettings,
    camera_to_world: Mat4,
    origin: Vec3,
    fov: f32,
    aspect: f32,
    width: f32,
    height: f32,
}

impl<'a> FrameContext<'a> {
    fn new(scene: &'a Scene, settings: &'a RenderSettings, width: u32, height: u32) -> Self {
        let camera = scene.camera();
        Self {
            scene,
            settings,
            camera_to_world: camera.camera_to_world(),
            origin: camera.origin,
            fov: camera.fov(),
            aspect: width as f32 / height as f32,
            width: width as f32,
            height: height as f32,
        }
    }

    fn render_row(&self, y: usize, row: &mut [u32]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            let color = max_to_one(self.pixel(x as u32, y as u32));
            *pixel = pack_rgb(color_to_rgb(color));
        }
    }

    /// Primary ray through the center of pixel (px, py).
    fn primary_ray(&self, px: u32, py: u32) -> Ray {
        let cx = (2.0 * (px as f32 + 0.5) / self.width - 1.0) * self.aspect * self.fov;
        let cy = (1.0 - 2.0 * (py as f32 + 0.5) / self.height) * self.fov;

        let direction = Vec3::new(cx, cy, 1.0).normalize();
        Ray::new(self.origin, self.camera_to_world.transform_vector3(direction))
    }

    fn pixel(&self, px: u32, py: u32) -> Color {
        let ray = self.primary_ray(px, py);
        match self.scene.closest_hit(&ray) {
            Some(hit) => shade_hit(self.scene, self.settings, &hit, ray.direction),
            None => Color::ZERO,
        }
    }
}

/// Unclamped color of pixel (px, py) in a `width x height` frame.
pub fn render_pixel(
    scene: &Scene,
    settings: &RenderSettings,
    px: u32,
    py: u32,
    width: u32,
    height: u32,
) -> Color {
    FrameContext::new(scene, settings, width, height).pixel(px, py)
}

/// Sum of all light contributions at a hit, for the active lighting mode.
///
/// `view_dir` is the direction of the ray that found the hit.
pub fn shade_hit(scene: &Scene, settings: &RenderSettings, hit: &HitRecord, view_dir: Vec3) -> Color {
    let material = scene.material(hit.material);
    let mode = settings.lighting_mode;
    let shadow_origin = hit.p + hit.normal * SHADOW_BIAS;

    let mut color = Color::ZERO;
    for light in scene.lights() {
        let light_dir = direction_to_light(light, hit.p).normalize_or_zero();
        let cosine = lambert_cosine(hit.normal, light_dir);

        // Nothing to add, so no shadow ray either
        if cosine == 0.0 && matches!(mode, LightingMode::ObservedArea | LightingMode::Combined) {
            continue;
        }

        if settings.shadows {
            let to_light = direction_to_light(light, shadow_origin);
            let shadow_ray = Ray::with_bounds(
                shadow_origin,
                to_light,
                RAY_T_MIN,
                shadow_ray_max(light, to_light),
            );
            if scene.does_hit(&shadow_ray) {
                continue;
            }
        }

        color += match (mode, material) {
            (LightingMode::ObservedArea, _) => Color::splat(cosine),
            (LightingMode::Radiance, _) => radiance(light, hit.p),
            (LightingMode::Brdf, Some(material)) => material.shade(hit, light_dir, view_dir),
            (LightingMode::Combined, Some(material)) => {
                radiance(light, hit.p) * material.shade(hit, light_dir, view_dir) * cosine
            }
            (LightingMode::Brdf | LightingMode::Combined, None) => Color::ZERO,
        };
    }

    color
}

/// Scale all channels down by the largest one when it exceeds 1.
#[inline]
pub fn max_to_one(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Convert a color to 8-bit channels. Non-finite channels become 0.
#[inline]
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::light::Light;
    use crate::material::{Lambert, LambertPhong, SolidColor};
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use crate::triangle::{CullMode, Triangle};

    fn test_scene() -> Scene {
        let mut scene = Scene::new("test");
        scene.set_camera(Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0).with_orientation(0.0, -0.2));

        let white = scene.add_material(Lambert::new(Color::ONE, 1.0));
        let red = scene.add_material(LambertPhong::new(Color::new(0.9, 0.1, 0.1), 0.7, 0.3, 40.0));
        let green = scene.add_material(SolidColor::new(Color::new(0.1, 0.8, 0.1)));

        scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, white));
        scene.add_sphere(Sphere::new(Vec3::new(-1.5, 1.0, 0.0), 1.0, red));
        scene.add_sphere(Sphere::new(Vec3::new(1.5, 1.0, 1.0), 1.0, green));
        scene.add_triangle(Triangle::new(
            Vec3::new(-3.0, 0.5, 4.0),
            Vec3::new(0.0, 3.5, 4.0),
            Vec3::new(3.0, 0.5, 4.0),
            CullMode::BackFace,
            white,
        ));

        scene.add_light(Light::point(Vec3::new(0.0, 6.0, -3.0), 50.0, Color::ONE));
        scene.add_light(Light::directional(Vec3::new(0.3, 1.0, -0.5), 0.5, Color::new(1.0, 0.9, 0.8)));
        scene.update();
        scene
    }

    fn render_with(threads: Threads, settings: &RenderSettings) -> FrameBuffer {
        let scene = test_scene();
        let mut buffer = FrameBuffer::new(48, 32);
        Renderer::new(threads).render(&scene, settings, &mut buffer);
        buffer
    }

    #[test]
    fn test_max_to_one() {
        assert_eq!(max_to_one(Color::new(2.0, 1.0, 0.0)), Color::new(1.0, 0.5, 0.0));
        assert_eq!(max_to_one(Color::new(0.3, 0.2, 0.1)), Color::new(0.3, 0.2, 0.1));
        assert_eq!(max_to_one(Color::ONE), Color::ONE);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::new(1.0, 0.0, 0.5)), [255, 0, 127]);
        assert_eq!(color_to_rgb(Color::new(2.0, -1.0, 0.0)), [255, 0, 0]);
        assert_eq!(color_to_rgb(Color::new(f32::NAN, f32::INFINITY, 0.2)), [0, 255, 51]);
    }

    #[test]
    fn test_lighting_mode_cycles_with_period_four() {
        let mut mode = LightingMode::default();
        assert_eq!(mode, LightingMode::Combined);
        assert_eq!(mode.next(), LightingMode::ObservedArea);

        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, LightingMode::Combined);
    }

    #[test]
    fn test_toggles_report_status() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.status_line(), "Shadows: on | Lighting: Combined");

        assert_eq!(settings.toggle_shadows(), "Shadows: off | Lighting: Combined");
        assert_eq!(settings.cycle_lighting_mode(), "Shadows: off | Lighting: Observed Area");
        assert!(!settings.shadows);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: RenderSettings = serde_json::from_str(r#"{ "lighting_mode": "radiance" }"#).unwrap();
        assert!(settings.shadows);
        assert_eq!(settings.lighting_mode, LightingMode::Radiance);

        let settings: RenderSettings = serde_json::from_str(r#"{ "shadows": false }"#).unwrap();
        assert_eq!(settings.lighting_mode, LightingMode::Combined);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for mode in LightingMode::ALL {
            for shadows in [true, false] {
                let settings = RenderSettings {
                    shadows,
                    lighting_mode: mode,
                };
                let sequential = render_with(Threads::Sequential, &settings);

                assert_eq!(render_with(Threads::Global, &settings), sequential);
                assert_eq!(render_with(Threads::Fixed(3), &settings), sequential);
            }
        }
    }

    #[test]
    fn test_render_is_not_blank() {
        let buffer = render_with(Threads::Global, &RenderSettings::default());
        assert!(buffer.pixels.iter().any(|&p| p != 0));
    }

    #[test]
    fn test_zero_threads_falls_back_to_sequential() {
        assert_eq!(Renderer::new(Threads::Fixed(0)).threads(), Threads::Sequential);
        assert_eq!(Renderer::new(Threads::Fixed(2)).threads(), Threads::Fixed(2));
    }

    #[test]
    fn test_zero_sized_buffer() {
        let scene = test_scene();
        let mut buffer = FrameBuffer::new(0, 10);
        Renderer::default().render(&scene, &RenderSettings::default(), &mut buffer);
        assert!(buffer.pixels.is_empty());
    }

    #[test]
    fn test_miss_is_black() {
        let mut scene = Scene::new("empty");
        scene.add_light(Light::point(Vec3::Y, 10.0, Color::ONE));
        let mut buffer = FrameBuffer::new(8, 8);
        buffer.pixels.fill(0x00ff_ffff);

        Renderer::new(Threads::Sequential).render(&scene, &RenderSettings::default(), &mut buffer);
        assert!(buffer.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let mut scene = Scene::new("forward");
        let material = scene.add_material(SolidColor::new(Color::ONE));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 0.5, material));
        scene.add_light(Light::directional(-Vec3::Z, 1.0, Color::ONE));

        let settings = RenderSettings {
            shadows: false,
            lighting_mode: LightingMode::Brdf,
        };
        assert_eq!(render_pixel(&scene, &settings, 50, 50, 101, 101), Color::ONE);
        assert_eq!(render_pixel(&scene, &settings, 0, 0, 101, 101), Color::ZERO);
    }

    #[test]
    fn test_fov_spans_the_vertical_axis() {
        let mut scene = Scene::new("fov");
        scene.set_camera(Camera::new(Vec3::ZERO, 90.0));
        scene.update();
        let settings = RenderSettings::default();
        let frame = FrameContext::new(&scene, &settings, 200, 100);

        // tan(45) = 1 covers the half height; the width gets the aspect on top
        let top = frame.primary_ray(100, 0).direction;
        assert!((top.y / top.z - 0.99).abs() < 1e-4);

        let side = frame.primary_ray(0, 50).direction;
        assert!((side.x.abs() / side.z - 1.99).abs() < 1e-4);
    }

    /// Ground plane, a blocker sphere above the origin, and a light above that.
    fn shadow_scene() -> Scene {
        let mut scene = Scene::new("shadow");
        let material = scene.add_material(Lambert::new(Color::ONE, 1.0));
        scene.add_plane(Plane::new(Vec3::ZERO, Vec3::Y, material));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 1.0, material));
        scene.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), 30.0, Color::ONE));
        scene
    }

    #[test]
    fn test_shadows_reduce_contribution() {
        let scene = shadow_scene();
        let hit = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            material: 0,
        };
        let view_dir = Vec3::new(0.0, -1.0, 1.0).normalize();

        for mode in LightingMode::ALL {
            let lit = RenderSettings {
                shadows: false,
                lighting_mode: mode,
            };
            let shadowed = RenderSettings {
                shadows: true,
                lighting_mode: mode,
            };

            let without = shade_hit(&scene, &lit, &hit, view_dir);
            let with = shade_hit(&scene, &shadowed, &hit, view_dir);

            assert!(without.max_element() > 0.0, "{mode} should be lit without shadows");
            assert_eq!(with, Color::ZERO, "{mode} should be fully shadowed");
        }
    }

    #[test]
    fn test_blocker_behind_point_light_casts_no_shadow() {
        let mut scene = Scene::new("behind");
        let material = scene.add_material(Lambert::new(Color::ONE, 1.0));
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 8.0, 0.0), 1.0, material));
        scene.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), 30.0, Color::ONE));

        let hit = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            material,
        };
        let color = shade_hit(&scene, &RenderSettings::default(), &hit, -Vec3::Y);
        assert!(color.max_element() > 0.0);
    }

    #[test]
    fn test_combined_is_product_of_terms() {
        let mut scene = Scene::new("combined");
        let material = scene.add_material(Lambert::new(Color::new(1.0, 0.5, 0.25), 0.8));
        scene.add_light(Light::directional(Vec3::new(0.0, 1.0, 1.0), 2.0, Color::ONE));

        let hit = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            material,
        };
        let settings_for = |lighting_mode| RenderSettings {
            shadows: false,
            lighting_mode,
        };
        let term = |mode| shade_hit(&scene, &settings_for(mode), &hit, -Vec3::Y);

        let expected = term(LightingMode::Radiance) * term(LightingMode::Brdf) * term(LightingMode::ObservedArea);
        assert!((term(LightingMode::Combined) - expected).length() < 1e-5);
    }

    #[test]
    fn test_missing_material_contributes_nothing() {
        let mut scene = Scene::new("no material");
        scene.add_light(Light::directional(Vec3::Y, 1.0, Color::ONE));
        let hit = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            material: 7,
        };

        let combined = shade_hit(&scene, &RenderSettings::default(), &hit, -Vec3::Y);
        assert_eq!(combined, Color::ZERO);

        let area = RenderSettings {
            shadows: true,
            lighting_mode: LightingMode::ObservedArea,
        };
        assert_eq!(shade_hit(&scene, &area, &hit, -Vec3::Y), Color::ONE);
    }
}
