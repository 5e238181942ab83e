//! Material trait for surface shading.
//!
//! Materials answer one question per light: how much of the incoming light
//! leaves the surface towards the viewer.

use crate::hittable::HitRecord;
use lumen_math::Vec3;
use std::f32::consts::PI;

/// Color type alias (linear RGB, not clamped)
pub type Color = Vec3;

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// BRDF value for one light.
    ///
    /// `light_dir` points from the hit towards the light, `view_dir` is the
    /// direction of the incoming view ray. Both are unit length.
    fn shade(&self, hit: &HitRecord, light_dir: Vec3, view_dir: Vec3) -> Color;
}

/// Flat color, independent of lights and viewer.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Material for SolidColor {
    fn shade(&self, _hit: &HitRecord, _light_dir: Vec3, _view_dir: Vec3) -> Color {
        self.color
    }
}

/// Lambert (diffuse) BRDF: `diffuse_color * reflectance / pi`.
#[derive(Debug, Clone, Copy)]
pub struct Lambert {
    diffuse_color: Color,
    diffuse_reflectance: f32,
}

impl Lambert {
    pub fn new(diffuse_color: Color, diffuse_reflectance: f32) -> Self {
        Self {
            diffuse_color,
            diffuse_reflectance,
        }
    }
}

impl Material for Lambert {
    fn shade(&self, _hit: &HitRecord, _light_dir: Vec3, _view_dir: Vec3) -> Color {
        lambert(self.diffuse_reflectance, self.diffuse_color)
    }
}

/// Lambert diffuse plus a Phong specular lobe.
///
/// Reflectances are expected to satisfy `kd + ks <= 1`.
#[derive(Debug, Clone, Copy)]
pub struct LambertPhong {
    diffuse_color: Color,
    diffuse_reflectance: f32,
    specular_reflectance: f32,
    phong_exponent: f32,
}

impl LambertPhong {
    pub fn new(diffuse_color: Color, kd: f32, ks: f32, phong_exponent: f32) -> Self {
        Self {
            diffuse_color,
            diffuse_reflectance: kd,
            specular_reflectance: ks,
            phong_exponent,
        }
    }
}

impl Material for LambertPhong {
    fn shade(&self, hit: &HitRecord, light_dir: Vec3, view_dir: Vec3) -> Color {
        lambert(self.diffuse_reflectance, self.diffuse_color)
            + phong(
                self.specular_reflectance,
                self.phong_exponent,
                light_dir,
                view_dir,
                hit.normal,
            )
    }
}

#[inline]
fn lambert(kd: f32, cd: Color) -> Color {
    cd * kd / PI
}

/// Phong specular term.
///
/// The light direction is mirrored about the normal. Seen along the
/// incoming view direction, a perfect mirror reflection lines up with it.
fn phong(ks: f32, exponent: f32, light_dir: Vec3, view_dir: Vec3, normal: Vec3) -> Color {
    let reflected = light_dir - 2.0 * normal.dot(light_dir) * normal;
    let cosine = reflected.dot(view_dir).max(0.0);
    Color::splat(ks * cosine.powf(exponent))
}
