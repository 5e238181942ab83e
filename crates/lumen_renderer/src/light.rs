//! Point and directional lights, and the per-light terms the renderer needs.

use crate::material::Color;
use lumen_math::Vec3;

/// Below this cosine a light is treated as grazing and contributes nothing.
const LAMBERT_COSINE_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Point,
    Directional,
}

/// A light source.
///
/// `origin` is used by point lights, `direction` by directional lights. The
/// direction is a unit vector pointing from the surface towards the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub origin: Vec3,
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub light_type: LightType,
}

impl Light {
    /// Point light radiating `color * intensity`, falling off with distance squared.
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            origin,
            direction: Vec3::ZERO,
            color,
            intensity,
            light_type: LightType::Point,
        }
    }

    /// Light infinitely far away along `direction`.
    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: direction.normalize_or_zero(),
            color,
            intensity,
            light_type: LightType::Directional,
        }
    }
}

/// Vector from `point` towards the light.
///
/// For point lights this is not normalized; its length is the distance.
pub fn direction_to_light(light: &Light, point: Vec3) -> Vec3 {
    match light.light_type {
        LightType::Point => light.origin - point,
        LightType::Directional => light.direction,
    }
}

/// Incident radiance arriving at `point`.
pub fn radiance(light: &Light, point: Vec3) -> Color {
    match light.light_type {
        LightType::Point => {
            light.color * light.intensity / (light.origin - point).length_squared()
        }
        LightType::Directional => light.color * light.intensity,
    }
}

/// Observed area term `normal . light_dir`, exactly zero near grazing angles.
///
/// Both vectors are expected to be unit length.
#[inline]
pub fn lambert_cosine(normal: Vec3, light_dir: Vec3) -> f32 {
    let cosine = normal.dot(light_dir);
    if cosine > LAMBERT_COSINE_EPSILON {
        cosine
    } else {
        0.0
    }
}

/// Upper bound for a shadow ray towards the light.
///
/// A blocker behind a point light must not cast a shadow; directional lights
/// are unbounded.
pub fn shadow_ray_max(light: &Light, to_light: Vec3) -> f32 {
    match light.light_type {
        LightType::Point => to_light.length(),
        LightType::Directional => f32::MAX,
    }
}
