//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use lumen_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: usize,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: usize) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Distance to the near intersection, geometric solution.
    ///
    /// Only the entry point `dp - tca` is considered, so a ray starting
    /// inside the sphere never reports the far wall.
    fn near_t(&self, ray: &Ray) -> Option<f32> {
        if self.radius <= 0.0 {
            return None;
        }

        let l = self.center - ray.origin;
        let dp = l.dot(ray.direction);
        let od_squared = l.length_squared() - dp * dp;
        let radius_squared = self.radius * self.radius;

        // Written as a negated `<` so NaN also misses
        if !(od_squared < radius_squared) {
            return None;
        }

        let tca = (radius_squared - od_squared).sqrt();
        let t = dp - tca;
        ray.accepts(t).then_some(t)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.near_t(ray)?;
        let p = ray.at(t);

        Some(HitRecord {
            p,
            normal: (p - self.center).normalize_or_zero(),
            t,
            material: self.material,
        })
    }

    fn occludes(&self, ray: &Ray) -> bool {
        self.near_t(ray).is_some()
    }
}
