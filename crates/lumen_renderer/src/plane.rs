//! Infinite plane primitive.

use crate::hittable::{HitRecord, Hittable};
use lumen_math::{Ray, Vec3};

/// An infinite plane through `origin` with a unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material: usize,
}

impl Plane {
    /// Create a new plane. The normal is normalized.
    pub fn new(origin: Vec3, normal: Vec3, material: usize) -> Self {
        Self {
            origin,
            normal: normal.normalize_or_zero(),
            material,
        }
    }

    fn intersect_t(&self, ray: &Ray) -> Option<f32> {
        // A parallel ray divides by zero; the resulting inf/NaN fails `accepts`
        let t = (self.origin - ray.origin).dot(self.normal) / ray.direction.dot(self.normal);
        ray.accepts(t).then_some(t)
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.intersect_t(ray)?;

        Some(HitRecord {
            p: ray.at(t),
            normal: self.normal,
            t,
            material: self.material,
        })
    }

    fn occludes(&self, ray: &Ray) -> bool {
        self.intersect_t(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Plane {
        Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y, 1)
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::new(3.0, 4.0, 0.0), -Vec3::Y);
        let rec = ground().hit(&ray).unwrap();

        assert!((rec.t - 6.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(3.0, -2.0, 0.0)).length() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);
        assert_eq!(rec.material, 1);
    }

    #[test]
    fn test_plane_oblique_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -1.0, 0.0));
        let rec = ground().hit(&ray).unwrap();

        assert!((rec.p.y + 2.0).abs() < 1e-5);
        assert!((rec.t - 2.0 * 2.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_never_hits() {
        let plane = ground();

        // Above the plane
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(plane.hit(&ray).is_none());
        assert!(!plane.occludes(&ray));

        // Inside the plane itself (0 / 0)
        let ray = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Z);
        assert!(plane.hit(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(ground().hit(&ray).is_none());
    }

    #[test]
    fn test_plane_respects_ray_max() {
        let ray = Ray::with_bounds(Vec3::ZERO, -Vec3::Y, 1e-4, 1.5);
        assert!(!ground().occludes(&ray));
    }

    #[test]
    fn test_zero_direction_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(ground().hit(&ray).is_none());
    }
}
