//! Triangle primitive for ray tracing.
//!
//! Plane intersection followed by three edge-side tests, with face culling
//! applied before any of the edge work.

use crate::hittable::{HitRecord, Hittable};
use lumen_core::face_normal;
use lumen_math::{Ray, Vec3};

/// Rays whose direction is this close to perpendicular to the normal are
/// treated as parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-3;

/// Which side of a triangle is ignored.
///
/// The front face is the side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    FrontFace,
    #[default]
    BackFace,
    NoCulling,
}

impl CullMode {
    /// True when a ray with `dot = direction . normal` is culled.
    ///
    /// Shadow rays travel from the surface towards the light, the opposite
    /// way to the light itself, so occlusion queries flip the culled side.
    #[inline]
    pub fn culls(self, dot: f32, occlusion: bool) -> bool {
        match (self, occlusion) {
            (CullMode::BackFace, false) | (CullMode::FrontFace, true) => dot > 0.0,
            (CullMode::FrontFace, false) | (CullMode::BackFace, true) => dot < 0.0,
            (CullMode::NoCulling, _) => false,
        }
    }
}

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Unit face normal, zero for a degenerate triangle
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material: usize,
}

impl Triangle {
    /// Create a new triangle from three vertices; the normal follows the
    /// winding `(v1 - v0) x (v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode, material: usize) -> Self {
        Self::with_normal(v0, v1, v2, face_normal(v0, v1, v2), cull_mode, material)
    }

    /// Create a triangle with an explicit normal.
    pub fn with_normal(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        normal: Vec3,
        cull_mode: CullMode,
        material: usize,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: normal.normalize_or_zero(),
            cull_mode,
            material,
        }
    }

    /// Shared intersection path for both query kinds.
    fn intersect_t(&self, ray: &Ray, occlusion: bool) -> Option<f32> {
        let dot = ray.direction.dot(self.normal);

        if self.cull_mode.culls(dot, occlusion) {
            return None;
        }

        // Parallel (or degenerate, or NaN) rays
        if !(dot.abs() >= PARALLEL_EPSILON) {
            return None;
        }

        let t = (self.v0 - ray.origin).dot(self.normal) / dot;
        if !ray.accepts(t) {
            return None;
        }

        let p = ray.at(t);
        let inside = [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
            .iter()
            .all(|&(start, end)| self.normal.dot((end - start).cross(p - start)) > 0.0);

        inside.then_some(t)
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let t = self.intersect_t(ray, false)?;

        Some(HitRecord {
            p: ray.at(t),
            normal: self.normal,
            t,
            material: self.material,
        })
    }

    fn occludes(&self, ray: &Ray) -> bool {
        self.intersect_t(ray, true).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle in the z=5 plane, normal +Z.
    fn triangle(cull_mode: CullMode) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            cull_mode,
            2,
        )
    }

    /// Approaches the front face (direction . normal < 0).
    fn front_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z)
    }

    /// Same line, approaching from behind.
    fn back_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::Z)
    }

    #[test]
    fn test_normal_follows_winding() {
        assert!((triangle(CullMode::NoCulling).normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_triangle_hit() {
        let rec = triangle(CullMode::NoCulling).hit(&front_ray()).unwrap();

        assert!((rec.t - 5.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.material, 2);
    }

    #[test]
    fn test_back_face_culling() {
        let tri = triangle(CullMode::BackFace);
        assert!(tri.hit(&front_ray()).is_some());
        assert!(tri.hit(&back_ray()).is_none());
    }

    #[test]
    fn test_front_face_culling_inverts() {
        let tri = triangle(CullMode::FrontFace);
        assert!(tri.hit(&front_ray()).is_none());
        assert!(tri.hit(&back_ray()).is_some());
    }

    #[test]
    fn test_no_culling_hits_both_sides() {
        let tri = triangle(CullMode::NoCulling);
        let front = tri.hit(&front_ray()).unwrap();
        let back = tri.hit(&back_ray()).unwrap();

        assert!((front.t - back.t).abs() < 1e-5);
    }

    #[test]
    fn test_occlusion_culling_is_flipped() {
        let back_culled = triangle(CullMode::BackFace);
        assert!(back_culled.occludes(&back_ray()));
        assert!(!back_culled.occludes(&front_ray()));

        let front_culled = triangle(CullMode::FrontFace);
        assert!(front_culled.occludes(&front_ray()));
        assert!(!front_culled.occludes(&back_ray()));

        let unculled = triangle(CullMode::NoCulling);
        assert!(unculled.occludes(&front_ray()));
        assert!(unculled.occludes(&back_ray()));
    }

    #[test]
    fn test_miss_outside_edges() {
        let tri = triangle(CullMode::NoCulling);
        let ray = Ray::new(Vec3::new(2.0, 0.0, 10.0), -Vec3::Z);
        assert!(tri.hit(&ray).is_none());
    }

    #[test]
    fn test_point_on_edge_is_outside() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(2.0, 0.0, 5.0),
            Vec3::new(0.0, 2.0, 5.0),
            CullMode::NoCulling,
            0,
        );

        // Lands exactly on the v0-v1 edge
        let ray = Ray::new(Vec3::new(1.0, 0.0, 10.0), -Vec3::Z);
        assert!(tri.hit(&ray).is_none());

        // Just inside
        let ray = Ray::new(Vec3::new(1.0, 0.01, 10.0), -Vec3::Z);
        assert!(tri.hit(&ray).is_some());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = triangle(CullMode::NoCulling);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 5.0), Vec3::X);
        assert!(tri.hit(&ray).is_none());
        assert!(!tri.occludes(&ray));
    }

    #[test]
    fn test_respects_ray_interval() {
        let tri = triangle(CullMode::NoCulling);
        let ray = Ray::with_bounds(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, 1e-4, 4.0);
        assert!(tri.hit(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(2.0, 0.0, 5.0),
            CullMode::NoCulling,
            0,
        );

        assert_eq!(tri.normal, Vec3::ZERO);
        assert!(tri.hit(&Ray::new(Vec3::new(1.0, 0.0, 10.0), -Vec3::Z)).is_none());
        assert!(!tri.occludes(&Ray::new(Vec3::new(1.0, 0.0, 10.0), -Vec3::Z)));
    }

    #[test]
    fn test_explicit_normal_is_normalized() {
        let tri = Triangle::with_normal(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(0.0, 0.0, 3.0),
            CullMode::BackFace,
            0,
        );
        assert_eq!(tri.normal, Vec3::Z);
    }
}
