// Transform utilities for Mat4
//
// Extends glam::Mat4 with the mesh-transform helpers the tracer needs.
// Note: glam::Mat4 already provides transform_point3() and transform_vector3()

use crate::Aabb;
use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal (inverse-transpose of the linear part).
    ///
    /// The result is unit length; a degenerate matrix yields `Vec3::ZERO`.
    fn transform_normal(&self, normal: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        let linear = Mat3::from_mat4(*self);
        if linear.determinant() == 0.0 {
            return Vec3::ZERO;
        }
        (linear.inverse().transpose() * normal).normalize_or_zero()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if *aabb == Aabb::EMPTY {
            return Aabb::EMPTY;
        }

        let (lo, hi) = (aabb.min(), aabb.max());
        let corners = [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ];

        let transformed: Vec<Vec3> = corners
            .iter()
            .map(|&corner| self.transform_point3(corner))
            .collect();

        Aabb::from_point_cloud(&transformed)
    }
}
