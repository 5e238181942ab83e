//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Queries return `Option<HitRecord>`; `None` is the ordinary no-hit outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index into the scene's material list
    pub material: usize,
}

/// Trait for objects that can be hit by rays.
///
/// Every primitive answers two questions: where is the nearest hit inside
/// the ray's `(min, max)` range, and does anything block the ray at all.
pub trait Hittable: Send + Sync {
    /// Nearest hit with `t` strictly inside `(ray.min, ray.max)`.
    fn hit(&self, ray: &Ray) -> Option<HitRecord>;

    /// Occlusion query for shadow rays. May stop at the first valid hit.
    fn occludes(&self, ray: &Ray) -> bool {
        self.hit(ray).is_some()
    }
}

/// Closest hit over a set of objects.
///
/// The ray's `max` shrinks to each accepted hit, so a later object only
/// replaces the current record when it is strictly closer. Equal distances
/// keep the earlier object.
pub fn closest_hit<'a, I>(objects: I, ray: &Ray) -> Option<HitRecord>
where
    I: IntoIterator<Item = &'a dyn Hittable>,
{
    let mut closest = None;
    let mut clipped = *ray;

    for object in objects {
        if let Some(rec) = object.hit(&clipped) {
            clipped.max = rec.t;
            closest = Some(rec);
        }
    }

    closest
}

/// True as soon as any object blocks the ray.
pub fn any_hit<'a, I>(objects: I, ray: &Ray) -> bool
where
    I: IntoIterator<Item = &'a dyn Hittable>,
{
    objects.into_iter().any(|object| object.occludes(ray))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use crate::triangle::{CullMode, Triangle};
    use crate::triangle_mesh::TriangleMesh;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn quad_mesh() -> TriangleMesh {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        let mut mesh = TriangleMesh::new(positions, vec![0, 1, 2, 1, 3, 2], CullMode::NoCulling, 4);
        mesh.translate(Vec3::new(1.0, 0.0, 6.0));
        mesh.update_transforms();
        mesh
    }

    /// Nearest hit found by asking every object separately.
    fn brute_force(objects: &[&dyn Hittable], ray: &Ray) -> Option<HitRecord> {
        objects
            .iter()
            .filter_map(|object| object.hit(ray))
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }

    #[test]
    fn test_closest_hit_ignores_object_order() {
        let sphere = Sphere::new(Vec3::new(-1.5, 0.0, 10.0), 1.0, 1);
        let small_sphere = Sphere::new(Vec3::new(-2.0, 0.0, 5.0), 0.5, 5);
        let plane = Plane::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z, 2);
        let triangle = Triangle::new(
            Vec3::new(-2.0, -2.0, 8.0),
            Vec3::new(2.0, -2.0, 8.0),
            Vec3::new(0.0, 2.0, 8.0),
            CullMode::NoCulling,
            3,
        );
        let mesh = quad_mesh();

        let mut objects: Vec<&dyn Hittable> = vec![&sphere, &small_sphere, &plane, &triangle, &mesh];

        let mut rays = Vec::new();
        for i in 0..9 {
            let x = -2.85 + i as f32 * 0.7;
            for y in [-0.4, 0.25] {
                rays.push(Ray::new(Vec3::new(x, y, 0.0), Vec3::Z));
                rays.push(Ray::new(Vec3::new(x, y, 0.0), Vec3::new(0.1, 0.05, 1.0)));
            }
        }

        let expected: Vec<_> = rays.iter().map(|ray| brute_force(&objects, ray)).collect();
        let materials: Vec<usize> = expected.iter().flatten().map(|rec| rec.material).collect();
        for material in 1..=5 {
            assert!(materials.contains(&material), "no ray reaches material {material} first");
        }

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            objects.shuffle(&mut rng);
            for (ray, expected) in rays.iter().zip(&expected) {
                let actual = closest_hit(objects.iter().copied(), ray);
                assert_eq!(expected.map(|h| h.material), actual.map(|h| h.material));
                if let (Some(e), Some(a)) = (expected, actual) {
                    assert!((e.t - a.t).abs() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_any_hit_matches_closest_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, 1);
        let mesh = quad_mesh();
        let objects: [&dyn Hittable; 2] = [&sphere, &mesh];

        let blocked = Ray::new(Vec3::new(1.3, 0.2, 0.0), Vec3::Z);
        let open = Ray::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::Z);

        assert!(any_hit(objects, &blocked));
        assert!(closest_hit(objects, &blocked).is_some());
        assert!(!any_hit(objects, &open));
        assert!(closest_hit(objects, &open).is_none());
    }
}
