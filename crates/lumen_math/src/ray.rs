use crate::{Interval, Vec3};

/// Default lower bound of the parametric interval.
///
/// Keeps secondary rays from re-hitting the surface they start on.
pub const RAY_T_MIN: f32 = 1e-4;

/// A ray in 3D space with origin, unit direction and a valid `t` range.
///
/// A point `origin + t * direction` only counts as a hit when `t` lies
/// strictly inside `(min, max)`. Shadow rays shrink `max` to the distance of
/// the light they are aimed at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub min: f32,
    pub max: f32,
}

impl Ray {
    /// Create a new ray with the default interval `(RAY_T_MIN, f32::MAX)`.
    ///
    /// The direction is normalized. A zero-length direction stays zero and
    /// will simply never hit anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_bounds(origin, direction, RAY_T_MIN, f32::MAX)
    }

    /// Create a new ray with an explicit `(min, max)` interval.
    pub fn with_bounds(origin: Vec3, direction: Vec3, min: f32, max: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            min,
            max,
        }
    }

    /// The valid parametric range as an [`Interval`].
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.min, self.max)
    }

    /// Returns true if `t` is strictly inside `(min, max)`.
    ///
    /// NaN is never accepted.
    #[inline]
    pub fn accepts(&self, t: f32) -> bool {
        self.interval().surrounds(t)
    }

    /// Copy of this ray with `max` lowered to `t`.
    #[inline]
    pub fn clipped(&self, t: f32) -> Self {
        Self { max: t, ..*self }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
