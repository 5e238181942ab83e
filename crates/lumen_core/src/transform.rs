//! Rotation, translation and scale kept as independent components.

use lumen_math::{Mat4, Quat, Vec3};

/// Transform components that can be composed into a matrix.
///
/// Each component is replaced independently, so rotating a mesh never
/// disturbs its position or size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Replace the translation.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Replace the rotation with a rotation of `pitch` radians about X.
    pub fn set_rotation_x(&mut self, pitch: f32) {
        self.rotation = Quat::from_rotation_x(pitch);
    }

    /// Replace the rotation with a rotation of `yaw` radians about Y.
    pub fn set_rotation_y(&mut self, yaw: f32) {
        self.rotation = Quat::from_rotation_y(yaw);
    }

    /// Replace the rotation with a rotation of `roll` radians about Z.
    pub fn set_rotation_z(&mut self, roll: f32) {
        self.rotation = Quat::from_rotation_z(roll);
    }

    /// Replace the scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}
