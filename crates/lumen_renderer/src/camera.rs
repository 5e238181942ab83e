//! Fly-through camera for ray generation.
//!
//! The camera is described by an origin plus accumulated yaw and pitch. Once
//! per frame `calculate_camera_to_world` rebuilds the orthonormal basis and
//! caches the matrix that every pixel ray is transformed by.

use lumen_math::{Mat4, Quat, Vec3};

/// Pitch stays short of straight up or down so `Y x forward` never vanishes.
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Per-frame camera input.
///
/// Each axis is active when non-zero; only its sign matters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    pub move_forward: f32,
    pub move_right: f32,
    pub move_up: f32,
    pub yaw: f32,
    pub pitch: f32,
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Vec3,

    forward: Vec3,
    up: Vec3,
    right: Vec3,

    fov_angle: f32, // Vertical field of view in degrees
    fov: f32,       // tan(fov_angle / 2)

    total_yaw: f32,
    total_pitch: f32,

    pub movement_speed: f32,
    pub rotation_speed: f32,

    camera_to_world: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0)
    }
}

impl Camera {
    /// Create a camera at `origin` looking down +Z.
    pub fn new(origin: Vec3, fov_angle: f32) -> Self {
        let mut camera = Self {
            origin,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            fov_angle,
            fov: fov_scale(fov_angle),
            total_yaw: 0.0,
            total_pitch: 0.0,
            movement_speed: 20.0,
            rotation_speed: 2.0,
            camera_to_world: Mat4::IDENTITY,
        };
        camera.calculate_camera_to_world();
        camera
    }

    /// Set movement (units/s) and rotation (rad/s) speeds.
    pub fn with_speeds(mut self, movement_speed: f32, rotation_speed: f32) -> Self {
        self.movement_speed = movement_speed;
        self.rotation_speed = rotation_speed;
        self
    }

    /// Set the initial look direction in radians.
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.total_yaw = yaw;
        self.total_pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        self.forward = forward_from(self.total_yaw, self.total_pitch);
        self.calculate_camera_to_world();
        self
    }

    /// Change the field of view (degrees).
    pub fn set_fov_angle(&mut self, fov_angle: f32) {
        self.fov_angle = fov_angle;
        self.fov = fov_scale(fov_angle);
    }

    pub fn fov_angle(&self) -> f32 {
        self.fov_angle
    }

    /// Field-of-view scale, `tan(fov_angle / 2)`.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.total_yaw
    }

    pub fn pitch(&self) -> f32 {
        self.total_pitch
    }

    /// Integrate one frame of input over `dt` seconds.
    ///
    /// Movement uses the basis from the previous frame; the new forward is
    /// rebuilt from the updated yaw and pitch.
    pub fn update(&mut self, input: &CameraInput, dt: f32) {
        let step = self.movement_speed * dt;
        self.origin += self.forward * step * sign(input.move_forward);
        self.origin += self.right * step * sign(input.move_right);
        self.origin += self.up * step * sign(input.move_up);

        let turn = self.rotation_speed * dt;
        self.total_yaw += turn * sign(input.yaw);
        self.total_pitch = (self.total_pitch + turn * sign(input.pitch)).clamp(-MAX_PITCH, MAX_PITCH);

        self.forward = forward_from(self.total_yaw, self.total_pitch);
    }

    /// Rebuild the basis from `forward` and cache the camera-to-world matrix.
    pub fn calculate_camera_to_world(&mut self) -> Mat4 {
        self.right = Vec3::Y.cross(self.forward).normalize_or_zero();
        self.up = self.forward.cross(self.right).normalize_or_zero();

        self.camera_to_world = Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            self.origin.extend(1.0),
        );
        self.camera_to_world
    }

    /// Matrix from the last `calculate_camera_to_world`.
    pub fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }
}

fn fov_scale(fov_angle: f32) -> f32 {
    (fov_angle.to_radians() * 0.5).tan()
}

/// +Z pitched about X (positive looks up), then yawed about world Y.
fn forward_from(yaw: f32, pitch: f32) -> Vec3 {
    (Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch)) * Vec3::Z
}

#[inline]
fn sign(axis: f32) -> f32 {
    if axis > 0.0 {
        1.0
    } else if axis < 0.0 {
        -1.0
    } else {
        0.0
    }
}
