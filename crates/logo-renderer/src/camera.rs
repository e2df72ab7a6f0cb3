//! Perspective orbit camera with damped controls

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::constants::camera as constants;

/// Camera uniform buffer data sent to GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position (xyz)
    pub eye: [f32; 4],
    /// Camera right vector for billboards
    pub right: [f32; 4],
    /// Camera up vector for billboards
    pub up: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        OrbitCamera::new(1.0).uniform()
    }
}

/// Camera orbiting the origin.
///
/// Input adds angular velocity; [`OrbitCamera::update`] integrates it
/// and bleeds it off by the damping factor every frame, so drags keep
/// gliding briefly after release.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around Y in radians, 0 looks down -Z
    pub yaw: f32,
    /// Elevation in radians
    pub pitch: f32,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub damping: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: constants::DISTANCE,
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees: constants::FOV_DEGREES,
            aspect,
            near: constants::NEAR,
            far: constants::FAR,
            damping: constants::DAMPING,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Add rotation from a drag, in radians
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw_velocity -= delta_yaw * self.damping;
        self.pitch_velocity += delta_pitch * self.damping;
    }

    /// Add zoom; positive moves closer
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_velocity -= delta * self.damping;
    }

    /// Integrate pending motion. Returns true while the camera is still moving.
    pub fn update(&mut self) -> bool {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-1.5, 1.5);
        self.distance = (self.distance * (1.0 + self.zoom_velocity))
            .clamp(constants::MIN_DISTANCE, constants::MAX_DISTANCE);

        let keep = 1.0 - self.damping;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
        self.zoom_velocity *= keep;

        let moving = self.yaw_velocity.abs() > 1e-5
            || self.pitch_velocity.abs() > 1e-5
            || self.zoom_velocity.abs() > 1e-5;
        if !moving {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            self.zoom_velocity = 0.0;
        }
        moving
    }

    /// Back to the default framing
    pub fn reset(&mut self) {
        *self = Self::new(self.aspect);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let view_proj = self.projection_matrix() * view;
        let eye = self.eye();
        // Rows of the view rotation are the camera axes in world space
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
            right: [right.x, right.y, right.z, 0.0],
            up: [up.x, up.y, up.z, 0.0],
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_framing() {
        let camera = OrbitCamera::default();
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 0.0);
        assert_relative_eq!(eye.y, 0.0);
        assert_relative_eq!(eye.z, 8.0);
        assert_relative_eq!(camera.fov_degrees, 50.0);
    }

    #[test]
    fn test_damping_settles() {
        let mut camera = OrbitCamera::default();
        camera.orbit(1.0, 0.0);

        let mut frames = 0;
        while camera.update() {
            frames += 1;
            assert!(frames < 1000, "camera never settled");
        }
        assert!(camera.yaw.abs() > 0.0);
        assert!(frames > 10);
    }

    #[test]
    fn test_billboard_axes() {
        let uniform = OrbitCamera::default().uniform();
        assert_relative_eq!(uniform.right[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(uniform.up[1], 1.0, epsilon = 1e-6);
    }
}
