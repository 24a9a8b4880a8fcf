//! Viewer-side state shared with the front ends.
//!
//! The orbit camera is kept apart from the coordinators: they only consume the
//! pointer ray and eye position it produces.

use crate::constants::{
    CAMERA_DEFAULT_DISTANCE, CAMERA_FOVY, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE,
    CAMERA_PITCH_LIMIT,
};
use crate::input::Ray;
use glam::{Mat4, Vec3, Vec4};

/// Right-handed camera orbiting `target` at `distance`.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.15,
            distance: CAMERA_DEFAULT_DISTANCE,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY,
            znear: 0.05,
            zfar: 100.0,
        }
    }
}

impl OrbitCamera {
    /// Rotate by radians; pitch is clamped short of the poles.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
    }

    /// Positive `delta` moves the eye closer.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// World-space ray through normalized device coordinates (`-1..1`, y up).
    pub fn screen_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        let eye = self.eye();
        Ray::new(eye, far - eye)
    }

    /// Project a world point to normalized device coordinates, `None` if behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.projection_matrix() * self.view_matrix() * world.extend(1.0);
        (clip.w > 0.0).then(|| clip.truncate() / clip.w)
    }
}
