//! Orthographic look-at camera.

use glam::{Mat4, Quat, Vec3};

/// Multiplicative zoom applied to the view bound per key press.
pub const ZOOM_FACTOR: f32 = 1.1;

/// View rotation per key press, in degrees.
pub const ROTATE_STEP_DEGREES: f32 = 1.25 / 4.0;

/// Eye, view direction, up vector and the half-extent of the orthographic
/// view volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    /// Viewing direction; the look-at target is `eye + view_dir`.
    pub view_dir: Vec3,
    pub up: Vec3,
    /// World-space half-extent of the view volume along every axis.
    pub view_bound: f32,
}

impl Camera {
    pub fn new(eye: Vec3, view_dir: Vec3, up: Vec3, view_bound: f32) -> Self {
        Self {
            eye,
            view_dir,
            up,
            view_bound,
        }
    }

    /// Look-at view matrix from the eye toward `eye + view_dir`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.eye + self.view_dir, self.up)
    }

    /// Orthographic projection spanning `[-bound, bound]` on every axis,
    /// with reverse-Z (eye-space `z = +bound` maps to depth 1, `z = -bound` to 0).
    pub fn projection_matrix(&self) -> Mat4 {
        let b = self.view_bound;
        // near/far swapped for reverse-Z
        Mat4::orthographic_rh(-b, b, -b, b, b, -b)
    }

    /// Translate the eye.
    pub fn pan(&mut self, delta: Vec3) {
        self.eye += delta;
    }

    /// Eye translation distance for one key press at the current zoom.
    pub fn pan_step(&self, fraction: f32) -> f32 {
        self.view_bound * fraction
    }

    /// Rotate the view direction about the up vector.
    pub fn rotate_view(&mut self, degrees: f32) {
        let axis = self.up.normalize_or(Vec3::Y);
        self.view_dir = Quat::from_axis_angle(axis, degrees.to_radians()) * self.view_dir;
    }

    /// Shrink the view volume (objects appear larger).
    pub fn zoom_in(&mut self) {
        self.view_bound /= ZOOM_FACTOR;
    }

    /// Grow the view volume.
    pub fn zoom_out(&mut self) {
        self.view_bound *= ZOOM_FACTOR;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            view_dir: Vec3::NEG_Z,
            up: Vec3::Y,
            view_bound: 2.0e11,
        }
    }
}
