//! Fly Camera
//!
//! A free-look camera driven by yaw/pitch angles and WASD-style movement.
//! The camera owns no GPU state; per-frame view/projection matrices are
//! derived from it by the frame-state builder.

use glam::{Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;

/// Movement direction relative to the camera orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// A fly camera with yaw/pitch orientation and a perspective frustum.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// Yaw in degrees. `-90.0` looks down the negative Z axis.
    pub yaw: f32,
    /// Pitch in degrees, clamped to (−89, 89).
    pub pitch: f32,
    /// Vertical field of view in degrees, clamped by [`Camera::zoom`].
    pub fov_y: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Mouse-look sensitivity in degrees per pixel.
    pub sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            fov_y: 45.0,
            near: 0.1,
            far: 100.0,
            speed: 2.5,
            sensitivity: 0.1,
        }
    }
}

impl Camera {
    /// Unit vector the camera is looking along.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Unit vector pointing to the camera's right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(WORLD_UP).normalize()
    }

    /// Camera-local up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Right-handed look-at view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up())
    }

    /// Perspective projection for the given output aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect, self.near, self.far)
    }

    /// Moves the camera along one of its local axes.
    pub fn advance(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.forward() * velocity,
            MoveDirection::Backward => self.position -= self.forward() * velocity,
            MoveDirection::Left => self.position -= self.right() * velocity,
            MoveDirection::Right => self.position += self.right() * velocity,
        }
    }

    /// Applies a mouse-look delta (in pixels). Pitch is clamped so the view
    /// never flips over the poles.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-89.0, 89.0);
    }

    /// Applies a scroll-wheel zoom delta to the field of view.
    pub fn zoom(&mut self, delta: f32) {
        self.fov_y = (self.fov_y - delta).clamp(1.0, 45.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!((forward.x).abs() < 1e-5);
        assert!((forward.y).abs() < 1e-5);
        assert!((forward.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, -100_000.0);
        assert!(camera.pitch <= 89.0);
        camera.rotate(0.0, 100_000.0);
        assert!(camera.pitch >= -89.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.zoom(1000.0);
        assert!((camera.fov_y - 1.0).abs() < 1e-5);
        camera.zoom(-1000.0);
        assert!((camera.fov_y - 45.0).abs() < 1e-5);
    }
}
