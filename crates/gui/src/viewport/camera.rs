use glam::{Mat4, Vec3};

/// Closest the camera may orbit to the target
pub const MIN_DISTANCE: f32 = 1.0;
/// Farthest the camera may orbit from the target
pub const MAX_DISTANCE: f32 = 20.0;

/// Orbit camera for the product viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    /// Camera at (0, 0, 5) looking at the origin
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            target: Vec3::ZERO,
            fov: 50.0_f32.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        // Scale with distance so panning feels the same at any zoom
        let scale = self.distance * 0.002;
        self.target += (right * dx + up * dy) * scale;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 200.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_eye_position() {
        let cam = ArcBallCamera::new();
        let eye = cam.eye_position();
        assert!((eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_zoom_is_bounded() {
        let mut cam = ArcBallCamera::new();
        for _ in 0..100 {
            cam.zoom(0.5);
        }
        assert_eq!(cam.distance, MIN_DISTANCE);

        for _ in 0..100 {
            cam.zoom(-0.5);
        }
        assert_eq!(cam.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = ArcBallCamera::new();
        cam.rotate(0.0, 500.0);
        assert!(cam.pitch <= 1.5);
        cam.rotate(0.0, -1000.0);
        assert!(cam.pitch >= -1.5);
    }

    #[test]
    fn test_pan_moves_target_sideways() {
        let mut cam = ArcBallCamera::new();
        cam.pan(100.0, 0.0);
        assert!(cam.target.x.abs() > 0.0);
        assert!(cam.target.y.abs() < 1e-5);
        // Orbit distance is unchanged by panning
        assert!(((cam.eye_position() - cam.target).length() - 5.0).abs() < 1e-4);
    }
}
