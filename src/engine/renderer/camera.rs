// Camera for the 2D world view

use crate::core::math::Vec2;

/// 2D camera
///
/// `position` is the world point drawn at the centre of the screen. `scale`
/// is the zoom factor per axis (2.0 = every world unit covers two pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub scale: Vec2,
}

impl Camera {
    /// Create a camera at `position` with per-axis zoom `scale`
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Lock the camera on a target (no lag, no deadzone)
    pub fn follow(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2, screen_size: Vec2) -> Vec2 {
        (world_pos - self.position) * self.scale + screen_size / 2.0
    }

    /// Convert screen coordinates to world coordinates
    /// Inverse of `world_to_screen` for non-zero scale
    #[allow(dead_code)]
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> Vec2 {
        (screen_pos - screen_size / 2.0) / self.scale + self.position
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_position_maps_to_screen_center() {
        let camera = Camera::new(Vec2::new(123.5, -42.25), Vec2::new(2.0, 2.0));
        let screen = Vec2::new(640.0, 480.0);

        assert_eq!(
            camera.world_to_screen(camera.position, screen),
            Vec2::new(320.0, 240.0)
        );
    }

    #[test]
    fn test_world_to_screen_scales_offset() {
        let camera = Camera::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, 3.0));
        let screen = Vec2::new(100.0, 100.0);

        let pos = camera.world_to_screen(Vec2::new(15.0, 5.0), screen);
        assert_eq!(pos, Vec2::new(60.0, 35.0));
    }

    #[test]
    fn test_screen_to_world_inverts_projection() {
        let camera = Camera::new(Vec2::new(-7.5, 33.0), Vec2::new(2.0, 2.0));
        let screen = Vec2::new(800.0, 600.0);
        let world = Vec2::new(12.25, -8.0);

        let back = camera.screen_to_world(camera.world_to_screen(world, screen), screen);
        assert_relative_eq!(back.x, world.x);
        assert_relative_eq!(back.y, world.y);
    }

    #[test]
    fn test_follow() {
        let mut camera = Camera::default();
        camera.follow(Vec2::new(3.0, 4.0));
        assert_eq!(camera.position, Vec2::new(3.0, 4.0));
        assert_eq!(camera.scale, Vec2::ONE);
    }
}
