//! Fixed preview camera and the screen-space helpers built on it.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::params::RenderConfig;

/// Perspective camera looking at the scene origin
#[derive(Debug, Clone)]
pub struct PreviewCamera {
    eye: Vec3,
    target: Vec3,
    fov_y_rad: f32,
    near: f32,
    far: f32,
}

impl PreviewCamera {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::from_array(config.camera_position),
            target: Vec3::ZERO,
            fov_y_rad: config.fov_degrees.to_radians(),
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y_rad, aspect, self.near, self.far);
        proj * view
    }

    /// Visible world-space (width, height) on the plane through the look-at target
    pub fn viewport(&self, aspect: f32) -> Vec2 {
        let distance = self.eye.distance(self.target);
        let height = 2.0 * (self.fov_y_rad * 0.5).tan() * distance;
        Vec2::new(height * aspect, height)
    }

    /// Project a world point to pixel coordinates (origin top-left)
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, point: Vec3, screen: Vec2) -> Option<Vec2> {
        let aspect = screen.x / screen.y.max(1.0);
        let clip = self.view_proj(aspect) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * screen.x,
            (0.5 - ndc.y * 0.5) * screen.y,
        ))
    }

    /// Whether the cursor falls inside the projected bounding circle of a sphere
    pub fn hit_test(&self, cursor: Vec2, center: Vec3, radius: f32, screen: Vec2) -> bool {
        let Some(projected) = self.project(center, screen) else {
            return false;
        };
        let distance = self.eye.distance(center).max(self.near);
        let pixels_per_unit = screen.y / (2.0 * (self.fov_y_rad * 0.5).tan() * distance);
        cursor.distance(projected) <= radius * pixels_per_unit
    }
}

/// Convert a pixel position to normalized device coordinates ([-1, 1], y up)
pub fn normalize_pointer(cursor: Vec2, screen: Vec2) -> Vec2 {
    if screen.x <= 0.0 || screen.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        cursor.x / screen.x * 2.0 - 1.0,
        -(cursor.y / screen.y * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = PreviewCamera::new(&RenderConfig::default());
        let p = camera.project(Vec3::ZERO, SCREEN).unwrap();
        assert!((p - SCREEN * 0.5).length() < 1e-3);
    }

    #[test]
    fn test_left_object_projects_left() {
        let camera = PreviewCamera::new(&RenderConfig::default());
        let p = camera.project(Vec3::new(-2.5, 0.0, 0.0), SCREEN).unwrap();
        assert!(p.x < SCREEN.x * 0.5);
        assert!((p.y - SCREEN.y * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_hidden() {
        let camera = PreviewCamera::new(&RenderConfig::default());
        assert!(camera.project(Vec3::new(0.0, 0.0, 20.0), SCREEN).is_none());
    }

    #[test]
    fn test_viewport_matches_fov() {
        let camera = PreviewCamera::new(&RenderConfig::default());
        let viewport = camera.viewport(16.0 / 9.0);
        let expected_height = 2.0 * 25f32.to_radians().tan() * 8.0;
        assert!((viewport.y - expected_height).abs() < 1e-4);
        assert!((viewport.x - expected_height * 16.0 / 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_test() {
        let camera = PreviewCamera::new(&RenderConfig::default());
        let centre = Vec3::new(-2.5, 0.0, 0.0);
        let on_object = camera.project(centre, SCREEN).unwrap();
        assert!(camera.hit_test(on_object, centre, 0.6, SCREEN));
        assert!(!camera.hit_test(SCREEN * 0.5, centre, 0.6, SCREEN));
    }

    #[test]
    fn test_normalize_pointer() {
        assert_eq!(normalize_pointer(Vec2::ZERO, SCREEN), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(SCREEN, SCREEN), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(SCREEN * 0.5, SCREEN), Vec2::ZERO);
        assert_eq!(normalize_pointer(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }
}
