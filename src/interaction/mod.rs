//! Hover/click driven spring motion for interactive scene objects.

mod clock;
mod controller;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{InteractiveController, MotionState};

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Interaction mode, derived from the hovered/clicked flags every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Hovered,
    /// Wins over hover while the click is held
    Clicked,
}

impl InteractionMode {
    pub fn from_flags(hovered: bool, clicked: bool) -> Self {
        match (hovered, clicked) {
            (_, true) => Self::Clicked,
            (true, false) => Self::Hovered,
            (false, false) => Self::Idle,
        }
    }

    pub fn is_engaged(self) -> bool {
        self != Self::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hovered => "hovered",
            Self::Clicked => "clicked",
        }
    }
}

/// Cursor the host UI should show after a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Pointer,
}

/// Object transform emitted each frame, applied verbatim by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians (x = pitch, y = yaw, z = roll), XYZ order
    pub rotation: Vec3,
    /// Uniform scale
    pub scale: f32,
}

impl Transform {
    /// Model matrix for this transform
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicked_wins_over_hover() {
        assert_eq!(InteractionMode::from_flags(true, true), InteractionMode::Clicked);
        assert_eq!(InteractionMode::from_flags(false, true), InteractionMode::Clicked);
        assert_eq!(InteractionMode::from_flags(true, false), InteractionMode::Hovered);
        assert_eq!(InteractionMode::from_flags(false, false), InteractionMode::Idle);
        assert!(!InteractionMode::Idle.is_engaged());
    }

    #[test]
    fn test_transform_matrix_translates_and_scales() {
        let transform = Transform {
            position: Vec3::new(-2.5, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: 2.0,
        };
        let m = transform.to_matrix();
        let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6);
    }
}
