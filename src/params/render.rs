//! Preview window, camera and scene layout configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Camera eye position (world units)
    pub camera_position: [f32; 3],

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Clear color behind everything (linear RGB)
    pub background: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 50.0,
            camera_position: [0.0, 0.0, 8.0],
            near_plane: 0.1,
            far_plane: 100.0,
            background: [0.001, 0.0015, 0.003], // ~#03050a after sRGB encode
        }
    }
}

/// Static placement of the backdrop and the interactive objects
#[derive(Debug, Clone)]
pub struct SceneLayout {
    /// Backdrop plane centre (world units)
    pub backdrop_center: [f32; 3],

    /// Backdrop plane size (world units)
    pub backdrop_size: [f32; 2],

    /// Untextured backdrop tint, shown until the landscape arrives
    pub backdrop_tint: [u8; 3],

    /// Base positions of the interactive objects (world units)
    pub objects: Vec<[f32; 3]>,

    /// Half extent of each interactive cube (world units)
    pub object_half_extent: f32,

    /// Cube tints, cycled over the objects
    pub object_tints: Vec<[u8; 3]>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            backdrop_center: [0.0, 0.1, -2.4],
            backdrop_size: [9.0, 5.0],
            backdrop_tint: super::hex_rgb(0x142236),
            objects: vec![[-2.5, 0.0, 0.0], [2.5, 0.0, 0.0]],
            object_half_extent: 0.6,
            object_tints: vec![super::hex_rgb(0x61dafb), super::hex_rgb(0x7fe9ff)],
        }
    }
}
