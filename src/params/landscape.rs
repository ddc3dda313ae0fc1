//! Landscape texture style: sky, glow accent and parallax layer shaping.

use std::path::PathBuf;

/// Decode a `0xRRGGBB` literal into an RGB triple.
pub const fn hex_rgb(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// One stop of the vertical sky gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyStop {
    /// Position from top (0.0) to bottom (1.0) of the canvas
    pub offset: f32,
    pub color: [u8; 3],
}

/// Soft radial glow painted behind the ridges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowAccent {
    pub color: [u8; 3],

    /// Fill opacity (0..=255)
    pub alpha: u8,

    /// Centre as fractions of (width, height)
    pub center: [f32; 2],

    /// Radii as fractions of (width, height)
    pub radii: [f32; 2],
}

/// Landscape texture generation parameters
#[derive(Debug, Clone)]
pub struct LandscapeStyle {
    /// Default texture width (pixels)
    pub width: u32,

    /// Default texture height (pixels)
    pub height: u32,

    /// Sky gradient stops, top to bottom
    pub sky: Vec<SkyStop>,

    pub glow: GlowAccent,

    /// Number of parallax ridge layers
    pub layers: u32,

    /// Gradient grid side for layer 0 (cells)
    pub grid_base: u32,

    /// Extra grid cells per layer
    pub grid_step: u32,

    /// Noise row sampled by layer 0 (grid units)
    pub noise_row_base: f64,

    /// Noise row advance per layer (grid units)
    pub noise_row_step: f64,

    /// Resting ridge line as a fraction of height
    pub horizon: f32,

    /// Maximum ridge lift as a fraction of height
    pub amplitude: f32,

    /// Per-layer drop as a fraction of height (nearer layers sit lower)
    pub layer_offset: f32,

    /// Shade of the farthest layer
    pub shade_far: [u8; 3],

    /// Shade the layers blend toward
    pub shade_near: [u8; 3],

    /// Ridge stroke color
    pub ridge_color: [u8; 3],

    /// Ridge stroke opacity (0.0..=1.0)
    pub ridge_opacity: f32,

    /// Ridge stroke width (pixels)
    pub ridge_width: f32,

    /// Pre-baked image used when procedural generation fails
    pub fallback_path: PathBuf,
}

impl Default for LandscapeStyle {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            sky: vec![
                SkyStop {
                    offset: 0.0,
                    color: hex_rgb(0x081627), // Dark navy
                },
                SkyStop {
                    offset: 0.55,
                    color: hex_rgb(0x10243c), // Mid blue
                },
                SkyStop {
                    offset: 1.0,
                    color: hex_rgb(0x17324a), // Teal
                },
            ],
            glow: GlowAccent {
                color: hex_rgb(0x61dafb),
                alpha: 0x44,
                center: [0.5, 0.28],
                radii: [0.22, 0.12],
            },
            layers: 3,
            grid_base: 8,
            grid_step: 2,
            noise_row_base: 2.0,
            noise_row_step: 0.6,
            horizon: 0.6,
            amplitude: 0.28,
            layer_offset: 0.08,
            shade_far: hex_rgb(0x101a28),
            shade_near: hex_rgb(0x1f2f42),
            ridge_color: hex_rgb(0x61dafb),
            ridge_opacity: 0.08,
            ridge_width: 1.0,
            fallback_path: PathBuf::from("assets/landscape-fallback.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb(0x61dafb), [0x61, 0xda, 0xfb]);
        assert_eq!(hex_rgb(0x000000), [0, 0, 0]);
    }

    #[test]
    fn test_default_sky_stops_are_ordered() {
        let style = LandscapeStyle::default();
        assert_eq!(style.sky.len(), 3);
        assert!(style.sky.windows(2).all(|w| w[0].offset < w[1].offset));
        assert_eq!(style.sky[0].offset, 0.0);
        assert_eq!(style.sky[2].offset, 1.0);
    }
}
