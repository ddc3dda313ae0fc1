//! The texture artifact handed to renderers.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::StageResult;

/// How pixel values should be interpreted on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// Gamma-encoded sRGB
    #[default]
    Srgb,
    Linear,
}

/// Where a texture's pixels came from
#[derive(Debug, Clone, PartialEq)]
pub enum TextureOrigin {
    /// Painted by the landscape generator
    Procedural { layers: u32 },
    /// Loaded from the pre-baked fallback image
    Fallback { path: PathBuf },
}

/// Releases the resources behind a texture handle.
///
/// Whoever holds a handle last calls `dispose`; replacing or dropping a
/// displayed texture must go through it.
pub trait Disposable {
    fn dispose(self);
}

/// Finished landscape texture, ready for upload
#[derive(Debug, Clone)]
pub struct LandscapeTexture {
    pixels: RgbaImage,
    pub color_space: ColorSpace,
    /// Rows are stored top-first; renderers must not flip on upload
    pub flip_y: bool,
    /// Set when the pixels changed since the last upload
    pub needs_upload: bool,
    pub origin: TextureOrigin,
}

impl LandscapeTexture {
    pub fn new(pixels: RgbaImage, color_space: ColorSpace, origin: TextureOrigin) -> Self {
        Self {
            pixels,
            color_space,
            flip_y: false,
            needs_upload: true,
            origin,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, TextureOrigin::Fallback { .. })
    }

    /// Write the texture to disk; format follows the extension
    pub fn save(&self, path: impl AsRef<Path>) -> StageResult<()> {
        self.pixels.save(path)?;
        Ok(())
    }
}

impl Disposable for LandscapeTexture {
    fn dispose(self) {
        log::debug!(
            "Disposing {}x{} landscape texture ({:?})",
            self.width(),
            self.height(),
            self.origin
        );
        drop(self.pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_texture_defaults() {
        let texture = LandscapeTexture::new(
            RgbaImage::new(16, 8),
            ColorSpace::Srgb,
            TextureOrigin::Procedural { layers: 3 },
        );
        assert_eq!((texture.width(), texture.height()), (16, 8));
        assert!(!texture.flip_y);
        assert!(texture.needs_upload);
        assert!(!texture.is_fallback());
    }
}
