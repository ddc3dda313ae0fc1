//! Layered parallax landscape painter.
//!
//! Paints a sky gradient, a glow accent and a stack of noise-driven ridge
//! silhouettes onto a [`Canvas`], then wraps the pixels as a
//! [`LandscapeTexture`]. Every call builds fresh gradient grids, so every
//! texture shows new terrain.

use rand::Rng;

use super::canvas::{mix_rgb, Canvas};
use super::fallback::{AssetFallback, FallbackSource};
use super::texture::{ColorSpace, LandscapeTexture, TextureOrigin};
use crate::error::{StageError, StageResult};
use crate::noise::NoiseField;
use crate::params::LandscapeStyle;

/// Color space both the painted and the fallback textures are tagged with
pub const TEXTURE_COLOR_SPACE: ColorSpace = ColorSpace::Srgb;

/// Layout of one parallax layer for a given canvas height
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlan {
    pub index: u32,
    /// Gradient grid side (cells)
    pub grid_size: usize,
    /// Noise row sampled across the layer (grid units)
    pub noise_row: f64,
    /// Downward shift of the ridge (pixels)
    pub offset: f32,
    /// Blend factor between the far and near shades
    pub blend: f32,
    pub shade: [u8; 3],
}

/// Procedural landscape texture generator with a static fallback
pub struct LandscapeGenerator<F = AssetFallback> {
    style: LandscapeStyle,
    fallback: F,
}

impl LandscapeGenerator<AssetFallback> {
    /// Generator falling back to the style's on-disk asset
    pub fn new(style: LandscapeStyle) -> Self {
        let fallback = AssetFallback::new(style.fallback_path.clone());
        Self { style, fallback }
    }
}

impl<F: FallbackSource> LandscapeGenerator<F> {
    pub fn with_fallback(style: LandscapeStyle, fallback: F) -> Self {
        Self { style, fallback }
    }

    pub fn style(&self) -> &LandscapeStyle {
        &self.style
    }

    /// Per-layer grid sizes, offsets and shades, farthest layer first
    pub fn layer_plan(&self, height: u32) -> Vec<LayerPlan> {
        let s = &self.style;
        (0..s.layers)
            .map(|layer| {
                let blend = layer as f32 / s.layers as f32;
                LayerPlan {
                    index: layer,
                    grid_size: (s.grid_base + layer * s.grid_step) as usize,
                    noise_row: layer as f64 * s.noise_row_step + s.noise_row_base,
                    offset: layer as f32 * height as f32 * s.layer_offset,
                    blend,
                    shade: mix_rgb(s.shade_far, s.shade_near, blend),
                }
            })
            .collect()
    }

    /// Ridge heights for canvas columns `0..=width`
    pub fn ridge(&self, plan: &LayerPlan, field: &NoiseField, width: u32, height: u32) -> Vec<f32> {
        let h = height as f32;
        let base_amplitude = h * self.style.amplitude;
        let span = (plan.grid_size - 1) as f64;

        (0..=width)
            .map(|x| {
                let nx = x as f64 / width as f64 * span;
                let noise = field.sample(nx, plan.noise_row) as f32;
                let elevation = noise * 0.5 + 0.5;
                h * self.style.horizon + plan.offset - elevation * (base_amplitude - plan.offset)
            })
            .collect()
    }

    /// Paint a landscape with gradients drawn from the thread-local RNG
    pub fn paint(&self, width: u32, height: u32) -> StageResult<LandscapeTexture> {
        self.paint_with_rng(width, height, &mut rand::thread_rng())
    }

    /// Paint a landscape synchronously, drawing gradients from `rng`
    pub fn paint_with_rng<R: Rng + ?Sized>(
        &self,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> StageResult<LandscapeTexture> {
        let s = &self.style;
        let mut canvas = Canvas::new(width, height)?;
        let (w, h) = (width as f32, height as f32);

        canvas.fill_vertical_gradient(&s.sky);
        canvas.fill_ellipse(
            [w * s.glow.center[0], h * s.glow.center[1]],
            [w * s.glow.radii[0], h * s.glow.radii[1]],
            s.glow.color,
            s.glow.alpha,
        );

        for plan in self.layer_plan(height) {
            let field = NoiseField::with_rng(plan.grid_size, plan.grid_size, &mut *rng);
            let ridge = self.ridge(&plan, &field, width, height);
            if let Some(bad) = ridge.iter().position(|y| !y.is_finite()) {
                return Err(StageError::Raster(format!(
                    "layer {} ridge is not finite at x={}",
                    plan.index, bad
                )));
            }

            canvas.fill_silhouette(&ridge, plan.shade);
            canvas.stroke_ridge(&ridge, s.ridge_color, s.ridge_opacity, s.ridge_width);
        }

        Ok(LandscapeTexture::new(
            canvas.into_image(),
            TEXTURE_COLOR_SPACE,
            TextureOrigin::Procedural { layers: s.layers },
        ))
    }

    /// Generate a landscape texture, falling back to the static asset
    ///
    /// Painting failures are logged and recovered; only a failing fallback
    /// reaches the caller.
    pub async fn generate(&self, width: u32, height: u32) -> StageResult<LandscapeTexture> {
        match self.paint(width, height) {
            Ok(texture) => {
                log::info!("Generated {}x{} landscape texture", width, height);
                Ok(texture)
            }
            Err(err) => {
                log::warn!(
                    "Falling back to static landscape {}: {}",
                    self.fallback.location().display(),
                    err
                );
                let pixels = self
                    .fallback
                    .load()
                    .await
                    .inspect_err(|err| log::error!("Fallback landscape unavailable: {}", err))?;
                Ok(LandscapeTexture::new(
                    pixels,
                    TEXTURE_COLOR_SPACE,
                    TextureOrigin::Fallback {
                        path: self.fallback.location().to_path_buf(),
                    },
                ))
            }
        }
    }

    /// Generate at the style's default size
    pub async fn generate_default(&self) -> StageResult<LandscapeTexture> {
        self.generate(self.style.width, self.style.height).await
    }
}
