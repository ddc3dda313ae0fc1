//! Software raster surface for the landscape painter.
//!
//! Only the handful of primitives the landscape needs: a vertical gradient,
//! a soft-edged ellipse, a silhouette closed against the bottom edge and a
//! thin ridge stroke. All drawing is source-over alpha blending in sRGB.

use image::{Rgba, RgbaImage};

use crate::error::{StageError, StageResult};
use crate::params::SkyStop;

/// Largest texture side the surface will allocate (pixels)
pub const MAX_SIDE: u32 = 16384;

/// RGBA raster surface
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Acquire a transparent surface of `width x height`
    pub fn new(width: u32, height: u32) -> StageResult<Self> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(StageError::SurfaceUnavailable { width, height });
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Fill the whole surface with a top-to-bottom gradient
    ///
    /// Rows above the first stop or below the last take the end colors.
    pub fn fill_vertical_gradient(&mut self, stops: &[SkyStop]) {
        let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
            return;
        };
        let height = self.height() as f32;

        for y in 0..self.height() {
            let t = (y as f32 + 0.5) / height;
            let color = if t <= first.offset {
                first.color
            } else if t >= last.offset {
                last.color
            } else {
                stops
                    .windows(2)
                    .find(|w| t <= w[1].offset)
                    .map(|w| {
                        let span = (w[1].offset - w[0].offset).max(f32::EPSILON);
                        mix_rgb(w[0].color, w[1].color, (t - w[0].offset) / span)
                    })
                    .unwrap_or(last.color)
            };

            for x in 0..self.width() {
                self.pixels
                    .put_pixel(x, y, Rgba([color[0], color[1], color[2], 255]));
            }
        }
    }

    /// Fill an axis-aligned ellipse with a one-pixel anti-aliased rim
    pub fn fill_ellipse(&mut self, center: [f32; 2], radii: [f32; 2], color: [u8; 3], alpha: u8) {
        let [cx, cy] = center;
        let [rx, ry] = radii;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let opacity = alpha as f32 / 255.0;
        let rim = rx.min(ry);

        let x_start = (cx - rx - 1.0).floor().max(0.0) as u32;
        let x_end = ((cx + rx + 1.0).ceil().max(0.0) as u32).min(self.width());
        let y_start = (cy - ry - 1.0).floor().max(0.0) as u32;
        let y_end = ((cy + ry + 1.0).ceil().max(0.0) as u32).min(self.height());

        for y in y_start..y_end {
            for x in x_start..x_end {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                let d = (dx * dx + dy * dy).sqrt();
                let coverage = ((1.0 - d) * rim + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, opacity * coverage);
                }
            }
        }
    }

    /// Fill the region between a ridge line and the bottom edge
    ///
    /// `ridge[i]` is the ridge height at canvas x = `i`, so a full-width
    /// ridge has `width + 1` points.
    pub fn fill_silhouette(&mut self, ridge: &[f32], color: [u8; 3]) {
        let height = self.height();
        for (x, pair) in ridge.windows(2).enumerate().take(self.width() as usize) {
            let top = 0.5 * (pair[0] + pair[1]);
            let first_row = top.floor().max(0.0) as u32;
            for y in first_row..height {
                let coverage = (y as f32 + 1.0 - top).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x as u32, y, color, coverage);
                }
            }
        }
    }

    /// Stroke the ridge line as a thin polyline
    pub fn stroke_ridge(&mut self, ridge: &[f32], color: [u8; 3], opacity: f32, line_width: f32) {
        let height = self.height() as f32;
        let half = 0.5 * line_width;
        for (x, pair) in ridge.windows(2).enumerate().take(self.width() as usize) {
            let lo = (pair[0].min(pair[1]) - half).max(0.0);
            let hi = (pair[0].max(pair[1]) + half).min(height);
            if hi <= lo {
                continue;
            }
            for y in lo.floor() as u32..hi.ceil() as u32 {
                let overlap = (hi.min(y as f32 + 1.0) - lo.max(y as f32)).clamp(0.0, 1.0);
                if overlap > 0.0 {
                    self.blend(x as u32, y, color, opacity * overlap);
                }
            }
        }
    }

    /// Source-over blend of `color` at `alpha` onto pixel `(x, y)`
    fn blend(&mut self, x: u32, y: u32, color: [u8; 3], alpha: f32) {
        let dst = self.pixels.get_pixel_mut(x, y);
        let dst_a = dst.0[3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let value =
                (color[c] as f32 * alpha + dst.0[c] as f32 * dst_a * (1.0 - alpha)) / out_a;
            dst.0[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

/// Linear blend between two sRGB colors
pub fn mix_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channel = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    [channel(0), channel(1), channel(2)]
}
