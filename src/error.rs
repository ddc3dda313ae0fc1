//! Error taxonomy for texture generation, fallback loading and the preview.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    /// The raster surface could not be acquired at the requested size.
    #[error("raster surface unavailable for {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// A drawing step produced an unusable result.
    #[error("raster step failed: {0}")]
    Raster(String),

    /// The pre-baked fallback image could not be loaded.
    #[error("failed to load fallback texture from {path}: {source}")]
    FallbackLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to export texture: {0}")]
    Export(#[from] image::ImageError),

    #[error("gpu setup failed: {0}")]
    Gpu(String),
}

pub type StageResult<T> = Result<T, StageError>;
