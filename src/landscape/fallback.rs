//! Pre-baked landscape used when procedural painting fails.

use std::future::Future;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{StageError, StageResult};

/// Source of the static fallback image
pub trait FallbackSource {
    /// Where the image lives, for logs and provenance
    fn location(&self) -> &Path;

    fn load(&self) -> impl Future<Output = StageResult<RgbaImage>>;
}

/// Fallback image decoded from a fixed path on disk
#[derive(Debug, Clone)]
pub struct AssetFallback {
    path: PathBuf,
}

impl AssetFallback {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FallbackSource for AssetFallback {
    fn location(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StageResult<RgbaImage> {
        image::open(&self.path)
            .map(|decoded| decoded.into_rgba8())
            .map_err(|source| StageError::FallbackLoad {
                path: self.path.clone(),
                source,
            })
    }
}
