//! Procedural landscape texture: painting, fallback and ownership.

mod canvas;
mod fallback;
mod generator;
mod slot;
mod texture;

// Re-export public types
pub use canvas::{mix_rgb, Canvas, MAX_SIDE};
pub use fallback::{AssetFallback, FallbackSource};
pub use generator::{LandscapeGenerator, LayerPlan, TEXTURE_COLOR_SPACE};
pub use slot::{deliver, LoadTicket, TextureSlot};
pub use texture::{ColorSpace, Disposable, LandscapeTexture, TextureOrigin};
