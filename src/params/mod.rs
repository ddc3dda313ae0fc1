//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers live here with:
//! - Units (pixels, seconds, world units, fractions of the canvas)
//! - Documented ranges and meanings
//! - A `Default` carrying the tuned value

mod interaction;
mod landscape;
mod render;

// Re-export all types
pub use interaction::InteractionTuning;
pub use landscape::{hex_rgb, GlowAccent, LandscapeStyle, SkyStop};
pub use render::{RenderConfig, SceneLayout};
