//! Parallax Stage library - procedural landscape textures and interactive objects

pub mod camera;
pub mod cli;
pub mod error;
pub mod interaction;
pub mod landscape;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod timeline;
