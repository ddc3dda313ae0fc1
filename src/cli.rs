//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec2;

use crate::params::LandscapeStyle;
use crate::timeline::{EventKind, ScriptedEvent, TimelineConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "parallax-stage")]
#[command(about = "Procedural landscape backdrop with spring-animated interactive objects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the landscape texture once and save it as PNG
    Render(RenderArgs),
    /// Drive one controller through a scripted pointer timeline, print CSV
    Simulate(SimulateArgs),
    /// Open a window with the textured backdrop and two interactive cubes
    Preview(PreviewArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Texture width (pixels)
    #[arg(long, value_name = "PX", default_value = "1024")]
    pub width: u32,

    /// Texture height (pixels)
    #[arg(long, value_name = "PX", default_value = "512")]
    pub height: u32,

    /// Where to write the PNG
    #[arg(long, short, value_name = "PATH", default_value = "landscape.png")]
    pub output: PathBuf,

    /// Asset loaded when procedural generation fails
    #[arg(long, value_name = "PATH")]
    pub fallback: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct SimulateArgs {
    /// Simulated span (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "4.0")]
    pub duration: f32,

    /// Frame delta (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0.016")]
    pub step: f32,

    /// Time of pointer-enter (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub hover_at: Option<f32>,

    /// Time of the click (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub click_at: Option<f32>,

    /// Time of pointer-leave (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub leave_at: Option<f32>,

    /// Pointer in normalized device coordinates, held for the whole run
    #[arg(long, value_name = "X,Y", default_value = "0,0", value_parser = parse_pointer, allow_hyphen_values = true)]
    pub pointer: Vec2,
}

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Asset loaded when procedural generation fails
    #[arg(long, value_name = "PATH")]
    pub fallback: Option<PathBuf>,
}

impl RenderArgs {
    /// Landscape style with the command-line overrides applied
    pub fn style(&self) -> LandscapeStyle {
        let mut style = LandscapeStyle {
            width: self.width,
            height: self.height,
            ..Default::default()
        };
        if let Some(path) = &self.fallback {
            style.fallback_path = path.clone();
        }
        style
    }
}

impl PreviewArgs {
    pub fn style(&self) -> LandscapeStyle {
        let mut style = LandscapeStyle::default();
        if let Some(path) = &self.fallback {
            style.fallback_path = path.clone();
        }
        style
    }
}

impl SimulateArgs {
    /// Scripted events in the order given on the command line
    pub fn events(&self) -> Vec<ScriptedEvent> {
        [
            (self.hover_at, EventKind::Enter),
            (self.click_at, EventKind::Click),
            (self.leave_at, EventKind::Leave),
        ]
        .into_iter()
        .filter_map(|(at, kind)| at.map(|at_s| ScriptedEvent::new(at_s, kind)))
        .collect()
    }

    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig {
            duration_s: self.duration,
            step_s: self.step,
            pointer: self.pointer,
            ..Default::default()
        }
    }
}

/// Parse `X,Y` into a pointer position
fn parse_pointer(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let args = Args::try_parse_from(["parallax-stage", "render"]).unwrap();
        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        let style = render.style();
        assert_eq!((style.width, style.height), (1024, 512));
        assert_eq!(render.output, PathBuf::from("landscape.png"));
        assert_eq!(style.fallback_path, LandscapeStyle::default().fallback_path);
    }

    #[test]
    fn test_render_overrides() {
        let args = Args::try_parse_from([
            "parallax-stage",
            "render",
            "--width",
            "256",
            "--height",
            "128",
            "--fallback",
            "other.png",
        ])
        .unwrap();
        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        let style = render.style();
        assert_eq!((style.width, style.height), (256, 128));
        assert_eq!(style.fallback_path, PathBuf::from("other.png"));
    }

    #[test]
    fn test_simulate_script() {
        let args = Args::try_parse_from([
            "parallax-stage",
            "simulate",
            "--hover-at",
            "0.5",
            "--click-at",
            "1",
            "--pointer",
            "-0.5,0.25",
        ])
        .unwrap();
        let Command::Simulate(simulate) = args.command else {
            panic!("expected simulate");
        };
        assert_eq!(
            simulate.events(),
            vec![
                ScriptedEvent::new(0.5, EventKind::Enter),
                ScriptedEvent::new(1.0, EventKind::Click),
            ]
        );
        let config = simulate.timeline_config();
        assert_eq!(config.pointer, Vec2::new(-0.5, 0.25));
        assert_eq!(config.step_s, 0.016);
    }

    #[test]
    fn test_parse_pointer_rejects_garbage() {
        assert!(parse_pointer("1;2").is_err());
        assert!(parse_pointer("x,2").is_err());
        assert_eq!(parse_pointer(" 1 , 2 ").unwrap(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["parallax-stage"]).is_err());
    }
}
