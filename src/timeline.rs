//! Scripted pointer timelines for driving a controller without a window.
//!
//! Used by the `simulate` command to dump per-frame transforms as CSV.

use std::time::Duration;

use glam::{Vec2, Vec3};

use crate::interaction::{InteractionMode, InteractiveController, ManualClock, Transform};
use crate::params::InteractionTuning;

/// Pointer event fed to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Enter,
    Leave,
    Click,
}

/// Longest run a single timeline will simulate (frames)
pub const MAX_FRAMES: usize = 1_000_000;

/// Event fired on the first frame whose time reaches `at_s`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedEvent {
    pub at_s: f32,
    pub kind: EventKind,
}

impl ScriptedEvent {
    pub fn new(at_s: f32, kind: EventKind) -> Self {
        Self { at_s, kind }
    }
}

/// Fixed-step simulation settings
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Simulated span (seconds)
    pub duration_s: f32,
    /// Frame delta (seconds)
    pub step_s: f32,
    /// Pointer held in normalized device coordinates for the whole run
    pub pointer: Vec2,
    /// Visible world-space width and height at the object plane
    pub viewport: Vec2,
    pub base_position: Vec3,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            duration_s: 4.0,
            step_s: 0.016,
            pointer: Vec2::ZERO,
            viewport: Vec2::new(13.26, 7.46),
            base_position: Vec3::ZERO,
        }
    }
}

/// Controller output after one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSample {
    pub t: f32,
    pub mode: InteractionMode,
    pub transform: Transform,
}

impl FrameSample {
    pub const CSV_HEADER: &'static str = "t,mode,scale,px,py,pz,rx,ry,rz";

    pub fn to_csv_row(&self) -> String {
        let Transform {
            position: p,
            rotation: r,
            scale,
        } = self.transform;
        format!(
            "{:.3},{},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5}",
            self.t,
            self.mode.as_str(),
            scale,
            p.x,
            p.y,
            p.z,
            r.x,
            r.y,
            r.z
        )
    }
}

/// Run one controller through `events` on a manual clock
///
/// The clock is set to each frame's time before that frame's events fire,
/// so the click auto-reset lands on the same timeline as the samples.
pub fn run_timeline(
    config: &TimelineConfig,
    events: &[ScriptedEvent],
    tuning: InteractionTuning,
) -> Vec<FrameSample> {
    if config.step_s <= 0.0 || config.duration_s <= 0.0 {
        return Vec::new();
    }

    let mut pending = events.to_vec();
    pending.sort_by(|a, b| a.at_s.total_cmp(&b.at_s));
    let mut pending = pending.into_iter().peekable();

    let clock = ManualClock::new();
    let mut controller = InteractiveController::with_clock(config.base_position, tuning, clock.clone());

    let step = config.step_s as f64;
    let frames = frame_count(config);
    let mut samples = Vec::with_capacity(frames);

    for frame in 1..=frames {
        let t = frame as f64 * step;
        clock.set(Duration::from_secs_f64(t));

        while let Some(event) = pending.next_if(|e| (e.at_s as f64) <= t) {
            match event.kind {
                EventKind::Enter => {
                    controller.on_pointer_enter();
                }
                EventKind::Leave => {
                    controller.on_pointer_leave();
                }
                EventKind::Click => controller.on_click(),
            }
        }

        let transform = controller.advance(config.step_s, t as f32, config.pointer, config.viewport);
        samples.push(FrameSample {
            t: t as f32,
            mode: controller.mode(),
            transform,
        });
    }

    samples
}

/// Frames needed to cover the configured duration, capped at [`MAX_FRAMES`]
fn frame_count(config: &TimelineConfig) -> usize {
    let frames = (config.duration_s as f64 / config.step_s as f64).round();
    if frames > MAX_FRAMES as f64 {
        log::warn!(
            "Step {}s over {}s needs {} frames, truncating to {}",
            config.step_s,
            config.duration_s,
            frames,
            MAX_FRAMES
        );
        return MAX_FRAMES;
    }
    frames as usize
}
