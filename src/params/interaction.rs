//! Spring, impulse and follow tuning for interactive objects.

use std::time::Duration;

/// Interaction physics parameters
#[derive(Debug, Clone)]
pub struct InteractionTuning {
    // === Scale spring ===
    /// Resting scale (dimensionless)
    pub idle_scale: f32,

    /// Scale while hovered
    pub hover_scale: f32,

    /// Scale while clicked (wins over hover)
    pub click_scale: f32,

    /// Scale spring constant (1/s²)
    pub scale_spring: f32,

    /// Per-frame velocity retention for both springs (0..1)
    pub spring_damping: f32,

    // === Pointer follow ===
    /// Follow strength while hovered
    pub hover_follow: f32,

    /// Follow strength while clicked
    pub click_follow: f32,

    /// Fraction of the viewport the pointer can drag the object across
    pub follow_span: f32,

    /// Depth push per unit of (pointer.x + pointer.y)
    pub follow_depth: f32,

    /// Smoothing rate toward the follow target (1/s)
    pub follow_rate: f32,

    /// Smoothing rate back to rest (1/s)
    pub release_rate: f32,

    // === Click impulse ===
    /// Instant angular velocity added on click (rad/s)
    pub seed_yaw: f32,
    pub seed_pitch: f32,

    /// Ramped angular acceleration during the impulse window (rad/s²)
    pub ramp_yaw: f32,
    pub ramp_pitch: f32,

    /// Length of the ramped impulse after a click (seconds)
    pub ramp_window_s: f32,

    /// Per-frame angular velocity retention while clicked
    pub impulse_decay: f32,

    /// Per-frame angular velocity retention otherwise
    pub idle_decay: f32,

    /// Vertical bob while clicked
    pub bob_freq: f32,
    pub bob_amplitude: f32,
    pub bob_gain: f32,

    /// Time until a click releases itself
    pub click_hold: Duration,

    // === Base rotation ===
    /// Yaw rate while hovered (rad/s)
    pub hover_spin: f32,

    /// Pitch wobble while hovered
    pub wobble_freq: f32,
    pub wobble_amplitude: f32,

    /// Yaw rate while idle (rad/s)
    pub idle_spin: f32,

    // === Position spring ===
    /// Position spring constant (1/s²)
    pub position_spring: f32,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            idle_scale: 1.0,
            hover_scale: 1.15,
            click_scale: 1.25,
            scale_spring: 15.0,
            spring_damping: 0.85,

            hover_follow: 0.5,
            click_follow: 0.8,
            follow_span: 0.3,
            follow_depth: 0.2,
            follow_rate: 6.0,
            release_rate: 4.0,

            seed_yaw: 2.0,
            seed_pitch: 0.8,
            ramp_yaw: 8.0,
            ramp_pitch: 4.0,
            ramp_window_s: 0.1,
            impulse_decay: 0.92,
            idle_decay: 0.95,
            bob_freq: 3.0,
            bob_amplitude: 0.3,
            bob_gain: 2.0,
            click_hold: Duration::from_millis(3000),

            hover_spin: 1.2,
            wobble_freq: 2.0,
            wobble_amplitude: 0.8,
            idle_spin: 0.4 * 0.5, // Half of the 0.4 rad/s base speed

            position_spring: 12.0,
        }
    }
}
