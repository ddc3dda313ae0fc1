//! Per-object spring/impulse simulation.
//!
//! The host calls the three event handlers as pointer events arrive and
//! [`InteractiveController::advance`] once per rendered frame. The
//! controller never schedules its own ticks; the click auto-reset is a
//! deadline on a [`Clock`], checked whenever the controller is touched.

use std::time::Duration;

use glam::{Vec2, Vec3};

use super::clock::{Clock, SystemClock};
use super::{CursorStyle, InteractionMode, Transform};
use crate::params::InteractionTuning;

/// Mutable motion state of one interactive object
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub scale: f32,
    pub target_scale: f32,
    pub scale_velocity: f32,

    /// Live pointer-follow offset added to the base position
    pub offset: Vec3,
    pub position: Vec3,
    pub position_velocity: Vec3,

    pub rotation: Vec3,
    pub rotation_velocity: Vec3,

    pub hovered: bool,
    pub clicked: bool,
    /// Seconds spent clicked, zero whenever not clicked
    pub click_elapsed: f32,
}

/// Spring-driven scale, position and rotation for one object
pub struct InteractiveController<C: Clock = SystemClock> {
    tuning: InteractionTuning,
    clock: C,
    base_position: Vec3,
    state: MotionState,
    /// When the current click releases itself
    reset_deadline: Option<Duration>,
}

impl InteractiveController<SystemClock> {
    /// Controller at rest at `base_position`, timed by the wall clock
    pub fn new(base_position: Vec3) -> Self {
        Self::with_clock(base_position, InteractionTuning::default(), SystemClock::new())
    }
}

impl<C: Clock> InteractiveController<C> {
    pub fn with_clock(base_position: Vec3, tuning: InteractionTuning, clock: C) -> Self {
        let state = MotionState {
            scale: tuning.idle_scale,
            target_scale: tuning.idle_scale,
            scale_velocity: 0.0,
            offset: Vec3::ZERO,
            position: base_position,
            position_velocity: Vec3::ZERO,
            rotation: Vec3::ZERO,
            rotation_velocity: Vec3::ZERO,
            hovered: false,
            clicked: false,
            click_elapsed: 0.0,
        };
        Self {
            tuning,
            clock,
            base_position,
            state,
            reset_deadline: None,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        InteractionMode::from_flags(self.state.hovered, self.state.clicked)
    }

    pub fn is_hovered(&self) -> bool {
        self.state.hovered
    }

    pub fn is_clicked(&self) -> bool {
        self.state.clicked
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.state.position,
            rotation: self.state.rotation,
            scale: self.state.scale,
        }
    }

    pub fn on_pointer_enter(&mut self) -> CursorStyle {
        self.state.hovered = true;
        CursorStyle::Pointer
    }

    pub fn on_pointer_leave(&mut self) -> CursorStyle {
        self.state.hovered = false;
        CursorStyle::Default
    }

    /// Toggle the clicked state
    ///
    /// Engaging seeds an angular impulse and arms the auto-reset; a later
    /// click re-arms it. Clicking while engaged releases immediately.
    pub fn on_click(&mut self) {
        self.poll_reset();

        if self.state.clicked {
            self.state.clicked = false;
            self.reset_deadline = None;
            log::debug!("Click released by toggle");
            return;
        }

        self.state.clicked = true;
        self.state.rotation_velocity.y += self.tuning.seed_yaw;
        self.state.rotation_velocity.x += self.tuning.seed_pitch;
        self.state.click_elapsed = 0.0;

        let deadline = self.clock.now() + self.tuning.click_hold;
        self.reset_deadline = Some(deadline);
        log::debug!("Click armed, releases at {:?}", deadline);
    }

    /// Release the click if its deadline has passed
    pub fn poll_reset(&mut self) {
        if let Some(deadline) = self.reset_deadline {
            if self.clock.now() >= deadline {
                self.state.clicked = false;
                self.reset_deadline = None;
                log::debug!("Click auto-reset at {:?}", deadline);
            }
        }
    }

    /// Step the simulation by `dt` seconds and return the new transform
    ///
    /// # Arguments
    /// * `dt` - Frame delta (seconds); zero or negative leaves motion untouched
    /// * `elapsed_s` - Total scene time, drives the bob and wobble phases
    /// * `pointer` - Pointer in normalized device coordinates ([-1, 1], y up)
    /// * `viewport` - Visible world-space width and height at the object plane
    pub fn advance(&mut self, dt: f32, elapsed_s: f32, pointer: Vec2, viewport: Vec2) -> Transform {
        self.poll_reset();
        if dt <= 0.0 {
            return self.transform();
        }

        let mode = self.mode();
        let t = &self.tuning;
        let s = &mut self.state;

        // Scale spring
        s.target_scale = match mode {
            InteractionMode::Clicked => t.click_scale,
            InteractionMode::Hovered => t.hover_scale,
            InteractionMode::Idle => t.idle_scale,
        };
        s.scale_velocity += (s.target_scale - s.scale) * t.scale_spring * dt;
        s.scale_velocity *= t.spring_damping;
        s.scale += s.scale_velocity * dt;

        // Pointer follow
        if mode.is_engaged() {
            let strength = if s.clicked {
                t.click_follow
            } else {
                t.hover_follow
            };
            let target = Vec3::new(
                pointer.x * viewport.x * t.follow_span * strength,
                pointer.y * viewport.y * t.follow_span * strength,
                (pointer.x + pointer.y) * t.follow_depth * strength,
            );
            s.offset = s.offset.lerp(target, (dt * t.follow_rate).min(1.0));
        } else {
            s.offset = s.offset.lerp(Vec3::ZERO, (dt * t.release_rate).min(1.0));
        }

        // Click impulse and float
        if s.clicked {
            s.click_elapsed += dt;
            s.rotation_velocity *= t.impulse_decay;
            if s.click_elapsed < t.ramp_window_s {
                s.rotation_velocity.y += dt * t.ramp_yaw;
                s.rotation_velocity.x += dt * t.ramp_pitch;
            }
            s.offset.y += (elapsed_s * t.bob_freq).sin() * t.bob_amplitude * dt * t.bob_gain;
        } else {
            s.click_elapsed = 0.0;
            s.rotation_velocity *= t.idle_decay;
        }

        // Base rotation
        match mode {
            InteractionMode::Hovered => {
                s.rotation.y += t.hover_spin * dt;
                s.rotation.x += (elapsed_s * t.wobble_freq).sin() * t.wobble_amplitude * dt;
            }
            InteractionMode::Idle => s.rotation.y += t.idle_spin * dt,
            InteractionMode::Clicked => {}
        }
        s.rotation += s.rotation_velocity * dt;

        // Position spring
        let target = self.base_position + s.offset;
        s.position_velocity += (target - s.position) * t.position_spring * dt;
        s.position_velocity *= t.spring_damping;
        s.position += s.position_velocity * dt;

        let transform = self.transform();
        log::trace!("{:?} {:?}", mode, transform);
        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::ManualClock;

    const DT: f32 = 0.016;
    const FRAME: Duration = Duration::from_millis(16);
    const VIEWPORT: Vec2 = Vec2::new(10.0, 6.0);

    fn controller_at(base: Vec3) -> (InteractiveController<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let controller =
            InteractiveController::with_clock(base, InteractionTuning::default(), clock.clone());
        (controller, clock)
    }

    /// Advance both the clock and the controller by one 16ms frame
    fn step(
        controller: &mut InteractiveController<ManualClock>,
        clock: &ManualClock,
        frame: u32,
        pointer: Vec2,
    ) -> Transform {
        clock.advance(FRAME);
        controller.advance(DT, frame as f32 * DT, pointer, VIEWPORT)
    }

    #[test]
    fn test_cursor_signal() {
        let (mut controller, _) = controller_at(Vec3::ZERO);
        assert_eq!(controller.on_pointer_enter(), CursorStyle::Pointer);
        assert!(controller.is_hovered());
        assert_eq!(controller.on_pointer_leave(), CursorStyle::Default);
        assert!(!controller.is_hovered());
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let (mut controller, clock) = controller_at(Vec3::new(1.0, 2.0, 3.0));
        controller.on_pointer_enter();
        controller.on_click();
        for frame in 0..20 {
            step(&mut controller, &clock, frame, Vec2::new(0.4, -0.3));
        }

        let before = controller.state().clone();
        for _ in 0..50 {
            controller.advance(0.0, 1.0, Vec2::new(0.9, 0.9), VIEWPORT);
        }
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_scale_spring_converges_monotonically() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_pointer_enter();

        let mut previous = controller.transform().scale;
        for frame in 0..600 {
            let scale = step(&mut controller, &clock, frame, Vec2::ZERO).scale;
            assert!(scale >= previous, "scale fell back at frame {}", frame);
            assert!(scale <= 1.15 + 1e-5, "scale overshot at frame {}", frame);
            previous = scale;
        }
        assert!((previous - 1.15).abs() < 1e-3);
    }

    #[test]
    fn test_hover_scenario() {
        let base = Vec3::new(-2.5, 0.0, 0.0);
        let (mut controller, clock) = controller_at(base);
        controller.on_pointer_enter();

        let mut last = controller.transform();
        for frame in 0..60 {
            let transform = step(&mut controller, &clock, frame, Vec2::ZERO);

            assert!(transform.scale > last.scale);
            let yaw_step = transform.rotation.y - last.rotation.y;
            assert!(yaw_step > 0.0);
            assert!((yaw_step - 1.2 * DT).abs() < 1e-5);
            assert!((transform.position - base).length() < 1e-5);
            last = transform;
        }
        assert!(last.scale > 1.1 && last.scale < 1.15);
        assert_eq!(controller.mode(), InteractionMode::Hovered);
    }

    #[test]
    fn test_idle_spin_is_slow() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        let transform = step(&mut controller, &clock, 0, Vec2::ZERO);
        assert!((transform.rotation.y - 0.2 * DT).abs() < 1e-7);
        assert_eq!(transform.rotation.x, 0.0);
        assert_eq!(transform.scale, 1.0);
    }

    #[test]
    fn test_click_seeds_impulse() {
        let (mut controller, _) = controller_at(Vec3::ZERO);
        controller.on_click();

        let state = controller.state();
        assert!(state.clicked);
        assert_eq!(state.rotation_velocity, Vec3::new(0.8, 2.0, 0.0));
        assert_eq!(state.click_elapsed, 0.0);
        assert_eq!(controller.mode(), InteractionMode::Clicked);
    }

    #[test]
    fn test_click_ramp_only_in_first_tenth() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_click();

        // 2 * 0.92 + 8 * 0.016
        step(&mut controller, &clock, 0, Vec2::ZERO);
        let yaw_velocity = controller.state().rotation_velocity.y;
        assert!((yaw_velocity - (2.0 * 0.92 + 8.0 * DT)).abs() < 1e-5);

        for frame in 1..7 {
            step(&mut controller, &clock, frame, Vec2::ZERO);
        }
        // Past 0.1s only the decay applies
        let before = controller.state().rotation_velocity.y;
        step(&mut controller, &clock, 7, Vec2::ZERO);
        let after = controller.state().rotation_velocity.y;
        assert!((after - before * 0.92).abs() < 1e-6);
    }

    #[test]
    fn test_click_resets_after_three_seconds() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_click();

        for frame in 1..=250u32 {
            step(&mut controller, &clock, frame, Vec2::ZERO);
            let held = frame * 16 < 3000;
            assert_eq!(controller.is_clicked(), held, "frame {}", frame);
            if !held {
                assert_eq!(controller.state().click_elapsed, 0.0);
            }
        }

        // Scale settles back to rest once released
        for frame in 251..=410u32 {
            step(&mut controller, &clock, frame, Vec2::ZERO);
        }
        assert!((controller.transform().scale - 1.0).abs() < 5e-3);
    }

    #[test]
    fn test_reset_fires_without_frames() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_click();
        clock.advance(Duration::from_millis(3000));
        controller.poll_reset();
        assert!(!controller.is_clicked());
    }

    #[test]
    fn test_reclick_rearms_deadline() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_click();
        clock.advance(Duration::from_millis(2000));
        controller.on_click(); // Toggle off
        assert!(!controller.is_clicked());
        controller.on_click(); // Engage again, armed at t=2s
        clock.advance(Duration::from_millis(1500));
        controller.poll_reset();
        assert!(controller.is_clicked());
        clock.advance(Duration::from_millis(1500));
        controller.poll_reset();
        assert!(!controller.is_clicked());
    }

    #[test]
    fn test_click_scale_wins_over_hover() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_pointer_enter();
        controller.on_click();
        for frame in 0..150 {
            step(&mut controller, &clock, frame, Vec2::ZERO);
        }
        assert_eq!(controller.state().target_scale, 1.25);
        assert!(controller.transform().scale > 1.2);
    }

    #[test]
    fn test_pointer_follow_and_release() {
        let base = Vec3::new(2.5, 0.0, 0.0);
        let (mut controller, clock) = controller_at(base);
        controller.on_pointer_enter();
        let pointer = Vec2::new(0.5, 0.5);
        for frame in 0..400 {
            step(&mut controller, &clock, frame, pointer);
        }
        // 0.5 * 10 * 0.3 * 0.5, 0.5 * 6 * 0.3 * 0.5, 1.0 * 0.2 * 0.5
        let expected = Vec3::new(0.75, 0.45, 0.1);
        assert!((controller.state().offset - expected).length() < 1e-3);
        assert!((controller.transform().position - (base + expected)).length() < 1e-2);

        controller.on_pointer_leave();
        for frame in 400..900 {
            step(&mut controller, &clock, frame, pointer);
        }
        assert!(controller.state().offset.length() < 1e-3);
        assert!((controller.transform().position - base).length() < 1e-2);
    }

    #[test]
    fn test_rotation_velocity_decays_when_released() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_click();
        controller.on_click();
        let seeded = controller.state().rotation_velocity;
        step(&mut controller, &clock, 0, Vec2::ZERO);
        let decayed = controller.state().rotation_velocity;
        assert!((decayed - seeded * 0.95).length() < 1e-6);
    }

    #[test]
    fn test_hover_wobbles_pitch() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_pointer_enter();

        let mut pitch = controller.transform().rotation.x;
        for frame in 1..=40 {
            let transform = step(&mut controller, &clock, frame, Vec2::ZERO);
            let elapsed = frame as f32 * DT;
            let expected = (elapsed * 2.0).sin() * 0.8 * DT;
            assert_eq!(controller.state().rotation_velocity, Vec3::ZERO);
            assert!(
                (transform.rotation.x - pitch - expected).abs() < 1e-6,
                "frame {}",
                frame
            );
            pitch = transform.rotation.x;
        }
        assert!(pitch > 0.1);
    }

    #[test]
    fn test_click_bob_lifts_offset() {
        let (mut controller, clock) = controller_at(Vec3::ZERO);
        controller.on_click();

        // Offset eases toward zero, then the bob is added on top
        let mut expected = 0.0f32;
        for frame in 1..=30 {
            step(&mut controller, &clock, frame, Vec2::ZERO);
            let elapsed = frame as f32 * DT;
            expected = expected * (1.0 - DT * 6.0) + (elapsed * 3.0).sin() * 0.3 * DT * 2.0;
            let offset = controller.state().offset;
            assert!((offset.y - expected).abs() < 1e-5, "frame {}", frame);
            assert_eq!(offset.x, 0.0);
        }
        assert!(expected > 0.02);
    }
}
