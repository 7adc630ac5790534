//! Host side of the per-frame cycle.
//!
//! Each redraw runs FrameStart → Update → Draw → FrameEnd. [`FrameLoop`]
//! owns the FrameStart decisions (clamped delta, pointer snapshot, pause
//! and reset keys) so they can be exercised without a window or a GPU. The
//! backends ([`crate::gpu::GpuState`], [`crate::cpu::CpuSimulation`]) carry
//! out the resulting [`FramePlan`].

use std::time::{Duration, Instant};

use winit::keyboard::KeyCode;

use crate::input::Input;
use crate::time::Time;
use crate::uniforms::FrameParams;

/// What a single frame should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    /// Parameters to upload before the update stage.
    pub params: FrameParams,
    /// Whether the update stage runs. The draw stage always runs.
    pub run_update: bool,
    /// Re-spawn the particle state before updating.
    pub reset: bool,
    /// Leave the event loop after this frame.
    pub exit: bool,
}

/// Frame timing plus the keyboard-driven controls.
#[derive(Debug)]
pub struct FrameLoop {
    time: Time,
}

impl FrameLoop {
    pub fn new(max_delta: Duration) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    pub fn starting_at(now: Instant, max_delta: Duration) -> Self {
        Self {
            time: Time::starting_at(now).with_max_delta(max_delta),
        }
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn is_paused(&self) -> bool {
        self.time.is_paused()
    }

    /// FrameStart: read controls, measure the delta, snapshot the pointer.
    pub fn begin_frame(&mut self, now: Instant, input: &Input) -> FramePlan {
        if input.key_pressed(KeyCode::Space) {
            let paused = self.time.toggle_pause();
            log::info!("paused: {}", paused);
        }
        let reset = input.key_pressed(KeyCode::KeyR);
        if reset {
            log::info!("resetting particles");
        }

        let delta_time = self.time.update_at(now);
        if self.time.fps_updated() {
            log::debug!("fps: {:.1}", self.time.fps());
        }

        FramePlan {
            params: FrameParams::new(delta_time, input.pointer_mode(), input.pointer_position()),
            run_update: !self.time.is_paused(),
            reset,
            exit: input.key_pressed(KeyCode::Escape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::PointerMode;
    use glam::Vec2;
    use winit::event::MouseButton;

    #[test]
    fn test_stall_uses_clamp_ceiling() {
        let t0 = Instant::now();
        let mut frames = FrameLoop::starting_at(t0, Duration::from_millis(30));
        let input = Input::new(100, 100);

        let plan = frames.begin_frame(t0 + Duration::from_millis(500), &input);
        assert_eq!(plan.params.delta_time, 0.03);
        assert!(plan.run_update);
        assert!(!plan.reset);
        assert!(!plan.exit);
    }

    #[test]
    fn test_pointer_snapshot() {
        let t0 = Instant::now();
        let mut frames = FrameLoop::starting_at(t0, Duration::from_millis(30));
        let mut input = Input::new(100, 100);
        input.cursor_moved(30.0, 20.0);
        input.mouse_button(MouseButton::Left, true);

        let plan = frames.begin_frame(t0 + Duration::from_millis(16), &input);
        assert_eq!(plan.params.pointer_mode, PointerMode::Attract);
        assert_eq!(plan.params.pointer_position, Vec2::new(0.3, 0.8));

        // Later events don't touch a plan that was already built
        input.mouse_button(MouseButton::Left, false);
        assert_eq!(plan.params.pointer_mode, PointerMode::Attract);
    }

    #[test]
    fn test_pause_skips_update() {
        let t0 = Instant::now();
        let mut frames = FrameLoop::starting_at(t0, Duration::from_millis(30));
        let mut input = Input::new(100, 100);

        input.key(KeyCode::Space, true);
        let plan = frames.begin_frame(t0 + Duration::from_millis(16), &input);
        assert!(!plan.run_update);
        assert_eq!(plan.params.delta_time, 0.0);
        assert!(frames.is_paused());
        input.end_frame();

        // Still paused on the next frame without a key press
        let plan = frames.begin_frame(t0 + Duration::from_millis(32), &input);
        assert!(!plan.run_update);

        input.key(KeyCode::Space, false);
        input.key(KeyCode::Space, true);
        let plan = frames.begin_frame(t0 + Duration::from_millis(48), &input);
        assert!(plan.run_update);
        assert!(plan.params.delta_time > 0.0);
    }

    #[test]
    fn test_reset_and_exit_keys() {
        let t0 = Instant::now();
        let mut frames = FrameLoop::starting_at(t0, Duration::from_millis(30));
        let mut input = Input::new(100, 100);

        input.key(KeyCode::KeyR, true);
        input.key(KeyCode::Escape, true);
        let plan = frames.begin_frame(t0 + Duration::from_millis(16), &input);
        assert!(plan.reset);
        assert!(plan.exit);
    }
}
