//! Pointer and keyboard state collected from window events.
//!
//! Event callbacks only mutate this host-side record. The frame loop reads
//! it once per frame, at frame start, to build [`FrameParams`]; the GPU copy
//! changes only then.
//!
//! Pointer mapping:
//! - left button or one touch: [`PointerMode::Attract`]
//! - right button or two or more touches: [`PointerMode::Repel`]
//! - nothing down: [`PointerMode::Inactive`]
//!
//! [`FrameParams`]: crate::uniforms::FrameParams

use glam::Vec2;
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::uniforms::PointerMode;

/// Input state tracking for keyboard, mouse and touch.
#[derive(Debug, Default)]
pub struct Input {
    // Key state
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    // Pointer
    left_held: bool,
    right_held: bool,
    touches: HashMap<u64, Vec2>,
    pointer_position: Vec2,

    // Window size for normalization
    window_size: (u32, u32),
}

impl Input {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..Default::default()
        }
    }

    // ========== Key Queries ==========

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    // ========== Pointer Queries ==========

    /// Latest pointer position in `[0, 1]²`, Y measured upward.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    /// Current pointer mode. Repel wins when both apply.
    pub fn pointer_mode(&self) -> PointerMode {
        if self.right_held || self.touches.len() >= 2 {
            PointerMode::Repel
        } else if self.left_held || self.touches.len() == 1 {
            PointerMode::Attract
        } else {
            PointerMode::Inactive
        }
    }

    // ========== Internal Methods ==========

    /// Called at the end of each frame to clear per-frame state.
    pub(crate) fn end_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Update window size for normalization.
    pub(crate) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Map a physical pixel position into `[0, 1]²` with Y flipped.
    fn normalize(&self, x: f64, y: f64) -> Option<Vec2> {
        let (w, h) = self.window_size;
        if w == 0 || h == 0 {
            return None;
        }
        Some(Vec2::new(
            (x / w as f64) as f32,
            1.0 - (y / h as f64) as f32,
        ))
    }

    pub(crate) fn cursor_moved(&mut self, x: f64, y: f64) {
        if let Some(pos) = self.normalize(x, y) {
            self.pointer_position = pos;
        }
    }

    pub(crate) fn mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left_held = pressed,
            MouseButton::Right => self.right_held = pressed,
            _ => {}
        }
    }

    pub(crate) fn touch(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                if let Some(pos) = self.normalize(x, y) {
                    self.touches.insert(id, pos);
                    self.pointer_position = pos;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
            }
        }
    }

    pub(crate) fn key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            // Only fire pressed event if not already held (no repeat)
            if self.keys_held.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_held.remove(&key);
        }
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    self.key(keycode, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y);
            }
            WindowEvent::Touch(touch) => {
                self.touch(touch.id, touch.phase, touch.location.x, touch.location.y);
            }
            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_normalized_y_up() {
        let mut input = Input::new(800, 600);
        input.cursor_moved(400.0, 150.0);
        assert_eq!(input.pointer_position(), Vec2::new(0.5, 0.75));

        input.cursor_moved(0.0, 600.0);
        assert_eq!(input.pointer_position(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_window_keeps_last_position() {
        let mut input = Input::new(100, 100);
        input.cursor_moved(25.0, 25.0);
        input.set_window_size(0, 0);
        input.cursor_moved(90.0, 90.0);
        assert_eq!(input.pointer_position(), Vec2::new(0.25, 0.75));
    }

    #[test]
    fn test_mouse_modes() {
        let mut input = Input::new(100, 100);
        assert_eq!(input.pointer_mode(), PointerMode::Inactive);

        input.mouse_button(MouseButton::Left, true);
        assert_eq!(input.pointer_mode(), PointerMode::Attract);

        input.mouse_button(MouseButton::Right, true);
        assert_eq!(input.pointer_mode(), PointerMode::Repel);

        input.mouse_button(MouseButton::Right, false);
        assert_eq!(input.pointer_mode(), PointerMode::Attract);

        input.mouse_button(MouseButton::Left, false);
        assert_eq!(input.pointer_mode(), PointerMode::Inactive);

        // Middle button does nothing
        input.mouse_button(MouseButton::Middle, true);
        assert_eq!(input.pointer_mode(), PointerMode::Inactive);
    }

    #[test]
    fn test_touch_modes() {
        let mut input = Input::new(200, 100);
        input.touch(1, TouchPhase::Started, 50.0, 50.0);
        assert_eq!(input.pointer_mode(), PointerMode::Attract);
        assert_eq!(input.pointer_position(), Vec2::new(0.25, 0.5));

        input.touch(2, TouchPhase::Started, 150.0, 25.0);
        assert_eq!(input.pointer_mode(), PointerMode::Repel);
        assert_eq!(input.pointer_position(), Vec2::new(0.75, 0.75));

        input.touch(1, TouchPhase::Ended, 50.0, 50.0);
        assert_eq!(input.pointer_mode(), PointerMode::Attract);

        input.touch(2, TouchPhase::Cancelled, 0.0, 0.0);
        assert_eq!(input.pointer_mode(), PointerMode::Inactive);
    }

    #[test]
    fn test_key_state() {
        let mut input = Input::new(100, 100);

        input.key(KeyCode::Space, true);
        assert!(input.key_held(KeyCode::Space));
        assert!(input.key_pressed(KeyCode::Space));

        // After end_frame, pressed is cleared but held remains
        input.end_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        // Auto-repeat while held does not fire again
        input.key(KeyCode::Space, true);
        assert!(!input.key_pressed(KeyCode::Space));

        input.key(KeyCode::Space, false);
        assert!(!input.key_held(KeyCode::Space));
    }
}
