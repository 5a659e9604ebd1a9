//! Keyboard and mouse input aggregation.
//!
//! Collects winit events into a per-frame snapshot: held movement keys,
//! accumulated mouse-look delta and scroll amount. The application applies
//! the snapshot to the camera once per frame and resets the accumulators.

use std::collections::HashSet;

use winit::event::ElementState;
use winit::keyboard::KeyCode;

#[derive(Default)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
    mouse_delta: (f32, f32),
    scroll_delta: f32,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed.insert(key);
            }
            ElementState::Released => {
                self.pressed.remove(&key);
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn accumulate_mouse(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn accumulate_scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Returns and clears the accumulated mouse delta.
    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Returns and clears the accumulated scroll delta.
    pub fn take_scroll_delta(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }
}
