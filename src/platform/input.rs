//! Input collaborator contract
//!
//! The host samples its input primitives once per frame into an
//! [`InputSnapshot`]. Edges (pressed/released) are already detected by the
//! host; the core never polls.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    Tab,
    C,
    E,
    R,
    F,
    Escape,
}

/// Everything the core reads from the platform in one frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since start-up
    pub time: f64,
    pub render_size: Vec2,
    /// Cursor in screen pixels
    pub mouse_screen: Vec2,
    /// Left button went up this frame
    pub left_released: bool,
    pub keys_down: Vec<Key>,
    pub keys_pressed: Vec<Key>,
    pub keys_released: Vec<Key>,
}

impl InputSnapshot {
    pub fn new(render_size: Vec2, dt: f32) -> Self {
        Self {
            dt,
            render_size,
            ..Self::default()
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn with_mouse(mut self, screen: Vec2) -> Self {
        self.mouse_screen = screen;
        self
    }

    pub fn with_click(mut self) -> Self {
        self.left_released = true;
        self
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn with_key_down(mut self, key: Key) -> Self {
        self.keys_down.push(key);
        self
    }

    pub fn with_key_pressed(mut self, key: Key) -> Self {
        self.keys_pressed.push(key);
        self
    }

    pub fn with_key_released(mut self, key: Key) -> Self {
        self.keys_released.push(key);
        self
    }

    /// Unit movement direction from the arrow keys
    pub fn movement_axis(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_down(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_down(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_down(Key::Right) {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}
