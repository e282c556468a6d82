//! Camera system with coordinate transformations.

use glam::Vec2;

use crate::core::types::Rect;

/// 2D camera: `target` in world space is drawn at `offset` in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub target: Vec2,
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera2D {
    /// Convert world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        (world_pos - self.target) * self.zoom + self.offset
    }

    /// Convert screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        (screen_pos - self.offset) / self.zoom + self.target
    }

    pub fn screen_rect_to_world(&self, rect: Rect) -> Rect {
        Rect::from_pos_size(self.screen_to_world(rect.pos()), rect.size() / self.zoom)
    }

    /// Centre the target on the viewport (call on window resize).
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.offset = size * 0.5;
    }

    /// Move the target a fraction `t` of the way toward `goal`.
    pub fn follow(&mut self, goal: Vec2, t: f32) {
        self.target += (goal - self.target) * t.clamp(0.0, 1.0);
    }
}
