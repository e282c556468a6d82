//! Single-use hover and click claims for one frame
//!
//! The first element tested gets first refusal. Once a claim succeeds every
//! later caller in the same frame sees `false` until [`ConsumptionGate::reset`].

use glam::Vec2;

use crate::core::types::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumptionGate {
    hover_consumed: bool,
    click_consumed: bool,
}

impl ConsumptionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the hover if nobody has and the world-space cursor is inside `rect`
    pub fn try_consume_hover(&mut self, rect: Rect, cursor_world: Vec2) -> bool {
        if self.hover_consumed {
            return false;
        }
        self.hover_consumed = rect.contains(cursor_world);
        self.hover_consumed
    }

    /// Claim the click if nobody has and the button was released this frame
    pub fn try_consume_click(&mut self, released: bool) -> bool {
        if self.click_consumed {
            return false;
        }
        self.click_consumed = released;
        self.click_consumed
    }

    pub fn hover_consumed(&self) -> bool {
        self.hover_consumed
    }

    pub fn click_consumed(&self) -> bool {
        self.click_consumed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
