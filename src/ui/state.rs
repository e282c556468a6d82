//! UI mode switching and fade animation

use crate::core::types::exp_decay_t;
use crate::entity::kind::EntityKind;
use crate::platform::input::{InputSnapshot, Key};

/// Alpha below which a fading panel is treated as hidden
pub const FADE_EPSILON: f32 = 0.001;

/// Which overlay owns the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Nil,
    Inventory,
    Buildings,
    /// Placeholder, nothing draws yet
    Workbench,
    /// Placeholder, nothing draws yet
    Research,
}

/// Toggle key for each mode, in the order releases are processed
pub const TOGGLE_KEYS: [(Key, UiMode); 4] = [
    (Key::Tab, UiMode::Inventory),
    (Key::C, UiMode::Buildings),
    (Key::E, UiMode::Workbench),
    (Key::R, UiMode::Research),
];

impl UiMode {
    /// Same mode returns to `Nil`; any other mode switches directly
    pub fn toggled(self, target: UiMode) -> UiMode {
        if self == target {
            UiMode::Nil
        } else {
            target
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: UiMode,
    /// Eased toward 1 while the inventory is open, 0 otherwise
    pub inventory_alpha: f32,
    pub buildings_alpha: f32,
    /// Building being placed; the preview follows the cursor while set
    pub placing: Option<EntityKind>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this frame's toggle-key releases
    pub fn handle_keys(&mut self, input: &InputSnapshot) {
        for (key, target) in TOGGLE_KEYS {
            if input.is_released(key) {
                let next = self.mode.toggled(target);
                tracing::debug!("UI mode {:?} -> {:?}", self.mode, next);
                self.mode = next;
            }
        }
        if input.is_released(Key::Escape) && self.placing.take().is_some() {
            tracing::debug!("Placement cancelled");
        }
    }

    /// Ease both panel alphas toward their targets
    pub fn update_fades(&mut self, dt: f32, rate: f32) {
        let t = exp_decay_t(rate, dt);
        let target = |open: bool| if open { 1.0 } else { 0.0 };
        self.inventory_alpha += (target(self.mode == UiMode::Inventory) - self.inventory_alpha) * t;
        self.buildings_alpha += (target(self.mode == UiMode::Buildings) - self.buildings_alpha) * t;
    }

    pub fn inventory_visible(&self) -> bool {
        self.inventory_alpha > FADE_EPSILON
    }

    /// Enter placement mode for a building kind; other kinds are ignored
    pub fn begin_placement(&mut self, kind: EntityKind) {
        if !kind.is_building() {
            tracing::warn!("Cannot place non-building kind {:?}", kind);
            return;
        }
        self.placing = Some(kind);
    }
}
