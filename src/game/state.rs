//! The long-lived state aggregate
//!
//! A `GameState` is created once by the host and handed by reference to
//! every logic module that gets loaded. Everything that must survive a
//! module swap lives here or in one of its arenas.

use std::time::Duration;

use crate::city::buildings::BuildingTable;
use crate::city::inventory::Inventory;
use crate::core::config::CoreConfig;
use crate::core::error::Result;
use crate::core::types::{Frame, TileSpace};
use crate::entity::pool::{EntityHandle, EntityPool};
use crate::interaction::gate::ConsumptionGate;
use crate::memory::arena::{Arena, ArenaLifetime};
use crate::render::camera::Camera2D;
use crate::spatial::hitbox::HitboxIndex;
use crate::ui::state::UiState;

/// Layout version of [`GameState`]. Bump whenever a field is added,
/// removed or changes meaning; modules built against another version are
/// refused.
pub const STATE_SCHEMA_VERSION: u32 = 1;

/// Frame timing accumulated between diagnostics flushes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub total: Duration,
    pub max: Duration,
}

impl FrameStats {
    pub fn record(&mut self, elapsed: Duration) {
        self.frames += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }

    /// Average frame time in milliseconds
    pub fn avg_ms(&self) -> f32 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total.as_secs_f32() * 1000.0 / self.frames as f32
    }

    pub fn max_ms(&self) -> f32 {
        self.max.as_secs_f32() * 1000.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub struct GameState {
    pub schema_version: u32,
    /// Set by the first `update`; first-time setup never runs again
    pub is_initialised: bool,
    pub config: CoreConfig,

    /// Process-lifetime allocations (interned labels)
    pub persistent_arena: Arena,
    /// Per-frame text; reset at the start of every update
    pub frame_arena: Arena,
    pub frame: Frame,

    pub entities: EntityPool,
    /// Re-validated through the pool every frame
    pub player: Option<EntityHandle>,
    pub hitboxes: HitboxIndex,

    pub inventory: Inventory,
    pub buildings: BuildingTable,

    pub camera: Camera2D,
    pub ui: UiState,
    pub gate: ConsumptionGate,
    pub stats: FrameStats,
}

impl GameState {
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            schema_version: STATE_SCHEMA_VERSION,
            is_initialised: false,
            persistent_arena: Arena::new(ArenaLifetime::Persistent, config.persistent_arena_bytes),
            frame_arena: Arena::new(ArenaLifetime::Frame, config.frame_arena_bytes),
            frame: 0,
            entities: EntityPool::new(config.entity_capacity),
            player: None,
            hitboxes: HitboxIndex::with_capacity(config.entity_capacity),
            inventory: Inventory::new(),
            buildings: BuildingTable::new(),
            camera: Camera2D::default(),
            ui: UiState::new(),
            gate: ConsumptionGate::new(),
            stats: FrameStats::default(),
            config,
        })
    }

    /// Tile/world conversion at the current camera zoom
    pub fn tile_space(&self) -> TileSpace {
        TileSpace::new(self.config.tile_size, self.camera.zoom)
    }

    /// Rewind the persistent arena and rebuild what lives in it.
    ///
    /// Every `ArenaRef` into the persistent arena taken before the call is
    /// stale afterwards.
    pub fn persistent_checkpoint(&mut self) -> Result<()> {
        self.persistent_arena.reset();
        self.buildings.intern_labels(&mut self.persistent_arena)?;
        tracing::info!(
            "Persistent arena checkpoint: {} bytes in use",
            self.persistent_arena.used()
        );
        Ok(())
    }
}
