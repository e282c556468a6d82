//! Runtime configuration with documented constants
//!
//! All tweakable numbers are collected here. Defaults reproduce the
//! prototype's feel at 1920-wide rendering with 240-pixel-era sprites.

use serde::Deserialize;
use std::path::Path;

use crate::core::error::{GameError, Result};
use crate::memory::arena::MAX_ARENA_BYTES;

/// Configuration for the runtime core
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    // === WORLD ===
    /// Side length of one tile in world units at zoom 1.0
    pub tile_size: f32,

    /// Sprite scale applied to texture footprints when rendering entities
    ///
    /// Sprites are authored at low resolution; 8x brings a 16px sprite to
    /// roughly one tile.
    pub entity_scale: f32,

    /// Vertical bob of dropped items, in sprite pixels (multiplied by
    /// `entity_scale`)
    pub item_bob_amplitude: f32,

    /// Draw hitbox outlines over every entity
    pub show_hitboxes: bool,

    // === CAPACITIES ===
    /// Number of slots in the entity pool. Fixed for the process lifetime.
    pub entity_capacity: usize,

    /// Bytes reserved for the persistent arena (interned labels)
    pub persistent_arena_bytes: usize,

    /// Bytes reserved for the frame arena (per-frame UI text)
    pub frame_arena_bytes: usize,

    // === PLAYER ===
    /// Player speed in tiles per second
    pub player_speed: f32,

    /// Speed multiplier while the sprint key is held
    pub sprint_multiplier: f32,

    /// Items whose hitbox centre is closer than this to the player's hitbox
    /// centre are picked up (world units)
    pub pickup_radius: f32,

    // === SMOOTHING ===
    /// Exponential rate at which the camera closes on the player
    pub camera_follow_rate: f32,

    /// Exponential rate for UI fade animations
    pub ui_fade_rate: f32,

    // === DEBUG WORLD ===
    /// Populate a small test world on first initialisation
    pub debug_world: bool,

    /// Seed for debug world placement
    pub debug_world_seed: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tile_size: 120.0,
            entity_scale: 8.0,
            item_bob_amplitude: 5.0,
            show_hitboxes: true,

            entity_capacity: 1024,
            persistent_arena_bytes: 1024 * 1024,
            frame_arena_bytes: 64 * 1024,

            player_speed: 8.0,
            sprint_multiplier: 2.0,
            pickup_radius: 40.0,

            // Slow follow, fast fades
            camera_follow_rate: 4.0,
            ui_fade_rate: 16.0,

            debug_world: false,
            debug_world_seed: 1337,
        }
    }
}

impl CoreConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.tile_size <= 0.0 {
            return Err(GameError::Config(format!(
                "tile_size ({}) must be positive",
                self.tile_size
            )));
        }

        if self.entity_capacity == 0 {
            return Err(GameError::Config("entity_capacity must be non-zero".into()));
        }

        if self.persistent_arena_bytes == 0 || self.frame_arena_bytes == 0 {
            return Err(GameError::Config("arena sizes must be non-zero".into()));
        }

        if self.persistent_arena_bytes.max(self.frame_arena_bytes) > MAX_ARENA_BYTES {
            return Err(GameError::Config(format!(
                "arena sizes must not exceed {} bytes",
                MAX_ARENA_BYTES
            )));
        }

        if self.entity_scale <= 0.0 {
            return Err(GameError::Config(format!(
                "entity_scale ({}) must be positive",
                self.entity_scale
            )));
        }

        // Rates must be positive or smoothing never converges
        if self.camera_follow_rate <= 0.0 || self.ui_fade_rate <= 0.0 {
            return Err(GameError::Config("smoothing rates must be positive".into()));
        }

        if self.pickup_radius < 0.0 {
            return Err(GameError::Config("pickup_radius must not be negative".into()));
        }

        Ok(())
    }
}
