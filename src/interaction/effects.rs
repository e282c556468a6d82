//! Destructive interaction effects: striking resources and placing buildings
//!
//! Both run after hitbox resolution for the frame, so they may free and
//! spawn freely without disturbing the pass that found their targets.

use glam::Vec2;

use crate::city::buildings::BuildingTable;
use crate::entity::kind::EntityKind;
use crate::entity::pool::{EntityHandle, EntityPool, PoolError};
use crate::entity::spawn;

/// What a single strike did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// The handle no longer resolves
    Stale,
    /// Kind has no health to take (player, buildings, items)
    Immune,
    Damaged { remaining: u32 },
    /// Freed; `drop` is the item spawned in its place, if any
    Destroyed { drop: Option<EntityHandle> },
}

/// Take one point of health from a destructible entity.
///
/// At zero health the entity is freed and the kind's drop spawns at the
/// same tile position. A full pool loses the drop but still frees the
/// target.
pub fn strike(pool: &mut EntityPool, target: EntityHandle) -> StrikeOutcome {
    let Some(entity) = pool.get_mut(target) else {
        return StrikeOutcome::Stale;
    };
    if entity.kind.info().default_health == 0 {
        return StrikeOutcome::Immune;
    }

    entity.health = entity.health.saturating_sub(1);
    if entity.health > 0 {
        tracing::debug!("{:?} {} struck, {} health left", entity.kind, target, entity.health);
        return StrikeOutcome::Damaged {
            remaining: entity.health,
        };
    }

    let (kind, pos) = (entity.kind, entity.pos);
    if let Err(e) = pool.free(target) {
        tracing::warn!("Failed to free destroyed entity: {}", e);
        return StrikeOutcome::Stale;
    }

    let drop = kind.info().drop.and_then(|item| match spawn::spawn(pool, item, pos) {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Dropped {:?} lost: {}", item, e);
            None
        }
    });
    tracing::debug!("{:?} {} destroyed at {:?}", kind, target, pos);
    StrikeOutcome::Destroyed { drop }
}

/// Spawn a building at a tile position and count it in the building table
pub fn place_building(
    pool: &mut EntityPool,
    buildings: &mut BuildingTable,
    kind: EntityKind,
    tile_pos: Vec2,
) -> Result<EntityHandle, PoolError> {
    let handle = spawn::spawn(pool, kind, tile_pos)?;
    buildings.record_placed(kind);
    tracing::debug!("Placed {:?} at tile {:?}", kind, tile_pos);
    Ok(handle)
}
