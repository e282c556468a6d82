//! Constructors: allocate a slot, then apply per-kind defaults from the table

use glam::Vec2;

use super::kind::EntityKind;
use super::pool::{EntityHandle, EntityPool, PoolError};

/// Allocate and initialise an entity of any kind at a tile position
pub fn spawn(pool: &mut EntityPool, kind: EntityKind, pos: Vec2) -> Result<EntityHandle, PoolError> {
    let handle = pool.allocate()?;
    let info = kind.info();
    if let Some(e) = pool.get_mut(handle) {
        e.kind = kind;
        e.pos = pos;
        e.health = info.default_health;
        e.is_item = kind.is_item();
    }
    Ok(handle)
}

pub fn player(pool: &mut EntityPool, pos: Vec2) -> Result<EntityHandle, PoolError> {
    spawn(pool, EntityKind::Player, pos)
}

pub fn rock(pool: &mut EntityPool, pos: Vec2) -> Result<EntityHandle, PoolError> {
    spawn(pool, EntityKind::Rock, pos)
}

pub fn tree(pool: &mut EntityPool, pos: Vec2) -> Result<EntityHandle, PoolError> {
    spawn(pool, EntityKind::Tree, pos)
}

pub fn item_pinewood(pool: &mut EntityPool, pos: Vec2) -> Result<EntityHandle, PoolError> {
    spawn(pool, EntityKind::ItemPinewood, pos)
}

pub fn building_furnace(pool: &mut EntityPool, pos: Vec2) -> Result<EntityHandle, PoolError> {
    spawn(pool, EntityKind::BuildingFurnace, pos)
}
