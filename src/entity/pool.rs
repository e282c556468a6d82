//! Fixed-capacity entity pool with generation-checked handles
//!
//! Slots live in a boxed slice that never grows or moves. A slot is free
//! when its record is inactive; freeing zeroes the whole record and bumps
//! the slot's generation so any handle taken before the free stops
//! resolving.

use std::fmt;

use glam::Vec2;
use thiserror::Error;

use super::kind::EntityKind;

/// Index + generation reference to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

impl EntityHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("entity pool full ({capacity} slots)")]
    Full { capacity: usize },

    #[error("stale entity handle {0}")]
    Stale(EntityHandle),
}

/// One entity record. An all-default record is an empty slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub active: bool,
    /// Position in tile space
    pub pos: Vec2,
    /// Meaningful only while active
    pub health: u32,
    pub is_item: bool,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entity: Entity,
}

#[derive(Debug)]
pub struct EntityPool {
    slots: Box<[Slot]>,
    active: usize,
}

impl EntityPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity].into_boxed_slice(),
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Claim the first inactive slot.
    ///
    /// Only `active` is set; the caller's constructor fills in the rest.
    pub fn allocate(&mut self) -> Result<EntityHandle, PoolError> {
        let Some(index) = self.slots.iter().position(|s| !s.entity.active) else {
            tracing::warn!("Entity pool exhausted at {} slots", self.slots.len());
            return Err(PoolError::Full {
                capacity: self.slots.len(),
            });
        };

        let slot = &mut self.slots[index];
        slot.entity.active = true;
        self.active += 1;
        Ok(EntityHandle {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Zero the record and retire the handle's generation
    pub fn free(&mut self, handle: EntityHandle) -> Result<Entity, PoolError> {
        let slot = self
            .slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation && s.entity.active)
            .ok_or(PoolError::Stale(handle))?;

        let old = std::mem::take(&mut slot.entity);
        slot.generation = slot.generation.wrapping_add(1);
        self.active -= 1;
        Ok(old)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation && s.entity.active)
            .map(|s| &s.entity)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation && s.entity.active)
            .map(|s| &mut s.entity)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Active entities in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.entity.active)
            .map(|(i, s)| {
                (
                    EntityHandle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    &s.entity,
                )
            })
    }

    /// Raw record of a slot regardless of occupancy
    pub fn slot(&self, index: usize) -> Option<&Entity> {
        self.slots.get(index).map(|s| &s.entity)
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.iter().filter(|(_, e)| e.kind == kind).count()
    }
}
