//! Tilecraft - runtime core of a tile-based survival/crafting prototype
//!
//! A host-owned `GameState` survives any number of logic-module swaps.
//! Each frame the logic builds a hitbox index over the entity pool,
//! resolves hover and pickups, applies clicks and emits draw commands.

pub mod city;
pub mod core;
pub mod entity;
pub mod game;
pub mod interaction;
pub mod memory;
pub mod platform;
pub mod reload;
pub mod render;
pub mod spatial;
pub mod ui;
