//! Memory lifetimes: persistent and frame-scoped arenas

pub mod arena;

pub use arena::{Arena, ArenaError, ArenaLifetime, ArenaRef};
