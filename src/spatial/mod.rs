//! Spatial queries over the current frame's entity rectangles

pub mod hitbox;

pub use hitbox::{entity_rect, Hitbox, HitboxIndex, Hovered, ProximityQuery, Resolution, SpriteMetrics};
