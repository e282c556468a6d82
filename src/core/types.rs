//! Core type definitions used throughout the codebase

use glam::Vec2;

/// Frame counter (one per `update` call)
pub type Frame = u64;

/// Axis-aligned rectangle in world or screen space (top-left origin)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Radius of the circle used for proximity tests: half the larger side
    pub fn circumscribed_radius(&self) -> f32 {
        (self.width * 0.5).max(self.height * 0.5)
    }

    /// Point containment, inclusive of the top/left edges and exclusive of
    /// the bottom/right ones
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Conversions between tile space and world space at a given zoom
#[derive(Debug, Clone, Copy)]
pub struct TileSpace {
    pub tile_size: f32,
    pub zoom: f32,
}

impl TileSpace {
    pub fn new(tile_size: f32, zoom: f32) -> Self {
        Self { tile_size, zoom }
    }

    #[inline]
    fn step(&self) -> f32 {
        self.tile_size * self.zoom
    }

    pub fn to_world(&self, tile: Vec2) -> Vec2 {
        tile * self.step()
    }

    pub fn to_tile(&self, world: Vec2) -> Vec2 {
        world / self.step()
    }

    /// Round a world position to the nearest tile corner
    pub fn snap_world(&self, world: Vec2) -> Vec2 {
        let step = self.step();
        Vec2::new(
            (world.x / step).round() * step,
            (world.y / step).round() * step,
        )
    }
}

/// Interpolation factor for exponential decay toward a target
///
/// Independent of frame rate: two frames of `dt` move as far as one frame
/// of `2 * dt`.
pub fn exp_decay_t(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Ease-in-out over a sine, producing values in [0, 1]
pub fn sin_in_out(t: f32) -> f32 {
    -((std::f32::consts::PI * t).cos() - 1.0) * 0.5
}
