//! Draw commands handed to the rendering collaborator
//!
//! The core never rasterises. Each frame it fills a [`DrawList`] that the
//! host replays against its renderer after `update` returns. Text is
//! referenced through the frame arena, so a draw list must be consumed
//! before the next frame begins.

use glam::Vec2;

use crate::core::types::Rect;
use crate::memory::arena::{Arena, ArenaRef};
use crate::platform::assets::{FontHandle, TextureHandle};
use crate::render::camera::Camera2D;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const RAYWHITE: Color = Color::new(245, 245, 245, 255);
    pub const GREEN: Color = Color::new(0, 228, 48, 255);
    pub const BROWN: Color = Color::new(127, 106, 79, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255, 255);
    pub const RED: Color = Color::new(230, 41, 55, 255);

    /// Scale alpha by a factor in [0, 1]
    pub fn fade(&self, factor: f32) -> Self {
        Self {
            a: (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8,
            ..*self
        }
    }
}

/// Depth layer; higher layers draw over lower ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    World = 20,
    Ui = 50,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
        layer: Layer,
    },
    RectLines {
        rect: Rect,
        thickness: f32,
        color: Color,
        layer: Layer,
    },
    Circle {
        centre: Vec2,
        radius: f32,
        color: Color,
        layer: Layer,
    },
    /// Texture with its top-left at `dest.pos()`, stretched to `dest.size()`
    Texture {
        texture: TextureHandle,
        dest: Rect,
        tint: Color,
        layer: Layer,
    },
    /// Text bytes live in the frame arena
    Text {
        text: ArenaRef,
        pos: Vec2,
        size: f32,
        font: FontHandle,
        color: Color,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> Layer {
        match self {
            DrawCommand::Rect { layer, .. }
            | DrawCommand::RectLines { layer, .. }
            | DrawCommand::Circle { layer, .. }
            | DrawCommand::Texture { layer, .. } => *layer,
            DrawCommand::Text { .. } => Layer::Ui,
        }
    }
}

/// One frame of draw commands in world space under `camera`
#[derive(Debug, Clone)]
pub struct DrawList {
    pub camera: Camera2D,
    pub clear_color: Color,
    commands: Vec<DrawCommand>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            camera: Camera2D::default(),
            clear_color: Color::RAYWHITE,
            commands: Vec::with_capacity(512),
        }
    }

    /// Drop last frame's commands, keeping the allocation
    pub fn begin(&mut self, camera: Camera2D) {
        self.camera = camera;
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn rect(&mut self, rect: Rect, color: Color, layer: Layer) {
        self.push(DrawCommand::Rect { rect, color, layer });
    }

    pub fn texture(&mut self, texture: TextureHandle, dest: Rect, tint: Color, layer: Layer) {
        self.push(DrawCommand::Texture {
            texture,
            dest,
            tint,
            layer,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolve every text command against the arena it was written to
    pub fn texts<'a>(&'a self, arena: &'a Arena) -> impl Iterator<Item = &'a str> + 'a {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Text { text, .. } => arena.str(*text),
            _ => None,
        })
    }
}
