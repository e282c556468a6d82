//! Camera and draw-command contract for the rendering collaborator

pub mod camera;
pub mod draw;

pub use camera::Camera2D;
pub use draw::{Color, DrawCommand, DrawList, Layer};
