//! Contracts for the platform collaborators (input, assets)

pub mod assets;
pub mod input;

pub use assets::{
    texture_for_kind, AssetSource, FontHandle, MemoryAssets, ResolvedTexture, TextureHandle,
    TextureInfo,
};
pub use input::{InputSnapshot, Key};
