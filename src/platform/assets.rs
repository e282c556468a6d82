//! Asset collaborator contract
//!
//! The host owns texture and font loading. The core asks for handles by
//! logical key and falls back to the default texture when a key is missing.

use ahash::{AHashMap, AHashSet};
use glam::Vec2;

use crate::entity::kind::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// A loaded texture and its pixel footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureInfo {
    pub handle: TextureHandle,
    pub width: f32,
    pub height: f32,
}

impl TextureInfo {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

pub const UI_FONT_KEY: &str = "assets/Alegreya-Regular.ttf";

pub trait AssetSource {
    /// Look up a texture by logical path
    fn texture(&mut self, key: &str) -> Option<TextureInfo>;

    /// Texture drawn in place of anything unresolved
    fn default_texture(&self) -> TextureInfo;

    fn font(&mut self, key: &str) -> Option<FontHandle>;

    /// Load or reload everything under the given keys
    fn preload(&mut self, keys: &[&str]);

    /// Size of rendered text
    fn measure_text(&self, _font: FontHandle, text: &str, size: f32) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * size * 0.5, size)
    }
}

/// Texture resolved for drawing, remembering whether it is the fallback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTexture {
    pub info: TextureInfo,
    pub is_fallback: bool,
}

/// Texture for an entity kind, falling back to the default texture
pub fn texture_for_kind(assets: &mut dyn AssetSource, kind: EntityKind) -> ResolvedTexture {
    let found = match kind.info().texture_key {
        Some(key) => assets.texture(key),
        None => {
            tracing::warn!("No texture for entity kind {:?}", kind);
            None
        }
    };
    match found {
        Some(info) => ResolvedTexture {
            info,
            is_fallback: false,
        },
        None => ResolvedTexture {
            info: assets.default_texture(),
            is_fallback: true,
        },
    }
}

/// Every texture key the kind table references
pub fn kind_texture_keys() -> Vec<&'static str> {
    EntityKind::ALL
        .iter()
        .filter_map(|k| k.info().texture_key)
        .collect()
}

/// In-memory asset registry keyed by logical path.
///
/// Stands in for a real loader: textures are registered with their sizes
/// and handed out by key. Misses are reported once per key.
#[derive(Debug)]
pub struct MemoryAssets {
    textures: AHashMap<String, TextureInfo>,
    fonts: AHashMap<String, FontHandle>,
    default_texture: TextureInfo,
    missing: AHashSet<String>,
    next_handle: u32,
    preload_count: u32,
}

impl Default for MemoryAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self {
            textures: AHashMap::new(),
            fonts: AHashMap::new(),
            default_texture: TextureInfo {
                handle: TextureHandle(0),
                width: 16.0,
                height: 16.0,
            },
            missing: AHashSet::new(),
            next_handle: 1,
            preload_count: 0,
        }
    }

    /// Registry with every kind texture at the given pixel size
    pub fn with_kind_textures(width: f32, height: f32) -> Self {
        let mut assets = Self::new();
        for key in kind_texture_keys() {
            assets.register_texture(key, width, height);
        }
        assets.register_font(UI_FONT_KEY);
        assets
    }

    pub fn register_texture(&mut self, key: &str, width: f32, height: f32) -> TextureInfo {
        let info = TextureInfo {
            handle: TextureHandle(self.next_handle),
            width,
            height,
        };
        self.next_handle += 1;
        self.textures.insert(key.to_string(), info);
        self.missing.remove(key);
        info
    }

    pub fn register_font(&mut self, key: &str) -> FontHandle {
        let handle = FontHandle(self.next_handle);
        self.next_handle += 1;
        self.fonts.insert(key.to_string(), handle);
        handle
    }

    /// Number of `preload` calls received
    pub fn preload_count(&self) -> u32 {
        self.preload_count
    }

    fn note_missing(&mut self, key: &str) {
        if self.missing.insert(key.to_string()) {
            tracing::warn!("Asset not found: {}", key);
        }
    }
}

impl AssetSource for MemoryAssets {
    fn texture(&mut self, key: &str) -> Option<TextureInfo> {
        let found = self.textures.get(key).copied();
        if found.is_none() {
            self.note_missing(key);
        }
        found
    }

    fn default_texture(&self) -> TextureInfo {
        self.default_texture
    }

    fn font(&mut self, key: &str) -> Option<FontHandle> {
        let found = self.fonts.get(key).copied();
        if found.is_none() {
            self.note_missing(key);
        }
        found
    }

    fn preload(&mut self, keys: &[&str]) {
        self.preload_count += 1;
        let missing = keys.iter().filter(|k| !self.textures.contains_key(**k)).count();
        tracing::debug!("Preloaded {} asset keys ({} missing)", keys.len(), missing);
    }
}
