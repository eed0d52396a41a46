use serde::Deserialize;

/// Opaque material handle. Two materials are the same only if their ids match,
/// regardless of what parameters they carry.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MaterialId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

/// The parts of a material the builders care about.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub main_texture: Option<TextureSize>,
}

impl Material {
    #[inline]
    pub const fn new(id: MaterialId) -> Self {
        Self {
            id,
            main_texture: None,
        }
    }

    #[inline]
    pub const fn with_texture(id: MaterialId, width: u32, height: u32) -> Self {
        Self {
            id,
            main_texture: Some(TextureSize { width, height }),
        }
    }

    /// `height / width` of the main texture, 1 without one (or with a zero-width texture).
    pub fn aspect_ratio(&self) -> f32 {
        match self.main_texture {
            Some(t) if t.width > 0 => t.height as f32 / t.width as f32,
            _ => 1.0,
        }
    }
}
