use glam::Vec4;

use crate::assets::TextureHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialType {
    /// Ignores scene lighting; what a picture frame shows when overridden.
    Basic,
    #[default]
    Standard,
}

/// Surface appearance of a mesh.
///
/// Meshes reference materials by [`crate::assets::MaterialHandle`]; swapping a
/// frame's picture means pointing its mesh at a different handle, never
/// editing the material the scene was authored with.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub kind: MaterialType,
    pub color: Vec4,
    pub map: Option<TextureHandle>,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub side: Side,
}

impl Material {
    #[must_use]
    pub fn standard(color: Vec4) -> Self {
        Self {
            name: None,
            kind: MaterialType::Standard,
            color,
            map: None,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            side: Side::Front,
        }
    }

    /// Unlit material displaying `map` at full brightness.
    #[must_use]
    pub fn with_map(name: &str, map: TextureHandle) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: MaterialType::Basic,
            color: Vec4::ONE,
            map: Some(map),
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            side: Side::Double,
        }
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Vec4::ONE)
    }
}
