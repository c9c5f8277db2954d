//! Palette and material tables
//!
//! A voxel value is a palette slot: slot 0 is reserved for empty space,
//! slots 1-255 carry RGBA colors. Materials are keyed by the same slots and
//! describe how a color contributes to the metal and emissive channels.

use std::collections::HashMap;

/// One palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// 256-slot color palette, slot 0 reserved for empty
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [Rgba8; Self::SIZE],
}

impl Palette {
    /// Number of palette slots
    pub const SIZE: usize = 256;

    /// Build a palette from explicit slot colors
    ///
    /// Slot 0 is forced transparent regardless of input.
    pub fn from_colors(mut colors: [Rgba8; Self::SIZE]) -> Self {
        colors[0] = Rgba8::TRANSPARENT;
        Self { colors }
    }

    /// Fallback palette used when a file carries no color table: slot 0
    /// transparent, slot i an opaque grey of intensity i
    pub fn greyscale_ramp() -> Self {
        let mut colors = [Rgba8::TRANSPARENT; Self::SIZE];
        for (i, color) in colors.iter_mut().enumerate().skip(1) {
            let v = i as u8;
            *color = Rgba8::new(v, v, v, 255);
        }
        Self { colors }
    }

    /// Color for a palette slot
    #[inline]
    pub fn get(&self, slot: u8) -> Rgba8 {
        self.colors[slot as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::greyscale_ramp()
    }
}

/// Shading class of a palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    #[default]
    Diffuse,
    Metal,
    Glass,
    Emit,
}

/// Material attached to a palette slot
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub kind: MaterialKind,
    /// Blend weight of the material effect, 0.0-1.0
    pub weight: f32,
    /// Named scalar properties (`_rough`, `_ior`, ...)
    pub properties: HashMap<String, f32>,
}

impl Material {
    pub fn new(kind: MaterialKind, weight: f32) -> Self {
        Self {
            kind,
            weight,
            properties: HashMap::new(),
        }
    }

    /// Named property value, or a default when the property is absent
    pub fn property(&self, name: &str, default: f32) -> f32 {
        self.properties.get(name).copied().unwrap_or(default)
    }

    /// Surface roughness; absent means perfectly smooth
    pub fn roughness(&self) -> f32 {
        self.property("_rough", 0.0)
    }
}

/// Palette slot → material table
///
/// Slots without an entry get default diffuse behavior everywhere.
#[derive(Debug, Clone, Default)]
pub struct MaterialMap {
    materials: HashMap<u8, Material>,
}

impl MaterialMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: u8, material: Material) {
        self.materials.insert(slot, material);
    }

    pub fn get(&self, slot: u8) -> Option<&Material> {
        self.materials.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greyscale_ramp() {
        let palette = Palette::greyscale_ramp();
        assert_eq!(palette.get(0), Rgba8::TRANSPARENT);
        assert_eq!(palette.get(1), Rgba8::new(1, 1, 1, 255));
        assert_eq!(palette.get(128), Rgba8::new(128, 128, 128, 255));
        assert_eq!(palette.get(255), Rgba8::new(255, 255, 255, 255));
    }

    #[test]
    fn test_slot_zero_forced_transparent() {
        let mut colors = [Rgba8::new(9, 9, 9, 255); Palette::SIZE];
        colors[0] = Rgba8::new(1, 2, 3, 4);
        let palette = Palette::from_colors(colors);
        assert_eq!(palette.get(0), Rgba8::TRANSPARENT);
        assert_eq!(palette.get(1), Rgba8::new(9, 9, 9, 255));
    }

    #[test]
    fn test_material_properties() {
        let mut material = Material::new(MaterialKind::Metal, 0.8);
        assert_eq!(material.roughness(), 0.0);

        material.properties.insert("_rough".to_string(), 0.25);
        assert_eq!(material.roughness(), 0.25);
        assert_eq!(material.property("_ior", 1.3), 1.3);
    }

    #[test]
    fn test_material_map_lookup() {
        let mut map = MaterialMap::new();
        assert!(map.is_empty());
        assert!(map.get(7).is_none());

        map.insert(7, Material::new(MaterialKind::Emit, 0.5));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(7).unwrap().kind, MaterialKind::Emit);
    }
}
