//! Texture baking and UV assignment
//!
//! Baking happens in two steps. First the palette and material table are
//! pre-composited into three 16x16 reference sheets, one pixel per palette
//! slot. Then every packed face replicates its texels into the atlas as
//! `texel_size` blocks, widened by `padding` along tile-boundary edges so
//! neighboring tiles cannot bleed across seams, and finally receives UVs
//! from its padding-inset pixel rect.

use crate::atlas::{Atlas, Channel};
use crate::config::ExportConfig;
use crate::face::Face;
use crate::palette::{MaterialKind, MaterialMap, Palette};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use tracing::debug;

/// Scale a 0.0-1.0 scalar into a byte
#[inline]
fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// 16x16 per-slot color sheets, palette pre-composited with materials
///
/// Slot `s` lives at pixel `(s % 16, s / 16)`. The channel defaults are
/// asymmetric: a slot without a metal material is fully transparent in the
/// metal sheet (alpha 0), while a slot without an emissive material is
/// fully opaque in the emissive sheet (alpha 255).
pub struct ReferenceSheet {
    albedo: RgbaImage,
    metal: RgbaImage,
    emissive: RgbaImage,
}

impl ReferenceSheet {
    pub const SIDE: u32 = 16;

    /// Composite the palette against the material table
    pub fn build(palette: &Palette, materials: &MaterialMap) -> Self {
        let mut albedo = RgbaImage::from_pixel(Self::SIDE, Self::SIDE, Rgba([0, 0, 0, 255]));
        let mut metal = RgbaImage::from_pixel(Self::SIDE, Self::SIDE, Rgba([0, 0, 0, 0]));
        let mut emissive = RgbaImage::from_pixel(Self::SIDE, Self::SIDE, Rgba([0, 0, 0, 255]));

        for y in 0..Self::SIDE {
            for x in 0..Self::SIDE {
                let slot = (y * Self::SIDE + x) as u8;
                let color = palette.get(slot);
                albedo.put_pixel(x, y, Rgba([color.r, color.g, color.b, 255]));

                if let Some(material) = materials.get(slot) {
                    match material.kind {
                        MaterialKind::Metal => {
                            let grey = to_byte(material.weight);
                            let alpha = 255 - to_byte(material.roughness());
                            metal.put_pixel(x, y, Rgba([grey, grey, grey, alpha]));
                        }
                        MaterialKind::Emit => {
                            let alpha = to_byte(material.weight);
                            emissive.put_pixel(x, y, Rgba([color.r, color.g, color.b, alpha]));
                        }
                        MaterialKind::Diffuse | MaterialKind::Glass => {}
                    }
                }
            }
        }

        Self {
            albedo,
            metal,
            emissive,
        }
    }

    /// Channel colors for a palette slot
    #[inline]
    pub fn lookup(&self, slot: u8) -> (Rgba<u8>, Rgba<u8>, Rgba<u8>) {
        let x = (slot % 16) as u32;
        let y = (slot / 16) as u32;
        (
            *self.albedo.get_pixel(x, y),
            *self.metal.get_pixel(x, y),
            *self.emissive.get_pixel(x, y),
        )
    }
}

/// Rasterize every packed face into a fresh atlas and assign UVs
///
/// Faces must already carry their pixel rects from packing. The reference
/// sheets are built once per call.
pub fn bake_faces(
    faces: &mut [&mut Face],
    canvas: (u32, u32),
    palette: &Palette,
    materials: &MaterialMap,
    config: &ExportConfig,
) -> Atlas {
    let (canvas_w, canvas_h) = canvas;
    let sheet = ReferenceSheet::build(palette, materials);
    let mut atlas = Atlas::new(canvas_w, canvas_h);

    let texel = config.texel_size;
    let padding = config.padding;

    for face in faces.iter_mut() {
        let tex_w = face.tex.w as u32;
        let tex_h = face.tex.h as u32;

        for ty in 0..tex_h {
            for tx in 0..tex_w {
                let slot = face.tex.slot(tx as usize, ty as usize);
                let (albedo, metal, emissive) = sheet.lookup(slot);

                // Interior texels are texel_size wide; texels on a tile
                // boundary extend into the padding ring so sampling at the
                // seam stays inside the tile's own colors
                let x = texel * tx + if tx == 0 { 0 } else { padding };
                let y = texel * ty + if ty == 0 { 0 } else { padding };
                let w = texel
                    + if tx == 0 || tx == tex_w - 1 { padding } else { 0 }
                    + if tex_w == 1 { padding } else { 0 };
                let h = texel
                    + if ty == 0 || ty == tex_h - 1 { padding } else { 0 }
                    + if tex_h == 1 { padding } else { 0 };

                let bx = face.rect.x + x;
                let by = face.rect.y + y;
                atlas.put_block(Channel::Albedo, bx, by, w, h, albedo);
                atlas.put_block(Channel::Metal, bx, by, w, h, metal);
                atlas.put_block(Channel::Emissive, bx, by, w, h, emissive);
            }
        }

        assign_uvs(face, canvas_w, canvas_h, padding);
    }

    debug!(
        width = canvas_w,
        height = canvas_h,
        faces = faces.len(),
        "atlas baked"
    );

    atlas
}

/// Map v1..v4 onto the corners of the face's rect inset by the padding
///
/// The inset keeps every UV strictly inside the tile, one padding pixel
/// away from its neighbors.
fn assign_uvs(face: &mut Face, canvas_w: u32, canvas_h: u32, padding: u32) {
    let w = canvas_w as f32;
    let h = canvas_h as f32;
    let left = (face.rect.x + padding) as f32 / w;
    let right = (face.rect.x + face.rect.w - padding) as f32 / w;
    let top = (face.rect.y + padding) as f32 / h;
    let bottom = (face.rect.y + face.rect.h - padding) as f32 / h;

    face.v4.uv = Vec2::new(left, top);
    face.v3.uv = Vec2::new(right, top);
    face.v2.uv = Vec2::new(right, bottom);
    face.v1.uv = Vec2::new(left, bottom);
}
