//! MagicaVoxel `.vox` decoding
//!
//! Files are parsed with `dot_vox` and converted into dense grids.
//! MagicaVoxel is Z-up while the mesh pipeline is Y-up: a model's Z extent
//! becomes grid height and its Y extent becomes grid depth, with the depth
//! axis mirrored so models face the viewer. Voxel bytes are kept as 1-based
//! palette slots; slot 0 stays reserved for empty space.

use crate::error::ExportError;
use crate::grid::VoxelGrid;
use crate::optimize::VoxelSet;
use crate::palette::{Material, MaterialKind, MaterialMap, Palette, Rgba8};
use dot_vox::DotVoxData;
use std::path::Path;
use tracing::debug;

/// Load a `.vox` file into a set of grids plus palette and materials
pub fn load_vox_from_file(path: impl AsRef<Path>) -> Result<VoxelSet, ExportError> {
    let bytes = std::fs::read(path)?;
    load_vox_from_bytes(&bytes)
}

/// Decode `.vox` data from memory
pub fn load_vox_from_bytes(bytes: &[u8]) -> Result<VoxelSet, ExportError> {
    let data = dot_vox::load_bytes(bytes).map_err(|e| ExportError::VoxParse(e.to_string()))?;
    convert_vox_data(&data)
}

/// Convert parsed `dot_vox` data into pipeline input
pub fn convert_vox_data(data: &DotVoxData) -> Result<VoxelSet, ExportError> {
    let mut models = Vec::with_capacity(data.models.len());

    for model in &data.models {
        let width = model.size.x as usize;
        let height = model.size.z as usize; // MagicaVoxel Z is up
        let depth = model.size.y as usize;
        if width == 0 || height == 0 || depth == 0 {
            continue;
        }

        let mut grid = VoxelGrid::empty(width, height, depth)?;
        for voxel in &model.voxels {
            let x = voxel.x as usize;
            let y = voxel.z as usize;
            let my = voxel.y as usize;
            if x < width && y < height && my < depth {
                // Mirror the depth axis while swapping Y-up for Z-up
                grid.set(x, y, depth - 1 - my, voxel.i);
            }
        }
        models.push(grid);
    }

    debug!(models = models.len(), "decoded vox data");

    Ok(VoxelSet {
        models,
        palette: convert_palette(&data.palette),
        materials: convert_materials(&data.materials),
    })
}

/// Shift the raw color table into 1-based slots; an absent table falls back
/// to the greyscale ramp
fn convert_palette(colors: &[dot_vox::Color]) -> Palette {
    if colors.is_empty() {
        return Palette::greyscale_ramp();
    }

    let mut slots = [Rgba8::TRANSPARENT; Palette::SIZE];
    for (i, color) in colors.iter().take(Palette::SIZE - 1).enumerate() {
        slots[i + 1] = Rgba8::new(color.r, color.g, color.b, color.a);
    }
    Palette::from_colors(slots)
}

/// Translate MATL dictionaries into the slot-keyed material table
fn convert_materials(materials: &[dot_vox::Material]) -> MaterialMap {
    let mut map = MaterialMap::new();

    for material in materials {
        if material.id > u8::MAX as u32 {
            continue;
        }

        let kind = match material.properties.get("_type").map(String::as_str) {
            Some("_metal") => MaterialKind::Metal,
            Some("_emit") => MaterialKind::Emit,
            Some("_glass") => MaterialKind::Glass,
            _ => MaterialKind::Diffuse,
        };

        let weight = material
            .properties
            .get("_weight")
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(1.0);

        let mut converted = Material::new(kind, weight);
        for (name, value) in &material.properties {
            if name == "_type" || name == "_weight" {
                continue;
            }
            if let Ok(parsed) = value.parse::<f32>() {
                converted.properties.insert(name.clone(), parsed);
            }
        }

        map.insert(material.id as u8, converted);
    }

    map
}
