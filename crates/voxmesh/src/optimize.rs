//! Export orchestration across sub-models
//!
//! A voxel file can carry several sub-models. By default they share one
//! atlas: every sub-model's faces are pooled into a single pack+bake pass
//! while the per-model face lists stay separate for mesh output. The
//! per-model mode packs and bakes each sub-model independently instead.

use crate::atlas::Atlas;
use crate::bake::bake_faces;
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::face::Face;
use crate::grid::VoxelGrid;
use crate::pack::pack_faces;
use crate::palette::{MaterialMap, Palette};
use crate::sweep::sweep_all;
use tracing::info;

/// Decoded input: sub-model grids plus their shared palette and materials
#[derive(Debug, Clone)]
pub struct VoxelSet {
    pub models: Vec<VoxelGrid>,
    pub palette: Palette,
    pub materials: MaterialMap,
}

/// Optimized output: one face list per sub-model and the baked atlases
///
/// In shared-atlas mode `atlases` holds exactly one entry; in per-model
/// mode it holds one atlas per sub-model, index-aligned with `models`.
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub models: Vec<Vec<Face>>,
    pub atlases: Vec<Atlas>,
}

/// Sweep, pack and bake a single grid against its own atlas
pub fn optimize_one(
    grid: &VoxelGrid,
    palette: &Palette,
    materials: &MaterialMap,
    config: &ExportConfig,
) -> Result<(Vec<Face>, Atlas), ExportError> {
    let mut faces = sweep_all(grid, config.center);
    let mut refs: Vec<&mut Face> = faces.iter_mut().collect();
    let canvas = pack_faces(&mut refs, config)?;
    let atlas = bake_faces(&mut refs, canvas, palette, materials, config);
    Ok((faces, atlas))
}

/// Convert every sub-model of a set
pub fn optimize(set: &VoxelSet, config: &ExportConfig) -> Result<ModelSet, ExportError> {
    if config.shared_atlas {
        let mut models: Vec<Vec<Face>> = set
            .models
            .iter()
            .map(|grid| sweep_all(grid, config.center))
            .collect();

        let mut refs: Vec<&mut Face> = models.iter_mut().flat_map(|m| m.iter_mut()).collect();
        let canvas = pack_faces(&mut refs, config)?;
        let atlas = bake_faces(&mut refs, canvas, &set.palette, &set.materials, config);

        info!(
            models = models.len(),
            faces = models.iter().map(Vec::len).sum::<usize>(),
            "shared atlas export complete"
        );

        Ok(ModelSet {
            models,
            atlases: vec![atlas],
        })
    } else {
        let mut models = Vec::with_capacity(set.models.len());
        let mut atlases = Vec::with_capacity(set.models.len());
        for grid in &set.models {
            let (faces, atlas) = optimize_one(grid, &set.palette, &set.materials, config)?;
            models.push(faces);
            atlases.push(atlas);
        }

        info!(models = models.len(), "per-model atlas export complete");

        Ok(ModelSet { models, atlases })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(models: Vec<VoxelGrid>) -> VoxelSet {
        VoxelSet {
            models,
            palette: Palette::greyscale_ramp(),
            materials: MaterialMap::default(),
        }
    }

    #[test]
    fn test_shared_atlas_pools_models() {
        let set = set_with(vec![
            VoxelGrid::new(1, 1, 1, vec![1]).unwrap(),
            VoxelGrid::new(1, 1, 1, vec![2]).unwrap(),
        ]);
        let result = optimize(&set, &ExportConfig::default()).unwrap();

        assert_eq!(result.models.len(), 2);
        assert_eq!(result.atlases.len(), 1, "shared mode emits one atlas");
        assert_eq!(result.models[0].len(), 6);
        assert_eq!(result.models[1].len(), 6);

        // Pooled faces share the canvas without overlapping
        let all: Vec<&Face> = result.models.iter().flatten().collect();
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert!(!a.rect.overlaps(&b.rect));
            }
        }
    }

    #[test]
    fn test_per_model_atlases() {
        let set = set_with(vec![
            VoxelGrid::new(1, 1, 1, vec![1]).unwrap(),
            VoxelGrid::new(2, 1, 1, vec![1, 1]).unwrap(),
        ]);
        let config = ExportConfig::default().with_shared_atlas(false);
        let result = optimize(&set, &config).unwrap();

        assert_eq!(result.models.len(), 2);
        assert_eq!(result.atlases.len(), 2, "one atlas per sub-model");
    }

    #[test]
    fn test_all_empty_grid_is_valid() {
        let set = set_with(vec![VoxelGrid::empty(4, 4, 4).unwrap()]);
        let result = optimize(&set, &ExportConfig::default()).unwrap();

        assert!(result.models[0].is_empty());
        assert_eq!(result.atlases.len(), 1);
        assert_eq!(result.atlases[0].width(), 1, "minimal canvas for no faces");
    }

    #[test]
    fn test_no_models_still_emits_shared_atlas() {
        let set = set_with(Vec::new());
        let result = optimize(&set, &ExportConfig::default()).unwrap();
        assert!(result.models.is_empty());
        assert_eq!(result.atlases.len(), 1);
    }
}
