//! Voxel-art to textured quad mesh conversion for Crossvox
//!
//! This crate turns dense voxel grids (typically decoded from MagicaVoxel
//! `.vox` files) into compact textured quad meshes:
//!
//! - **Face sweep**: scans the grid along the 6 principal directions and
//!   greedily merges adjacent visible voxel faces into larger quads
//! - **Atlas packing**: places every quad's texel block into a growable
//!   power-of-two canvas without overlap
//! - **Texture baking**: rasterizes palette and material data into albedo,
//!   metal and emissive bitmaps and assigns normalized UVs
//!
//! # Example
//!
//! ```
//! use voxmesh::{optimize, ExportConfig, MaterialMap, Palette, VoxelGrid, VoxelSet};
//!
//! // A single solid voxel
//! let grid = VoxelGrid::new(1, 1, 1, vec![1]).unwrap();
//! let set = VoxelSet {
//!     models: vec![grid],
//!     palette: Palette::greyscale_ramp(),
//!     materials: MaterialMap::default(),
//! };
//!
//! let result = optimize(&set, &ExportConfig::default()).unwrap();
//! assert_eq!(result.models[0].len(), 6);
//! assert_eq!(result.atlases.len(), 1);
//! ```

pub mod atlas;
pub mod bake;
pub mod config;
pub mod direction;
pub mod error;
pub mod face;
pub mod grid;
pub mod io;
pub mod optimize;
pub mod pack;
pub mod palette;
pub mod sweep;

pub use atlas::Atlas;
pub use config::ExportConfig;
pub use direction::{Axis, SliceFrame, SweepDir};
pub use error::ExportError;
pub use face::{Face, PixelRect, TextureMap, Vertex};
pub use grid::VoxelGrid;
pub use optimize::{optimize, optimize_one, ModelSet, VoxelSet};
pub use palette::{Material, MaterialKind, MaterialMap, Palette, Rgba8};
pub use sweep::{sweep_all, sweep_direction};
