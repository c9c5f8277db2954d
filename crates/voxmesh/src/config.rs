//! Export configuration

use serde::{Deserialize, Serialize};

/// Settings for mesh optimization and texture baking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pixels per voxel edge in the baked atlas (default: 3)
    #[serde(default = "default_texel_size")]
    pub texel_size: u32,

    /// Seam-guard pixels around every packed tile (default: 1)
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Pack all sub-models into one shared atlas instead of one atlas per
    /// sub-model (default: true)
    #[serde(default = "default_shared_atlas")]
    pub shared_atlas: bool,

    /// Recenter geometry on the X and Z axes; Y is never recentered
    /// (default: false)
    #[serde(default)]
    pub center: bool,

    /// Upper bound for either atlas canvas axis. Packing aborts instead of
    /// growing past this (default: 16384)
    #[serde(default = "default_max_canvas")]
    pub max_canvas: u32,
}

fn default_texel_size() -> u32 {
    3
}

fn default_padding() -> u32 {
    1
}

fn default_shared_atlas() -> bool {
    true
}

fn default_max_canvas() -> u32 {
    16384
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            texel_size: default_texel_size(),
            padding: default_padding(),
            shared_atlas: default_shared_atlas(),
            center: false,
            max_canvas: default_max_canvas(),
        }
    }
}

impl ExportConfig {
    /// Set the texel size (builder pattern)
    pub fn with_texel_size(mut self, texel_size: u32) -> Self {
        self.texel_size = texel_size;
        self
    }

    /// Set the tile padding (builder pattern)
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Select shared or per-model atlas mode (builder pattern)
    pub fn with_shared_atlas(mut self, shared: bool) -> Self {
        self.shared_atlas = shared;
        self
    }

    /// Enable X/Z recentering (builder pattern)
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Set the canvas growth limit (builder pattern)
    pub fn with_max_canvas(mut self, max_canvas: u32) -> Self {
        self.max_canvas = max_canvas;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.texel_size, 3);
        assert_eq!(config.padding, 1);
        assert!(config.shared_atlas);
        assert!(!config.center);
        assert_eq!(config.max_canvas, 16384);
    }

    #[test]
    fn test_builder() {
        let config = ExportConfig::default()
            .with_texel_size(4)
            .with_padding(2)
            .with_shared_atlas(false)
            .with_center(true)
            .with_max_canvas(512);
        assert_eq!(config.texel_size, 4);
        assert_eq!(config.padding, 2);
        assert!(!config.shared_atlas);
        assert!(config.center);
        assert_eq!(config.max_canvas, 512);
    }
}
