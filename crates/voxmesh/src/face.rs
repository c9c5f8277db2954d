//! Mesh face data
//!
//! A face is one merged quad produced by the sweep. Its corners follow the
//! slice layout used during merging:
//!
//! ```text
//!    v1 +-------+ v2
//!       |       |
//!    v4 +-------+ v3
//! ```
//!
//! Texel data runs left-to-right, top-to-bottom starting from the v4→v3
//! edge.

use crate::direction::SweepDir;
use glam::{Vec2, Vec3};

/// One corner of a face: world position plus baked UV
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            uv: Vec2::ZERO,
        }
    }
}

/// Per-texel palette slots for one face, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl TextureMap {
    pub fn new(w: usize, h: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), w * h);
        Self { w, h, data }
    }

    /// Palette slot at a texel position
    #[inline]
    pub fn slot(&self, x: usize, y: usize) -> u8 {
        self.data[x + y * self.w]
    }

    /// Atlas footprint of this map once texels are scaled up and padded
    pub fn padded_size(&self, texel_size: u32, padding: u32) -> (u32, u32) {
        (
            self.w as u32 * texel_size + 2 * padding,
            self.h as u32 * texel_size + 2 * padding,
        )
    }
}

/// Integer pixel rectangle inside an atlas canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Whether two rects share any pixel
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// A merged quad with its texel block and atlas placement
///
/// `rect` starts zeroed and is written exactly once by the packer; UVs
/// start zeroed and are written by the baker.
#[derive(Debug, Clone)]
pub struct Face {
    pub v1: Vertex,
    pub v2: Vertex,
    pub v3: Vertex,
    pub v4: Vertex,
    pub direction: SweepDir,
    pub tex: TextureMap,
    pub rect: PixelRect,
}

impl Face {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3, direction: SweepDir, tex: TextureMap) -> Self {
        Self {
            v1: Vertex::new(v1),
            v2: Vertex::new(v2),
            v3: Vertex::new(v3),
            v4: Vertex::new(v4),
            direction,
            tex,
            rect: PixelRect::default(),
        }
    }

    /// Outward normal vector
    pub fn normal(&self) -> Vec3 {
        self.direction.normal()
    }

    /// Corners in v1..v4 order
    pub fn vertices(&self) -> [&Vertex; 4] {
        [&self.v1, &self.v2, &self.v3, &self.v4]
    }

    /// Voxel-face area covered by this quad
    pub fn covered_area(&self) -> usize {
        self.tex.w * self.tex.h
    }
}
