//! Rectangle packing for atlas layout
//!
//! Faces are sorted by descending footprint area and inserted into a binary
//! space partition over the canvas. The canvas starts at the smallest
//! power-of-two size whose area covers the total demand and doubles one
//! axis at a time whenever a full pass fails to fit; packing is batch, not
//! incremental, so every failed pass restarts from an empty tree.

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::face::{Face, PixelRect};
use tracing::{debug, info};

/// One partition of the canvas
///
/// A leaf either holds exactly one rect or is free; inserting a smaller
/// rect splits the leaf along the axis with more remaining slack.
struct Node {
    bounds: PixelRect,
    children: Option<Box<[Node; 2]>>,
    occupied: bool,
}

impl Node {
    fn new(bounds: PixelRect) -> Self {
        Self {
            bounds,
            children: None,
            occupied: false,
        }
    }

    /// Place a `w` x `h` rect somewhere under this node, returning its
    /// final bounds
    fn insert(&mut self, w: u32, h: u32) -> Option<PixelRect> {
        if self.bounds.w < w || self.bounds.h < h {
            return None;
        }

        if let Some(children) = self.children.as_mut() {
            if let Some(rect) = children[0].insert(w, h) {
                return Some(rect);
            }
            return children[1].insert(w, h);
        }

        if self.occupied {
            return None;
        }

        if self.bounds.w == w && self.bounds.h == h {
            self.occupied = true;
            return Some(self.bounds);
        }

        let slack_w = self.bounds.w - w;
        let slack_h = self.bounds.h - h;

        let (first, second) = if slack_w > slack_h {
            (
                PixelRect::new(self.bounds.x, self.bounds.y, w, self.bounds.h),
                PixelRect::new(
                    self.bounds.x + w,
                    self.bounds.y,
                    self.bounds.w - w,
                    self.bounds.h,
                ),
            )
        } else {
            (
                PixelRect::new(self.bounds.x, self.bounds.y, self.bounds.w, h),
                PixelRect::new(
                    self.bounds.x,
                    self.bounds.y + h,
                    self.bounds.w,
                    self.bounds.h - h,
                ),
            )
        };

        let children = self
            .children
            .insert(Box::new([Node::new(first), Node::new(second)]));
        children[0].insert(w, h)
    }
}

/// Smallest power-of-two canvas whose area covers `total`, grown by
/// doubling width then height alternately from 1x1
fn seed_canvas(total: u64) -> (u32, u32) {
    let mut w: u64 = 1;
    let mut h: u64 = 1;
    let mut grow_width = true;
    while w * h < total {
        if grow_width {
            w *= 2;
        } else {
            h *= 2;
        }
        grow_width = !grow_width;
    }
    (w as u32, h as u32)
}

/// Assign every face a non-overlapping pixel rect inside one atlas canvas
///
/// Returns the final canvas size. Each face's rect is sized up-front from
/// its texel block and positioned exactly once, after the first fully
/// successful pass.
pub fn pack_faces(
    faces: &mut [&mut Face],
    config: &ExportConfig,
) -> Result<(u32, u32), ExportError> {
    for face in faces.iter_mut() {
        let (w, h) = face.tex.padded_size(config.texel_size, config.padding);
        face.rect = PixelRect::new(0, 0, w, h);
    }

    faces.sort_by(|a, b| b.rect.area().cmp(&a.rect.area()));

    let total: u64 = faces.iter().map(|f| f.rect.area()).sum();
    let (mut canvas_w, mut canvas_h) = seed_canvas(total);
    if canvas_w > config.max_canvas || canvas_h > config.max_canvas {
        return Err(ExportError::AtlasLimit {
            width: canvas_w,
            height: canvas_h,
            limit: config.max_canvas,
        });
    }

    let mut grow_width = canvas_w <= canvas_h;
    loop {
        let mut root = Node::new(PixelRect::new(0, 0, canvas_w, canvas_h));
        let mut placements = Vec::with_capacity(faces.len());

        let all_fit = faces.iter().all(|face| {
            if let Some(rect) = root.insert(face.rect.w, face.rect.h) {
                placements.push(rect);
                true
            } else {
                false
            }
        });

        if all_fit {
            for (face, rect) in faces.iter_mut().zip(placements) {
                face.rect = rect;
            }
            info!(
                width = canvas_w,
                height = canvas_h,
                faces = faces.len(),
                "atlas packed"
            );
            return Ok((canvas_w, canvas_h));
        }

        // Each retry strictly grows the canvas area, alternating the axis
        // that was doubled last
        if grow_width {
            canvas_w *= 2;
        } else {
            canvas_h *= 2;
        }
        grow_width = !grow_width;

        if canvas_w > config.max_canvas || canvas_h > config.max_canvas {
            return Err(ExportError::AtlasLimit {
                width: canvas_w,
                height: canvas_h,
                limit: config.max_canvas,
            });
        }

        debug!(
            width = canvas_w,
            height = canvas_h,
            "pack pass failed, restarting with larger canvas"
        );
    }
}
