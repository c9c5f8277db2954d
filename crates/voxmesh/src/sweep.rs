//! Visible-face extraction with greedy quad merging
//!
//! Each of the six sweep directions scans the grid slice by slice along its
//! depth axis. Within a slice, visible voxel faces are first merged into
//! 1-high runs along the row axis, then rows are merged downward into
//! taller quads where their edges line up. Merged quads never overlap and
//! jointly cover every visible voxel face of the slice exactly once.
//!
//! All accumulation is local to a single call, so sweeps can run repeatedly
//! or in isolation.

use crate::direction::{SliceFrame, SweepDir};
use crate::face::{Face, TextureMap};
use crate::grid::VoxelGrid;
use tracing::debug;

/// Slice-local rectangle accumulating palette slots in scan order
#[derive(Debug, Clone)]
struct Quad {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    data: Vec<u8>,
}

/// Extract merged faces for every direction
pub fn sweep_all(grid: &VoxelGrid, center: bool) -> Vec<Face> {
    let mut faces = Vec::new();
    for dir in SweepDir::ALL {
        faces.extend(sweep_direction(grid, dir, center));
    }
    faces
}

/// Extract merged faces for one sweep direction
pub fn sweep_direction(grid: &VoxelGrid, dir: SweepDir, center: bool) -> Vec<Face> {
    let frame = SliceFrame::new(dir, grid.width(), grid.height(), grid.depth());
    let step = dir.depth_step();

    let mut faces = Vec::new();
    for d in 0..frame.depth_len {
        let mut slice_quads: Vec<Quad> = Vec::new();

        for h in 0..frame.height_len {
            let row_quads = scan_row(grid, &frame, step, d, h);
            merge_row(&mut slice_quads, row_quads);
        }

        project_slice(&mut faces, slice_quads, &frame, dir, d, grid, center);
    }

    debug!(
        direction = ?dir,
        faces = faces.len(),
        "sweep complete"
    );

    faces
}

/// Collect the visible cells of one row into 1-high runs
fn scan_row(grid: &VoxelGrid, frame: &SliceFrame, step: isize, d: usize, h: usize) -> Vec<Quad> {
    let mut row_quads: Vec<Quad> = Vec::new();

    for w in 0..frame.width_len {
        let (x, y, z) = frame.grid_position(w, h, d);
        let value = grid.get(x, y, z);
        if value == 0 {
            continue;
        }

        // The face is occluded when the next cell along the depth axis is
        // solid; out of range counts as empty
        let nd = d as isize + step;
        if nd >= 0 && (nd as usize) < frame.depth_len {
            let (nx, ny, nz) = frame.grid_position(w, h, nd as usize);
            if grid.get(nx, ny, nz) != 0 {
                continue;
            }
        }

        match row_quads.last_mut() {
            Some(run) if run.x + run.w == w => {
                run.w += 1;
                run.data.push(value);
            }
            _ => row_quads.push(Quad {
                x: w,
                y: h,
                w: 1,
                h: 1,
                data: vec![value],
            }),
        }
    }

    row_quads
}

/// Merge a finished row into the quads accumulated for the slice
///
/// A row run merges into a slice quad only when exactly one quad's bottom
/// edge meets the run at the same left edge. Zero or several touching quads
/// leave the run unmerged; that ambiguous-touch policy is deterministic but
/// not optimal, and changing it would change output geometry.
fn merge_row(slice_quads: &mut Vec<Quad>, mut row_quads: Vec<Quad>) {
    let mut i = 0;
    while i < row_quads.len() {
        let candidates: Vec<usize> = slice_quads
            .iter()
            .enumerate()
            .filter(|(_, s)| s.y + s.h == row_quads[i].y && s.x == row_quads[i].x)
            .map(|(j, _)| j)
            .collect();

        if candidates.len() != 1 {
            slice_quads.push(row_quads[i].clone());
            i += 1;
            continue;
        }

        let j = candidates[0];
        let candidate_w = slice_quads[j].w;
        let run = &mut row_quads[i];

        if candidate_w < run.w {
            // Absorb the overlapping width and requeue the remainder of the
            // run for another pass against the slice
            slice_quads[j].h += 1;
            slice_quads[j].data.extend(run.data.drain(..candidate_w));
            run.x += candidate_w;
            run.w -= candidate_w;
        } else if candidate_w == run.w {
            slice_quads[j].h += 1;
            slice_quads[j].data.append(&mut run.data);
            i += 1;
        } else {
            slice_quads.push(row_quads[i].clone());
            i += 1;
        }
    }
}

/// Project a completed slice's quads into 3-D faces
///
/// Positive directions sit on the far side of their voxels, so their depth
/// coordinate is offset by one cell. Recentering shifts X by half the grid
/// width and Z by half the grid depth; Y is never recentered.
fn project_slice(
    faces: &mut Vec<Face>,
    slice_quads: Vec<Quad>,
    frame: &SliceFrame,
    dir: SweepDir,
    d: usize,
    grid: &VoxelGrid,
    center: bool,
) {
    let depth = (d + usize::from(dir.is_positive())) as f32;
    let offset_x = if center { grid.width() as f32 * 0.5 } else { 0.0 };
    let offset_z = if center { grid.depth() as f32 * 0.5 } else { 0.0 };

    for quad in slice_quads {
        let corner = |w: f32, h: f32| {
            let mut p = frame.world_position(w, h, depth);
            p.x -= offset_x;
            p.z -= offset_z;
            p
        };

        let (x0, y0) = (quad.x as f32, quad.y as f32);
        let (x1, y1) = ((quad.x + quad.w) as f32, (quad.y + quad.h) as f32);

        let v4 = corner(x0, y0);
        let v3 = corner(x1, y0);
        let v2 = corner(x1, y1);
        let v1 = corner(x0, y1);

        faces.push(Face::new(
            v1,
            v2,
            v3,
            v4,
            dir,
            TextureMap::new(quad.w, quad.h, quad.data),
        ));
    }
}
