//! Sweep directions and slice coordinate frames

use glam::Vec3;

/// One of the six axis-aligned sweep directions
///
/// The discriminant doubles as the normal index in exported meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDir {
    XPos = 0,
    XNeg = 1,
    YPos = 2,
    YNeg = 3,
    ZPos = 4,
    ZNeg = 5,
}

impl SweepDir {
    /// All six directions in sweep order
    pub const ALL: [SweepDir; 6] = [
        SweepDir::XPos,
        SweepDir::XNeg,
        SweepDir::YPos,
        SweepDir::YNeg,
        SweepDir::ZPos,
        SweepDir::ZNeg,
    ];

    /// Outward normals, indexed by `SweepDir as usize`
    pub const NORMALS: [Vec3; 6] = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
    ];

    /// Normal index for mesh emission
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this is the positive direction of its axis pair
    #[inline]
    pub fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }

    /// Step applied along the slice depth axis when probing the neighbor
    /// that would occlude a face
    #[inline]
    pub fn depth_step(self) -> isize {
        if self.is_positive() {
            1
        } else {
            -1
        }
    }

    /// Outward normal vector
    #[inline]
    pub fn normal(self) -> Vec3 {
        Self::NORMALS[self.index()]
    }
}

/// Grid axis name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Per-direction mapping from slice coordinates to grid axes
///
/// Each sweep direction sees the grid through a (width, height, depth)
/// frame: depth is the scan axis, width runs along rows, height across
/// rows. The mapping is resolved once per direction; slice code never
/// touches x/y/z directly.
#[derive(Debug, Clone, Copy)]
pub struct SliceFrame {
    pub width_axis: Axis,
    pub height_axis: Axis,
    pub depth_axis: Axis,
    pub width_len: usize,
    pub height_len: usize,
    pub depth_len: usize,
}

impl SliceFrame {
    /// Resolve the frame for a direction over a grid of the given extents
    pub fn new(dir: SweepDir, grid_w: usize, grid_h: usize, grid_d: usize) -> Self {
        match dir {
            SweepDir::XPos | SweepDir::XNeg => Self {
                width_axis: Axis::Y,
                height_axis: Axis::Z,
                depth_axis: Axis::X,
                width_len: grid_h,
                height_len: grid_d,
                depth_len: grid_w,
            },
            SweepDir::YPos | SweepDir::YNeg => Self {
                width_axis: Axis::Z,
                height_axis: Axis::X,
                depth_axis: Axis::Y,
                width_len: grid_d,
                height_len: grid_w,
                depth_len: grid_h,
            },
            SweepDir::ZPos | SweepDir::ZNeg => Self {
                width_axis: Axis::X,
                height_axis: Axis::Y,
                depth_axis: Axis::Z,
                width_len: grid_w,
                height_len: grid_h,
                depth_len: grid_d,
            },
        }
    }

    /// Map slice coordinates (w, h, d) back to grid coordinates (x, y, z)
    #[inline]
    pub fn grid_position(&self, w: usize, h: usize, d: usize) -> (usize, usize, usize) {
        let mut x = 0;
        let mut y = 0;
        let mut z = 0;
        for (axis, value) in [
            (self.width_axis, w),
            (self.height_axis, h),
            (self.depth_axis, d),
        ] {
            match axis {
                Axis::X => x = value,
                Axis::Y => y = value,
                Axis::Z => z = value,
            }
        }
        (x, y, z)
    }

    /// Same mapping for fractional positions, used when projecting quad
    /// corners to world space
    #[inline]
    pub fn world_position(&self, w: f32, h: f32, d: f32) -> Vec3 {
        let mut pos = Vec3::ZERO;
        for (axis, value) in [
            (self.width_axis, w),
            (self.height_axis, h),
            (self.depth_axis, d),
        ] {
            match axis {
                Axis::X => pos.x = value,
                Axis::Y => pos.y = value,
                Axis::Z => pos.z = value,
            }
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parity() {
        assert!(SweepDir::XPos.is_positive());
        assert!(!SweepDir::XNeg.is_positive());
        assert_eq!(SweepDir::YPos.depth_step(), 1);
        assert_eq!(SweepDir::ZNeg.depth_step(), -1);
    }

    #[test]
    fn test_normals_are_outward() {
        for dir in SweepDir::ALL {
            let n = dir.normal();
            assert_eq!(n.length(), 1.0);
            if dir.is_positive() {
                assert_eq!(n.x + n.y + n.z, 1.0);
            } else {
                assert_eq!(n.x + n.y + n.z, -1.0);
            }
        }
    }

    #[test]
    fn test_frame_axis_mapping() {
        // 4 wide, 5 tall, 6 deep
        let frame = SliceFrame::new(SweepDir::XPos, 4, 5, 6);
        assert_eq!(frame.depth_len, 4);
        assert_eq!(frame.width_len, 5);
        assert_eq!(frame.height_len, 6);
        assert_eq!(frame.grid_position(2, 3, 1), (1, 2, 3));

        let frame = SliceFrame::new(SweepDir::YNeg, 4, 5, 6);
        assert_eq!(frame.depth_len, 5);
        assert_eq!(frame.width_len, 6);
        assert_eq!(frame.height_len, 4);
        assert_eq!(frame.grid_position(2, 3, 1), (3, 1, 2));

        let frame = SliceFrame::new(SweepDir::ZPos, 4, 5, 6);
        assert_eq!(frame.depth_len, 6);
        assert_eq!(frame.width_len, 4);
        assert_eq!(frame.height_len, 5);
        assert_eq!(frame.grid_position(2, 3, 1), (2, 3, 1));
    }

    #[test]
    fn test_world_position_matches_grid_position() {
        for dir in SweepDir::ALL {
            let frame = SliceFrame::new(dir, 7, 8, 9);
            let (x, y, z) = frame.grid_position(3, 4, 5);
            let world = frame.world_position(3.0, 4.0, 5.0);
            assert_eq!(world, Vec3::new(x as f32, y as f32, z as f32));
        }
    }
}
