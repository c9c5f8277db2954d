//! Atlas raster buffers

use image::{Rgba, RgbaImage};

/// The three baked texture channels for one atlas canvas
///
/// All three images share the same dimensions. Rows are addressed bottom-up
/// by the baker: pixel row 0 of the packing coordinates lands on the last
/// raster row, so a top-down raster encoding matches bottom-origin V
/// coordinates in exported meshes.
#[derive(Debug, Clone)]
pub struct Atlas {
    albedo: RgbaImage,
    metal: RgbaImage,
    emissive: RgbaImage,
}

/// Channel selector for block writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Albedo,
    Metal,
    Emissive,
}

impl Atlas {
    /// Create an atlas with zeroed albedo, "not metal" (alpha 0) metal and
    /// "not emissive" (alpha 255) emissive channels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            albedo: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            metal: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            emissive: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.albedo.width()
    }

    pub fn height(&self) -> u32 {
        self.albedo.height()
    }

    /// Fill a block in one channel, flipping rows bottom-up
    pub fn put_block(&mut self, channel: Channel, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
        let image = match channel {
            Channel::Albedo => &mut self.albedo,
            Channel::Metal => &mut self.metal,
            Channel::Emissive => &mut self.emissive,
        };
        let height = image.height();
        for dy in 0..h {
            let row = height - 1 - (y + dy);
            for dx in 0..w {
                image.put_pixel(x + dx, row, color);
            }
        }
    }

    pub fn albedo(&self) -> &RgbaImage {
        &self.albedo
    }

    pub fn metal(&self) -> &RgbaImage {
        &self.metal
    }

    pub fn emissive(&self) -> &RgbaImage {
        &self.emissive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_defaults() {
        let atlas = Atlas::new(2, 2);
        assert_eq!(atlas.width(), 2);
        assert_eq!(atlas.height(), 2);
        assert_eq!(atlas.albedo().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(atlas.metal().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(atlas.emissive().get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_put_block_flips_rows() {
        let mut atlas = Atlas::new(4, 4);
        atlas.put_block(Channel::Albedo, 0, 0, 2, 1, Rgba([255, 0, 0, 255]));

        // Packing row 0 lands on the bottom raster row
        assert_eq!(atlas.albedo().get_pixel(0, 3), &Rgba([255, 0, 0, 255]));
        assert_eq!(atlas.albedo().get_pixel(1, 3), &Rgba([255, 0, 0, 255]));
        assert_eq!(atlas.albedo().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }
}
