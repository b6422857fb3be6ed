//! Paints a payload plus anchor fiducials and guides into an output frame.

use super::anchors::{draw_guide_bar, draw_primary_anchor, draw_secondary_anchor};
use crate::bitstream::BitReader;
use crate::codec::Codec;
use crate::config::Config;
use crate::lattice::Lattice;
use image::{Rgb, RgbImage};

/// Lays out anchors, guides, and a payload's data tiles into a frame image.
#[derive(Debug, Clone)]
pub struct FrameWriter {
    image_size: u32,
    anchor_size: u32,
    bits_per_cell: u32,
    lattice: Lattice,
}

impl FrameWriter {
    /// Build a writer for `config`'s geometry.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        FrameWriter {
            image_size: config.image_size,
            anchor_size: (config.corner_padding as u32) * config.cell_spacing,
            bits_per_cell: config.bits_per_cell(),
            lattice: Lattice::new(config),
        }
    }

    /// Total payload capacity, in bytes, this writer's lattice can carry.
    #[must_use]
    pub fn capacity_bytes(&self) -> usize {
        self.lattice.total_cells() * self.bits_per_cell as usize / 8
    }

    /// Paint `payload` into a new frame image, zero-padding any unused
    /// trailing cells if `payload` is smaller than [`Self::capacity_bytes`].
    #[must_use]
    pub fn write(&self, codec: &Codec, payload: &[u8]) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.image_size, self.image_size, Rgb([255, 255, 255]));
        self.paste_anchors(&mut canvas);

        let mut reader = BitReader::new(payload);
        for logical in 0..self.lattice.total_cells() {
            let (value, obtained) = reader.read(self.bits_per_cell);
            let padded = value << (self.bits_per_cell - obtained);
            let tile = codec.encode_tile(padded);
            let pos = self.lattice.position_for_logical(logical);
            image::imageops::overlay(&mut canvas, &tile, i64::from(pos.x), i64::from(pos.y));
        }
        canvas
    }

    fn paste_anchors(&self, canvas: &mut RgbImage) {
        let primary = draw_primary_anchor(self.anchor_size);
        let secondary = draw_secondary_anchor(self.anchor_size);
        let far = i64::from(self.image_size - self.anchor_size);

        image::imageops::overlay(canvas, &primary, 0, 0); // top-left
        image::imageops::overlay(canvas, &primary, far, 0); // top-right
        image::imageops::overlay(canvas, &primary, 0, far); // bottom-left
        image::imageops::overlay(canvas, &secondary, far, far); // bottom-right

        let mid = i64::from(self.image_size) / 2;
        let h_guide = draw_guide_bar(self.image_size - 2 * self.anchor_size, 2);
        let v_guide = draw_guide_bar(2, self.image_size - 2 * self.anchor_size);
        image::imageops::overlay(canvas, &h_guide, i64::from(self.anchor_size), mid);
        image::imageops::overlay(canvas, &v_guide, mid, i64::from(self.anchor_size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_produces_image_size_square_frame() {
        let config = Config::baseline();
        let codec = Codec::new(&config);
        let writer = FrameWriter::new(&config);
        let frame = writer.write(&codec, b"hello");
        assert_eq!(frame.dimensions(), (config.image_size, config.image_size));
    }

    #[test]
    fn corners_contain_anchor_fiducials_not_background() {
        let config = Config::baseline();
        let codec = Codec::new(&config);
        let writer = FrameWriter::new(&config);
        let frame = writer.write(&codec, b"hello");
        assert_eq!(*frame.get_pixel(0, 0), Rgb([255, 255, 255]));
        let anchor_size = writer.anchor_size;
        assert_eq!(
            *frame.get_pixel(anchor_size / 2, anchor_size / 2),
            Rgb([0, 0, 0])
        );
    }
}
