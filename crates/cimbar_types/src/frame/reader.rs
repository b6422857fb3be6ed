//! Recovers symbol/color tiles and a payload byte stream from a rectified
//! frame image.

use crate::bitstream::BitBuffer;
use crate::codec::{Codec, DecodedCell};
use crate::config::Config;
use crate::error::{CimbarError, Result};
use crate::lattice::{CellDrift, Lattice};
use image::RgbImage;

/// Reads data tiles back out of a rectified frame image in raster order.
#[derive(Debug, Clone)]
pub struct FrameReader {
    bits_per_cell: u32,
    lattice: Lattice,
    image_size: u32,
}

/// One cell's decode result alongside its logical bit-stream position, for
/// callers (like the color-correction pass) that want per-cell detail.
#[derive(Debug, Clone, Copy)]
pub struct CellReadout {
    /// Logical bit-stream position this cell corresponds to.
    pub logical: usize,
    /// The decoder's result for this cell.
    pub cell: DecodedCell,
}

impl FrameReader {
    /// Build a reader for `config`'s geometry.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        FrameReader {
            bits_per_cell: config.bits_per_cell(),
            lattice: Lattice::new(config),
            image_size: config.image_size,
        }
    }

    /// Read every cell in flood-fill order, returning both the recovered
    /// payload bytes and the per-cell decode details (used by the anchor
    /// scanner's color-correction feedback and for diagnostics), in raster
    /// order for callers that key off `logical`/slot position.
    ///
    /// Each cell's drift search is seeded from whichever already-visited
    /// neighbor committed a drift first, so a uniformly-drifted frame
    /// resolves most cells without needing the full nine-window sweep.
    ///
    /// # Errors
    ///
    /// Returns [`CimbarError::NotRectified`] if `frame`'s dimensions don't
    /// match the configured `image_size` - a sign it was handed a raw
    /// capture instead of [`crate::extractor::Extractor`]'s output.
    pub fn read(&self, codec: &Codec, frame: &RgbImage) -> Result<(Vec<u8>, Vec<CellReadout>)> {
        if frame.width() != self.image_size || frame.height() != self.image_size {
            return Err(CimbarError::NotRectified);
        }

        let mut buffer = BitBuffer::default();
        let total = self.lattice.total_cells();
        let mut readouts: Vec<Option<CellReadout>> = vec![None; total];
        let mut seeds = vec![CellDrift::ZERO; total];

        for &slot in self.lattice.flood_order() {
            let pos = self.lattice.position(slot);
            let window = crop_window(frame, pos.x, pos.y);
            let cell = codec.decode_tile(&window, seeds[slot]);
            for &neighbor in self.lattice.neighbors_of(slot) {
                seeds[neighbor] = cell.drift;
            }

            let tile_index = codec.tile_index(cell.symbol, cell.color);
            let logical = self.lattice.logical_for_slot(slot);
            buffer.write(tile_index as u32, logical * self.bits_per_cell as usize, self.bits_per_cell);
            readouts[slot] = Some(CellReadout { logical, cell });
        }

        Ok((buffer.as_bytes().to_vec(), readouts.into_iter().flatten().collect()))
    }
}

/// Crop a `cell_size + 2`-square window centered on the cell at
/// `(x, y)` (the cell's top-left corner), with one pixel of border on
/// each side sampled from the inter-cell gap.
fn crop_window(frame: &RgbImage, x: u32, y: u32) -> RgbImage {
    let x0 = x.saturating_sub(1);
    let y0 = y.saturating_sub(1);
    let size = 10; // cell_size (8) + 2 px border; matches the baseline geometry
    image::imageops::crop_imm(frame, x0, y0, size, size).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::writer::FrameWriter;

    #[test]
    fn read_recovers_written_payload() {
        let config = Config::baseline();
        let codec = Codec::new(&config);
        let writer = FrameWriter::new(&config);
        let reader = FrameReader::new(&config);

        let payload = b"hello, cimbar";
        let frame = writer.write(&codec, payload);
        let (recovered, readouts) = reader.read(&codec, &frame).unwrap();

        assert_eq!(&recovered[..payload.len()], payload);
        assert!(readouts.iter().all(|r| r.cell.distance == 0));
    }

    #[test]
    fn read_rejects_a_frame_with_the_wrong_dimensions() {
        let config = Config::baseline();
        let codec = Codec::new(&config);
        let reader = FrameReader::new(&config);
        let wrong_size = RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]));

        let err = reader.read(&codec, &wrong_size).unwrap_err();
        assert!(matches!(err, crate::error::CimbarError::NotRectified));
    }
}
