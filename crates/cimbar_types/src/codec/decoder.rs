//! Recovers a `(symbol, color)` pair and a drift estimate from a sampled
//! cell region.

use super::{palette::Palette, tiles::TileCatalog};
use crate::imagehash::AhashResult;
use crate::lattice::CellDrift;
use image::{GrayImage, Luma, RgbImage};

/// Result of decoding a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedCell {
    /// Recovered symbol (tile shape) value.
    pub symbol: usize,
    /// Recovered color palette index.
    pub color: usize,
    /// Pixel drift applied to find the best-fit symbol match.
    pub drift: CellDrift,
    /// Hamming distance of the matched hash; `0` means an exact match.
    pub distance: u32,
}

/// Matches a sampled `(cell_size + 2)`-square window against a
/// [`TileCatalog`] and [`Palette`] to recover the original symbol and
/// color.
#[derive(Debug, Clone)]
pub struct CimbDecoder {
    cell_size: u32,
}

impl CimbDecoder {
    /// Build a decoder for `cell_size`-square tiles.
    #[must_use]
    pub fn new(cell_size: u32) -> Self {
        CimbDecoder { cell_size }
    }

    /// Decode one cell from a `(cell_size + 2)`-square RGB window centered
    /// on the cell's nominal position (one pixel of margin on each side,
    /// sampled from the neighboring cells, to tolerate drift).
    ///
    /// `drift_in` seeds the drift search, typically with an already-decoded
    /// neighbor's committed drift, so a consistently-drifted frame resolves
    /// in one hash comparison instead of the full nine-window sweep.
    #[must_use]
    pub fn decode(
        &self,
        window: &RgbImage,
        tiles: &TileCatalog,
        palette: &Palette,
        drift_in: CellDrift,
    ) -> DecodedCell {
        let gray = to_grayscale(window);
        let threshold = mean_luma(&gray);
        let binarized = binarize(&gray, threshold);
        let ahash = AhashResult::extract_all(&binarized, self.cell_size, 127);
        let (symbol, drift, distance) = tiles.best_match(&ahash, drift_in);

        let color = self.decode_color(window, drift, palette);
        DecodedCell { symbol, color, drift, distance }
    }

    /// Recover the palette color from the drift-adjusted center region of
    /// the window, using a smaller inset than the full cell so anti-aliased
    /// tile edges don't pollute the color sample.
    fn decode_color(&self, window: &RgbImage, drift: CellDrift, palette: &Palette) -> usize {
        let inset = 2i64;
        let cx = 1 + i64::from(self.cell_size) / 2 + i64::from(drift.dx);
        let cy = 1 + i64::from(self.cell_size) / 2 + i64::from(drift.dy);
        let half = (i64::from(self.cell_size) / 2 - inset).max(1);

        let (w, h) = window.dimensions();
        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for y in (cy - half).max(0)..(cy + half).min(i64::from(h)) {
            for x in (cx - half).max(0)..(cx + half).min(i64::from(w)) {
                let px = window.get_pixel(x as u32, y as u32);
                for c in 0..3 {
                    sum[c] += u64::from(px[c]);
                }
                count += 1;
            }
        }
        let mean = if count == 0 {
            [255, 255, 255]
        } else {
            [
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
            ]
        };
        palette.best_match(mean)
    }
}

fn to_grayscale(img: &RgbImage) -> GrayImage {
    let mut gray = GrayImage::new(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels() {
        let luma = (u32::from(px[0]) * 299 + u32::from(px[1]) * 587 + u32::from(px[2]) * 114) / 1000;
        gray.put_pixel(x, y, Luma([luma as u8]));
    }
    gray
}

fn mean_luma(img: &GrayImage) -> u8 {
    let (sum, count) = img
        .pixels()
        .fold((0u64, 0u64), |(sum, count), p| (sum + u64::from(p[0]), count + 1));
    if count == 0 { 0 } else { (sum / count) as u8 }
}

fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = GrayImage::new(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels() {
        out.put_pixel(x, y, Luma([if px[0] > threshold { 255 } else { 0 }]));
    }
    out
}
