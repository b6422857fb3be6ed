//! Renders a `(symbol, color)` pair into a colored tile bitmap.

use super::{palette::Palette, tiles::TileCatalog};
use image::{Rgb, RgbImage};

/// Renders symbol/color pairs into tile bitmaps using a shared
/// [`TileCatalog`] and [`Palette`].
#[derive(Debug, Clone)]
pub struct CimbEncoder {
    cell_size: u32,
    num_symbols: usize,
}

impl CimbEncoder {
    /// Build an encoder for `cell_size`-square tiles over `num_symbols`
    /// distinct symbol shapes.
    #[must_use]
    pub fn new(cell_size: u32, num_symbols: usize) -> Self {
        CimbEncoder { cell_size, num_symbols }
    }

    /// Encode a flat tile index (as produced by [`super::Codec::tile_index`])
    /// into a colored `cell_size`-square bitmap.
    #[must_use]
    pub fn encode(&self, tiles: &TileCatalog, palette: &Palette, tile_index: usize) -> RgbImage {
        let symbol = tile_index % self.num_symbols;
        let color = tile_index / self.num_symbols;
        self.render(tiles, palette, symbol, color)
    }

    /// Render a specific `(symbol, color)` pair directly.
    #[must_use]
    pub fn render(
        &self,
        tiles: &TileCatalog,
        palette: &Palette,
        symbol: usize,
        color: usize,
    ) -> RgbImage {
        let mono = tiles.render_symbol(symbol);
        let rgb = palette.color(color);
        let mut img = RgbImage::new(self.cell_size, self.cell_size);
        for (x, y, px) in mono.enumerate_pixels() {
            let out = if px[0] < 128 { rgb } else { [255, 255, 255] };
            img.put_pixel(x, y, Rgb(out));
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_produces_cell_sized_bitmap() {
        let tiles = TileCatalog::new(16, 8);
        let palette = Palette::new(4);
        let encoder = CimbEncoder::new(8, 16);
        let tile = encoder.render(&tiles, &palette, 3, 1);
        assert_eq!(tile.dimensions(), (8, 8));
    }

    #[test]
    fn tile_index_splits_into_symbol_and_color() {
        let tiles = TileCatalog::new(16, 8);
        let palette = Palette::new(4);
        let encoder = CimbEncoder::new(8, 16);
        // tile_index 20 => symbol 20 % 16 = 4, color 20 / 16 = 1
        let a = encoder.encode(&tiles, &palette, 20);
        let b = encoder.render(&tiles, &palette, 4, 1);
        assert_eq!(a, b);
    }
}
