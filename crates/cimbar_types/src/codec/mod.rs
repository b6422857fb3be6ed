//! Symbol/color tile encoding and decoding.

pub mod decoder;
pub mod encoder;
pub mod palette;
pub mod tiles;

pub use decoder::{CimbDecoder, DecodedCell};
pub use encoder::CimbEncoder;
pub use palette::Palette;
pub use tiles::TileCatalog;

use crate::config::Config;
use crate::lattice::CellDrift;

/// Bundles a [`TileCatalog`], [`Palette`], [`CimbEncoder`], and
/// [`CimbDecoder`] built consistently from one [`Config`].
#[derive(Debug, Clone)]
pub struct Codec {
    tiles: TileCatalog,
    palette: Palette,
    encoder: CimbEncoder,
    decoder: CimbDecoder,
    num_symbols: usize,
}

impl Codec {
    /// Build a codec for `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let num_symbols = config.num_symbols();
        let num_colors = config.num_colors();
        Codec {
            tiles: TileCatalog::new(num_symbols, config.cell_size),
            palette: Palette::new(num_colors),
            encoder: CimbEncoder::new(config.cell_size, num_symbols),
            decoder: CimbDecoder::new(config.cell_size),
            num_symbols,
        }
    }

    /// Flat tile index for a `(symbol, color)` pair, `color * num_symbols + symbol`.
    #[must_use]
    pub fn tile_index(&self, symbol: usize, color: usize) -> usize {
        color * self.num_symbols + symbol
    }

    /// Encode bits (taken modulo the tile count) into a colored tile bitmap.
    #[must_use]
    pub fn encode_tile(&self, bits: u32) -> image::RgbImage {
        let total_tiles = self.tiles.num_symbols() * self.palette.len();
        let index = bits as usize % total_tiles;
        self.encoder.encode(&self.tiles, &self.palette, index)
    }

    /// Decode a sampled cell window back into a symbol/color pair,
    /// seeding the drift search with `drift_in` (an already-decoded
    /// neighbor's committed drift, or [`CellDrift::ZERO`]).
    #[must_use]
    pub fn decode_tile(&self, window: &image::RgbImage, drift_in: CellDrift) -> DecodedCell {
        self.decoder.decode(window, &self.tiles, &self.palette, drift_in)
    }

    /// Shared tile catalog, for callers that want direct access.
    #[must_use]
    pub fn tiles(&self) -> &TileCatalog {
        &self.tiles
    }

    /// Shared palette, for callers that want direct access.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
