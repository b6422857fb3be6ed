//! Runtime configuration for the cimbar lattice, codec, and ECC layers.
//!
//! [`Config`] is a plain data struct with a [`Config::baseline`] constructor
//! that matches the "mode B" geometry described in the project's design
//! notes: 4-bit symbols, a 4-color palette, 30 bytes of Reed-Solomon parity
//! per 155-byte block, and 10 fountain-encoded chunks per frame.
//!
//! Callers that want to override baseline values from a TOML file or
//! environment variables can go through [`Config::load`], which layers
//! `CIMBAR_*` environment variables over an optional config file using the
//! `config` crate.

use serde::{Deserialize, Serialize};

/// Geometry and codec parameters for one encode/decode session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Cells along one edge of the square lattice, anchors included.
    pub cells_per_col: usize,
    /// Cells reserved for each of the four corner anchor blocks.
    pub corner_padding: usize,
    /// Pixel width/height of a single cell's tile.
    pub cell_size: u32,
    /// Pixel distance between the start of one cell and the next.
    pub cell_spacing: u32,
    /// Output frame width/height in pixels.
    pub image_size: u32,
    /// Bits encoded per cell via tile shape (symbol).
    pub symbol_bits: u32,
    /// Bits encoded per cell via tile color.
    pub color_bits: u32,
    /// Reed-Solomon parity bytes per `ecc_block_size`-byte block.
    pub ecc_bytes: usize,
    /// Reed-Solomon block size in bytes (data + parity).
    pub ecc_block_size: usize,
    /// Fountain-encoded chunks packed into a single frame.
    pub fountain_chunks_per_frame: usize,
    /// zstd compression level applied before fountain-encoding, 0 disables.
    pub compression_level: i32,
    /// Use the legacy single-pass (symbol+color interleaved) decode path.
    pub legacy_mode: bool,
    /// Interleave partitions used to spread each Reed-Solomon block spatially.
    pub interleave_partitions: usize,
}

impl Config {
    /// The project's baseline geometry ("mode B"): 4 bits/cell symbol space,
    /// 2 bits/cell color space, ecc=30/155.
    #[must_use]
    pub fn baseline() -> Self {
        Config {
            cells_per_col: 112,
            corner_padding: 6,
            cell_size: 8,
            cell_spacing: 9,
            image_size: 1024,
            symbol_bits: 4,
            color_bits: 2,
            ecc_bytes: 30,
            ecc_block_size: 155,
            fountain_chunks_per_frame: 10,
            compression_level: 6,
            legacy_mode: false,
            interleave_partitions: 4,
        }
    }

    /// Total lattice cells available for data, anchors excluded.
    ///
    /// `cells_per_col^2 - 4 * corner_padding^2`: the four corner blocks
    /// reserved for anchor fiducials are carved out of the square lattice.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells_per_col * self.cells_per_col - 4 * self.corner_padding * self.corner_padding
    }

    /// Bits packed into a single cell (symbol shape plus color).
    #[must_use]
    pub fn bits_per_cell(&self) -> u32 {
        self.symbol_bits + self.color_bits
    }

    /// Number of distinct symbol tile shapes, `2^symbol_bits`.
    #[must_use]
    pub fn num_symbols(&self) -> usize {
        1 << self.symbol_bits
    }

    /// Number of distinct palette colors, `2^color_bits`.
    #[must_use]
    pub fn num_colors(&self) -> usize {
        1 << self.color_bits
    }

    /// Raw per-frame payload capacity in bytes, before Reed-Solomon parity.
    #[must_use]
    pub fn capacity_bytes(&self) -> usize {
        self.total_cells() * self.bits_per_cell() as usize / 8
    }

    /// Bytes of fountain-encoded payload that fit in one frame, once
    /// Reed-Solomon parity overhead is subtracted.
    #[must_use]
    pub fn fountain_chunk_size(&self) -> usize {
        let capacity = self.capacity_bytes();
        let good = self.ecc_block_size - self.ecc_bytes;
        capacity * good / self.ecc_block_size / self.fountain_chunks_per_frame.max(1)
    }

    /// Half-width of the decode sampling window around a cell center,
    /// `(cell_size + 2)^2` pixels: one pixel of drift tolerance per side.
    #[must_use]
    pub fn decode_window_bits(&self) -> u32 {
        (self.cell_size + 2) * (self.cell_size + 2)
    }

    /// Load configuration from an optional TOML file, layered under
    /// `CIMBAR_*` environment variable overrides, falling back to
    /// [`Config::baseline`] for anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but fails to parse, or if an
    /// environment variable can't be coerced into its field's type.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, config::ConfigError> {
        let baseline = Config::baseline();
        let mut builder = config::Config::builder().add_source(
            config::Config::try_from(&baseline)?,
        );
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("CIMBAR"));
        builder.build()?.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_capacity_matches_bit_buffer_size_hint() {
        let config = Config::baseline();
        assert_eq!(config.total_cells(), 12_400);
        assert_eq!(config.capacity_bytes(), 9_300);
    }

    #[test]
    fn baseline_fountain_chunk_size_divides_evenly() {
        let config = Config::baseline();
        assert_eq!(config.fountain_chunk_size(), 750);
    }

    #[test]
    fn baseline_decode_window_is_ten_by_ten() {
        let config = Config::baseline();
        assert_eq!(config.decode_window_bits(), 100);
    }
}
