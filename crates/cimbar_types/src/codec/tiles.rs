//! Symbol tile catalog: the grayscale bit pattern assigned to each symbol
//! value, and the average-hash fingerprint used to recognize it.
//!
//! Tiles are generated from rows of a Sylvester-construction Hadamard
//! matrix rather than loaded from bitmap assets: any two distinct rows of
//! an order-`N` Hadamard matrix differ in exactly `N/2` positions, which
//! gives every pair of symbol tiles the same, maximal Hamming separation -
//! exactly what the decoder's nearest-hash match needs to stay unambiguous
//! under pixel noise.

use crate::imagehash::{AhashResult, hamming_distance};
use crate::lattice::CellDrift;
use image::{GrayImage, Luma};

/// Whether Hadamard row `row`, column `col` is a "dark" bit.
fn hadamard_bit(row: u32, col: u32) -> bool {
    (row & col).count_ones() % 2 == 1
}

/// Average-hash value for Hadamard row `row` rendered at `cell_size`.
fn hadamard_hash(row: u32, cell_size: u32) -> u64 {
    let mut bits = 0u64;
    for y in 0..cell_size {
        for x in 0..cell_size {
            let col = y * cell_size + x;
            bits = (bits << 1) | u64::from(hadamard_bit(row, col));
        }
    }
    bits
}

/// Known-good hashes and renderable bitmaps for every symbol value in a
/// given [`Config`](crate::config::Config).
#[derive(Debug, Clone)]
pub struct TileCatalog {
    cell_size: u32,
    hashes: Vec<u64>,
}

impl TileCatalog {
    /// Build the catalog for `num_symbols` symbols rendered at `cell_size`
    /// pixels square.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size > 8`, since hashes are packed into a `u64`.
    #[must_use]
    pub fn new(num_symbols: usize, cell_size: u32) -> Self {
        assert!(cell_size <= 8, "cell_size must fit a 64-bit hash");
        let hashes = (0..num_symbols as u32)
            .map(|row| hadamard_hash(row, cell_size))
            .collect();
        TileCatalog { cell_size, hashes }
    }

    /// Number of symbols in the catalog.
    #[must_use]
    pub fn num_symbols(&self) -> usize {
        self.hashes.len()
    }

    /// The ideal average hash for `symbol`.
    #[must_use]
    pub fn hash_for_symbol(&self, symbol: usize) -> u64 {
        self.hashes[symbol]
    }

    /// Render `symbol`'s tile as a `cell_size`-square grayscale bitmap.
    #[must_use]
    pub fn render_symbol(&self, symbol: usize) -> GrayImage {
        let mut img = GrayImage::new(self.cell_size, self.cell_size);
        for y in 0..self.cell_size {
            for x in 0..self.cell_size {
                let col = y * self.cell_size + x;
                let dark = hadamard_bit(symbol as u32, col);
                img.put_pixel(x, y, Luma([if dark { 0 } else { 255 }]));
            }
        }
        img
    }

    /// Find the best-matching symbol for a decoded cell's nine drift
    /// windows, walking the search order seeded by `seed` (typically a
    /// neighboring cell's already-committed drift) and exiting as soon as
    /// an exact (zero Hamming distance) match is found.
    ///
    /// Returns `(symbol, drift, distance)`.
    #[must_use]
    pub fn best_match(&self, ahash: &AhashResult, seed: CellDrift) -> (usize, CellDrift, u32) {
        let mut best_symbol = 0;
        let mut best_drift = CellDrift::ZERO;
        let mut best_distance = u32::MAX;

        for (grid_index, sampled) in ahash.candidates_from(seed.to_grid_index()) {
            for (symbol, &known) in self.hashes.iter().enumerate() {
                let distance = hamming_distance(sampled, known);
                if distance < best_distance {
                    best_distance = distance;
                    best_symbol = symbol;
                    best_drift = CellDrift::from_grid_index(grid_index);
                }
                if best_distance == 0 {
                    return (best_symbol, best_drift, best_distance);
                }
            }
        }
        (best_symbol, best_drift, best_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_two_distinct_symbol_hashes_are_equidistant() {
        let catalog = TileCatalog::new(16, 8);
        for a in 0..catalog.num_symbols() {
            for b in (a + 1)..catalog.num_symbols() {
                let distance =
                    hamming_distance(catalog.hash_for_symbol(a), catalog.hash_for_symbol(b));
                assert_eq!(distance, 32, "symbols {a} and {b} should be 32 bits apart");
            }
        }
    }

    #[test]
    fn rendered_tile_hashes_back_to_its_own_catalog_entry() {
        let catalog = TileCatalog::new(16, 8);
        for symbol in 0..catalog.num_symbols() {
            let tile = catalog.render_symbol(symbol);
            let hash = crate::imagehash::average_hash(&tile);
            assert_eq!(hash, catalog.hash_for_symbol(symbol));
        }
    }

    #[test]
    fn best_match_recovers_exact_symbol_with_zero_distance() {
        let catalog = TileCatalog::new(16, 8);
        let ahash = AhashResult::extract_all(
            &pad_tile(&catalog.render_symbol(5)),
            8,
            127,
        );
        let (symbol, drift, distance) = catalog.best_match(&ahash, CellDrift::ZERO);
        assert_eq!(symbol, 5);
        assert_eq!(drift, CellDrift::ZERO);
        assert_eq!(distance, 0);
    }

    fn pad_tile(tile: &GrayImage) -> GrayImage {
        let mut padded = GrayImage::from_pixel(10, 10, Luma([255]));
        image::imageops::overlay(&mut padded, tile, 1, 1);
        padded
    }
}
