//! Fuzzy average-hash image fingerprinting used to match a decoded cell
//! against the known tile catalog even when the sampled window has drifted
//! a pixel or two off-center.

use image::{GenericImageView, GrayImage, imageops::FilterType};

/// Resize `img` down to 8x8, threshold each pixel against the image mean,
/// and pack the result MSB-first into a 64-bit average hash.
#[must_use]
pub fn average_hash(img: &GrayImage) -> u64 {
    let small = image::imageops::resize(img, 8, 8, FilterType::Triangle);
    let mean = mean_luma(&small);
    hash_thresholded(&small, mean)
}

/// Pack an already-sized, already-thresholded window into a hash by
/// reading `size`x`size` pixels starting at `(offset_x, offset_y)`,
/// MSB-first, treating any pixel above `threshold` as a 1 bit.
///
/// `size` must be at most 8: the hash is a `u64`, one bit per pixel.
fn hash_window(window: &GrayImage, offset_x: u32, offset_y: u32, size: u32, threshold: u8) -> u64 {
    debug_assert!(size <= 8);
    let mut bits = 0u64;
    for y in 0..size {
        for x in 0..size {
            let px = window.get_pixel(offset_x + x, offset_y + y)[0];
            bits = (bits << 1) | u64::from(px > threshold);
        }
    }
    bits
}

fn hash_thresholded(img: &GrayImage, threshold: u8) -> u64 {
    let (w, h) = img.dimensions();
    debug_assert!(w <= 8 && h <= 8);
    hash_window(img, 0, 0, w.min(8), threshold)
}

fn mean_luma(img: &GrayImage) -> u8 {
    let pixels = img.pixels();
    let (sum, count) = pixels.fold((0u64, 0u64), |(sum, count), p| (sum + u64::from(p[0]), count + 1));
    if count == 0 { 0 } else { (sum / count) as u8 }
}

/// Hamming distance between two 64-bit hashes: the number of differing
/// bits, via population count of the XOR.
#[must_use]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// The nine overlapping 1-pixel-drift sampling windows extracted from a
/// `(cell_size + 2)`-square thresholded region around a cell, used to find
/// the best-fit tile hash even when the true cell center has drifted by a
/// pixel.
///
/// Results are indexed by a 3x3 grid position (row-major, `4` is the
/// center), matching [`crate::lattice::CellDrift::from_grid_index`].
/// [`AhashResult::SEARCH_ORDER`] gives the center-first search order that
/// makes the common case (no drift) the fastest to resolve.
#[derive(Debug, Clone, Copy)]
pub struct AhashResult {
    results: [u64; 9],
}

impl AhashResult {
    /// Center-first search order: try no drift, then the four
    /// edge-adjacent windows, then the four corners.
    pub const SEARCH_ORDER: [usize; 9] = [4, 5, 7, 3, 1, 8, 0, 2, 6];

    /// Compute all nine drift windows from a thresholded
    /// `(cell_size + 2)`-square region.
    #[must_use]
    pub fn extract_all(window: &GrayImage, cell_size: u32, threshold: u8) -> Self {
        let mut results = [0u64; 9];
        for (grid_index, slot) in results.iter_mut().enumerate() {
            let dx = (grid_index % 3) as u32;
            let dy = (grid_index / 3) as u32;
            *slot = hash_window(window, dx, dy, cell_size, threshold);
        }
        AhashResult { results }
    }

    /// Compute only the center and the four edge-adjacent windows
    /// (skipping the four corners), for a cheaper decode pass when the
    /// image is known to be well-aligned.
    #[must_use]
    pub fn extract_fast(window: &GrayImage, cell_size: u32, threshold: u8) -> Self {
        let mut results = [0u64; 9];
        for grid_index in [1, 3, 4, 5, 7] {
            let dx = (grid_index % 3) as u32;
            let dy = (grid_index / 3) as u32;
            results[grid_index] = hash_window(window, dx, dy, cell_size, threshold);
        }
        AhashResult { results }
    }

    /// The hash for a specific 3x3 grid position.
    #[must_use]
    pub fn get(&self, grid_index: usize) -> u64 {
        self.results[grid_index]
    }

    /// Iterate `(grid_index, hash)` pairs in center-first search order.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        Self::SEARCH_ORDER.iter().map(|&idx| (idx, self.results[idx]))
    }

    /// Iterate `(grid_index, hash)` pairs with `seed` tried first, followed
    /// by the rest of [`Self::SEARCH_ORDER`]. Lets the decoder try a
    /// neighbor's committed drift before falling back to the usual
    /// center-first sweep.
    pub fn candidates_from(&self, seed: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        std::iter::once(seed)
            .chain(Self::SEARCH_ORDER.iter().copied().filter(move |&idx| idx != seed))
            .map(|idx| (idx, self.results[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn hamming_distance_of_identical_hashes_is_zero() {
        assert_eq!(hamming_distance(0xDEAD_BEEF, 0xDEAD_BEEF), 0);
    }

    #[test]
    fn hamming_distance_counts_differing_bits() {
        assert_eq!(hamming_distance(0b1010, 0b0101), 4);
    }

    #[test]
    fn average_hash_of_solid_image_is_all_zero_bits() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        assert_eq!(average_hash(&img), 0);
    }

    #[test]
    fn average_hash_of_checkerboard_has_half_set_bits() {
        let mut img = GrayImage::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                img.put_pixel(x, y, Luma([v]));
            }
        }
        let hash = average_hash(&img);
        assert_eq!(hash.count_ones(), 32);
    }

    #[test]
    fn center_search_order_starts_at_grid_index_four() {
        assert_eq!(AhashResult::SEARCH_ORDER[0], 4);
    }

    #[test]
    fn candidates_from_tries_the_seed_first() {
        let window = GrayImage::from_pixel(10, 10, Luma([255]));
        let result = AhashResult::extract_all(&window, 8, 0);
        let first = result.candidates_from(6).next();
        assert_eq!(first, Some((6, result.get(6))));
    }

    #[test]
    fn extract_fast_leaves_corner_windows_zeroed() {
        let window = GrayImage::from_pixel(10, 10, Luma([255]));
        let result = AhashResult::extract_fast(&window, 8, 0);
        assert_eq!(result.get(0), 0);
        assert_eq!(result.get(2), 0);
        assert_eq!(result.get(6), 0);
        assert_eq!(result.get(8), 0);
        assert_ne!(result.get(4), 0);
    }
}
