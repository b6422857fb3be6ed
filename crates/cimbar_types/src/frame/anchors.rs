//! Procedurally drawn anchor fiducials and alignment guides.
//!
//! Anchors are concentric-ring patterns rather than loaded bitmap assets:
//! [`draw_primary_anchor`] draws the 1:1:4:1:1 ring ratio used at three
//! corners, [`draw_secondary_anchor`] the 1:2:2:1 ratio used at the fourth.
//! A scanline through the center of either pattern, in any direction,
//! reproduces the ratio the [`crate::extractor::scanner`] state machines
//! look for.

use image::{Rgb, RgbImage};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Draw a 1:1:4:1:1 ringed anchor (8 ratio units wide) into a fresh
/// `size`-square image: white, black, white, black (4 units), white,
/// black, working out from the border toward the center.
#[must_use]
pub fn draw_primary_anchor(size: u32) -> RgbImage {
    draw_ring_pattern(size, &[1, 1, 4, 1, 1])
}

/// Draw a 1:2:2:1 ringed anchor (6 ratio units wide) used for the fourth
/// (bottom-right) confirmation anchor.
#[must_use]
pub fn draw_secondary_anchor(size: u32) -> RgbImage {
    draw_ring_pattern(size, &[1, 2, 2, 1])
}

/// Draw concentric square rings whose widths are proportional to `ratio`,
/// alternating white/black/white/... from the outside in.
fn draw_ring_pattern(size: u32, ratio: &[u32]) -> RgbImage {
    let total_units: u32 = ratio.iter().sum();
    let mut img = RgbImage::from_pixel(size, size, WHITE);
    let center = f64::from(size) / 2.0;
    let unit = f64::from(size) / f64::from(total_units) / 2.0;

    // cumulative ring boundaries, measured outward from center
    let mut boundaries = Vec::with_capacity(ratio.len());
    let mut acc = 0.0;
    for &band in ratio.iter().rev() {
        acc += f64::from(band) * unit;
        boundaries.push(acc);
    }

    for y in 0..size {
        for x in 0..size {
            let dx = (f64::from(x) + 0.5 - center).abs();
            let dy = (f64::from(y) + 0.5 - center).abs();
            let radius = dx.max(dy);
            let band = boundaries.partition_point(|&b| radius >= b);
            // Bands alternate starting white at the outside (band == ratio.len()).
            let is_black = (ratio.len() - band) % 2 == 1;
            img.put_pixel(x, y, if is_black { BLACK } else { WHITE });
        }
    }
    img
}

/// Draw a thin solid guide bar, used as a mid-frame alignment aid between
/// the corner anchors.
#[must_use]
pub fn draw_guide_bar(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_anchor_center_pixel_is_in_the_innermost_black_band() {
        let anchor = draw_primary_anchor(56);
        let center = anchor.get_pixel(28, 28);
        assert_eq!(*center, BLACK);
    }

    #[test]
    fn primary_anchor_border_pixel_is_white() {
        let anchor = draw_primary_anchor(56);
        assert_eq!(*anchor.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn secondary_anchor_has_distinct_pattern_from_primary() {
        let primary = draw_primary_anchor(48);
        let secondary = draw_secondary_anchor(48);
        assert_ne!(primary, secondary);
    }
}
