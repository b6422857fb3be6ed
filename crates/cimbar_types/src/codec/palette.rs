//! Color palette and hue-stable color matching.
//!
//! The eight-color baseline palette is fixed: cyan, yellow, magenta, green,
//! azure, orange, red, violet. Baseline "mode B" (2 color bits) only uses
//! the first four.

/// RGB triples for the full eight-color palette. A given [`Config`](crate::config::Config)
/// uses the first `num_colors()` of these.
pub const PALETTE_RGB: [[u8; 3]; 8] = [
    [0, 255, 255],   // cyan
    [255, 255, 0],   // yellow
    [255, 0, 255],   // magenta
    [0, 255, 0],     // green
    [0, 127, 255],   // azure
    [255, 127, 0],   // orange
    [255, 0, 0],     // red
    [127, 0, 255],   // violet
];

/// A fixed-size slice of [`PALETTE_RGB`] used by one [`Config`](crate::config::Config).
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Build a palette with the first `num_colors` baseline colors.
    #[must_use]
    pub fn new(num_colors: usize) -> Self {
        Palette {
            colors: PALETTE_RGB[..num_colors.min(PALETTE_RGB.len())].to_vec(),
        }
    }

    /// Number of colors in this palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty (always false for a constructed palette).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// RGB triple for `index`.
    #[must_use]
    pub fn color(&self, index: usize) -> [u8; 3] {
        self.colors[index]
    }

    /// Find the palette entry closest to `sampled` under [`color_diff`],
    /// after normalizing `sampled` with [`fix_color`].
    #[must_use]
    pub fn best_match(&self, sampled: [u8; 3]) -> usize {
        let fixed = fix_color(sampled);
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, &candidate)| color_diff(fixed, candidate))
            .map_or(0, |(index, _)| index)
    }
}

/// Normalize a sampled color so its channels span the full `0..=255` range,
/// compensating for ambient lighting that washes everything toward gray.
///
/// Mirrors the original normalization: find the channel `max`/`min`, scale
/// so `max` saturates near 255, and subtract the resulting floor from every
/// channel.
#[must_use]
pub fn fix_color(rgb: [u8; 3]) -> [u8; 3] {
    let max = *rgb.iter().max().unwrap();
    let min = *rgb.iter().min().unwrap();
    if max <= min {
        return rgb;
    }
    let adjust = 255.0 / f32::from(max - min);
    let down = f32::from(min) * adjust;
    let mut out = [0u8; 3];
    for (i, &c) in rgb.iter().enumerate() {
        out[i] = fix_single_color(c, adjust, down);
    }
    out
}

fn fix_single_color(channel: u8, adjust_up: f32, down: f32) -> u8 {
    let scaled = f32::from(channel) * adjust_up - down;
    if scaled > 245.0 - down {
        255
    } else {
        scaled.clamp(0.0, 255.0) as u8
    }
}

/// Hue-stable color distance: sum of squared differences between the two
/// colors' relative-channel triples `(r-g, g-b, b-r)`.
///
/// Comparing relative differences instead of raw channels makes the match
/// tolerant to uniform brightness shifts (a washed-out photo) that would
/// otherwise throw off a plain Euclidean RGB distance.
#[must_use]
pub fn color_diff(a: [u8; 3], b: [u8; 3]) -> i32 {
    let rel = |c: [u8; 3]| {
        let [r, g, bch] = c.map(i32::from);
        [r - g, g - bch, bch - r]
    };
    let ra = rel(a);
    let rb = rel(b);
    ra.iter().zip(rb.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
