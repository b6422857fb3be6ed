//! Locates the four corner anchor fiducials in a raw (possibly skewed,
//! possibly noisy) photograph of a frame.

use super::anchor::Anchor;
use super::geometry::{Corners, Point};
use super::scan_state::{ScanState, primary_limits, secondary_limits};
use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::gaussian_blur_f32;

/// Round `v` up to the next odd number, minimum 3 - used to size blur and
/// adaptive-threshold kernels relative to image scale.
fn next_odd_at_least_three(v: u32) -> u32 {
    let v = v.max(3);
    if v % 2 == 0 { v + 1 } else { v }
}

fn preprocess(img: &GrayImage) -> GrayImage {
    let (w, h) = img.dimensions();
    let unit = w.min(h);
    let kernel = next_odd_at_least_three((f64::from(unit) * 0.002) as u32);
    let blurred = gaussian_blur_f32(img, kernel as f32 / 3.0);
    let level = otsu_level(&blurred);
    let mut out = GrayImage::new(w, h);
    for (x, y, px) in blurred.enumerate_pixels() {
        out.put_pixel(x, y, Luma([if px[0] > level { 255 } else { 0 }]));
    }
    out
}

/// Finds the anchor fiducials in a preprocessed (grayscale, thresholded)
/// image and reports their four centers.
pub struct Scanner {
    img: GrayImage,
    dark: bool,
    skip: u32,
    merge_cutoff: i64,
}

impl Scanner {
    /// Threshold and blur `img`, then build a scanner over the result.
    /// `dark` is true when anchor fiducials are dark marks on a light
    /// background (the baseline case).
    #[must_use]
    pub fn new(img: &GrayImage, dark: bool, skip: Option<u32>) -> Self {
        let (w, h) = img.dimensions();
        let skip = skip.unwrap_or_else(|| (w.min(h) / 60).max(1));
        Scanner {
            img: preprocess(img),
            dark,
            skip,
            merge_cutoff: i64::from(w / 30).max(1),
        }
    }

    fn test_pixel(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.img.width() || y as u32 >= self.img.height() {
            return false;
        }
        let px = self.img.get_pixel(x as u32, y as u32)[0];
        if self.dark { px < 128 } else { px >= 128 }
    }

    fn scan_horizontal(&self, out: &mut Vec<Anchor>, y: i64, xstart: i64, xend: i64, limits: [super::scan_state::RatioLimit; 6]) -> bool {
        let initial = out.len();
        let mut state = ScanState::new(limits);
        for x in xstart..xend {
            if let Some(size) = state.process(self.test_pixel(x, y)) {
                out.push(Anchor::new(x - size, x - 1, y, y));
            }
        }
        if let Some(size) = state.process(false) {
            out.push(Anchor::new(xend - size, xend - 1, y, y));
        }
        out.len() != initial
    }

    fn scan_vertical(&self, out: &mut Vec<Anchor>, x: i64, xmax: i64, ystart: i64, yend: i64, limits: [super::scan_state::RatioLimit; 6]) -> bool {
        let initial = out.len();
        let xavg = (x + xmax) / 2;
        let mut state = ScanState::new(limits);
        for y in ystart..yend {
            if let Some(size) = state.process(self.test_pixel(xavg, y)) {
                out.push(Anchor::new(xavg, xavg, y - size, y - 1));
            }
        }
        if let Some(size) = state.process(false) {
            out.push(Anchor::new(xavg, xavg, yend - size, yend - 1));
        }
        out.len() != initial
    }

    fn scan_diagonal(&self, out: &mut Vec<Anchor>, mut xstart: i64, xend: i64, mut ystart: i64, yend: i64, limits: [super::scan_state::RatioLimit; 6]) -> bool {
        let xend = xend.min(i64::from(self.img.width()));
        let yend = yend.min(i64::from(self.img.height()));
        if xstart < 0 {
            ystart -= xstart;
            xstart = 0;
        }
        if ystart < 0 {
            xstart -= ystart;
            ystart = 0;
        }
        let initial = out.len();
        let mut state = ScanState::new(limits);
        let (mut x, mut y) = (xstart, ystart);
        while x < xend && y < yend {
            if let Some(size) = state.process(self.test_pixel(x, y)) {
                out.push(Anchor::new(x - size, x - 1, y - size, y - 1));
            }
            x += 1;
            y += 1;
        }
        if let Some(size) = state.process(false) {
            out.push(Anchor::new(x - size, x - 1, y - size, y - 1));
        }
        out.len() != initial
    }

    fn t1_scan_rows(&self) -> Vec<Anchor> {
        let (w, h) = (i64::from(self.img.width()), i64::from(self.img.height()));
        let mut points = Vec::new();
        let mut y = i64::from(self.skip);
        while y < h {
            self.scan_horizontal(&mut points, y, 0, w, primary_limits());
            y += i64::from(self.skip);
        }
        points
    }

    fn t2_scan_column(&self, hint: &Anchor) -> Vec<Anchor> {
        let mut points = Vec::new();
        let ystart = hint.y() - 3 * hint.xrange();
        let yend = hint.ymax() + 3 * hint.xrange();
        self.scan_vertical(&mut points, hint.x(), hint.xmax(), ystart, yend, primary_limits());
        points
    }

    fn t3_scan_diagonal(&self, hint: &Anchor) -> Option<Anchor> {
        let mut confirms = Vec::new();
        let xstart = hint.xavg() - 2 * hint.yrange();
        let xend = hint.xavg() + 2 * hint.yrange();
        let ystart = hint.y() - hint.yrange();
        let yend = hint.ymax() + hint.yrange();
        if !self.scan_diagonal(&mut confirms, xstart, xend, ystart, yend, primary_limits()) {
            return None;
        }
        let mut merged = *hint;
        let mut confirmed = false;
        for c in &confirms {
            if c.is_mergeable(hint, self.merge_cutoff) {
                confirmed = true;
                merged.merge(c);
            }
        }
        confirmed.then_some(merged)
    }

    fn t4_confirm_scan(&self, mut hint: Anchor, merge_confirms: bool) -> Option<Anchor> {
        {
            let mut confirms = Vec::new();
            let xstart = hint.x() - hint.xrange();
            let xend = hint.xmax() + hint.xrange();
            let yavg = hint.yavg();
            for y in [yavg - 1, yavg, yavg + 1] {
                if !self.scan_horizontal(&mut confirms, y, xstart, xend, primary_limits()) {
                    return None;
                }
            }
            let mut confirmed = false;
            for c in &confirms {
                if c.is_mergeable(&hint, self.merge_cutoff) {
                    confirmed = true;
                    if !merge_confirms {
                        break;
                    }
                    hint.merge(c);
                }
            }
            if !confirmed {
                return None;
            }
        }
        {
            let mut confirms = Vec::new();
            let ystart = hint.y() - hint.yrange();
            let yend = hint.ymax() + hint.yrange();
            let xavg = hint.xavg();
            for x in [xavg - 1, xavg, xavg + 1] {
                if !self.scan_vertical(&mut confirms, x, x, ystart, yend, primary_limits()) {
                    return None;
                }
            }
            let mut confirmed = false;
            for c in &confirms {
                if c.is_mergeable(&hint, self.merge_cutoff) {
                    confirmed = true;
                    if !merge_confirms {
                        break;
                    }
                    hint.merge(c);
                }
            }
            if !confirmed {
                return None;
            }
        }
        Some(hint)
    }

    fn on_t1_scan(&self, found: &Anchor, candidates: &mut Vec<Anchor>) {
        if candidates.iter().any(|c| c.is_mergeable(found, self.merge_cutoff)) {
            return;
        }
        for p in self.t2_scan_column(found) {
            if let Some(p) = self.t3_scan_diagonal(&p)
                && let Some(p) = self.t4_confirm_scan(p, true)
            {
                candidates.push(p);
            }
        }
    }

    fn filter_candidates(candidates: &mut Vec<Anchor>) -> i64 {
        if candidates.len() < 3 {
            return 0;
        }
        candidates.sort_by_key(|b| std::cmp::Reverse(b.size()));
        let cutoff: i64 = candidates.iter().take(3).map(Anchor::size).sum::<i64>() / 8;
        candidates.retain(|c| c.size() >= cutoff);
        candidates.truncate(3);
        cutoff
    }

    /// Order exactly three anchors into top-left/top-right/bottom-left.
    /// Returns `None` if they don't look like a consistent right-angle
    /// triple.
    fn sort_top_to_bottom(anchors: &mut [Anchor; 3]) -> bool {
        let centers = [anchors[0].center(), anchors[1].center(), anchors[2].center()];
        let edges = [
            centers[1] - centers[2],
            centers[2] - centers[0],
            centers[0] - centers[1],
        ];
        let lengths: Vec<f64> = edges.iter().map(|e| e.x * e.x + e.y * e.y).collect();
        let (tl_index, _) = lengths
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();

        // the anchor opposite the longest edge is the top-left corner
        let tl = anchors[tl_index];
        let others: Vec<usize> = (0..3).filter(|&i| i != tl_index).collect();
        let (i, j) = (others[0], others[1]);

        let incoming = centers[tl_index] - centers[i];
        let departing = centers[j] - centers[tl_index];
        let rotated = Point::new(-incoming.y, incoming.x);
        let overlap = departing - rotated;
        let overlap_sq = overlap.x * overlap.x + overlap.y * overlap.y;
        let departing_sq = departing.x * departing.x + departing.y * departing.y;

        let (tr, bl) = if overlap_sq < departing_sq {
            (anchors[j], anchors[i])
        } else {
            (anchors[i], anchors[j])
        };
        *anchors = [tl, tr, bl];
        true
    }

    fn scan_primary(&self) -> (Vec<Anchor>, i64) {
        let mut candidates = Vec::new();
        for found in self.t1_scan_rows() {
            self.on_t1_scan(&found, &mut candidates);
        }
        let cutoff = Self::filter_candidates(&mut candidates);
        (candidates, cutoff)
    }

    fn add_bottom_right_corner(&self, anchors: &[Anchor; 3], cutoff: i64) -> Option<Anchor> {
        // anchors are [tl, tr, bl]; estimate br from two independent
        // extrapolations and average them.
        let (tl, tr, bl) = (anchors[0], anchors[1], anchors[2]);

        let guess_from_top = Point::new(
            tr.xavg() as f64 + (tr.xavg() - tl.xavg()) as f64,
            tr.yavg() as f64 + (bl.yavg() - tl.yavg()) as f64,
        );
        let guess_from_left = Point::new(
            bl.xavg() as f64 + (tr.xavg() - tl.xavg()) as f64,
            bl.yavg() as f64 + (bl.yavg() - tl.yavg()) as f64,
        );
        let guess = Point::new(
            (guess_from_top.x + guess_from_left.x) / 2.0,
            (guess_from_top.y + guess_from_left.y) / 2.0,
        );

        let range = [tl.max_range(), tr.max_range(), bl.max_range()].into_iter().max().unwrap() * 2;
        let mut candidates = Vec::new();
        let xstart = guess.x as i64 - range;
        let xend = guess.x as i64 + range;
        let y = guess.y as i64;
        self.scan_horizontal(&mut candidates, y, xstart.max(0), xend, secondary_limits());
        candidates.into_iter().find(|c| c.size() > cutoff)
    }

    /// Run the full scan, returning the four anchor centers if found.
    #[must_use]
    pub fn scan(&self) -> Option<Corners> {
        let (mut candidates, cutoff) = self.scan_primary();
        if candidates.len() != 3 || cutoff == 0 {
            return None;
        }
        let mut triple: [Anchor; 3] = [candidates[0], candidates[1], candidates[2]];
        if !Self::sort_top_to_bottom(&mut triple) {
            return None;
        }
        let br = self.add_bottom_right_corner(&triple, cutoff)?;
        candidates.clear();
        Some(Corners {
            tl: triple[0].center(),
            tr: triple[1].center(),
            bl: triple[2].center(),
            br: br.center(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_odd_at_least_three_handles_small_and_even_values() {
        assert_eq!(next_odd_at_least_three(0), 3);
        assert_eq!(next_odd_at_least_three(4), 5);
        assert_eq!(next_odd_at_least_three(7), 7);
    }

    #[test]
    fn scan_on_blank_image_finds_nothing() {
        let img = GrayImage::from_pixel(256, 256, Luma([255]));
        let scanner = Scanner::new(&img, true, None);
        assert!(scanner.scan().is_none());
    }
}
