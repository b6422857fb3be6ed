//! Anchor detection and deskewing: turns a photographed (or otherwise
//! imperfectly captured) frame into a clean, axis-aligned image ready for
//! [`crate::frame::reader::FrameReader`].

pub mod anchor;
pub mod deskew;
pub mod geometry;
pub mod scan_state;
pub mod scanner;

use crate::error::CimbarError;
use deskew::Deskewer;
use image::{GrayImage, RgbImage};
use scanner::Scanner;

/// Outcome of attempting to locate and rectify a frame within a captured
/// image.
pub enum ExtractResult {
    /// No consistent set of anchors was found at all.
    Failure(CimbarError),
    /// Anchors were found but the image looked soft enough that decoding is
    /// likely to need a sharpening pass before another attempt.
    NeedsSharpen,
    /// Anchors were found and the frame was rectified successfully.
    Success(RgbImage),
}

/// Locates the anchor fiducials in a captured image and rectifies the frame
/// they bound into a clean `size x size` image.
pub struct Extractor {
    size: u32,
    dark_anchors: bool,
}

impl Extractor {
    /// Build an extractor that rectifies onto a `size x size` canonical
    /// frame. `dark_anchors` should match how the frame was written: `true`
    /// for dark marks on a light background.
    #[must_use]
    pub fn new(size: u32, dark_anchors: bool) -> Self {
        Extractor { size, dark_anchors }
    }

    /// Attempt to find the frame's anchors in `captured` and rectify it.
    #[must_use]
    pub fn extract(&self, captured: &RgbImage) -> ExtractResult {
        let gray: GrayImage = image::imageops::grayscale(captured);
        let scanner = Scanner::new(&gray, self.dark_anchors, None);
        let Some(corners) = scanner.scan() else {
            return ExtractResult::Failure(CimbarError::AnchorsNotFound);
        };

        let deskewer = Deskewer::new(self.size);
        match deskewer.rectify(captured, &corners) {
            Some(rectified) => ExtractResult::Success(rectified),
            None => ExtractResult::NeedsSharpen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn extract_on_blank_image_fails() {
        let img = RgbImage::from_pixel(512, 512, Rgb([255, 255, 255]));
        let extractor = Extractor::new(400, true);
        assert!(matches!(extractor.extract(&img), ExtractResult::Failure(_)));
    }
}
