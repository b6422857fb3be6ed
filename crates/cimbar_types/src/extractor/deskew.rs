//! Perspective correction from four detected anchor corners back to an
//! axis-aligned square frame.

use super::geometry::{Corners, Point};
use image::RgbImage;
use imageproc::geometric_transformations::{Projection, warp, Interpolation};

/// Maps a detected (possibly skewed) quadrilateral back onto the canonical
/// `size x size` frame coordinate space.
pub struct Deskewer {
    size: u32,
}

impl Deskewer {
    /// Build a deskewer that rectifies onto a `size x size` output image.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Deskewer { size }
    }

    /// Compute the forward projection mapping canonical frame coordinates
    /// to the pixel coordinates observed in the source photo, from the
    /// four detected corners.
    #[must_use]
    pub fn projection(&self, corners: &Corners) -> Option<Projection> {
        let s = f32::from(u16::try_from(self.size).ok()?);
        if corners.all().iter().any(Point::is_none) {
            return None;
        }

        let from = [
            (0.0, 0.0),
            (s, 0.0),
            (s, s),
            (0.0, s),
        ];
        let to = [
            (corners.tl.x as f32, corners.tl.y as f32),
            (corners.tr.x as f32, corners.tr.y as f32),
            (corners.br.x as f32, corners.br.y as f32),
            (corners.bl.x as f32, corners.bl.y as f32),
        ];
        Projection::from_control_points(from, to)
    }

    /// Warp `source` so that the quadrilateral described by `corners` maps
    /// onto an axis-aligned `size x size` output image.
    #[must_use]
    pub fn rectify(&self, source: &RgbImage, corners: &Corners) -> Option<RgbImage> {
        let projection = self.projection(corners)?;
        let out = warp(source, &projection, Interpolation::Bilinear, image::Rgb([255, 255, 255]));
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_corners_produce_identity_like_projection() {
        let corners = Corners {
            tl: Point::new(0.0, 0.0),
            tr: Point::new(100.0, 0.0),
            bl: Point::new(0.0, 100.0),
            br: Point::new(100.0, 100.0),
        };
        let deskewer = Deskewer::new(100);
        assert!(deskewer.projection(&corners).is_some());
    }

    #[test]
    fn none_corner_yields_no_projection() {
        let corners = Corners {
            tl: Point::none(),
            tr: Point::new(100.0, 0.0),
            bl: Point::new(0.0, 100.0),
            br: Point::new(100.0, 100.0),
        };
        let deskewer = Deskewer::new(100);
        assert!(deskewer.projection(&corners).is_none());
    }
}
