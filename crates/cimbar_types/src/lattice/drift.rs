//! Per-cell drift tracking: how far a decoded cell's best-fit sampling
//! window was offset from its nominal center.

/// A small pixel offset, one of the 9 positions in the 3x3 drift-search
/// grid centered on a cell's nominal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellDrift {
    /// Horizontal offset in pixels, typically in `-1..=1`.
    pub dx: i32,
    /// Vertical offset in pixels, typically in `-1..=1`.
    pub dy: i32,
}

impl CellDrift {
    /// No drift: the nominal cell center.
    pub const ZERO: CellDrift = CellDrift { dx: 0, dy: 0 };

    /// Build a drift from a 3x3 grid index, row-major with `0` at
    /// `(-1, -1)` and `8` at `(1, 1)`.
    #[must_use]
    pub fn from_grid_index(index: usize) -> Self {
        let index = index.min(8) as i32;
        CellDrift {
            dx: (index % 3) - 1,
            dy: (index / 3) - 1,
        }
    }

    /// Inverse of [`CellDrift::from_grid_index`]: map a (clamped) drift back
    /// onto its 3x3 grid index.
    #[must_use]
    pub fn to_grid_index(self) -> usize {
        let clamped = self.clamped();
        let dx = clamped.dx + 1;
        let dy = clamped.dy + 1;
        (dy * 3 + dx) as usize
    }

    /// Clamp a drift estimate so it never points more than one cell away,
    /// which would suggest the caller picked the wrong neighbor entirely
    /// rather than a small offset.
    #[must_use]
    pub fn clamped(self) -> Self {
        CellDrift {
            dx: self.dx.clamp(-1, 1),
            dy: self.dy.clamp(-1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_index_four_is_center() {
        assert_eq!(CellDrift::from_grid_index(4), CellDrift::ZERO);
    }

    #[test]
    fn grid_index_zero_is_top_left() {
        assert_eq!(CellDrift::from_grid_index(0), CellDrift { dx: -1, dy: -1 });
    }

    #[test]
    fn grid_index_eight_is_bottom_right() {
        assert_eq!(CellDrift::from_grid_index(8), CellDrift { dx: 1, dy: 1 });
    }

    #[test]
    fn to_grid_index_is_the_inverse_of_from_grid_index() {
        for index in 0..9 {
            assert_eq!(CellDrift::from_grid_index(index).to_grid_index(), index);
        }
    }
}
