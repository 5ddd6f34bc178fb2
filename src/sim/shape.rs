//! Piece geometry catalog
//!
//! Every shape is a rectangular bitmask. Rotation builds a new value and
//! never touches the catalog.

use serde::{Deserialize, Serialize};

/// Catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// Catalog order, used for uniform draws
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    fn mask(self) -> &'static [&'static [u8]] {
        match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            ShapeKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            ShapeKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            ShapeKind::J => &[&[1, 1, 1], &[0, 0, 1]],
            ShapeKind::L => &[&[1, 1, 1], &[1, 0, 0]],
        }
    }

    /// Spawn orientation of this catalog entry
    pub fn shape(self) -> Shape {
        Shape::from_mask(self.mask())
    }
}

/// Immutable rectangular bitmask, `rows[y][x]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build from 0/1 rows. Rows must share one length.
    pub fn from_mask(mask: &[&[u8]]) -> Self {
        Self {
            rows: mask
                .iter()
                .map(|row| row.iter().map(|&bit| bit != 0).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Clockwise quarter turn: reverse the row order, then transpose
    pub fn rotated(&self) -> Shape {
        let (h, w) = (self.height(), self.width());
        let rows = (0..w)
            .map(|x| (0..h).map(|y| self.rows[h - 1 - y][x]).collect())
            .collect();
        Shape { rows }
    }

    /// Offsets `(dx, dy)` of every set bit, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &bit)| bit)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// Index of the lowest row holding a set bit
    pub fn lowest_filled_row(&self) -> Option<usize> {
        self.rows.iter().rposition(|row| row.iter().any(|&bit| bit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_catalog_pieces_have_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.shape().cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // ###      .#
        // .#.  ->  ##
        //          .#
        let rotated = ShapeKind::T.shape().rotated();
        assert_eq!(rotated, Shape::from_mask(&[&[0, 1], &[1, 1], &[0, 1]]));
    }

    #[test]
    fn test_rotate_i_goes_vertical() {
        let rotated = ShapeKind::I.shape().rotated();
        assert_eq!(rotated.width(), 1);
        assert_eq!(rotated.height(), 4);
    }

    #[test]
    fn test_rotate_does_not_touch_catalog() {
        let original = ShapeKind::L.shape();
        let _ = original.rotated();
        assert_eq!(original, ShapeKind::L.shape());
    }

    #[test]
    fn test_four_rotations_restore_every_catalog_shape() {
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            let half = shape.rotated().rotated();
            assert_eq!(half.width(), shape.width());
            assert_eq!(half.rotated().rotated(), shape, "{kind:?}");
        }
    }

    #[test]
    fn test_lowest_filled_row() {
        assert_eq!(ShapeKind::I.shape().lowest_filled_row(), Some(0));
        assert_eq!(ShapeKind::T.shape().lowest_filled_row(), Some(1));
        assert_eq!(Shape::from_mask(&[&[1, 0], &[0, 0]]).lowest_filled_row(), Some(0));
        assert_eq!(Shape::from_mask(&[&[0, 0]]).lowest_filled_row(), None);
    }

    proptest! {
        #[test]
        fn prop_rotate_four_times_is_identity(
            (w, bits) in (1usize..5, 1usize..5).prop_flat_map(|(w, h)| {
                (Just(w), proptest::collection::vec(0u8..2, w * h))
            }),
        ) {
            let rows: Vec<&[u8]> = bits.chunks(w).collect();
            let shape = Shape::from_mask(&rows);
            let back = shape.rotated().rotated().rotated().rotated();
            prop_assert_eq!(back, shape);
        }
    }
}
