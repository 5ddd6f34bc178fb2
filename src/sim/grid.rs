//! Settled-cell grid and line clearing
//!
//! Row-major flat storage, `(x, y)` with `x` growing right and `y` growing
//! down. Row 0 is the top visible row. Dimensions are fixed at construction.

use serde::{Deserialize, Serialize};

use super::error::GridError;

/// Color tag carried by pieces and settled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockColor {
    Red,
    Green,
    Blue,
}

impl BlockColor {
    pub const ALL: [BlockColor; 3] = [BlockColor::Red, BlockColor::Green, BlockColor::Blue];
}

/// `None` is empty, `Some(color)` is a settled block
pub type Cell = Option<BlockColor>;

/// The settled-cell board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index for `(x, y)`, `None` when outside `[0,width) x [0,height)`
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Whether `(x, y)` lies inside the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Cell at `(x, y)`, `None` when out of range
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether a settled block sits at `(x, y)`
    pub fn is_occupied(&self, x: i32, y: i32) -> Result<bool, GridError> {
        self.get(x, y)
            .map(|cell| cell.is_some())
            .ok_or(GridError::OutOfRange { x, y })
    }

    /// Mark every listed cell as settled.
    ///
    /// All-or-nothing: every coordinate is checked before any cell is
    /// written, so a failed commit leaves the grid untouched.
    pub fn commit(&mut self, cells: &[(i32, i32, BlockColor)]) -> Result<(), GridError> {
        for (i, &(x, y, _)) in cells.iter().enumerate() {
            let idx = self.index(x, y).ok_or(GridError::OutOfRange { x, y })?;
            let repeated = cells[..i].iter().any(|&(px, py, _)| px == x && py == y);
            if self.cells[idx].is_some() || repeated {
                return Err(GridError::Occupied { x, y });
            }
        }
        for &(x, y, color) in cells {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(color);
            }
        }
        Ok(())
    }

    /// One row as a slice, `None` when out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row, dropping the rows above down to fill the gaps.
    ///
    /// Surviving rows keep their relative order and the same number of empty
    /// rows is inserted at the top. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0;

        // Two pointers, scanning bottom to top
        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Number of settled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
