//! Collision detection
//!
//! One primitive, the axis-aligned box overlap, serves both subsystems:
//! piece cells against the settled grid and the actor against obstacles.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::shape::Shape;

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test, see [`overlap`]
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlap(self, other)
    }
}

/// True when the interiors of `a` and `b` intersect.
///
/// Strict on all four sides: boxes that only share an edge or a corner do
/// not overlap.
#[inline]
pub fn overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Whether a single-cell box at `(x, y)` is open.
///
/// Columns must lie in `[0, width)` and rows below the floor are rejected.
/// Rows above row 0 are only checked horizontally.
pub fn cell_is_free(grid: &Grid, x: i32, y: i32) -> bool {
    if x < 0 || x as usize >= grid.width() || y >= grid.height() as i32 {
        return false;
    }
    if y < 0 {
        return true;
    }
    matches!(grid.get(x, y), Some(None))
}

/// Whether `shape` placed with its top-left at `(x, y)` fits the grid
pub fn shape_fits(grid: &Grid, shape: &Shape, x: i32, y: i32) -> bool {
    shape
        .cells()
        .all(|(dx, dy)| cell_is_free(grid, x + dx, y + dy))
}

/// Index of the first obstacle box hit by `actor`, if any
pub fn first_hit(actor: &Rect, boxes: impl IntoIterator<Item = Rect>) -> Option<usize> {
    boxes.into_iter().position(|b| overlap(actor, &b))
}
