//! Render snapshot
//!
//! A borrowed, read-only view of the state. Presentation code polls one per
//! frame and can never mutate the simulation through it.

use serde::Serialize;

use super::grid::{Cell, Grid};
use super::lane::{LaneActor, Obstacle};
use super::piece::ActivePiece;
use super::shape::ShapeKind;
use super::state::GamePhase;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub grid: &'a Grid,
    pub piece: &'a ActivePiece,
    /// Lookahead shape
    pub next: ShapeKind,
    pub actor: &'a LaneActor,
    pub obstacles: &'a [Obstacle],
    pub lines_cleared: u64,
    pub time_ticks: u64,
}

impl Snapshot<'_> {
    /// Settled cells with the active piece's visible cells overlaid
    pub fn composed_rows(&self) -> Vec<Vec<Cell>> {
        let mut rows: Vec<Vec<Cell>> = self.grid.rows().map(<[Cell]>::to_vec).collect();
        for (x, y) in self.piece.cells() {
            if self.grid.contains(x, y) {
                rows[y as usize][x as usize] = Some(self.piece.color);
            }
        }
        rows
    }

    /// Compact text picture of the grid, `#` settled, `@` falling, `.` empty
    pub fn grid_ascii(&self) -> String {
        let piece: Vec<_> = self.piece.cells().collect();
        let mut out = String::with_capacity((self.grid.width() + 1) * self.grid.height());
        for (y, row) in self.grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let ch = if piece.contains(&(x as i32, y as i32)) {
                    '@'
                } else if cell.is_some() {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
