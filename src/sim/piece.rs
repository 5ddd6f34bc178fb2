//! Active piece control
//!
//! Moves and rotations are trial-then-commit: the candidate placement is
//! checked against the grid and only adopted when it fits. There are no wall
//! kicks, a blocked rotation simply keeps the old orientation.

use serde::Serialize;

use super::collision::shape_fits;
use super::error::GridError;
use super::grid::{BlockColor, Grid};
use super::random::Randomizer;
use super::shape::{Shape, ShapeKind};

/// The single falling piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    /// Current orientation
    pub shape: Shape,
    /// Grid position of the shape's top-left corner
    pub x: i32,
    pub y: i32,
    pub color: BlockColor,
}

impl ActivePiece {
    /// New piece at the spawn position for a grid `grid_width` wide.
    ///
    /// Horizontally centered. Vertically placed so the lowest filled row of
    /// the shape sits on row 0 and everything above it is off-screen.
    pub fn spawn(kind: ShapeKind, color: BlockColor, grid_width: usize) -> Self {
        let shape = kind.shape();
        let x = (grid_width / 2) as i32 - (shape.width() / 2) as i32;
        let y = -(shape.lowest_filled_row().unwrap_or(0) as i32);
        Self {
            kind,
            shape,
            x,
            y,
            color,
        }
    }

    /// Absolute grid coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece fits at its current placement
    pub fn fits(&self, grid: &Grid) -> bool {
        shape_fits(grid, &self.shape, self.x, self.y)
    }
}

/// What a gravity step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GravityOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece could not fall and was committed to the grid
    Locked(LockReport),
}

/// Details of a lock, for events and logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    pub locked: ShapeKind,
    /// Cells written into the grid (cells above row 0 are dropped)
    pub committed: usize,
    /// Full rows removed after the commit
    pub lines_cleared: usize,
    pub spawned: ShapeKind,
    /// The fresh piece overlaps settled cells at its spawn position
    pub spawn_blocked: bool,
}

/// Owns the active piece and the lookahead
#[derive(Debug, Clone)]
pub struct PieceController<R> {
    piece: ActivePiece,
    next: ShapeKind,
    rng: R,
}

impl<R: Randomizer> PieceController<R> {
    /// Draw the first piece and lookahead from `rng`
    pub fn new(grid: &Grid, mut rng: R) -> Self {
        let kind = draw_kind(&mut rng);
        let color = draw_color(&mut rng);
        let next = draw_kind(&mut rng);
        Self {
            piece: ActivePiece::spawn(kind, color, grid.width()),
            next,
            rng,
        }
    }

    /// Start from a known piece and lookahead
    pub fn with_piece(piece: ActivePiece, next: ShapeKind, rng: R) -> Self {
        Self { piece, next, rng }
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn next(&self) -> ShapeKind {
        self.next
    }

    /// Shift the piece by `(dx, dy)` if the target placement is legal
    pub fn try_move(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.piece.x + dx, self.piece.y + dy);
        if !shape_fits(grid, &self.piece.shape, x, y) {
            return false;
        }
        self.piece.x = x;
        self.piece.y = y;
        true
    }

    /// Rotate clockwise in place if the rotated shape is legal
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let rotated = self.piece.shape.rotated();
        if !shape_fits(grid, &rotated, self.piece.x, self.piece.y) {
            return false;
        }
        self.piece.shape = rotated;
        true
    }

    /// One automatic descent.
    ///
    /// When the piece cannot fall it is committed, full rows are cleared,
    /// the lookahead becomes the new piece and a fresh lookahead is drawn.
    pub fn tick_gravity(&mut self, grid: &mut Grid) -> Result<GravityOutcome, GridError> {
        if self.try_move(grid, 0, 1) {
            return Ok(GravityOutcome::Fell);
        }

        let color = self.piece.color;
        let cells: Vec<_> = self
            .piece
            .cells()
            .filter(|&(_, y)| y >= 0)
            .map(|(x, y)| (x, y, color))
            .collect();
        grid.commit(&cells)?;
        let lines_cleared = grid.clear_full_rows();
        let locked = self.piece.kind;

        let spawned = self.spawn_next(grid.width());
        let spawn_blocked = !self.piece.fits(grid);

        Ok(GravityOutcome::Locked(LockReport {
            locked,
            committed: cells.len(),
            lines_cleared,
            spawned,
            spawn_blocked,
        }))
    }

    /// Replace the active piece with the lookahead and redraw the lookahead
    fn spawn_next(&mut self, grid_width: usize) -> ShapeKind {
        let kind = self.next;
        let color = draw_color(&mut self.rng);
        self.piece = ActivePiece::spawn(kind, color, grid_width);
        self.next = draw_kind(&mut self.rng);
        kind
    }
}

fn draw_kind(rng: &mut impl Randomizer) -> ShapeKind {
    ShapeKind::ALL[rng.pick(ShapeKind::ALL.len())]
}

fn draw_color(rng: &mut impl Randomizer) -> BlockColor {
    BlockColor::ALL[rng.pick(BlockColor::ALL.len())]
}
