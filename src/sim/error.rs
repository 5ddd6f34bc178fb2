//! Simulation faults
//!
//! Only invariant violations are errors. Rejected moves are plain `bool`s and
//! game over is a phase, not a failure.

use thiserror::Error;

/// A caller broke a grid precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfRange { x: i32, y: i32 },
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },
}

/// Unrecoverable simulation fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invariant violation: {0}")]
    Invariant(#[from] GridError),
}
