//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through an injected [`Randomizer`]
//! - Stable iteration order (lane by lane, obstacle by obstacle)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod grid;
pub mod input;
pub mod lane;
pub mod piece;
pub mod random;
pub mod shape;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, cell_is_free, first_hit, overlap, shape_fits};
pub use error::{GridError, SimError};
pub use grid::{BlockColor, Cell, Grid};
pub use input::{Command, CommandSlot};
pub use lane::{LaneActor, Obstacle, spawn_obstacles};
pub use piece::{ActivePiece, GravityOutcome, LockReport, PieceController};
pub use random::{Randomizer, Scripted, seeded};
pub use shape::{Shape, ShapeKind};
pub use snapshot::Snapshot;
pub use state::{GameEvent, GameOverCause, GamePhase, GameState};
pub use tick::{Driver, LoopStatus, tick};
