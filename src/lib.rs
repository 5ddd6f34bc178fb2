//! Tetrogger - a falling-block puzzle and lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, pieces, lanes, collisions, game state)
//! - `platform`: Presentation contract and the headless native frontend
//! - `settings`: Construction-time configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Config, ConfigError, LaneConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Puzzle grid defaults (cells)
    pub const GRID_WIDTH: usize = 10;
    pub const GRID_HEIGHT: usize = 20;
    /// Pixel size of one grid cell (presentation only)
    pub const CELL_SIZE: f32 = 30.0;

    /// Seconds between automatic one-row descents
    pub const GRAVITY_INTERVAL: f32 = 0.25;

    /// Lane field defaults
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;
    pub const LANE_HEIGHT: f32 = 30.0;
    pub const LANE_COUNT: usize = 5;

    /// Actor defaults - square footprint, moves one footprint per step
    pub const ACTOR_SIZE: f32 = 30.0;
    pub const ACTOR_STEP: f32 = 30.0;

    /// Default run seed
    pub const DEFAULT_SEED: u64 = 0x7e7_f0_66e;
}
