//! Game configuration
//!
//! Fixed at construction and never mutated afterwards. Loaded from JSON on
//! native builds, otherwise the defaults are used.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading or validating a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Obstacle tuning for a single lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Signed horizontal speed in field units per tick
    pub speed: f32,
    /// Obstacle width in field units
    pub width: f32,
    /// Number of obstacles in the lane
    pub count: usize,
}

impl LaneConfig {
    pub const fn new(speed: f32, width: f32, count: usize) -> Self {
        Self { speed, width, count }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Puzzle grid ===
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Pixel size of one cell (presentation only)
    pub cell_size: f32,
    /// Seconds per automatic descent
    pub gravity_interval: f32,

    // === Lane field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Actor footprint (square)
    pub actor_size: f32,
    /// Distance covered by one actor move
    pub actor_step: f32,
    pub lane_height: f32,
    /// Lanes from top to bottom
    pub lanes: Vec<LaneConfig>,

    /// Run seed for reproducibility
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        // Two obstacle flavours, alternating per lane
        let lanes = (0..LANE_COUNT)
            .map(|i| {
                if i % 2 == 0 {
                    LaneConfig::new(2.0, 2.0 * LANE_HEIGHT, 2)
                } else {
                    LaneConfig::new(-1.0, 3.0 * LANE_HEIGHT, 1)
                }
            })
            .collect();

        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            gravity_interval: GRAVITY_INTERVAL,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            actor_size: ACTOR_SIZE,
            actor_step: ACTOR_STEP,
            lane_height: LANE_HEIGHT,
            lanes,
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Parse and validate a JSON document. Missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the structural constraints the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return invalid("grid dimensions exceed i32 range".into());
        }
        if !(self.gravity_interval > 0.0) {
            return invalid(format!(
                "gravity_interval must be positive, got {}",
                self.gravity_interval
            ));
        }
        if !(self.cell_size > 0.0) {
            return invalid(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if !(self.actor_size > 0.0)
            || self.actor_size > self.field_width
            || self.actor_size > self.field_height
        {
            return invalid(format!(
                "actor_size {} must be positive and fit in a {}x{} field",
                self.actor_size, self.field_width, self.field_height
            ));
        }
        if !(self.actor_step > 0.0) {
            return invalid(format!("actor_step must be positive, got {}", self.actor_step));
        }
        if !(self.lane_height > 0.0) {
            return invalid(format!("lane_height must be positive, got {}", self.lane_height));
        }
        let lanes_bottom = self.lane_height * (self.lanes.len() as f32 + 1.0);
        if lanes_bottom > self.field_height {
            return invalid(format!(
                "{} lanes of height {} do not fit in field height {}",
                self.lanes.len(),
                self.lane_height,
                self.field_height
            ));
        }
        for (i, lane) in self.lanes.iter().enumerate() {
            if !(lane.width > 0.0) || lane.width > self.field_width {
                return invalid(format!(
                    "lane {i}: obstacle width {} must be in (0, {}]",
                    lane.width, self.field_width
                ));
            }
            if !lane.speed.is_finite() {
                return invalid(format!("lane {i}: speed must be finite"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lanes.len(), LANE_COUNT);
        assert_eq!(config.lanes[0], LaneConfig::new(2.0, 60.0, 2));
        assert_eq!(config.lanes[1], LaneConfig::new(-1.0, 90.0, 1));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(r#"{ "grid_width": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.seed, 7);
        assert_eq!(config.grid_height, GRID_HEIGHT);
        assert_eq!(config.gravity_interval, GRAVITY_INTERVAL);
    }

    #[test]
    fn test_rejects_zero_gravity() {
        let err = Config::from_json_str(r#"{ "gravity_interval": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = Config {
            grid_height: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_oversized_obstacle() {
        let config = Config {
            lanes: vec![LaneConfig::new(1.0, 700.0, 1)],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_lanes_taller_than_field() {
        let config = Config {
            field_height: 100.0,
            lanes: vec![LaneConfig::new(1.0, 30.0, 1); 5],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("tetrogger-no-such-config.json");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_reads_file() {
        let config = Config {
            grid_width: 12,
            gravity_interval: 0.5,
            lanes: vec![LaneConfig::new(3.0, 45.0, 2)],
            seed: 99,
            ..Default::default()
        };
        let path = std::env::temp_dir().join(format!("tetrogger-config-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }

}
