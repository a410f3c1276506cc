//! Round settings
//!
//! Loaded from a JSON file on native builds; every field falls back to its
//! default when missing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Direction, GridSpace, SimError};

/// How a new snake picks its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionPolicy {
    /// Always start heading this way
    Fixed(Direction),
    /// Uniform draw from the round RNG on every (re)start
    Random,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        DirectionPolicy::Fixed(Direction::Right)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] SimError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    pub grid_width: u32,
    pub grid_height: u32,

    // === Rules ===
    /// One obstacle per multiple of this snake length (0 = no obstacles)
    pub obstacle_spawn_modulus: usize,
    pub initial_direction: DirectionPolicy,

    // === Determinism ===
    pub seed: u64,

    // === Outer loop ===
    /// Pacing for the driver; the core itself is step-driven
    pub ticks_per_second: u32,
    /// Stop a headless session after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            obstacle_spawn_modulus: OBSTACLE_SPAWN_MODULUS,
            initial_direction: DirectionPolicy::default(),
            seed: DEFAULT_SEED,
            ticks_per_second: TICKS_PER_SECOND,
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Check the grid can hold a one-cell snake plus food
    pub fn validate(&self) -> Result<(), SimError> {
        let grid = GridSpace::new(self.grid_width, self.grid_height)?;
        if grid.area() < INITIAL_SNAKE_LENGTH + 1 {
            return Err(SimError::InvalidSettings(format!(
                "{}x{} grid has no room for food",
                self.grid_width, self.grid_height
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(SimError::InvalidSettings(
                "ticks_per_second must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Like `load`, but falls back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {e})",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
