//! Toro Snake - snake on a toroidal grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, obstacles, round state)
//! - `platform`: Input/render boundary and the headless session loop
//! - `settings`: Data-driven round configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{DirectionPolicy, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions (640x480 screen at 20 px per cell)
    pub const GRID_WIDTH: u32 = 32;
    pub const GRID_HEIGHT: u32 = 24;

    /// Snake length at round start
    pub const INITIAL_SNAKE_LENGTH: usize = 1;

    /// An obstacle appears every time the snake length reaches a multiple of this
    pub const OBSTACLE_SPAWN_MODULUS: usize = 3;

    /// Outer loop tick rate
    pub const TICKS_PER_SECOND: u32 = 20;

    /// Random samples tried before falling back to a full scan of free cells
    pub const MAX_SAMPLE_ATTEMPTS: u32 = 64;

    /// Seed used when settings do not provide one
    pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;
}
