//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell of movement per tick
//! - Seeded RNG only
//! - Stable iteration order for obstacles
//! - No rendering or platform dependencies

pub mod error;
pub mod food;
pub mod grid;
pub mod obstacles;
pub mod occupancy;
pub mod snake;
pub mod state;
pub mod tick;

pub use error::SimError;
pub use food::Food;
pub use grid::{Cell, Direction, GridSpace};
pub use obstacles::Obstacles;
pub use occupancy::{Occupancy, is_free, pick_random_free};
pub use snake::{MoveOutcome, Snake};
pub use state::{RoundController, RoundPhase, RoundStats};
pub use tick::{RenderFrame, TickEvent, TickInput, TickReport, tick};
