//! Round state and lifecycle
//!
//! A round owns the snake, the food, the obstacles and the RNG. A reset
//! rebuilds all of them from scratch; nothing carries over except the
//! RNG stream and the running stats.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::food::Food;
use super::grid::{Cell, Direction, GridSpace};
use super::obstacles::Obstacles;
use super::snake::Snake;
use crate::settings::{DirectionPolicy, Settings};

/// Round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Normal play
    Running,
    /// Rebuilding after a collision; collapses back to Running within the tick
    Resetting,
}

/// Running counters across resets (not persisted)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub ticks: u64,
    pub food_eaten: u64,
    pub resets: u64,
    pub obstacles_spawned: u64,
    /// Longest snake seen since start
    pub best_length: usize,
}

/// Owner of all round state
#[derive(Debug, Clone)]
pub struct RoundController {
    pub settings: Settings,
    pub grid: GridSpace,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Obstacles,
    pub phase: RoundPhase,
    pub stats: RoundStats,
    pub(crate) rng: Pcg32,
}

impl RoundController {
    /// Start a fresh round: centred one-cell snake, placed food, no obstacles
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let grid = GridSpace::new(settings.grid_width, settings.grid_height)?;
        let mut rng = Pcg32::seed_from_u64(settings.seed);

        let (snake, food, obstacles) = fresh_entities(&settings, &grid, &mut rng)?;
        log::info!(
            "Round started on {}x{} grid (seed {}), heading {:?}",
            grid.width(),
            grid.height(),
            settings.seed,
            snake.direction()
        );

        Ok(Self {
            stats: RoundStats {
                best_length: snake.len(),
                ..Default::default()
            },
            settings,
            grid,
            snake,
            food,
            obstacles,
            phase: RoundPhase::Running,
            rng,
        })
    }

    /// Replace snake, food and obstacles with a fresh set
    pub fn reset(&mut self) -> Result<(), SimError> {
        // Build first so a failure leaves the round untouched and Running
        let (snake, food, obstacles) = fresh_entities(&self.settings, &self.grid, &mut self.rng)?;
        self.phase = RoundPhase::Resetting;
        self.snake = snake;
        self.food = food;
        self.obstacles = obstacles;
        self.stats.resets += 1;
        self.phase = RoundPhase::Running;
        log::info!(
            "Round reset #{} (best length so far {})",
            self.stats.resets,
            self.stats.best_length
        );
        Ok(())
    }

    /// Cell where every new snake starts
    pub fn start_cell(&self) -> Cell {
        self.grid.center()
    }
}

fn fresh_entities(
    settings: &Settings,
    grid: &GridSpace,
    rng: &mut Pcg32,
) -> Result<(Snake, Food, Obstacles), SimError> {
    let direction = match settings.initial_direction {
        DirectionPolicy::Fixed(d) => d,
        DirectionPolicy::Random => Direction::ALL[rng.random_range(0..Direction::ALL.len())],
    };
    let snake = Snake::new(grid.center(), direction);
    let obstacles = Obstacles::new(settings.obstacle_spawn_modulus);
    let food = Food::spawn(grid, rng, &[&snake, &obstacles])?;
    Ok((snake, food, obstacles))
}
