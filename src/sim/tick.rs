//! Per-tick state transition
//!
//! One call applies the input, moves the snake and resolves food,
//! obstacle and self-collision outcomes.

use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::grid::{Cell, Direction};
use super::snake::MoveOutcome;
use super::state::RoundController;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested turn, if any
    pub direction: Option<Direction>,
}

impl TickInput {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    Moved { head: Cell },
    /// Head reached the food; growth is realized on the following tick(s)
    Ate { head: Cell },
    SelfCollision { head: Cell },
    HitObstacle { head: Cell },
    /// Food had nowhere to go after being eaten; the round was reset
    FoodUnplaceable,
}

impl TickEvent {
    pub fn caused_reset(&self) -> bool {
        matches!(
            self,
            TickEvent::SelfCollision { .. }
                | TickEvent::HitObstacle { .. }
                | TickEvent::FoodUnplaceable
        )
    }
}

/// Positions for the render boundary after a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    /// Sorted
    pub obstacles: Vec<Cell>,
    /// Whole board must be redrawn
    pub was_reset: bool,
    /// Tail cell freed this tick, for incremental erase
    pub vacated: Option<Cell>,
}

impl RenderFrame {
    pub fn capture(round: &RoundController, was_reset: bool, vacated: Option<Cell>) -> Self {
        Self {
            snake: round.snake.body_cells().iter().copied().collect(),
            food: round.food.position(),
            obstacles: round.obstacles.iter().collect(),
            was_reset,
            vacated: if was_reset { None } else { vacated },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub event: TickEvent,
    pub frame: RenderFrame,
}

/// Advance the round by one tick
///
/// Errors only if a reset cannot place food, which validated settings rule out.
pub fn tick(round: &mut RoundController, input: &TickInput) -> Result<TickReport, SimError> {
    if let Some(direction) = input.direction {
        round.snake.set_pending_direction(direction);
    }
    round.stats.ticks += 1;

    let grid = round.grid;
    let (head, vacated) = match round.snake.tick(&grid) {
        MoveOutcome::SelfCollision { head } => {
            log::info!("Self collision at {:?}, length {}", head, round.snake.len());
            return reset_report(round, TickEvent::SelfCollision { head });
        }
        MoveOutcome::Moved { head, vacated } => (head, vacated),
    };

    if round.obstacles.contains(head) {
        log::info!("Hit obstacle at {:?}, length {}", head, round.snake.len());
        return reset_report(round, TickEvent::HitObstacle { head });
    }

    let event = if head == round.food.position() {
        round.snake.grow(1);
        round.stats.food_eaten += 1;

        if let Err(e) = round
            .food
            .relocate(&grid, &mut round.rng, &[&round.snake, &round.obstacles])
        {
            log::error!("Food placement failed: {e}; forcing reset");
            return reset_report(round, TickEvent::FoodUnplaceable);
        }

        match round.obstacles.maybe_spawn(
            round.snake.committed_len(),
            &grid,
            &mut round.rng,
            &[&round.snake, &round.food],
        ) {
            Ok(Some(_)) => round.stats.obstacles_spawned += 1,
            Ok(None) => {}
            Err(SimError::GridFull { .. }) => {
                log::warn!("No room for a new obstacle; skipping spawn");
            }
            Err(e) => return Err(e),
        }

        TickEvent::Ate { head }
    } else {
        TickEvent::Moved { head }
    };

    round.stats.best_length = round.stats.best_length.max(round.snake.len());

    Ok(TickReport {
        event,
        frame: RenderFrame::capture(round, false, vacated),
    })
}

fn reset_report(round: &mut RoundController, event: TickEvent) -> Result<TickReport, SimError> {
    round.stats.best_length = round.stats.best_length.max(round.snake.len());
    round.reset()?;
    Ok(TickReport {
        event,
        frame: RenderFrame::capture(round, true, None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::food::Food;
    use crate::sim::occupancy::Occupancy;
    use crate::sim::snake::Snake;
    use crate::sim::state::RoundPhase;

    fn small_round(width: u32, height: u32, modulus: usize) -> RoundController {
        RoundController::new(Settings {
            grid_width: width,
            grid_height: height,
            obstacle_spawn_modulus: modulus,
            seed: 12345,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_four_by_four_regression() {
        let mut round = small_round(4, 4, 3);
        round.snake = Snake::new(Cell::new(1, 1), Direction::Right);
        round.food = Food::at(Cell::new(3, 1));
        let idle = TickInput::default();

        let r1 = tick(&mut round, &idle).unwrap();
        assert_eq!(r1.event, TickEvent::Moved { head: Cell::new(2, 1) });
        assert_eq!(r1.frame.snake, vec![Cell::new(2, 1)]);
        assert_eq!(r1.frame.vacated, Some(Cell::new(1, 1)));

        let r2 = tick(&mut round, &idle).unwrap();
        assert_eq!(r2.event, TickEvent::Ate { head: Cell::new(3, 1) });
        assert_eq!(r2.frame.snake, vec![Cell::new(3, 1)]);
        assert_eq!(round.snake.growth_pending(), 1);
        assert_ne!(round.food.position(), Cell::new(3, 1));

        // Pin the relocated food off the snake's path
        round.food = Food::at(Cell::new(1, 3));

        // Wraps off the right edge and realizes the growth
        let r3 = tick(&mut round, &idle).unwrap();
        assert_eq!(r3.event, TickEvent::Moved { head: Cell::new(0, 1) });
        assert!(!r3.frame.was_reset);
        assert_eq!(r3.frame.snake, vec![Cell::new(0, 1), Cell::new(3, 1)]);
        assert_eq!(r3.frame.vacated, None);
        assert_eq!(round.snake.len(), 2);
        assert!(round.obstacles.is_empty());
        assert_eq!(round.stats.food_eaten, 1);
        assert_eq!(round.stats.best_length, 2);
    }

    #[test]
    fn test_reversal_input_is_dropped() {
        let mut round = small_round(10, 10, 0);
        round.snake = Snake::new(Cell::new(4, 4), Direction::Right);
        round.food = Food::at(Cell::new(0, 9));

        let report = tick(&mut round, &TickInput::steer(Direction::Left)).unwrap();
        assert_eq!(report.event, TickEvent::Moved { head: Cell::new(5, 4) });
        assert_eq!(round.snake.direction(), Direction::Right);
    }

    #[test]
    fn test_self_collision_resets_round() {
        let mut round = small_round(10, 10, 3);
        round.snake = Snake::from_cells(
            [
                Cell::new(3, 1),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(3, 2),
                Cell::new(4, 2),
            ],
            Direction::Right,
        )
        .unwrap();
        round.food = Food::at(Cell::new(9, 9));
        round.obstacles.insert(Cell::new(7, 7));

        let report = tick(&mut round, &TickInput::steer(Direction::Down)).unwrap();
        assert_eq!(report.event, TickEvent::SelfCollision { head: Cell::new(3, 2) });
        assert!(report.frame.was_reset);
        assert_eq!(report.frame.snake, vec![round.start_cell()]);
        assert!(report.frame.obstacles.is_empty());
        assert_eq!(report.frame.vacated, None);
        assert_eq!(round.phase, RoundPhase::Running);
        assert_eq!(round.stats.resets, 1);
        assert_eq!(round.stats.best_length, 5);
    }

    #[test]
    fn test_obstacle_collision_resets_round() {
        let mut round = small_round(10, 10, 3);
        round.snake = Snake::new(Cell::new(4, 4), Direction::Up);
        round.food = Food::at(Cell::new(0, 0));
        round.obstacles.insert(Cell::new(4, 3));

        let report = tick(&mut round, &TickInput::default()).unwrap();
        assert_eq!(report.event, TickEvent::HitObstacle { head: Cell::new(4, 3) });
        assert!(report.event.caused_reset());
        assert!(report.frame.was_reset);
        assert!(round.obstacles.is_empty());
        assert_eq!(round.snake.len(), 1);
    }

    #[test]
    fn test_obstacles_accumulate_with_growth() {
        let mut round = small_round(20, 20, 3);
        let mut eaten = 0usize;

        for _ in 0..10 {
            let head = round.snake.head_cell();
            let current = round.snake.direction();
            let Some(turn) = Direction::ALL.into_iter().find(|&d| {
                let next = round.grid.advance(head, d);
                !d.is_opposite(current)
                    && !round.obstacles.contains(next)
                    && !round.snake.occupies(next)
            }) else {
                panic!("snake boxed in");
            };
            round.food = Food::at(round.grid.advance(head, turn));

            let report = tick(&mut round, &TickInput::steer(turn)).unwrap();
            assert!(matches!(report.event, TickEvent::Ate { .. }));
            eaten += 1;

            assert_eq!(round.snake.committed_len(), eaten + 1);
            assert_eq!(round.obstacles.len(), (eaten + 1) / 3);
            assert!(!round.obstacles.contains(round.food.position()));
            assert!(!round.snake.occupies(round.food.position()));
        }
        assert_eq!(round.stats.obstacles_spawned, 3);
    }

    #[test]
    fn test_food_unplaceable_forces_reset() {
        // 3x1 board: snake of two cells eats the last free cell
        let mut round = small_round(3, 1, 0);
        round.snake =
            Snake::from_cells([Cell::new(1, 0), Cell::new(0, 0)], Direction::Right).unwrap();
        round.snake.grow(1);
        round.food = Food::at(Cell::new(2, 0));

        let report = tick(&mut round, &TickInput::default()).unwrap();
        assert_eq!(report.event, TickEvent::FoodUnplaceable);
        assert!(report.frame.was_reset);
        assert_eq!(round.snake.len(), 1);
        assert_ne!(round.food.position(), round.snake.head_cell());
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            seed: 99999,
            ..Default::default()
        };
        let mut a = RoundController::new(settings.clone()).unwrap();
        let mut b = RoundController::new(settings).unwrap();

        let inputs = [
            TickInput::steer(Direction::Up),
            TickInput::default(),
            TickInput::steer(Direction::Left),
            TickInput::default(),
            TickInput::steer(Direction::Down),
        ];
        for i in 0..200 {
            let input = inputs[i % inputs.len()];
            assert_eq!(tick(&mut a, &input).unwrap(), tick(&mut b, &input).unwrap());
        }
        assert_eq!(a.stats, b.stats);
    }
}
