//! The snake: ordered body, direction state, movement and growth

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, GridSpace};
use super::occupancy::Occupancy;

/// Result of advancing the snake one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Head moved; `vacated` is the tail cell freed this tick (None while growing)
    Moved { head: Cell, vacated: Option<Cell> },
    /// Head would enter its own body; the snake was not moved
    SelfCollision { head: Cell },
}

/// A snake. Index 0 of the body is the head, the back is the tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnakeRepr")]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    /// At most one buffered turn per tick
    pending: Option<Direction>,
    /// Ticks left during which the tail stays put
    growth_pending: u32,
}

/// Wire shape of `Snake`, checked before it becomes one
#[derive(Deserialize)]
struct SnakeRepr {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
    growth_pending: u32,
}

impl TryFrom<SnakeRepr> for Snake {
    type Error = String;

    fn try_from(repr: SnakeRepr) -> Result<Self, Self::Error> {
        if repr.body.is_empty() {
            return Err("snake body must hold at least one cell".to_string());
        }
        if repr.pending.is_some_and(|p| p.is_opposite(repr.direction)) {
            return Err(format!(
                "pending {:?} reverses current {:?}",
                repr.pending, repr.direction
            ));
        }
        Ok(Self {
            body: repr.body,
            direction: repr.direction,
            pending: repr.pending,
            growth_pending: repr.growth_pending,
        })
    }
}

impl Snake {
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction,
            pending: None,
            growth_pending: 0,
        }
    }

    /// Build a snake from explicit body cells (head first)
    ///
    /// Returns None for an empty body.
    pub fn from_cells(
        cells: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending: None,
            growth_pending: 0,
        })
    }

    /// Buffer a turn for the next tick. Reversals are silently ignored and a
    /// later call before the tick overwrites an earlier one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction.is_opposite(self.direction) {
            return;
        }
        self.pending = Some(direction);
    }

    /// Advance one cell in the current (or freshly applied pending) direction
    pub fn tick(&mut self, grid: &GridSpace) -> MoveOutcome {
        if let Some(next) = self.pending.take() {
            self.direction = next;
        }

        let new_head = grid.advance(self.head_cell(), self.direction);
        if self.would_collide(new_head) {
            return MoveOutcome::SelfCollision { head: new_head };
        }

        self.body.push_front(new_head);
        let vacated = if self.growth_pending > 0 {
            self.growth_pending -= 1;
            None
        } else {
            // Chasing the tail frees nothing
            self.body.pop_back().filter(|&tail| tail != new_head)
        };

        MoveOutcome::Moved {
            head: new_head,
            vacated,
        }
    }

    /// Whether moving the head onto `cell` this tick hits the body.
    ///
    /// The tail is left out unless growth keeps it in place.
    pub fn would_collide(&self, cell: Cell) -> bool {
        let check_len = if self.growth_pending > 0 {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(check_len).any(|&c| c == cell)
    }

    /// Schedule `n` cells of growth, realized one per following tick
    pub fn grow(&mut self, n: u32) {
        self.growth_pending = self.growth_pending.saturating_add(n);
    }

    pub fn head_cell(&self) -> Cell {
        // Body is never empty
        self.body[0]
    }

    pub fn body_cells(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Length once all scheduled growth has been realized
    pub fn committed_len(&self) -> usize {
        self.body.len() + self.growth_pending as usize
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    /// Back to a single cell with no buffered turn or growth
    pub fn reset(&mut self, start: Cell, direction: Direction) {
        *self = Self::new(start, direction);
    }
}

impl Occupancy for Snake {
    fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}
