//! Occupied-cell queries and free-cell placement
//!
//! Placement samples random cells a bounded number of times, then falls back
//! to scanning every free cell. It never loops forever on a crowded board.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::SimError;
use super::grid::{Cell, GridSpace};
use crate::consts::MAX_SAMPLE_ATTEMPTS;

/// Anything that holds grid cells
pub trait Occupancy {
    fn occupies(&self, cell: Cell) -> bool;
}

impl Occupancy for Cell {
    fn occupies(&self, cell: Cell) -> bool {
        *self == cell
    }
}

impl Occupancy for Vec<Cell> {
    fn occupies(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl Occupancy for HashSet<Cell> {
    fn occupies(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

impl Occupancy for BTreeSet<Cell> {
    fn occupies(&self, cell: Cell) -> bool {
        self.contains(&cell)
    }
}

/// True iff `cell` is absent from every supplied set
pub fn is_free(cell: Cell, occupied: &[&dyn Occupancy]) -> bool {
    !occupied.iter().any(|set| set.occupies(cell))
}

/// Pick a uniformly random free cell, or `GridFull` if none exists
pub fn pick_random_free<R: Rng + ?Sized>(
    grid: &GridSpace,
    rng: &mut R,
    occupied: &[&dyn Occupancy],
) -> Result<Cell, SimError> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let cell = Cell::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if is_free(cell, occupied) {
            return Ok(cell);
        }
    }

    log::debug!("Random sampling exhausted, scanning {} cells", grid.area());
    grid.cells()
        .filter(|&cell| is_free(cell, occupied))
        .choose(rng)
        .ok_or(SimError::GridFull {
            width: grid.width(),
            height: grid.height(),
        })
}
