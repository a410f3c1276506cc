//! The single collectible food item

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::grid::{Cell, GridSpace};
use super::occupancy::{Occupancy, pick_random_free};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Food at a known cell (fixtures, restored state)
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Place food on a random cell outside `occupied`
    pub fn spawn<R: Rng + ?Sized>(
        grid: &GridSpace,
        rng: &mut R,
        occupied: &[&dyn Occupancy],
    ) -> Result<Self, SimError> {
        pick_random_free(grid, rng, occupied).map(Self::at)
    }

    /// Move to a random cell outside `occupied`; position is unchanged on error
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &GridSpace,
        rng: &mut R,
        occupied: &[&dyn Occupancy],
    ) -> Result<Cell, SimError> {
        self.position = pick_random_free(grid, rng, occupied)?;
        log::debug!("Food placed at {:?}", self.position);
        Ok(self.position)
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}

impl Occupancy for Food {
    fn occupies(&self, cell: Cell) -> bool {
        self.position == cell
    }
}
