//! Static blocking cells that accumulate as the snake grows

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::grid::{Cell, GridSpace};
use super::occupancy::{Occupancy, pick_random_free};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacles {
    /// Ordered for stable iteration and output
    cells: BTreeSet<Cell>,
    /// One obstacle per multiple of this snake length (0 disables spawning)
    modulus: usize,
    /// Multiples of `modulus` already rewarded with an obstacle
    level: usize,
}

impl Obstacles {
    pub fn new(modulus: usize) -> Self {
        Self {
            cells: BTreeSet::new(),
            modulus,
            level: 0,
        }
    }

    /// Add an obstacle when `snake_length` crosses the next multiple of the modulus.
    ///
    /// The new cell avoids `occupied` and every existing obstacle. On
    /// `GridFull` the threshold still counts as crossed, so the spawn is
    /// skipped rather than retried on the next tick.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        snake_length: usize,
        grid: &GridSpace,
        rng: &mut R,
        occupied: &[&dyn Occupancy],
    ) -> Result<Option<Cell>, SimError> {
        if self.modulus == 0 {
            return Ok(None);
        }
        let level = snake_length / self.modulus;
        if level <= self.level {
            return Ok(None);
        }
        self.level = level;

        let mut avoid: Vec<&dyn Occupancy> = occupied.to_vec();
        avoid.push(&self.cells);
        let cell = pick_random_free(grid, rng, &avoid)?;
        self.cells.insert(cell);
        log::debug!(
            "Obstacle spawned at {:?} (snake length {}, {} total)",
            cell,
            snake_length,
            self.cells.len()
        );
        Ok(Some(cell))
    }

    /// Place an obstacle directly (fixtures, restored state)
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.level = 0;
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl Occupancy for Obstacles {
    fn occupies(&self, cell: Cell) -> bool {
        self.contains(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_once_per_multiple() {
        let grid = GridSpace::new(10, 10).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut obstacles = Obstacles::new(3);

        let mut counts = Vec::new();
        for length in 1..=9 {
            obstacles.maybe_spawn(length, &grid, &mut rng, &[]).unwrap();
            counts.push(obstacles.len());
        }
        assert_eq!(counts, vec![0, 0, 1, 1, 1, 2, 2, 2, 3]);

        // Reporting the same length again does not spawn twice
        obstacles.maybe_spawn(9, &grid, &mut rng, &[]).unwrap();
        assert_eq!(obstacles.len(), 3);
    }

    #[test]
    fn test_zero_modulus_disables_spawning() {
        let grid = GridSpace::new(10, 10).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut obstacles = Obstacles::new(0);
        for length in 1..20 {
            assert_eq!(obstacles.maybe_spawn(length, &grid, &mut rng, &[]), Ok(None));
        }
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_spawn_avoids_occupied_and_existing() {
        let grid = GridSpace::new(2, 2).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut obstacles = Obstacles::new(1);
        obstacles.insert(Cell::new(0, 0));
        let snake_cells = vec![Cell::new(1, 0), Cell::new(1, 1)];

        let spawned = obstacles.maybe_spawn(1, &grid, &mut rng, &[&snake_cells]);
        assert_eq!(spawned, Ok(Some(Cell::new(0, 1))));
    }

    #[test]
    fn test_grid_full_skips_threshold() {
        let grid = GridSpace::new(2, 1).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut obstacles = Obstacles::new(1);
        let taken = vec![Cell::new(0, 0), Cell::new(1, 0)];

        assert!(matches!(
            obstacles.maybe_spawn(1, &grid, &mut rng, &[&taken]),
            Err(SimError::GridFull { .. })
        ));
        // Same threshold is not retried
        assert_eq!(obstacles.maybe_spawn(1, &grid, &mut rng, &[]), Ok(None));
    }

    #[test]
    fn test_clear_resets_thresholds() {
        let grid = GridSpace::new(10, 10).unwrap();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut obstacles = Obstacles::new(3);
        obstacles.maybe_spawn(3, &grid, &mut rng, &[]).unwrap();
        obstacles.clear();
        assert!(obstacles.is_empty());
        assert!(obstacles.maybe_spawn(3, &grid, &mut rng, &[]).unwrap().is_some());
    }

    proptest! {
        #[test]
        fn test_count_tracks_multiples(modulus in 1usize..6, max_len in 1usize..40, seed in any::<u64>()) {
            let grid = GridSpace::new(12, 12).unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut obstacles = Obstacles::new(modulus);
            for length in 1..=max_len {
                obstacles.maybe_spawn(length, &grid, &mut rng, &[]).unwrap();
                prop_assert_eq!(obstacles.len(), length / modulus);
            }
        }
    }
}
