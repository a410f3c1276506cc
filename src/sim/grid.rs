//! Grid coordinates and toroidal wraparound
//!
//! Crossing any edge reappears on the opposite edge. Wrapping uses Euclidean
//! remainder, never clamping.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::error::SimError;

/// A discrete grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.col, self.row)
    }
}

/// Movement direction (screen coordinates: row grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Grid dimensions and wraparound arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpace {
    width: i32,
    height: i32,
}

impl GridSpace {
    /// Create a grid; both dimensions must be at least 1
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidSettings(format!(
                "grid must be at least 1x1, got {width}x{height}"
            )));
        }
        let width = i32::try_from(width)
            .map_err(|_| SimError::InvalidSettings(format!("grid width {width} too large")))?;
        let height = i32::try_from(height)
            .map_err(|_| SimError::InvalidSettings(format!("grid height {height} too large")))?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.col) && (0..self.height).contains(&cell.row)
    }

    /// Centre cell (rounded toward the origin)
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Wrap any coordinate onto the torus
    pub fn wrap(&self, v: IVec2) -> Cell {
        Cell::new(v.x.rem_euclid(self.width), v.y.rem_euclid(self.height))
    }

    /// Step one cell in `direction`, wrapping around every edge
    pub fn advance(&self, cell: Cell, direction: Direction) -> Cell {
        self.wrap(cell.as_ivec2() + direction.delta())
    }

    /// Shortest signed offset from `from` to `to` along each axis of the torus
    pub fn torus_delta(&self, from: Cell, to: Cell) -> IVec2 {
        let shortest = |d: i32, size: i32| {
            let d = d.rem_euclid(size);
            if d > size / 2 { d - size } else { d }
        };
        IVec2::new(
            shortest(to.col - from.col, self.width),
            shortest(to.row - from.row, self.height),
        )
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(col, row)))
    }
}
