// finite cell grid, pure data + enumeration

use std::fmt;

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {0}x{1}")]
    BadGridSize(i32, i32),
    #[error("connector count must be even, got {0}")]
    OddConnectorCount(usize),
}

/// A single grid cell, identified by its integer coordinates.
/// Cells are plain values, they are never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    // direction from self towards `other` as a world-space unit vector
    pub fn unit_dir_to(&self, other: Cell) -> Vec2 {
        Vec2::new((other.x - self.x) as f32, (other.y - self.y) as f32).normalize()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The `num_x_cells x num_y_cells` cell grid.
/// Dimensions are fixed at construction and validated once.
#[derive(Debug, Clone, Copy)]
pub struct CellGrid {
    num_x_cells: i32,
    num_y_cells: i32,
}

impl CellGrid {
    pub fn new(num_x_cells: i32, num_y_cells: i32) -> Result<Self, ConfigError> {
        if num_x_cells <= 0 || num_y_cells <= 0 {
            return Err(ConfigError::BadGridSize(num_x_cells, num_y_cells));
        }
        Ok(Self { num_x_cells, num_y_cells })
    }

    pub fn num_x_cells(&self) -> i32 {
        self.num_x_cells
    }

    pub fn num_y_cells(&self) -> i32 {
        self.num_y_cells
    }

    pub fn cell_count(&self) -> usize {
        (self.num_x_cells * self.num_y_cells) as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        0 <= cell.x && cell.x < self.num_x_cells && 0 <= cell.y && cell.y < self.num_y_cells
    }

    /// Enumerates every cell of the grid exactly once.
    pub fn all_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.cell_count());
        for x in 0..self.num_x_cells {
            for y in 0..self.num_y_cells {
                cells.push(Cell::new(x, y));
            }
        }
        cells
    }

    /// Up-to-8 in-bounds Moore neighbors of `cell`, excluding the cell itself.
    pub fn neighbors8(&self, cell: Cell) -> Vec<Cell> {
        let mut nbors = Vec::with_capacity(8);
        for dx in [-1, 0, 1] {
            for dy in [-1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nbor = Cell::new(cell.x + dx, cell.y + dy);
                if self.contains(nbor) {
                    nbors.push(nbor);
                }
            }
        }
        nbors
    }
}
