use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::direction::Direction;

/// A (row, col) coordinate on the grid
///
/// Signed so that a border wall can name the cell just outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: isize,
    pub col: isize,
}

impl Cell {
    pub const fn new(row: isize, col: isize) -> Cell {
        Cell { row, col }
    }

    pub fn manhattan_distance(&self, other: Cell) -> isize {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        let size = size as isize;
        self.row >= 0 && self.col >= 0 && self.row < size && self.col < size
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, direction: Direction) -> Cell {
        let (row, col) = direction.offset();
        Cell {
            row: self.row + row,
            col: self.col + col,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
