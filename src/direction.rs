use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// (row, col) delta of a single step
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Parse a run of direction letters like `ESWN`, ignoring whitespace
    pub fn parse_moves(value: &str) -> Result<Vec<Direction>> {
        value
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Direction::try_from)
            .collect()
    }
}

impl TryFrom<&str> for Direction {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "north" | "up" => Ok(Direction::North),
            "south" | "down" => Ok(Direction::South),
            "east" | "right" => Ok(Direction::East),
            "west" | "left" => Ok(Direction::West),
            _ => Err(anyhow!("Invalid direction: {value}")),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = anyhow::Error;

    fn try_from(value: char) -> Result<Self> {
        match value {
            'U' | 'u' | 'N' | 'n' => Ok(Direction::North),
            'D' | 'd' | 'S' | 's' => Ok(Direction::South),
            'R' | 'r' | 'E' | 'e' => Ok(Direction::East),
            'L' | 'l' | 'W' | 'w' => Ok(Direction::West),
            _ => Err(anyhow!("Invalid direction: {value}")),
        }
    }
}

impl From<Direction> for char {
    fn from(direction: Direction) -> char {
        match direction {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}
