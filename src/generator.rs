//! Random puzzles that are proven solvable within a difficulty's move band.
//!
//! Each attempt draws a fresh layout and measures it with
//! [`search::shortest_solution_length`](crate::search::shortest_solution_length). If no attempt
//! lands in the band, a fixed layout known to be solvable is used instead, so generation always
//! produces something playable.

use anyhow::{anyhow, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::cell::Cell;
use crate::layout::Layout;
use crate::search;
use crate::wall::WallSet;

pub const GRID_SIZE: usize = 5;
pub const MAX_ATTEMPTS: usize = 100;
pub const ISLAND_PROBABILITY: f64 = 0.7;
pub const RANDOM_WALLS: usize = 3;

// Search this far past the band so too-hard layouts are recognised rather than just unsolved
pub const MOVE_CAP_MARGIN: usize = 10;

const FALLBACK_MOVE_CAP: usize = 25;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Inclusive range of optimal solution lengths
    pub fn band(&self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 6..=10,
            Difficulty::Medium => 10..=14,
            Difficulty::Hard => 14..=20,
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(anyhow!("Invalid difficulty: {value}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A generated layout along with what it took to find it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    pub layout: Layout,
    pub optimal_moves: Option<usize>,
    pub attempts: usize,
    pub from_fallback: bool,
}

impl Puzzle {
    /// Whether the optimal solution length lies in the difficulty's band
    pub fn fits(&self, difficulty: Difficulty) -> bool {
        self.optimal_moves
            .map_or(false, |moves| difficulty.band().contains(&moves))
    }
}

pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Puzzle {
    let band = difficulty.band();
    let move_cap = band.end() + MOVE_CAP_MARGIN;

    for attempt in 1..=MAX_ATTEMPTS {
        let layout = random_layout(rng, GRID_SIZE);

        match search::shortest_solution_length(&layout, move_cap) {
            Some(length) if band.contains(&length) => {
                log::info!("Generated a {difficulty} puzzle on attempt {attempt}, {length} moves");
                log::debug!("Layout:\n{layout}");

                return Puzzle {
                    layout,
                    optimal_moves: Some(length),
                    attempts: attempt,
                    from_fallback: false,
                };
            }
            Some(length) => log::debug!("Attempt {attempt}: {length} moves is outside {band:?}"),
            None => log::debug!("Attempt {attempt}: unsolved within {move_cap} moves"),
        }
    }

    log::warn!("No {difficulty} puzzle after {MAX_ATTEMPTS} attempts, using the fallback");
    let puzzle = Puzzle {
        attempts: MAX_ATTEMPTS,
        ..fallback()
    };

    if !puzzle.fits(difficulty) {
        log::warn!(
            "The fallback takes {:?} moves, outside the {difficulty} band {band:?}",
            puzzle.optimal_moves
        );
    }
    puzzle
}

/// Border walls, some corner islands, a few loose walls and four distinct element cells
pub fn random_layout<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Layout {
    assert!(size >= 3, "Grid must be at least 3x3, got {size}");

    let mut walls = WallSet::bordered(size);

    for island in islands(size) {
        if rng.gen_bool(ISLAND_PROBABILITY) {
            for (a, b) in island {
                walls.insert(a, b);
            }
        }
    }

    for _ in 0..RANDOM_WALLS {
        let row = rng.gen_range(0..size as isize - 1);
        let col = rng.gen_range(0..size as isize - 1);

        if rng.gen_bool(0.5) {
            walls.insert(Cell::new(row, col), Cell::new(row + 1, col));
        } else {
            walls.insert(Cell::new(row, col), Cell::new(row, col + 1));
        }
    }

    let cells = rand::seq::index::sample(rng, size * size, 4)
        .into_iter()
        .map(|i| Cell::new((i / size) as isize, (i % size) as isize))
        .collect::<Vec<_>>();

    Layout::new(size, walls, cells[0], cells[1], cells[2], cells[3])
}

// Pairs of walls hugging each corner of the grid
fn islands(size: usize) -> [[(Cell, Cell); 2]; 4] {
    let m = size as isize - 1;
    let c = Cell::new;

    [
        [(c(0, 0), c(0, 1)), (c(0, 0), c(1, 0))],
        [(c(0, m - 1), c(0, m)), (c(0, m), c(1, m))],
        [(c(m - 1, 0), c(m, 0)), (c(m, 0), c(m, 1))],
        [(c(m - 1, m - 1), c(m - 1, m)), (c(m, m - 1), c(m, m))],
    ]
}

/// A fixed puzzle with a 12 move solution (ESWNESENWNES)
pub fn fallback() -> Puzzle {
    let c = Cell::new;
    let mut walls = WallSet::bordered(GRID_SIZE);
    for (a, b) in [
        (c(0, 0), c(1, 0)),
        (c(0, 3), c(1, 3)),
        (c(1, 1), c(1, 2)),
        (c(1, 3), c(1, 4)),
        (c(2, 1), c(3, 1)),
        (c(2, 3), c(2, 4)),
        (c(3, 2), c(4, 2)),
    ] {
        walls.insert(a, b);
    }

    let layout = Layout::new(GRID_SIZE, walls, c(0, 0), c(4, 4), c(1, 2), c(0, 4));
    let optimal_moves = search::shortest_solution_length(&layout, FALLBACK_MOVE_CAP);

    Puzzle {
        layout,
        optimal_moves,
        attempts: 0,
        from_fallback: true,
    }
}
