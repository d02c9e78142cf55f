use anyhow::{bail, ensure, Result};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Read};

use crate::cell::Cell;
use crate::direction::Direction;
use crate::puzzle::Collectible;
use crate::wall::WallSet;

/// Everything about a puzzle that stays fixed during play
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    size: usize,
    walls: WallSet,
    start: Cell,
    goal: Cell,
    collectibles: [Cell; 2],
}

/// Where a slide stopped and every cell it went through, starting cell first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub end: Cell,
    pub path: Vec<Cell>,
}

impl Slide {
    pub fn is_noop(&self) -> bool {
        self.path.len() == 1
    }

    /// Cells actually entered, which leaves out the one the slide started on
    pub fn entered(&self) -> &[Cell] {
        &self.path[1..]
    }
}

impl Layout {
    pub fn new(
        size: usize,
        walls: WallSet,
        start: Cell,
        goal: Cell,
        first: Cell,
        second: Cell,
    ) -> Layout {
        assert!(size >= 3, "Grid must be at least 3x3, got {size}");

        let elements = [start, goal, first, second];
        for (i, cell) in elements.iter().enumerate() {
            assert!(cell.in_bounds(size), "{cell} is outside a {size}x{size} grid");
            assert!(
                !elements[i + 1..].contains(cell),
                "{cell} holds more than one element"
            );
        }

        for wall in walls.iter() {
            let (a, b) = wall.endpoints();
            assert!(
                a.in_bounds(size) || b.in_bounds(size),
                "Wall {a}-{b} does not touch the grid"
            );
        }

        Layout {
            size,
            walls,
            start,
            goal,
            collectibles: [first, second],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn collectible(&self, which: Collectible) -> Cell {
        self.collectibles[which.index()]
    }

    pub fn collectible_at(&self, cell: Cell) -> Option<Collectible> {
        Collectible::ALL
            .into_iter()
            .find(|which| self.collectible(*which) == cell)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.in_bounds(self.size)
    }

    /// Slide from `start` until the next step would leave the grid or cross a wall
    ///
    /// If the very first step is blocked the slide ends where it began with a one cell path.
    pub fn slide(&self, start: Cell, direction: Direction) -> Slide {
        debug_assert!(self.in_bounds(start), "Cannot slide from {start}");

        let mut current = start;
        let mut path = vec![start];

        loop {
            let next = current + direction;

            if !self.in_bounds(next) || self.walls.blocks(current, next) {
                return Slide { end: current, path };
            }

            current = next;
            path.push(current);
        }
    }

    /// Read a layout drawn as ASCII art
    ///
    /// Cells sit on odd rows and columns of the drawing, walls between them: `|` for a wall to
    /// the left or right of a cell and `-` above or below. Corners are conventionally `+` and
    /// are ignored. `S`, `G`, `1` and `2` mark the start, the goal and the collectibles, `.` or
    /// a space is an empty cell. Walls drawn on the outer edge become border walls.
    ///
    /// ```text
    /// +-+-+-+
    /// |S . 1|
    /// + +-+ +
    /// |. .|G|
    /// + + + +
    /// |2 . .|
    /// +-+-+-+
    /// ```
    pub fn read<R: Read + BufRead>(reader: &mut R) -> Result<Layout> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?.trim_end().chars().collect::<Vec<char>>());
        }

        while lines.first().map_or(false, |line| line.is_empty()) {
            lines.remove(0);
        }
        while lines.last().map_or(false, |line| line.is_empty()) {
            lines.pop();
        }

        ensure!(
            lines.len() % 2 == 1 && lines.len() >= 7,
            "Expected an odd number of lines, at least 7, got {}",
            lines.len()
        );
        let size = (lines.len() - 1) / 2;
        let at = |y: usize, x: usize| lines[y].get(x).copied().unwrap_or(' ');

        let mut start = None;
        let mut goal = None;
        let mut first = None;
        let mut second = None;
        let mut walls = WallSet::new();

        for row in 0..size {
            for col in 0..size {
                let cell = Cell::new(row as isize, col as isize);
                let slot = match at(2 * row + 1, 2 * col + 1) {
                    '.' | ' ' => continue,
                    'S' => &mut start,
                    'G' => &mut goal,
                    '1' => &mut first,
                    '2' => &mut second,
                    c => bail!("Unknown cell marker `{c}` at {cell}"),
                };

                ensure!(
                    slot.is_none(),
                    "Marker `{}` appears more than once",
                    at(2 * row + 1, 2 * col + 1)
                );
                *slot = Some(cell);
            }
        }

        // Vertical walls sit between the cells of a row
        for row in 0..size {
            for col in 0..=size {
                match at(2 * row + 1, 2 * col) {
                    '|' => {
                        let (row, col) = (row as isize, col as isize);
                        walls.insert(Cell::new(row, col - 1), Cell::new(row, col));
                    }
                    ' ' => {}
                    c => bail!("Unexpected `{c}` where a vertical wall belongs"),
                }
            }
        }

        // Horizontal walls sit on the lines between rows
        for row in 0..=size {
            for col in 0..size {
                match at(2 * row, 2 * col + 1) {
                    '-' => {
                        let (row, col) = (row as isize, col as isize);
                        walls.insert(Cell::new(row - 1, col), Cell::new(row, col));
                    }
                    ' ' => {}
                    c => bail!("Unexpected `{c}` where a horizontal wall belongs"),
                }
            }
        }

        let missing = |name: &str| anyhow::anyhow!("Layout has no {name}");
        Ok(Layout::new(
            size,
            walls,
            start.ok_or_else(|| missing("start (S)"))?,
            goal.ok_or_else(|| missing("goal (G)"))?,
            first.ok_or_else(|| missing("first collectible (1)"))?,
            second.ok_or_else(|| missing("second collectible (2)"))?,
        ))
    }

    /// Draw the layout in the format [`Layout::read`] accepts, optionally with a token as `@`
    pub(crate) fn draw(&self, token: Option<Cell>) -> String {
        let size = self.size as isize;
        let mut lines = Vec::new();

        for row in 0..=size {
            let mut line = String::from("+");
            for col in 0..size {
                let wall = self.walls.blocks(Cell::new(row - 1, col), Cell::new(row, col));
                line.push(if wall { '-' } else { ' ' });
                line.push('+');
            }
            lines.push(line);

            if row == size {
                break;
            }

            let mut line = String::new();
            for col in 0..=size {
                let wall = self.walls.blocks(Cell::new(row, col - 1), Cell::new(row, col));
                line.push(if wall { '|' } else { ' ' });

                if col < size {
                    let cell = Cell::new(row, col);
                    line.push(if token == Some(cell) {
                        '@'
                    } else if cell == self.start {
                        'S'
                    } else if cell == self.goal {
                        'G'
                    } else if cell == self.collectibles[0] {
                        '1'
                    } else if cell == self.collectibles[1] {
                        '2'
                    } else {
                        '.'
                    });
                }
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.draw(None))
    }
}
