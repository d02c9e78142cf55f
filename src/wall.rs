use fxhash::FxHashSet;
use serde::Serialize;

use crate::cell::Cell;

/// A wall between two neighbouring cells, blocking movement both ways
///
/// The endpoints are stored smallest first, so `Wall::new(a, b) == Wall::new(b, a)`.
/// One endpoint may sit just outside the grid, which makes it a border wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Wall(Cell, Cell);

impl Wall {
    pub fn new(a: Cell, b: Cell) -> Wall {
        assert!(
            a.is_adjacent(b),
            "Wall endpoints {a} and {b} are not adjacent"
        );

        if a <= b {
            Wall(a, b)
        } else {
            Wall(b, a)
        }
    }

    pub fn endpoints(&self) -> (Cell, Cell) {
        (self.0, self.1)
    }

    pub fn is_border(&self, size: usize) -> bool {
        !self.0.in_bounds(size) || !self.1.in_bounds(size)
    }
}

/// Walls in the order they were added, with a hashed index for lookups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Wall>")]
pub struct WallSet {
    walls: Vec<Wall>,
    index: FxHashSet<Wall>,
}

impl WallSet {
    pub fn new() -> WallSet {
        WallSet::default()
    }

    /// Walls around every outer edge of a `size` x `size` grid
    pub fn bordered(size: usize) -> WallSet {
        let mut walls = WallSet::new();
        walls.add_border(size);
        walls
    }

    /// Returns false if the wall was already present
    pub fn insert(&mut self, a: Cell, b: Cell) -> bool {
        let wall = Wall::new(a, b);
        if !self.index.insert(wall) {
            return false;
        }

        self.walls.push(wall);
        true
    }

    pub fn add_border(&mut self, size: usize) {
        let last = size as isize - 1;

        for i in 0..size as isize {
            self.insert(Cell::new(0, i), Cell::new(-1, i));
            self.insert(Cell::new(last, i), Cell::new(last + 1, i));
            self.insert(Cell::new(i, 0), Cell::new(i, -1));
            self.insert(Cell::new(i, last), Cell::new(i, last + 1));
        }
    }

    pub fn blocks(&self, a: Cell, b: Cell) -> bool {
        a.is_adjacent(b) && self.index.contains(&Wall::new(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

impl From<WallSet> for Vec<Wall> {
    fn from(walls: WallSet) -> Vec<Wall> {
        walls.walls
    }
}

impl FromIterator<(Cell, Cell)> for WallSet {
    fn from_iter<I: IntoIterator<Item = (Cell, Cell)>>(iter: I) -> WallSet {
        let mut walls = WallSet::new();
        for (a, b) in iter {
            walls.insert(a, b);
        }
        walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered() {
        let a = Cell::new(1, 1);
        let b = Cell::new(1, 2);
        assert_eq!(Wall::new(a, b), Wall::new(b, a));

        let mut walls = WallSet::new();
        assert!(walls.insert(a, b));
        assert!(!walls.insert(b, a));
        assert_eq!(walls.len(), 1);
        assert!(walls.blocks(a, b));
        assert!(walls.blocks(b, a));
        assert!(!walls.blocks(a, Cell::new(2, 1)));
    }

    #[test]
    #[should_panic]
    fn test_not_adjacent() {
        Wall::new(Cell::new(0, 0), Cell::new(0, 2));
    }

    #[test]
    fn test_border() {
        let walls = WallSet::bordered(5);
        assert_eq!(walls.len(), 20);
        assert!(walls.iter().all(|wall| wall.is_border(5)));
        assert!(walls.blocks(Cell::new(0, 3), Cell::new(-1, 3)));
        assert!(walls.blocks(Cell::new(4, 4), Cell::new(4, 5)));
        assert!(!walls.blocks(Cell::new(2, 2), Cell::new(2, 3)));
    }

    #[test]
    fn test_serialize_in_order() {
        let walls: WallSet = vec![
            (Cell::new(1, 2), Cell::new(1, 1)),
            (Cell::new(0, 0), Cell::new(1, 0)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&walls).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                [{"row": 1, "col": 1}, {"row": 1, "col": 2}],
                [{"row": 0, "col": 0}, {"row": 1, "col": 0}],
            ])
        );
    }
}
