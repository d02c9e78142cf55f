use rand::Rng;
use serde::Serialize;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::generator::{self, Difficulty, Puzzle};
use crate::layout::Layout;
use crate::puzzle::{Collectible, Collected, MoveResult, PuzzleState};
use crate::search;
use crate::wall::WallSet;

/// A puzzle being played: the fixed layout plus the player's progress through it
#[derive(Debug, Clone)]
pub struct Game {
    puzzle: Puzzle,
    state: PuzzleState,
}

/// Read-only view handed to whatever draws the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub size: usize,
    pub walls: WallSet,
    pub token: Cell,
    pub start: Cell,
    pub goal: Cell,
    pub collectibles: [Cell; 2],
    pub collected: Collected,
    pub moves: usize,
    pub won: bool,
    pub optimal_moves: Option<usize>,
}

impl Game {
    /// Play a hand built layout; its optimal length is measured up front
    pub fn new(layout: Layout) -> Game {
        let optimal_moves = search::shortest_solution_path(&layout).map(|path| path.len());

        Game::from_puzzle(Puzzle {
            layout,
            optimal_moves,
            attempts: 0,
            from_fallback: false,
        })
    }

    pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Game {
        Game::from_puzzle(generator::generate(difficulty, rng))
    }

    pub fn from_puzzle(puzzle: Puzzle) -> Game {
        let state = PuzzleState::new(&puzzle.layout);
        Game { puzzle, state }
    }

    pub fn layout(&self) -> &Layout {
        &self.puzzle.layout
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        self.state.apply_move(&self.puzzle.layout, direction)
    }

    pub fn reset(&mut self) -> &PuzzleState {
        self.state.reset(&self.puzzle.layout);
        &self.state
    }

    /// An optimal solution from the start; replay it after [`Game::reset`] to watch it
    pub fn solution_path(&self) -> Option<Vec<Direction>> {
        search::shortest_solution_path(&self.puzzle.layout)
    }

    /// The next move of an optimal solution from where the player is now
    pub fn hint(&self) -> Option<Direction> {
        if self.state.won() {
            return None;
        }

        search::shortest_path_from(
            &self.puzzle.layout,
            self.state.position(),
            self.state.collected(),
        )?
        .first()
        .copied()
    }

    pub fn snapshot(&self) -> Snapshot {
        let layout = &self.puzzle.layout;

        Snapshot {
            size: layout.size(),
            walls: layout.walls().clone(),
            token: self.state.position(),
            start: layout.start(),
            goal: layout.goal(),
            collectibles: [
                layout.collectible(Collectible::First),
                layout.collectible(Collectible::Second),
            ],
            collected: self.state.collected(),
            moves: self.state.moves(),
            won: self.state.won(),
            optimal_moves: self.puzzle.optimal_moves,
        }
    }

    pub fn stringify(&self) -> String {
        self.state.stringify(&self.puzzle.layout)
    }
}
