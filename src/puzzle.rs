use serde::Serialize;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::layout::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Collectible {
    First,
    Second,
}

impl Collectible {
    pub const ALL: [Collectible; 2] = [Collectible::First, Collectible::Second];

    pub(crate) fn index(&self) -> usize {
        match self {
            Collectible::First => 0,
            Collectible::Second => 1,
        }
    }

    fn bit(&self) -> u8 {
        1 << self.index()
    }
}

/// Which of the two collectibles have been visited, one bit each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "Vec<Collectible>")]
pub struct Collected(u8);

impl Collected {
    pub fn contains(&self, which: Collectible) -> bool {
        self.0 & which.bit() != 0
    }

    pub fn insert(&mut self, which: Collectible) -> bool {
        let fresh = !self.contains(which);
        self.0 |= which.bit();
        fresh
    }

    pub fn is_complete(&self) -> bool {
        Collectible::ALL.iter().all(|which| self.contains(*which))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<Collected> for Vec<Collectible> {
    fn from(collected: Collected) -> Vec<Collectible> {
        Collectible::ALL
            .into_iter()
            .filter(|which| collected.contains(*which))
            .collect()
    }
}

/// What happened while passing over the cells of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub collected: Collected,
    pub collected_now: bool,
    pub reached_goal: bool,
}

/// Walk the cells entered during a slide (the path without its first cell) in order
///
/// Any collectible passed over is picked up. The goal only counts if it is entered while both
/// collectibles are already held, though it does not need to be where the slide stops.
/// Both live play and the solver go through here so they always agree on what wins.
pub fn sweep(layout: &Layout, collected: Collected, entered: &[Cell]) -> Sweep {
    let mut sweep = Sweep {
        collected,
        collected_now: false,
        reached_goal: false,
    };

    for &cell in entered {
        if let Some(which) = layout.collectible_at(cell) {
            sweep.collected_now |= sweep.collected.insert(which);
        } else if cell == layout.goal() && sweep.collected.is_complete() {
            sweep.reached_goal = true;
            break;
        }
    }

    sweep
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejected {
    AlreadyWon,
    Blocked,
}

/// Everything a renderer needs to animate a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub moved: bool,
    pub from: Cell,
    pub to: Cell,
    pub collected_now: bool,
    pub rejected: Option<Rejected>,
}

impl MoveResult {
    fn rejected(at: Cell, reason: Rejected) -> MoveResult {
        MoveResult {
            moved: false,
            from: at,
            to: at,
            collected_now: false,
            rejected: Some(reason),
        }
    }
}

/// Progress through a single play of a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleState {
    position: Cell,
    collected: Collected,
    moves: usize,
    won: bool,
}

impl PuzzleState {
    pub fn new(layout: &Layout) -> PuzzleState {
        PuzzleState {
            position: layout.start(),
            collected: Collected::default(),
            moves: 0,
            won: false,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn collected(&self) -> Collected {
        self.collected
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn reset(&mut self, layout: &Layout) {
        *self = PuzzleState::new(layout);
    }

    /// Slide the token; moves that go nowhere or come after a win change nothing
    pub fn apply_move(&mut self, layout: &Layout, direction: Direction) -> MoveResult {
        if self.won {
            log::debug!("Ignoring {direction} from {}, already won", self.position);
            return MoveResult::rejected(self.position, Rejected::AlreadyWon);
        }

        let slide = layout.slide(self.position, direction);
        if slide.is_noop() {
            log::debug!("Ignoring {direction} from {}, blocked", self.position);
            return MoveResult::rejected(self.position, Rejected::Blocked);
        }

        let from = self.position;
        let sweep = sweep(layout, self.collected, slide.entered());

        self.position = slide.end;
        self.moves += 1;
        self.collected = sweep.collected;
        self.won = sweep.reached_goal;

        if self.won {
            log::info!("Won in {} moves", self.moves);
        }

        MoveResult {
            moved: true,
            from,
            to: slide.end,
            collected_now: sweep.collected_now,
            rejected: None,
        }
    }

    pub fn stringify(&self, layout: &Layout) -> String {
        format!(
            "{}\nMoves: {}, collected: {}/2{}",
            layout.draw(Some(self.position)),
            self.moves,
            self.collected.len(),
            if self.won { ", won" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_worlds::{mid_slide_world, open_world, pass_through_world};

    fn play(layout: &Layout, moves: &str) -> PuzzleState {
        let mut state = PuzzleState::new(layout);
        for direction in Direction::parse_moves(moves).unwrap() {
            state.apply_move(layout, direction);
        }
        state
    }

    #[test]
    fn test_collect_on_the_way() {
        let layout = open_world();
        let mut state = PuzzleState::new(&layout);

        let result = state.apply_move(&layout, Direction::East);
        assert_eq!(
            result,
            MoveResult {
                moved: true,
                from: Cell::new(0, 0),
                to: Cell::new(0, 4),
                collected_now: true,
                rejected: None,
            }
        );
        assert!(state.collected().contains(Collectible::First));
        assert!(!state.collected().contains(Collectible::Second));
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_goal_needs_both() {
        let layout = open_world();
        let mut state = play(&layout, "E");

        // Resting on the goal with only one collectible isn't a win
        let result = state.apply_move(&layout, Direction::South);
        assert!(result.moved);
        assert!(!result.collected_now);
        assert_eq!(state.position(), layout.goal());
        assert!(!state.won());

        state.apply_move(&layout, Direction::West);
        assert!(state.collected().is_complete());
        assert!(!state.won());

        state.apply_move(&layout, Direction::East);
        assert!(state.won());
        assert_eq!(state.moves(), 4);
    }

    #[test]
    fn test_win_passing_through_goal() {
        let layout = pass_through_world();

        // Passes over the goal before the second collectible, so no win yet
        let state = play(&layout, "NW");
        assert_eq!(state.position(), Cell::new(0, 0));
        assert!(state.collected().is_complete());
        assert!(!state.won());

        // Crosses the goal with both in hand and keeps going
        let state = play(&layout, "NWE");
        assert_eq!(state.position(), Cell::new(0, 4));
        assert!(state.won());
        assert_eq!(state.moves(), 3);
    }

    #[test]
    fn test_collect_and_win_mid_slide() {
        let layout = mid_slide_world();
        let mut state = play(&layout, "SN");
        assert_eq!(state.position(), Cell::new(0, 0));
        assert!(state.collected().contains(Collectible::First));
        assert!(!state.collected().contains(Collectible::Second));

        // Picks up the second on the way and then crosses the goal holding both
        let result = state.apply_move(&layout, Direction::East);
        assert_eq!(
            result,
            MoveResult {
                moved: true,
                from: Cell::new(0, 0),
                to: Cell::new(0, 4),
                collected_now: true,
                rejected: None,
            }
        );
        assert!(state.collected().is_complete());
        assert!(state.won());
        assert_eq!(state.position(), Cell::new(0, 4));
        assert_eq!(state.moves(), 3);
    }

    #[test]
    fn test_collect_passed_over() {
        let layout = mid_slide_world();
        let mut state = PuzzleState::new(&layout);

        // Neither the second collectible nor the goal stops the slide
        let result = state.apply_move(&layout, Direction::East);
        assert!(result.moved && result.collected_now);
        assert_eq!(state.position(), Cell::new(0, 4));
        assert!(state.collected().contains(Collectible::Second));
        assert!(!state.won());
    }

    #[test]
    fn test_sweep_stops_at_goal() {
        let layout = mid_slide_world();
        let slide = layout.slide(Cell::new(0, 0), Direction::East);

        let mut held = Collected::default();
        held.insert(Collectible::First);

        let sweep = sweep(&layout, held, slide.entered());
        assert!(sweep.collected_now);
        assert!(sweep.collected.is_complete());
        assert!(sweep.reached_goal);
    }

    #[test]
    fn test_blocked_move() {
        let layout = open_world();
        let mut state = PuzzleState::new(&layout);

        let result = state.apply_move(&layout, Direction::North);
        assert!(!result.moved);
        assert_eq!(result.rejected, Some(Rejected::Blocked));
        assert_eq!(result.from, result.to);
        assert_eq!(state, PuzzleState::new(&layout));
    }

    #[test]
    fn test_no_moves_after_win() {
        let layout = open_world();
        let mut state = play(&layout, "SNES");
        assert!(state.won());

        let before = state.clone();
        let result = state.apply_move(&layout, Direction::North);
        assert!(!result.moved);
        assert_eq!(result.rejected, Some(Rejected::AlreadyWon));
        assert_eq!(state, before);
    }

    #[test]
    fn test_collect_order_commutes() {
        let layout = open_world();

        // First then second, and second then first
        let a = play(&layout, "EWS");
        let b = play(&layout, "SNE");

        assert_eq!(a.collected(), b.collected());
        assert!(a.collected().is_complete());
        assert!(!a.won() && !b.won());
    }

    #[test]
    fn test_collect_once() {
        let layout = open_world();
        let mut state = play(&layout, "E");

        state.apply_move(&layout, Direction::West);
        let result = state.apply_move(&layout, Direction::East);
        assert!(result.moved);
        assert!(!result.collected_now);
        assert_eq!(state.collected().len(), 1);
    }

    #[test]
    fn test_reset() {
        let layout = open_world();
        let mut state = play(&layout, "SNES");
        assert!(state.won());

        state.reset(&layout);
        assert_eq!(state, PuzzleState::new(&layout));
        assert_eq!(state.position(), layout.start());
        assert!(state.collected().is_empty());
        assert_eq!(state.moves(), 0);
        assert!(!state.won());
    }

    #[test]
    fn test_stringify() {
        let layout = open_world();
        let state = play(&layout, "E");

        assert_eq!(
            state.stringify(&layout),
            "\
+-+-+-+-+-+
|S . . . @|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|. . . . .|
+ + + + + +
|2 . . . G|
+-+-+-+-+-+
Moves: 1, collected: 1/2"
        );
    }
}
