//! Shortest solutions by breadth first search over (position, collected) nodes.
//!
//! Every slide costs one move, so the first finished node to come off the queue is an optimal
//! solution. Slides that don't move the token are never queued.

use crate::cell::Cell;
use crate::direction::Direction;
use crate::layout::Layout;
use crate::puzzle::{sweep, Collected};
use crate::{Solver, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub position: Cell,
    pub collected: Collected,
    // Set once the goal is entered with both collectibles in hand
    pub finished: bool,
}

impl Node {
    pub fn new(position: Cell, collected: Collected) -> Node {
        Node {
            position,
            collected,
            finished: false,
        }
    }
}

impl State<Layout, Direction> for Node {
    fn next_states(&self, layout: &Layout) -> Option<Vec<(Direction, Node)>> {
        if self.finished {
            return None;
        }

        let mut next_states = Vec::new();

        for direction in Direction::ALL {
            let slide = layout.slide(self.position, direction);
            if slide.is_noop() {
                continue;
            }

            let sweep = sweep(layout, self.collected, slide.entered());
            next_states.push((
                direction,
                Node {
                    position: slide.end,
                    collected: sweep.collected,
                    finished: sweep.reached_goal,
                },
            ));
        }

        if next_states.is_empty() {
            None
        } else {
            Some(next_states)
        }
    }

    fn is_solved(&self, _layout: &Layout) -> bool {
        self.finished
    }

    fn stringify(&self, layout: &Layout) -> String {
        format!(
            "{}\ncollected: {}/2",
            layout.draw(Some(self.position)),
            self.collected.len()
        )
    }
}

/// Fewest moves that solve the layout, if that takes no more than `move_cap`
pub fn shortest_solution_length(layout: &Layout, move_cap: usize) -> Option<usize> {
    let mut solver = Solver::new(layout, Node::new(layout.start(), Collected::default()));
    solver.set_max_depth(move_cap);
    while solver.next().is_some() {}

    log::debug!("Measured solution length with {solver}");
    solver.solution_depth()
}

/// One optimal sequence of moves from the start of the layout
pub fn shortest_solution_path(layout: &Layout) -> Option<Vec<Direction>> {
    shortest_path_from(layout, layout.start(), Collected::default())
}

/// One optimal sequence of moves that finishes the layout from a game in progress
pub fn shortest_path_from(
    layout: &Layout,
    position: Cell,
    collected: Collected,
) -> Option<Vec<Direction>> {
    let mut solver = Solver::new(layout, Node::new(position, collected));
    let path = solver.solve();

    match &path {
        Some(path) => log::debug!("Found a {} move solution with {solver}", path.len()),
        None => log::debug!("No solution from {position} with {solver}"),
    }

    path
}
