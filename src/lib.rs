use core::fmt::Debug;
use fxhash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use std::time::Instant;

mod cell;
mod direction;
mod game;
pub mod generator;
mod layout;
mod puzzle;
pub mod search;
#[cfg(test)]
mod test_worlds;
mod wall;

pub use cell::Cell;
pub use direction::Direction;
pub use game::{Game, Snapshot};
pub use generator::{Difficulty, Puzzle};
pub use layout::{Layout, Slide};
pub use puzzle::{sweep, Collectible, Collected, MoveResult, PuzzleState, Rejected, Sweep};
pub use wall::{Wall, WallSet};

pub trait State<G, Step>: Clone + Eq + Hash {
    fn next_states(&self, global: &G) -> Option<Vec<(Step, Self)>>
    where
        Self: Sized;

    fn is_solved(&self, global: &G) -> bool;

    fn stringify(&self, global: &G) -> String;
}

/// Breadth first search over every state reachable from an initial one
///
/// Each state is queued at most once, the first time it is discovered, so the first solved state
/// that comes off the queue is reached in the fewest steps. The parent of each state is kept so
/// the steps to any checked state can be rebuilt with [`Solver::path`].
#[derive(Debug)]
pub struct Solver<'g, G, S: State<G, Step>, Step> {
    global: &'g G,
    initial: S,
    to_check: VecDeque<(usize, S)>,
    parents: FxHashMap<S, Option<(S, Step)>>,
    max_depth: Option<usize>,
    solution: Option<(usize, S)>,
    iterations: usize,
    time_spent: f32,
}

impl<'g, G, S, Step> Solver<'g, G, S, Step>
where
    S: State<G, Step>,
    Step: Clone,
{
    pub fn new(global: &'g G, initial_state: S) -> Solver<'g, G, S, Step> {
        let mut parents = FxHashMap::default();
        parents.insert(initial_state.clone(), None);

        Solver {
            global,
            initial: initial_state.clone(),
            to_check: VecDeque::from([(0, initial_state)]),
            parents,
            max_depth: None,
            solution: None,
            iterations: 0,
            time_spent: 0 as f32,
        }
    }

    /// States this many steps from the start are still checked but never expanded
    pub fn set_max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn states_checked(&self) -> usize {
        self.parents.len()
    }

    pub fn time_spent(&self) -> f32 {
        self.time_spent
    }

    pub fn get_solution(&self) -> Option<S> {
        self.solution.as_ref().map(|(_, state)| state.clone())
    }

    pub fn solution_depth(&self) -> Option<usize> {
        self.solution.as_ref().map(|(depth, _)| *depth)
    }

    /// The steps that lead from the initial state to `state`, if it has been seen
    pub fn path(&self, state: &S) -> Option<Vec<Step>> {
        let mut steps = Vec::new();
        let mut current = state;

        loop {
            match self.parents.get(current)? {
                Some((parent, step)) => {
                    steps.push(step.clone());
                    current = parent;
                }
                None => break,
            }
        }

        if *current != self.initial {
            return None;
        }

        steps.reverse();
        Some(steps)
    }

    /// Run to completion and return the steps to the first solved state found
    pub fn solve(&mut self) -> Option<Vec<Step>>
    where
        S: Debug,
    {
        while self.next().is_some() {}
        let solution = self.get_solution()?;
        self.path(&solution)
    }

    pub fn display(&self, state: &S) -> String {
        state.stringify(self.global)
    }
}

impl<'g, G, S, Step> fmt::Display for Solver<'g, G, S, Step>
where
    S: State<G, Step>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Solver<iterations={}, checked={}, queue={}, time={}>",
            self.iterations,
            self.parents.len(),
            self.to_check.len(),
            self.time_spent
        )
    }
}

// Iterate through checked states until a solution is found or the queue runs dry
impl<'g, G, S, Step> Iterator for Solver<'g, G, S, Step>
where
    S: State<G, Step> + Debug,
    Step: Clone,
{
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        // Already solved, nothing left to hand out
        if self.solution.is_some() {
            return None;
        }

        let start = Instant::now();
        let (depth, current_state) = self.to_check.pop_front()?;
        self.iterations += 1;

        if self.iterations % 1000 == 0 {
            tracing::debug!(
                "[DEBUG] iter: {}, depth: {}, queue: {}, checked: {}",
                self.iterations,
                depth,
                self.to_check.len(),
                self.parents.len(),
            );
        }

        if current_state.is_solved(self.global) {
            self.solution = Some((depth, current_state.clone()));
            self.time_spent += start.elapsed().as_secs_f32();
            return Some(current_state);
        }

        // Anything past the cap would be too deep, so don't bother generating it
        let expand = match self.max_depth {
            Some(max_depth) => depth < max_depth,
            None => true,
        };

        if expand {
            if let Some(next_states) = current_state.next_states(self.global) {
                for (step, next_state) in next_states {
                    if self.parents.contains_key(&next_state) {
                        continue;
                    }

                    self.parents.insert(
                        next_state.clone(),
                        Some((current_state.clone(), step)),
                    );
                    self.to_check.push_back((depth + 1, next_state));
                }
            }
        }

        self.time_spent += start.elapsed().as_secs_f32();
        Some(current_state)
    }
}
