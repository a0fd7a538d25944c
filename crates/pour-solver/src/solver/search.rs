use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use super::moves::next_states;
use super::state::{Action, Puzzle, Solution, State, Status, Step};
use crate::error::{Result, SolveError};

/// Largest `(x + 1) * (y + 1)` grid allocated up front for the visited set.
/// Bigger puzzles fall back to a hashed map, which only grows with the
/// states actually reached.
const DENSE_GRID_LIMIT: u64 = 1 << 20;

/// Greatest common divisor, with `gcd(0, 0) == 0`
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Decide whether `puzzle` has a solution before searching.
///
/// The wanted amount must fit in the larger bucket and be a multiple of the
/// gcd of both capacities.
pub fn check_solvable(puzzle: &Puzzle) -> Result<()> {
    let (x_capacity, y_capacity, wanted) = (puzzle.x_capacity(), puzzle.y_capacity(), puzzle.wanted());

    if wanted > x_capacity.max(y_capacity) {
        return Err(SolveError::NoSolution);
    }

    match gcd(x_capacity, y_capacity) {
        // Both buckets have no capacity: only "nothing" can be measured
        0 if wanted != 0 => Err(SolveError::NoSolution),
        0 => Ok(()),
        divisor if wanted % divisor != 0 => Err(SolveError::NoSolution),
        _ => Ok(()),
    }
}

/// Check solvability, then search.
pub fn solve(puzzle: Puzzle) -> Result<Solution> {
    check_solvable(&puzzle)?;
    search(puzzle)
}

/// How a state was first reached
#[derive(Debug, Clone, Copy)]
enum Visit {
    Start,
    From { parent: State, action: Action },
}

/// States discovered so far, each with the move that first reached it
enum Visited {
    Dense { width: usize, cells: Vec<Option<Visit>> },
    Sparse(HashMap<State, Visit>),
}

impl Visited {
    fn new(capacity: State) -> Self {
        let width = capacity.y as u64 + 1;
        let cells = (capacity.x as u64 + 1) * width;

        if cells <= DENSE_GRID_LIMIT {
            Visited::Dense {
                width: width as usize,
                cells: vec![None; cells as usize],
            }
        } else {
            Visited::Sparse(HashMap::new())
        }
    }

    /// Record `state` unless already seen. Returns whether it was new.
    fn insert(&mut self, state: State, visit: Visit) -> bool {
        match self {
            Visited::Dense { width, cells } => {
                let cell = &mut cells[state.x as usize * *width + state.y as usize];
                if cell.is_some() {
                    return false;
                }
                *cell = Some(visit);
                true
            }
            Visited::Sparse(map) => {
                if map.contains_key(&state) {
                    return false;
                }
                map.insert(state, visit);
                true
            }
        }
    }

    fn get(&self, state: State) -> Option<Visit> {
        match self {
            Visited::Dense { width, cells } => cells[state.x as usize * *width + state.y as usize],
            Visited::Sparse(map) => map.get(&state).copied(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Visited::Dense { cells, .. } => cells.iter().filter(|c| c.is_some()).count(),
            Visited::Sparse(map) => map.len(),
        }
    }

    /// Walk predecessors back from `target` and number the moves from 1.
    fn path_to(&self, target: State) -> Solution {
        let mut moves = Vec::new();
        let mut current = target;

        while let Some(Visit::From { parent, action }) = self.get(current) {
            moves.push((current, action));
            current = parent;
        }

        moves
            .into_iter()
            .rev()
            .enumerate()
            .map(|(index, (state, action))| Step {
                step: index + 1,
                bucket_x: state.x,
                bucket_y: state.y,
                action,
                status: None,
            })
            .collect()
    }
}

/// Outcome of one breadth-first exploration
struct Exploration {
    visited: Visited,
    /// Number of states pushed onto the frontier
    enqueued: usize,
    /// First dequeued state holding the wanted amount
    target: Option<State>,
}

/// Expand states level by level until one holds the wanted amount or the
/// frontier runs dry.
fn explore(puzzle: Puzzle) -> Exploration {
    let capacity = puzzle.capacity();
    let mut visited = Visited::new(capacity);
    let mut frontier = VecDeque::new();

    visited.insert(State::EMPTY, Visit::Start);
    frontier.push_back(State::EMPTY);
    let mut enqueued = 1;

    while let Some(current) = frontier.pop_front() {
        if current.holds(puzzle.wanted()) {
            return Exploration {
                visited,
                enqueued,
                target: Some(current),
            };
        }

        for (next, action) in next_states(current, capacity) {
            if visited.insert(next, Visit::From { parent: current, action }) {
                frontier.push_back(next);
                enqueued += 1;
            }
        }
    }

    Exploration {
        visited,
        enqueued,
        target: None,
    }
}

/// Breadth-first search from two empty buckets.
///
/// Each state is enqueued at most once, so the search ends after at most
/// `(x + 1) * (y + 1)` expansions. The last step of the returned solution is
/// marked [`Status::Solved`]; the solution is empty when nothing is wanted.
///
/// Fails with [`SolveError::NoSolution`] if the wanted amount is unreachable.
pub fn search(puzzle: Puzzle) -> Result<Solution> {
    let start = Instant::now();

    log::debug!("Searching for {} in buckets {}", puzzle.wanted(), puzzle.capacity());

    let exploration = explore(puzzle);

    let Some(target) = exploration.target else {
        log::debug!(
            "Exhausted {} states without reaching {} for {}",
            exploration.enqueued,
            puzzle.wanted(),
            puzzle
        );
        return Err(SolveError::NoSolution);
    };

    let mut solution = exploration.visited.path_to(target);
    if let Some(last) = solution.last_mut() {
        last.status = Some(Status::Solved);
    }

    log::debug!(
        "Found {}-step solution for {} after visiting {} states in {:?}",
        solution.len(),
        puzzle,
        exploration.enqueued,
        start.elapsed()
    );
    Ok(solution)
}
