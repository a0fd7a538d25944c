//! Breadth-first solver for the two-jug measuring puzzle.
//!
//! The state graph has one node per pair of bucket levels `(x, y)`. Edges are
//! the six moves produced by [`next_states`]. Starting from two empty buckets,
//! the search expands states level by level, so the first state found holding
//! the wanted amount is reached with the fewest possible moves.
//!
//! # Example
//!
//! ```
//! use pour_solver::solver::{solve, Puzzle, Status};
//!
//! let puzzle = Puzzle::new(3, 5, 4).unwrap();
//! let steps = solve(puzzle).unwrap();
//!
//! assert_eq!(steps.len(), 6);
//! assert_eq!(steps.last().unwrap().status, Some(Status::Solved));
//! ```

mod moves;
mod search;
mod state;

pub use moves::next_states;
pub use search::{check_solvable, gcd, search, solve};
pub use state::{Action, Puzzle, Solution, State, Status, Step};
