//! Solution caching
//!
//! Solutions are keyed by the [`Puzzle`] that produced them. Only successful
//! solves are stored; invalid and unsolvable puzzles are re-checked on every
//! call.

mod memory;

use std::sync::Arc;
use std::time::Duration;

use crate::solver::{Puzzle, Solution};

pub use memory::MemoryCache;

/// How long a stored solution stays valid unless configured otherwise
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Storage for completed solutions, shared between concurrent solves.
///
/// Each call is atomic on its own. Two solves of the same puzzle may both
/// miss and both insert; the last insert wins.
pub trait SolutionCache: Send + Sync {
    /// Look up a live solution
    fn get(&self, key: &Puzzle) -> Option<Arc<Solution>>;

    /// Store a solution, replacing any previous entry for the key
    fn insert(&self, key: Puzzle, solution: Arc<Solution>);
}
