//! Cached solving, the entry point used by the request layer and the CLI.

use std::sync::Arc;
use std::time::Instant;

use crate::cache::{MemoryCache, SolutionCache};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::solver::{self, Puzzle, Solution};

/// Solves puzzles and memoizes successful solutions.
///
/// The cache is injected, so several services can share one, and tests can
/// inspect it directly.
pub struct WaterJugService {
    cache: Arc<dyn SolutionCache>,
}

impl WaterJugService {
    pub fn new(cache: Arc<dyn SolutionCache>) -> Self {
        Self { cache }
    }

    /// Build a service backed by a [`MemoryCache`] configured from `config`
    pub fn from_config(config: &CacheConfig) -> Self {
        let mut cache = MemoryCache::new(config.ttl());
        cache.set_enabled(config.enabled);
        Self::new(Arc::new(cache))
    }

    pub fn cache(&self) -> &Arc<dyn SolutionCache> {
        &self.cache
    }

    /// Solve from raw request values
    ///
    /// Negative values fail with `InvalidInput` before the cache is consulted.
    pub fn solve(&self, x_capacity: i32, y_capacity: i32, wanted: i32) -> Result<Arc<Solution>> {
        let puzzle = Puzzle::new(x_capacity, y_capacity, wanted)?;
        self.solve_puzzle(puzzle)
    }

    /// Return the cached solution for `puzzle`, or solve and cache it.
    ///
    /// Failures are returned as-is and never stored.
    pub fn solve_puzzle(&self, puzzle: Puzzle) -> Result<Arc<Solution>> {
        if let Some(solution) = self.cache.get(&puzzle) {
            log::trace!("Cache hit for {}", puzzle);
            return Ok(solution);
        }
        log::trace!("Cache miss for {}", puzzle);

        let start = Instant::now();
        let solution = Arc::new(solver::solve(puzzle)?);

        self.cache.insert(puzzle, Arc::clone(&solution));
        log::info!(
            "Solved {} in {} steps ({:?})",
            puzzle,
            solution.len(),
            start.elapsed()
        );

        Ok(solution)
    }
}

impl Default for WaterJugService {
    fn default() -> Self {
        Self::new(Arc::new(MemoryCache::default()))
    }
}
