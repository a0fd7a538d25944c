//! Two-jug measuring puzzle solver
//!
//! Finds the shortest sequence of fill, empty and transfer moves that leaves
//! one of two buckets holding a wanted amount, and memoizes solutions in a
//! time-bounded cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod service;
pub mod solver;

pub use api::{Api, ApiError, ApiResponse, SolveRequest, SolveResponse};
pub use cache::{MemoryCache, SolutionCache, DEFAULT_TTL};
pub use config::{CacheConfig, Config, ConfigError, LimitsConfig, ServerConfig};
pub use error::{Result, SolveError};
pub use service::WaterJugService;
pub use solver::{Action, Puzzle, Solution, State, Status, Step};
