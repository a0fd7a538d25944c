use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// One of the capacities or the wanted amount is negative
    #[error("Invalid input values")]
    InvalidInput,

    /// The wanted amount can never be measured with these buckets
    #[error("No solution possible")]
    NoSolution,
}

pub type Result<T> = std::result::Result<T, SolveError>;
