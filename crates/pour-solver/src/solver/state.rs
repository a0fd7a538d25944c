use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

/// Fill levels of bucket X and bucket Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct State {
    pub x: u32,
    pub y: u32,
}

impl State {
    pub const EMPTY: State = State { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Whether either bucket holds exactly `amount`
    pub fn holds(&self, amount: u32) -> bool {
        self.x == amount || self.y == amount
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A validated puzzle: both capacities and the wanted amount.
///
/// Construction rejects negative values, so every `Puzzle` that exists can be
/// handed to the search directly. Also used as the solution cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    x_capacity: u32,
    y_capacity: u32,
    wanted: u32,
}

impl Puzzle {
    /// Validate raw request values
    ///
    /// Fails with [`SolveError::InvalidInput`] if any value is negative.
    pub fn new(x_capacity: i32, y_capacity: i32, wanted: i32) -> Result<Self> {
        let to_level = |value: i32| u32::try_from(value).map_err(|_| SolveError::InvalidInput);

        Ok(Self {
            x_capacity: to_level(x_capacity)?,
            y_capacity: to_level(y_capacity)?,
            wanted: to_level(wanted)?,
        })
    }

    pub fn x_capacity(&self) -> u32 {
        self.x_capacity
    }

    pub fn y_capacity(&self) -> u32 {
        self.y_capacity
    }

    /// Amount wanted in either bucket
    pub fn wanted(&self) -> u32 {
        self.wanted
    }

    /// Both capacities as a full state
    pub fn capacity(&self) -> State {
        State::new(self.x_capacity, self.y_capacity)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.x_capacity, self.y_capacity, self.wanted)
    }
}

/// The move that produced a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "Fill Bucket X")]
    FillX,
    #[serde(rename = "Fill Bucket Y")]
    FillY,
    #[serde(rename = "Empty Bucket X")]
    EmptyX,
    #[serde(rename = "Empty Bucket Y")]
    EmptyY,
    #[serde(rename = "Transfer Y to X")]
    TransferYToX,
    #[serde(rename = "Transfer X to Y")]
    TransferXToY,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::FillX => "Fill Bucket X",
            Action::FillY => "Fill Bucket Y",
            Action::EmptyX => "Empty Bucket X",
            Action::EmptyY => "Empty Bucket Y",
            Action::TransferYToX => "Transfer Y to X",
            Action::TransferXToY => "Transfer X to Y",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker carried by the final step of a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Solved,
}

/// One move of a solution and the levels it leaves behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position in the solution
    pub step: usize,
    pub bucket_x: u32,
    pub bucket_y: u32,
    pub action: Action,
    pub status: Option<Status>,
}

impl Step {
    pub fn state(&self) -> State {
        State::new(self.bucket_x, self.bucket_y)
    }

    pub fn is_solved(&self) -> bool {
        self.status == Some(Status::Solved)
    }
}

/// Ordered moves from two empty buckets to the wanted amount
pub type Solution = Vec<Step>;
