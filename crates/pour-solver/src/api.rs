//! JSON request handling for the solve endpoint
//!
//! Transport-agnostic: the server hands over the method, URL and body of a
//! request and writes back the [`ApiResponse`]. Solver errors become
//! `400 Bad Request` with their message surfaced verbatim.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LimitsConfig;
use crate::error::SolveError;
use crate::service::WaterJugService;
use crate::solver::{Puzzle, Solution, Step};

pub const SOLVE_ROUTE: &str = "/WaterJug/solve";

/// Body of `POST /WaterJug/solve`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(rename = "XCapacity", alias = "xCapacity")]
    pub x_capacity: i32,
    #[serde(rename = "YCapacity", alias = "yCapacity")]
    pub y_capacity: i32,
    #[serde(rename = "ZAmountWanted", alias = "zAmountWanted")]
    pub z_amount_wanted: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solution: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Capacity exceeds limit of {0}")]
    CapacityLimit(u32),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Solve(_) | ApiError::InvalidBody(_) | ApiError::CapacityLimit(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
        }
    }
}

/// Status code and JSON body ready to be written to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status, body },
            Err(e) => {
                log::error!("Failed to encode response: {}", e);
                Self {
                    status: 500,
                    body: r#"{"error":"Internal server error"}"#.to_string(),
                }
            }
        }
    }

    fn error(error: &ApiError) -> Self {
        Self::json(
            error.status_code(),
            &ErrorResponse {
                error: error.to_string(),
            },
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Routes requests to a shared [`WaterJugService`]
pub struct Api {
    service: Arc<WaterJugService>,
    limits: LimitsConfig,
}

impl Api {
    pub fn new(service: Arc<WaterJugService>, limits: LimitsConfig) -> Self {
        Self { service, limits }
    }

    pub fn service(&self) -> &Arc<WaterJugService> {
        &self.service
    }

    /// Handle one request and build the response to send back
    pub fn handle(&self, method: &str, url: &str, body: &[u8]) -> ApiResponse {
        let result = self.route(method, url).and_then(|()| {
            let request: SolveRequest = serde_json::from_slice(body)?;
            self.solve(&request)
        });

        match result {
            Ok(solution) => ApiResponse::json(
                200,
                &SolveResponse {
                    solution: solution.to_vec(),
                },
            ),
            Err(e) => {
                log::debug!("{} {} rejected: {}", method, url, e);
                ApiResponse::error(&e)
            }
        }
    }

    /// Validate and solve a decoded request
    pub fn solve(&self, request: &SolveRequest) -> Result<Arc<Solution>, ApiError> {
        let puzzle = Puzzle::new(
            request.x_capacity,
            request.y_capacity,
            request.z_amount_wanted,
        )?;

        if !self.limits.allows(puzzle.x_capacity()) || !self.limits.allows(puzzle.y_capacity()) {
            return Err(ApiError::CapacityLimit(self.limits.max_capacity));
        }

        Ok(self.service.solve_puzzle(puzzle)?)
    }

    fn route(&self, method: &str, url: &str) -> Result<(), ApiError> {
        let path = url.split('?').next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        if !path.eq_ignore_ascii_case(SOLVE_ROUTE) {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !method.eq_ignore_ascii_case("POST") {
            return Err(ApiError::MethodNotAllowed(method.to_uppercase()));
        }
        Ok(())
    }
}
