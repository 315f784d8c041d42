//! The `Solver` seam and the values it returns.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::{ConfigurationError, SolveRequest, Solution, TravelMatrixError};

/// Metrics captured while solving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// Objective of the construction result that seeded the winning search.
    pub construction_objective: u64,
    /// Penalty rounds completed by the winning search.
    pub penalty_rounds: u32,
    /// Number of independent searches run.
    pub starts: usize,
    /// Index of the search whose solution was returned.
    pub winning_start: usize,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The routes found.
    pub solution: Solution,
    /// Metrics captured while solving.
    pub diagnostics: Diagnostics,
}

/// Why no feasible plan exists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Infeasibility {
    /// The fleet cannot carry the total demand.
    InsufficientCapacity {
        /// Sum of stop demands.
        demand: u64,
        /// Sum of vehicle capacities.
        capacity: u64,
    },
    /// Construction could not place these stops on any vehicle.
    UnplaceableStops {
        /// Location indices, ascending.
        stops: Vec<usize>,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCapacity { demand, capacity } => write!(
                f,
                "total demand {demand} exceeds total fleet capacity {capacity}"
            ),
            Self::UnplaceableStops { stops } => {
                f.write_str("no feasible position for stops")?;
                for (i, stop) in stops.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{stop}")?;
                }
                Ok(())
            }
        }
    }
}

/// Terminal result of a solve that did not fail.
///
/// Infeasibility is a normal answer, not an error: the inputs were well formed
/// but admit no plan that honours every constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A feasible plan was found.
    Solved(SolveResponse),
    /// No feasible plan exists or none was found.
    Infeasible(Infeasibility),
}

impl SolveOutcome {
    /// The response, if the solve succeeded.
    #[must_use]
    pub const fn response(&self) -> Option<&SolveResponse> {
        match self {
            Self::Solved(response) => Some(response),
            Self::Infeasible(_) => None,
        }
    }

    /// The solution, if the solve succeeded.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.response().map(|response| &response.solution)
    }

    /// The reason, if the problem was infeasible.
    #[must_use]
    pub const fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            Self::Solved(_) => None,
            Self::Infeasible(reason) => Some(reason),
        }
    }

    /// Whether a plan was found.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The request or its matrices were malformed.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The travel matrices could not be obtained.
    #[error("travel matrices unavailable: {0}")]
    ResourceUnavailable(#[from] TravelMatrixError),
}

/// Alias for the solver error type.
pub type Error = SolveError;

/// Assign stops to vehicles and order them.
///
/// Implementations return [`SolveError::Configuration`] for malformed input
/// rather than panicking, and report infeasible problems through
/// [`SolveOutcome::Infeasible`]. Solvers must be `Send + Sync` to operate
/// safely across threads.
pub trait Solver: Send + Sync {
    /// Solve a request, producing an outcome or an error.
    fn solve(&self, request: &SolveRequest) -> Result<SolveOutcome, Error>;
}
