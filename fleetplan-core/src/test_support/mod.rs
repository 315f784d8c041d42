//! Fixtures shared by unit, behaviour and property tests across the workspace.
//!
//! Deterministic matrix providers live here alongside small requests with
//! known answers and an independent checker for routing invariants.

mod requests;
mod verify;

pub use requests::{
    LINE_STEP_MINUTES, euclidean_matrices, line_request, overloaded_request, scattered_request,
    short_shift_request, two_stop_request, unreachable_window_request,
};
pub use verify::verify_solution;

use crate::{Stop, TravelMatrices, TravelMatrixError, TravelMatrixProvider};

/// Provider returning one-minute, one-kilometer edges between distinct stops.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitMatrixProvider;

impl TravelMatrixProvider for UnitMatrixProvider {
    fn get_travel_matrices(&self, stops: &[Stop]) -> Result<TravelMatrices, TravelMatrixError> {
        if stops.is_empty() {
            return Err(TravelMatrixError::EmptyInput);
        }
        let n = stops.len();
        let durations = (0..n)
            .map(|i| (0..n).map(|j| u32::from(i != j)).collect())
            .collect();
        let distances = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1_000.0 }).collect())
            .collect();
        Ok(TravelMatrices::new(durations, distances))
    }
}

/// Provider that always reports the routing backend as unreachable.
#[derive(Default, Debug, Copy, Clone)]
pub struct FailingMatrixProvider;

impl TravelMatrixProvider for FailingMatrixProvider {
    fn get_travel_matrices(&self, _stops: &[Stop]) -> Result<TravelMatrices, TravelMatrixError> {
        Err(TravelMatrixError::Unavailable {
            message: "connection refused".to_owned(),
        })
    }
}
