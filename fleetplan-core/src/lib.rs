//! Core domain types for the Fleetplan routing engine.
//!
//! A [`SolveRequest`] lists the depot, the delivery [`Stop`]s and the
//! [`Vehicle`]s available. A [`Solver`] obtains travel matrices through a
//! [`TravelMatrixProvider`] and answers with a [`SolveOutcome`]: either a
//! [`Solution`] of per-vehicle routes or the reason no feasible plan exists.
//!
//! Validation lives here so every solver rejects malformed input the same way.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod request;
mod solution;
mod solver;
mod stop;
pub mod travel_matrix;
mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::{Anchor, ConfigurationError, MatrixKind};
pub use request::SolveRequest;
pub use solution::{RouteLeg, Solution, VehicleRoute, Visit, format_clock};
pub use solver::{
    Diagnostics, Error, Infeasibility, SolveError, SolveOutcome, SolveResponse, Solver,
};
pub use stop::{DAY_MINUTES, Stop, TimeWindow, TimeWindowError};
pub use travel_matrix::{
    StaticMatrixProvider, TravelMatrices, TravelMatrixError, TravelMatrixProvider,
};
pub use vehicle::Vehicle;
