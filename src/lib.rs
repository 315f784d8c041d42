//! Facade crate for the fleetplan routing engine.
//!
//! This crate re-exports the core domain types and exposes the native solver
//! behind a feature flag.

#![forbid(unsafe_code)]

pub use fleetplan_core::{
    ConfigurationError, Diagnostics, Infeasibility, RouteLeg, Solution, SolveError, SolveOutcome,
    SolveRequest, SolveResponse, Solver, StaticMatrixProvider, Stop, TimeWindow, TravelMatrices,
    TravelMatrixError, TravelMatrixProvider, Vehicle, VehicleRoute, Visit,
};

#[cfg(feature = "solver-native")]
pub use fleetplan_solver::{CachingSolver, NativeSolver, SearchConfig, SolveCache};
