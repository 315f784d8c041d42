//! Native CVRPTW solver for Fleetplan.
//!
//! This crate provides [`NativeSolver`], the default implementation of the
//! [`Solver`](fleetplan_core::Solver) trait. It assigns delivery stops to
//! vehicles and orders them so that every route respects vehicle capacity,
//! stop time windows and the vehicle's maximum route duration, while keeping
//! total routing cost low.
//!
//! A solve runs in four phases over an immutable problem model:
//!
//! 1. global cheapest insertion builds a first plan;
//! 2. first-improvement local search (relocate, swap, 2-opt, or-opt and tail
//!    exchange between routes) descends to a local optimum;
//! 3. guided local search penalises the most costly arcs of each local
//!    optimum and descends again on the penalised costs until the time budget
//!    or round limit runs out, keeping the cheapest plan seen;
//! 4. the best plan is turned into per-vehicle routes with arrival minutes.
//!
//! Several independent searches may run in parallel; see [`SearchConfig`].
//! [`CachingSolver`] memoises outcomes for repeated identical requests.

#![forbid(unsafe_code)]

mod cache;
mod construction;
mod extract;
mod guided;
mod local_search;
mod model;
mod plan;
mod schedule;
mod search;
mod solver;

pub use cache::{CacheKey, CachingSolver, DEFAULT_CACHE_CAPACITY, SolveCache};
pub use search::SearchConfig;
pub use solver::NativeSolver;
