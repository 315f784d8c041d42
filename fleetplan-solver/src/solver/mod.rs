//! `Solver` implementation running construction and guided local search.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use fleetplan_core::{
    Diagnostics, Error, Infeasibility, SolveOutcome, SolveRequest, SolveResponse, Solver,
    TravelMatrixProvider,
};
use log::{debug, info, warn};

use crate::extract::extract;
use crate::model::ProblemModel;
use crate::search::{Budget, SearchConfig, search};

/// Native CVRPTW solver.
///
/// The solver is generic over the travel-matrix boundary, so the same search
/// runs against precomputed matrices, a routing backend, or test fixtures.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use fleetplan_core::{
///     SolveRequest, Solver, StaticMatrixProvider, Stop, TravelMatrices, Vehicle,
/// };
/// use fleetplan_solver::{NativeSolver, SearchConfig};
///
/// let stops = vec![
///     Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
///     Stop::new("Bakery", Coord { x: 0.01, y: 0.0 }).with_demand(1),
/// ];
/// let matrices = TravelMatrices::new(
///     vec![vec![0, 12], vec![12, 0]],
///     vec![vec![0.0, 3_000.0], vec![3_000.0, 0.0]],
/// );
/// let solver = NativeSolver::with_config(
///     StaticMatrixProvider::new(matrices),
///     SearchConfig { max_rounds: Some(5), ..SearchConfig::default() },
/// );
/// let request = SolveRequest::new(stops, vec![Vehicle::new("Van", 4, 0)]);
/// let outcome = solver.solve(&request)?;
/// let solution = outcome.solution().expect("one stop always fits");
/// assert_eq!(solution.objective, 24);
/// # Ok::<(), fleetplan_core::SolveError>(())
/// ```
pub struct NativeSolver<P>
where
    P: TravelMatrixProvider,
{
    provider: P,
    config: SearchConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P> NativeSolver<P>
where
    P: TravelMatrixProvider,
{
    /// Construct a solver using default configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, SearchConfig::default())
    }

    /// Construct a solver with explicit configuration.
    pub const fn with_config(provider: P, config: SearchConfig) -> Self {
        Self {
            provider,
            config,
            cancel: None,
        }
    }

    /// Stop searching early once `flag` is set.
    ///
    /// The best plan found so far is still returned.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<P> Solver for NativeSolver<P>
where
    P: TravelMatrixProvider + Send + Sync,
{
    fn solve(&self, request: &SolveRequest) -> Result<SolveOutcome, Error> {
        request.validate()?;
        let started_at = Instant::now();

        let matrices = self.provider.get_travel_matrices(&request.stops)?;
        let model = ProblemModel::build(request, &matrices)?;

        let demand = model.visit_demand();
        let capacity = model.fleet_capacity();
        if demand > capacity {
            warn!("total demand {demand} exceeds fleet capacity {capacity}");
            return Ok(SolveOutcome::Infeasible(
                Infeasibility::InsufficientCapacity { demand, capacity },
            ));
        }

        let budget = Budget::new(
            started_at,
            self.config.time_limit,
            self.cancel.as_deref(),
        );
        let outcome = match search(&model, &self.config, &budget) {
            Ok(outcome) => outcome,
            Err(stops) => {
                warn!("construction left {} stops unplaced", stops.len());
                return Ok(SolveOutcome::Infeasible(Infeasibility::UnplaceableStops {
                    stops,
                }));
            }
        };

        debug_assert!(outcome.plan.is_feasible(), "search returned an infeasible plan");
        debug!(
            "start {} of {} won with cost {} after {} rounds",
            outcome.winning_start, outcome.starts, outcome.cost, outcome.rounds
        );
        let solution = extract(request, &model, &outcome.plan);
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            construction_objective: outcome.construction_cost,
            penalty_rounds: outcome.rounds,
            starts: outcome.starts,
            winning_start: outcome.winning_start,
        };
        info!(
            "solved {} stops on {} routes: objective {} (construction {}) in {:?}",
            solution.served_stops(),
            solution.routes.len(),
            solution.objective,
            diagnostics.construction_objective,
            diagnostics.solve_time
        );
        Ok(SolveOutcome::Solved(SolveResponse {
            solution,
            diagnostics,
        }))
    }
}
