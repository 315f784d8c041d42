#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for `NativeSolver` using rstest-bdd.

use std::cell::RefCell;

use fleetplan_core::{
    ConfigurationError, Error, Infeasibility, SolveError, SolveOutcome, SolveRequest, Solver,
    StaticMatrixProvider, Stop, TravelMatrices, TravelMatrixError, TravelMatrixProvider, Vehicle,
};
use fleetplan_core::test_support::{
    FailingMatrixProvider, overloaded_request, short_shift_request, two_stop_request,
    unreachable_window_request, verify_solution,
};
use fleetplan_solver::{NativeSolver, SearchConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Clone, Default)]
enum ProviderChoice {
    #[default]
    Static,
    Failing,
}

/// Serves the scenario's matrices or fails like an unreachable backend.
struct ScenarioProvider {
    choice: ProviderChoice,
    matrices: TravelMatrices,
}

impl TravelMatrixProvider for ScenarioProvider {
    fn get_travel_matrices(&self, stops: &[Stop]) -> Result<TravelMatrices, TravelMatrixError> {
        match self.choice {
            ProviderChoice::Static => {
                StaticMatrixProvider::new(self.matrices.clone()).get_travel_matrices(stops)
            }
            ProviderChoice::Failing => FailingMatrixProvider.get_travel_matrices(stops),
        }
    }
}

#[derive(Debug, Default)]
struct SolverWorld {
    stops: RefCell<Vec<Stop>>,
    vehicles: RefCell<Vec<Vehicle>>,
    matrices: RefCell<TravelMatrices>,
    provider: RefCell<ProviderChoice>,
    outcome: RefCell<Option<Result<SolveOutcome, Error>>>,
}

impl SolverWorld {
    fn adopt(&self, (request, matrices): (SolveRequest, TravelMatrices)) {
        self.stops.replace(request.stops);
        self.vehicles.replace(request.vehicles);
        self.matrices.replace(matrices);
    }

    fn request(&self) -> SolveRequest {
        SolveRequest::new(self.stops.borrow().clone(), self.vehicles.borrow().clone())
    }

    fn expect_outcome(&self) -> Result<SolveOutcome, Error> {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
    }

    fn expect_infeasibility(&self) -> Infeasibility {
        self.expect_outcome()
            .expect("solve should not error")
            .infeasibility()
            .cloned()
            .expect("problem should be infeasible")
    }
}

#[fixture]
fn world() -> SolverWorld {
    SolverWorld::default()
}

#[given("a depot with two unit-demand stops")]
fn given_two_stops(world: &SolverWorld) {
    let (request, matrices) = two_stop_request();
    world.stops.replace(request.stops);
    world.matrices.replace(matrices);
}

#[given("one van with capacity 3")]
fn given_van_of_three(world: &SolverWorld) {
    world.vehicles.replace(vec![Vehicle::new("Van 1", 3, 0)]);
}

#[given("three stops demanding ten units in total")]
fn given_overloaded(world: &SolverWorld) {
    let (request, matrices) = overloaded_request();
    world.stops.replace(request.stops);
    world.matrices.replace(matrices);
}

#[given("one van with capacity 5")]
fn given_van_of_five(world: &SolverWorld) {
    world.vehicles.replace(vec![Vehicle::new("Van 1", 5, 0)]);
}

#[given("a stop open from minute 60 to 90 that is 200 minutes away")]
fn given_unreachable_window(world: &SolverWorld) {
    world.adopt(unreachable_window_request());
}

#[given("a twenty minute round trip for a van limited to five minutes")]
fn given_short_shift(world: &SolverWorld) {
    world.adopt(short_shift_request());
}

#[given("precomputed travel matrices")]
fn given_static_provider(world: &SolverWorld) {
    world.provider.replace(ProviderChoice::Static);
}

#[given("a failing matrix provider")]
fn given_failing_provider(world: &SolverWorld) {
    world.provider.replace(ProviderChoice::Failing);
}

#[when("the native solver runs")]
fn when_solver_runs(world: &SolverWorld) {
    let provider = ScenarioProvider {
        choice: world.provider.borrow().clone(),
        matrices: world.matrices.borrow().clone(),
    };
    let solver = NativeSolver::with_config(provider, SearchConfig::bounded(10));
    let outcome = solver.solve(&world.request());
    world.outcome.replace(Some(outcome));
}

#[then("one route serves both stops")]
fn then_one_route(world: &SolverWorld) {
    let outcome = world.expect_outcome().expect("solve should not error");
    let solution = outcome.solution().expect("plan should be feasible");
    assert_eq!(solution.routes.len(), 1);
    assert_eq!(solution.served_stops(), 2);
}

#[then("the plan passes the invariant check")]
fn then_invariants_hold(world: &SolverWorld) {
    let outcome = world.expect_outcome().expect("solve should not error");
    let solution = outcome.solution().expect("plan should be feasible");
    let matrices = world.matrices.borrow();
    assert_eq!(verify_solution(&world.request(), &matrices, solution), Ok(()));
}

#[then("the problem is infeasible because demand exceeds capacity")]
fn then_insufficient_capacity(world: &SolverWorld) {
    assert_eq!(
        world.expect_infeasibility(),
        Infeasibility::InsufficientCapacity {
            demand: 10,
            capacity: 5,
        }
    );
}

#[then("the problem is infeasible because stop 1 cannot be placed")]
fn then_unplaceable(world: &SolverWorld) {
    assert_eq!(
        world.expect_infeasibility(),
        Infeasibility::UnplaceableStops { stops: vec![1] }
    );
}

#[then("the solve fails because the matrices are unavailable")]
fn then_unavailable(world: &SolverWorld) {
    let err = world.expect_outcome().expect_err("provider should fail");
    assert!(matches!(err, SolveError::ResourceUnavailable(_)));
}

#[then("the solve fails with a configuration error")]
fn then_configuration_error(world: &SolverWorld) {
    let err = world.expect_outcome().expect_err("request lacks vehicles");
    assert_eq!(err, SolveError::Configuration(ConfigurationError::NoVehicles));
}

#[scenario(path = "tests/features/native_solver.feature", index = 0)]
fn two_stops_on_one_van(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_solver.feature", index = 1)]
fn insufficient_capacity(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_solver.feature", index = 2)]
fn unreachable_window(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_solver.feature", index = 3)]
fn shift_limit(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_solver.feature", index = 4)]
fn provider_failure(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_solver.feature", index = 5)]
fn missing_vehicles(world: SolverWorld) {
    let _ = world;
}
