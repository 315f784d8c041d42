//! Integration test validating benchmark helpers work with `NativeSolver`.
//!
//! This test ensures the full benchmark data pipeline (stop generation,
//! travel matrices, solver invocation) works correctly end-to-end.

use fleetplan_core::{SolveOutcome, Solver, StaticMatrixProvider};
use fleetplan_solver::NativeSolver;
use fleetplan_core::test_support::verify_solution;
use rstest::rstest;

/// Include the benchmark support module from the benches directory.
#[expect(dead_code, reason = "bench_support exports items not all used here")]
#[path = "../benches/bench_support.rs"]
mod bench_support;

use bench_support::{BENCHMARK_SEED, benchmark_config, build_benchmark_request};

#[rstest]
#[case(10)]
#[case(25)]
fn benchmark_pipeline_produces_valid_plans(#[case] size: usize) {
    let (request, matrices) = build_benchmark_request(size, BENCHMARK_SEED);
    let solver =
        NativeSolver::with_config(StaticMatrixProvider::new(matrices.clone()), benchmark_config());

    let outcome = solver.solve(&request).expect("benchmark requests are well formed");
    match outcome {
        SolveOutcome::Solved(response) => {
            assert_eq!(response.solution.served_stops(), size);
            assert_eq!(
                verify_solution(&request, &matrices, &response.solution),
                Ok(())
            );
        }
        SolveOutcome::Infeasible(reason) => {
            panic!("benchmark instance of {size} stops should be feasible: {reason}")
        }
    }
}

#[rstest]
fn benchmark_pipeline_is_reproducible() {
    let (request, matrices) = build_benchmark_request(15, BENCHMARK_SEED);
    let solver = NativeSolver::with_config(StaticMatrixProvider::new(matrices), benchmark_config());
    let first = solver.solve(&request).expect("solves");
    let second = solver.solve(&request).expect("solves");
    assert_eq!(first.solution(), second.solution());
}
