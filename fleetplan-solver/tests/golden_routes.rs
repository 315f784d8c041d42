//! Golden routes regression tests for the native solver.
//!
//! Each test loads a problem instance from JSON, solves it with a fixed
//! penalty round limit, and verifies the outcome matches the recorded one.
//!
//! These tests guard against regressions in the solver's behaviour by asserting
//! that well-defined, small problem instances produce consistent results.


use rstest::rstest;

use golden_routes_support::{assert_matches_golden, load_golden_route, solve_golden};

#[rstest]
#[case("line_of_four")]
#[case("two_clusters")]
#[case("window_order")]
#[case("overloaded")]
#[case("missed_window")]
fn golden_route_regression(#[case] name: &str) {
    let golden = load_golden_route(name);
    let outcome = solve_golden(&golden);
    assert_matches_golden(&golden, &outcome);
}

#[rstest]
#[case("line_of_four")]
#[case("two_clusters")]
fn golden_route_is_stable_across_runs(#[case] name: &str) {
    let golden = load_golden_route(name);
    assert_eq!(solve_golden(&golden).solution(), solve_golden(&golden).solution());
}
