//! Behaviour-driven step definitions driving the solve CLI scenarios.

use super::helpers::{
    Workspace, overloaded_request, parse_report, two_stop_request, write_request, write_utf8,
};
use super::*;
use crate::solve::DefaultSolveSolverBuilder;
use camino::Utf8PathBuf;
use fleetplan_core::{
    SolveError, SolveOutcome, SolveRequest, Solver, TravelMatrices, TravelMatrixError,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

struct SolveWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    output_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    write_to_file: RefCell<bool>,
    backend_down: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SolveWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let request_path = workspace.path("request.json");
        let output_path = workspace.path("out/plan.json");
        Self {
            workspace,
            request_path,
            output_path,
            include_request: RefCell::new(true),
            write_to_file: RefCell::new(false),
            backend_down: RefCell::new(false),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["fleetplan".to_owned(), "solve".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(["--max-rounds".to_owned(), "5".to_owned()]);
        if *self.write_to_file.borrow() {
            argv.extend([
                format!("--{ARG_SOLVE_OUTPUT}"),
                self.output_path.as_str().to_owned(),
            ]);
        }
        argv
    }

    fn stdout_report(&self) -> Value {
        parse_report(&self.stdout.borrow())
    }

    fn expect_error(&self) -> CliError {
        self.result
            .take()
            .expect("result recorded")
            .expect_err("expected error")
    }

    fn expect_success(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err}");
        }
    }
}

#[fixture]
fn world() -> SolveWorld {
    SolveWorld::new()
}

struct UnavailableSolver;

impl Solver for UnavailableSolver {
    fn solve(&self, _request: &SolveRequest) -> Result<SolveOutcome, SolveError> {
        Err(SolveError::ResourceUnavailable(
            TravelMatrixError::Unavailable {
                message: "connection refused".to_owned(),
            },
        ))
    }
}

struct UnavailableSolverBuilder;

impl SolveSolverBuilder for UnavailableSolverBuilder {
    fn build(&self, _config: &SolveConfig, _matrices: TravelMatrices) -> Box<dyn Solver> {
        Box::new(UnavailableSolver)
    }
}

#[given("a two stop request exists on disk")]
fn two_stop_request_exists(#[from(world)] world: &SolveWorld) {
    write_request(&world.request_path, &two_stop_request());
}

#[given("an overloaded request exists on disk")]
fn overloaded_request_exists(#[from(world)] world: &SolveWorld) {
    write_request(&world.request_path, &overloaded_request());
}

#[given("the solve request contains invalid JSON")]
fn solve_request_contains_invalid_json(#[from(world)] world: &SolveWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the solve request path")]
fn omit_solve_request_path(#[from(world)] world: &SolveWorld) {
    world.include_request.replace(false);
}

#[given("I ask for the report in a file")]
fn report_in_file(#[from(world)] world: &SolveWorld) {
    world.write_to_file.replace(true);
}

#[given("the routing backend is unavailable")]
fn routing_backend_unavailable(#[from(world)] world: &SolveWorld) {
    world.backend_down.replace(true);
}

#[when("I run the solve command")]
fn run_solve_command(#[from(world)] world: &SolveWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Solve(args) => {
            let mut buffer = world.stdout.borrow_mut();
            if *world.backend_down.borrow() {
                run_solve_with(args, &UnavailableSolverBuilder, &mut *buffer)
            } else {
                run_solve_with(args, &DefaultSolveSolverBuilder, &mut *buffer)
            }
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints a solved report")]
fn command_prints_solved_report(#[from(world)] world: &SolveWorld) {
    world.expect_success();
    assert_eq!(world.stdout_report()["status"], "solved");
}

#[then("the report holds one route")]
fn report_holds_one_route(#[from(world)] world: &SolveWorld) {
    let report = world.stdout_report();
    let routes = report["solution"]["routes"].as_array().expect("routes array");
    assert_eq!(routes.len(), 1);
}

#[then("the command succeeds and prints an infeasible report")]
fn command_prints_infeasible_report(#[from(world)] world: &SolveWorld) {
    world.expect_success();
    let report = world.stdout_report();
    assert_eq!(report["status"], "infeasible");
    assert!(report["reason"].is_string());
}

#[then("the command succeeds without printing")]
fn command_succeeds_silently(#[from(world)] world: &SolveWorld) {
    world.expect_success();
    assert!(world.stdout.borrow().is_empty());
}

#[then("the report file holds a solved report")]
fn report_file_holds_solved_report(#[from(world)] world: &SolveWorld) {
    let written = std::fs::read(&world.output_path).expect("report written");
    assert_eq!(parse_report(&written)["status"], "solved");
    assert!(world.workspace.path("out").is_dir());
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &SolveWorld) {
    match world.expect_error() {
        CliError::ParseSolveRequest { .. } => {}
        other => panic!("expected ParseSolveRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &SolveWorld) {
    match world.expect_error() {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_SOLVE_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because travel data is unavailable")]
fn command_fails_unavailable(#[from(world)] world: &SolveWorld) {
    match world.expect_error() {
        CliError::Solve {
            source: SolveError::ResourceUnavailable(_),
            ..
        } => {}
        other => panic!("expected an unavailable backend, found {other:?}"),
    }
}

macro_rules! register_solve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/solve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SolveWorld) {
            let _ = world;
        }
    };
}

register_solve_scenario!(solve_happy_path, "solving a request from JSON");
register_solve_scenario!(solve_infeasible, "reporting an infeasible request");
register_solve_scenario!(solve_to_file, "writing the report to a file");
register_solve_scenario!(solve_invalid_json, "rejecting invalid JSON input");
register_solve_scenario!(solve_missing_request, "rejecting missing request paths");
register_solve_scenario!(solve_backend_down, "surfacing an unavailable routing backend");
