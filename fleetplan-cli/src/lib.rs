//! Command-line interface for planning delivery routes with fleetplan.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod request;
mod solve;

pub use error::CliError;
use solve::{SolveArgs, run_solve};
#[cfg(test)]
use solve::{
    SolveConfig, SolveSolverBuilder, config_from_layers_for_test, load_solve_request,
    run_solve_with,
};

pub(crate) const ARG_SOLVE_REQUEST: &str = "request";
pub(crate) const ARG_SOLVE_STARTS: &str = "starts";
pub(crate) const ARG_SOLVE_OUTPUT: &str = "output";
pub(crate) const ENV_SOLVE_REQUEST: &str = "FLEETPLAN_CMDS_SOLVE_REQUEST_PATH";

/// Run the fleetplan CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// request cannot be read, the solver rejects it, or the report cannot be
/// written. Infeasible requests are reported, not treated as errors.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fleetplan",
    about = "Plan capacity- and time-window-constrained delivery routes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan routes for the request in a JSON file.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
