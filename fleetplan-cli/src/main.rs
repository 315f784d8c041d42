//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use fleetplan_cli::CliError;

fn main() -> ExitCode {
    match fleetplan_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Clap renders help and version requests itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("fleetplan: {err}");
            ExitCode::FAILURE
        }
    }
}
