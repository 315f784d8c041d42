//! Solve command implementation for the fleetplan CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fleetplan_core::{
    Infeasibility, SolveOutcome, SolveResponse, Solver, StaticMatrixProvider, TravelMatrices,
};
use fleetplan_solver::{NativeSolver, SearchConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file, path_is_dir, write_utf8_file};
use crate::request::RequestFile;
use crate::{ARG_SOLVE_OUTPUT, ARG_SOLVE_REQUEST, ARG_SOLVE_STARTS, CliError, ENV_SOLVE_REQUEST};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan delivery routes for the stops and fleet described in a \
                 JSON request file. The file also carries the travel duration \
                 and distance matrices. Search settings can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Plan routes for a delivery request"
)]
#[ortho_config(prefix = "FLEETPLAN")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing stops, vehicles and travel matrices.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Wall-clock budget for the search, in seconds.
    #[arg(long = "time-limit-secs", value_name = "secs")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<u64>,
    /// Number of independent searches run in parallel.
    #[arg(long = ARG_SOLVE_STARTS, value_name = "count")]
    #[serde(default)]
    pub(crate) starts: Option<usize>,
    /// Seed for the perturbed starts.
    #[arg(long = "seed", value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Stop after this many penalty rounds, making the result reproducible.
    #[arg(long = "max-rounds", value_name = "rounds")]
    #[serde(default)]
    pub(crate) max_rounds: Option<u32>,
    /// Write the report here instead of standard output.
    #[arg(long = ARG_SOLVE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Search settings handed to the solver.
    pub(crate) search: SearchConfig,
    /// Report destination; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)?;
        if let Some(output) = &self.output {
            let is_dir = path_is_dir(output).map_err(|source| CliError::InspectSourcePath {
                field: ARG_SOLVE_OUTPUT,
                path: output.clone(),
                source,
            })?;
            if is_dir {
                return Err(CliError::OutputPathIsDirectory {
                    path: output.clone(),
                });
            }
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        if args.starts == Some(0) {
            return Err(CliError::InvalidOption {
                field: ARG_SOLVE_STARTS,
                reason: "at least one start is required",
            });
        }

        let defaults = SearchConfig::default();
        let search = SearchConfig {
            time_limit: args
                .time_limit_secs
                .map_or(defaults.time_limit, Duration::from_secs),
            starts: args.starts.unwrap_or(defaults.starts),
            seed: args.seed.unwrap_or(defaults.seed),
            max_rounds: args.max_rounds.or(defaults.max_rounds),
            ..defaults
        };

        Ok(Self {
            request_path,
            search,
            output: args.output,
        })
    }
}

/// Builds a solver instance for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig, matrices: TravelMatrices) -> Box<dyn Solver>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig, matrices: TravelMatrices) -> Box<dyn Solver> {
        Box::new(NativeSolver::with_config(
            StaticMatrixProvider::new(matrices),
            config.search.clone(),
        ))
    }
}

/// Report written for every completed solve, tagged by `status`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SolveReport<'a> {
    Solved {
        #[serde(flatten)]
        response: &'a SolveResponse,
    },
    Infeasible {
        reason: String,
        detail: &'a Infeasibility,
    },
}

impl<'a> From<&'a SolveOutcome> for SolveReport<'a> {
    fn from(outcome: &'a SolveOutcome) -> Self {
        match outcome {
            SolveOutcome::Solved(response) => Self::Solved { response },
            SolveOutcome::Infeasible(detail) => Self::Infeasible {
                reason: detail.to_string(),
                detail,
            },
        }
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let outcome = execute_solve(&config, builder)?;
    let payload = serde_json::to_string_pretty(&SolveReport::from(&outcome))
        .map_err(CliError::SerialiseSolveReport)?;
    match &config.output {
        Some(path) => write_solve_file(path, &payload),
        None => write_solve_report(writer, &payload),
    }
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_solve(
    config: &SolveConfig,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveOutcome, CliError> {
    let (request, matrices) = load_solve_request(&config.request_path)?.into_problem();
    let solver = builder.build(config, matrices);
    solver.solve(&request).map_err(|source| CliError::Solve {
        path: config.request_path.clone(),
        source,
    })
}

/// Loads a JSON-encoded [`RequestFile`] from disk.
pub(super) fn load_solve_request(path: &Utf8Path) -> Result<RequestFile, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_report(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSolveOutput)?;
    Ok(())
}

fn write_solve_file(path: &Utf8Path, payload: &str) -> Result<(), CliError> {
    let mut contents = payload.to_owned();
    contents.push('\n');
    write_utf8_file(path, contents.as_bytes()).map_err(|source| CliError::WriteSolveOutputFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
