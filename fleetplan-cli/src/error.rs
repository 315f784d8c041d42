//! Error types emitted by the fleetplan CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fleetplan_core::SolveError;
use thiserror::Error;

/// Errors emitted by the fleetplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option was supplied with a value the solver cannot use.
    #[error("invalid --{field}: {reason}")]
    InvalidOption {
        field: &'static str,
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The output path names an existing directory.
    #[error("output path {path:?} is a directory")]
    OutputPathIsDirectory { path: Utf8PathBuf },
    /// Opening the solve request file failed.
    #[error("failed to open solve request at {path:?}: {source}")]
    OpenSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Solve request JSON could not be decoded.
    #[error("failed to parse solve request JSON at {path:?}: {source}")]
    ParseSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The solver rejected the request.
    #[error("solver rejected the request in {path:?}: {source}")]
    Solve {
        path: Utf8PathBuf,
        #[source]
        source: SolveError,
    },
    /// Serialising the solve report failed.
    #[error("failed to serialise solve report: {0}")]
    SerialiseSolveReport(#[source] serde_json::Error),
    /// Writing the solve report to standard output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
    /// Writing the solve report to a file failed.
    #[error("failed to write solve output to {path:?}: {source}")]
    WriteSolveOutputFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
