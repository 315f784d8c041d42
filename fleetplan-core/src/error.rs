//! Validation failures detected before any search runs.

use std::fmt;

use thiserror::Error;

/// Which of the two travel matrices an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    /// Travel durations in minutes.
    Duration,
    /// Travel distances in meters.
    Distance,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duration => f.write_str("duration"),
            Self::Distance => f.write_str("distance"),
        }
    }
}

/// Which end of a vehicle's route an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The location the route leaves from.
    Start,
    /// The location the route returns to.
    End,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Malformed solver input.
///
/// These are reported verbatim to the caller and never retried: the same
/// input always fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The stop list was empty; the depot is always required.
    #[error("at least one stop (the depot) is required")]
    NoStops,
    /// The vehicle list was empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// A matrix has the wrong number of rows.
    #[error("{matrix} matrix has {rows} rows but {expected} locations were supplied")]
    MatrixRowCount {
        /// Offending matrix.
        matrix: MatrixKind,
        /// Rows found.
        rows: usize,
        /// Number of locations.
        expected: usize,
    },
    /// A matrix row has the wrong number of columns.
    #[error("{matrix} matrix row {row} has {columns} columns but {expected} were expected")]
    MatrixColumnCount {
        /// Offending matrix.
        matrix: MatrixKind,
        /// Row index.
        row: usize,
        /// Columns found.
        columns: usize,
        /// Number of locations.
        expected: usize,
    },
    /// A diagonal entry was not zero.
    #[error("{matrix} matrix diagonal entry {index} must be zero")]
    NonZeroDiagonal {
        /// Offending matrix.
        matrix: MatrixKind,
        /// Location index.
        index: usize,
    },
    /// A distance was negative or not finite.
    #[error("distance matrix entry ({from}, {to}) must be finite and non-negative")]
    InvalidDistance {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
    },
    /// A stop's window closes before it opens.
    #[error("stop {stop} has time window end {close} before start {open}")]
    InvalidTimeWindow {
        /// Stop index.
        stop: usize,
        /// Opening minute.
        open: u32,
        /// Closing minute.
        close: u32,
    },
    /// A vehicle cannot carry anything.
    #[error("vehicle {vehicle} must have a positive capacity")]
    NonPositiveCapacity {
        /// Vehicle index.
        vehicle: usize,
    },
    /// A vehicle's start or end does not name a location.
    #[error("vehicle {vehicle} {anchor} index {index} is out of range for {locations} locations")]
    AnchorOutOfRange {
        /// Vehicle index.
        vehicle: usize,
        /// Start or end.
        anchor: Anchor,
        /// Requested location index.
        index: usize,
        /// Number of locations.
        locations: usize,
    },
    /// A vehicle's speed factor is zero, negative, or not finite.
    #[error("vehicle {vehicle} speed factor {factor} must be finite and positive")]
    InvalidSpeedFactor {
        /// Vehicle index.
        vehicle: usize,
        /// Requested factor.
        factor: f64,
    },
}
