//! Travel-matrix provider trait and a provider for precomputed matrices.

use crate::Stop;

use super::{TravelMatrices, TravelMatrixError};

/// Fetch travel durations and distances for a set of stops.
///
/// Implementers must return square `n×n` matrices where `n == stops.len()`.
/// `durations_min[i][j]` is the travel time from `stops[i]` to `stops[j]`.
/// Shape is checked by the solver, which reports mismatches as configuration
/// errors rather than provider failures.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use fleetplan_core::{Stop, TravelMatrices, TravelMatrixError, TravelMatrixProvider};
///
/// struct TenMinuteProvider;
///
/// impl TravelMatrixProvider for TenMinuteProvider {
///     fn get_travel_matrices(&self, stops: &[Stop]) -> Result<TravelMatrices, TravelMatrixError> {
///         if stops.is_empty() {
///             return Err(TravelMatrixError::EmptyInput);
///         }
///         let n = stops.len();
///         let durations = (0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0 } else { 10 }).collect())
///             .collect();
///         let distances = (0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 5_000.0 }).collect())
///             .collect();
///         Ok(TravelMatrices::new(durations, distances))
///     }
/// }
///
/// let depot = Stop::new("Depot", Coord { x: 0.0, y: 0.0 });
/// let matrices = TenMinuteProvider.get_travel_matrices(&[depot])?;
/// assert_eq!(matrices.len(), 1);
/// # Ok::<(), TravelMatrixError>(())
/// ```
pub trait TravelMatrixProvider {
    /// Return the matrices for `stops`.
    ///
    /// Implementations must return `Err(TravelMatrixError::EmptyInput)` when
    /// `stops` is empty.
    fn get_travel_matrices(&self, stops: &[Stop]) -> Result<TravelMatrices, TravelMatrixError>;
}

/// Serves matrices that were computed ahead of time.
///
/// Used when the request already carries its matrices, e.g. a request file
/// exported from a routing backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticMatrixProvider {
    matrices: TravelMatrices,
}

impl StaticMatrixProvider {
    /// Wrap precomputed matrices.
    #[must_use]
    pub const fn new(matrices: TravelMatrices) -> Self {
        Self { matrices }
    }
}

impl TravelMatrixProvider for StaticMatrixProvider {
    fn get_travel_matrices(&self, stops: &[Stop]) -> Result<TravelMatrices, TravelMatrixError> {
        if stops.is_empty() {
            return Err(TravelMatrixError::EmptyInput);
        }
        Ok(self.matrices.clone())
    }
}
