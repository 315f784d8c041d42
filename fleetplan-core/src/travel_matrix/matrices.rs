//! Square duration and distance matrices indexed by stop position.

use crate::{ConfigurationError, MatrixKind};

/// Travel durations in whole minutes and distances in meters.
///
/// `durations_min[i][j]` is the time to drive from stop `i` to stop `j`;
/// asymmetric values are allowed. Both matrices must be square with one row
/// per stop and a zero diagonal; [`TravelMatrices::validate`] checks this.
///
/// # Examples
/// ```
/// use fleetplan_core::TravelMatrices;
///
/// let matrices = TravelMatrices::new(
///     vec![vec![0, 7], vec![9, 0]],
///     vec![vec![0.0, 1200.0], vec![1500.0, 0.0]],
/// );
/// assert_eq!(matrices.duration(0, 1), Some(7));
/// assert!(matrices.validate(2).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelMatrices {
    /// Travel time in minutes.
    pub durations_min: Vec<Vec<u32>>,
    /// Travel distance in meters.
    pub distances_m: Vec<Vec<f64>>,
}

impl TravelMatrices {
    /// Construct from the two matrices.
    #[must_use]
    pub const fn new(durations_min: Vec<Vec<u32>>, distances_m: Vec<Vec<f64>>) -> Self {
        Self {
            durations_min,
            distances_m,
        }
    }

    /// Number of locations covered by the duration matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.durations_min.len()
    }

    /// Whether the matrices cover no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.durations_min.is_empty()
    }

    /// Travel minutes from `from` to `to`, if both indices are in range.
    #[must_use]
    pub fn duration(&self, from: usize, to: usize) -> Option<u32> {
        self.durations_min.get(from)?.get(to).copied()
    }

    /// Travel meters from `from` to `to`, if both indices are in range.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.distances_m.get(from)?.get(to).copied()
    }

    /// Check that both matrices are `locations × locations` with a zero
    /// diagonal and that every distance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, checking durations
    /// before distances.
    pub fn validate(&self, locations: usize) -> Result<(), ConfigurationError> {
        check_shape(&self.durations_min, MatrixKind::Duration, locations, |v| {
            *v == 0
        })?;
        check_shape(&self.distances_m, MatrixKind::Distance, locations, |v| {
            *v == 0.0
        })?;
        for (from, row) in self.distances_m.iter().enumerate() {
            if let Some(to) = row.iter().position(|d| !d.is_finite() || *d < 0.0) {
                return Err(ConfigurationError::InvalidDistance { from, to });
            }
        }
        Ok(())
    }
}

fn check_shape<T>(
    rows: &[Vec<T>],
    matrix: MatrixKind,
    expected: usize,
    is_zero: impl Fn(&T) -> bool,
) -> Result<(), ConfigurationError> {
    if rows.len() != expected {
        return Err(ConfigurationError::MatrixRowCount {
            matrix,
            rows: rows.len(),
            expected,
        });
    }
    for (row, values) in rows.iter().enumerate() {
        if values.len() != expected {
            return Err(ConfigurationError::MatrixColumnCount {
                matrix,
                row,
                columns: values.len(),
                expected,
            });
        }
        if !values.get(row).is_some_and(&is_zero) {
            return Err(ConfigurationError::NonZeroDiagonal { matrix, index: row });
        }
    }
    Ok(())
}
