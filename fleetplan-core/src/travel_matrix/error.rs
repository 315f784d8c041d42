use thiserror::Error;

/// Errors from [`crate::travel_matrix::TravelMatrixProvider::get_travel_matrices`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelMatrixError {
    /// No stops were provided.
    ///
    /// The provider requires at least the depot to compute a matrix. Callers
    /// should validate input to avoid this condition.
    #[error("at least one stop is required")]
    EmptyInput,
    /// The routing backend could not be reached or timed out.
    #[error("routing backend unavailable: {message}")]
    Unavailable {
        /// Backend-specific description of the failure.
        message: String,
    },
}
