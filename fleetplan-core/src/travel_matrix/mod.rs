//! Pairwise travel durations and distances between stops.
//!
//! The `TravelMatrixProvider` trait abstracts retrieval of the duration and
//! distance matrices for a set of [`Stop`](crate::Stop) values, typically from a
//! routing backend such as OSRM. The solver treats the result as opaque,
//! already-computed input.

mod error;
mod matrices;
mod provider;

pub use error::TravelMatrixError;
pub use matrices::TravelMatrices;
pub use provider::{StaticMatrixProvider, TravelMatrixProvider};
