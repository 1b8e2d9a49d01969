//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeoviewTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// Projection definition could not be parsed or initialized.
    #[error("invalid projection definition '{definition}': {reason}")]
    Projection {
        /// Definition string that failed.
        definition: String,
        /// Reason reported by the projection backend.
        reason: String,
    },
}
