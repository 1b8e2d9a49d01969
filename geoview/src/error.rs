//! Error types used by the crate.

use geoview_types::error::GeoviewTypesError;
use thiserror::Error;

/// Geoview error type.
#[derive(Debug, Error)]
pub enum GeoviewError {
    /// I/O error (network or file).
    #[error("failed to load data")]
    IO,
    /// Server answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Http {
        /// Requested url.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The document is not a valid feature collection.
    #[error("failed to decode data: {0}")]
    Decoding(#[from] serde_json::Error),
    /// A geometry could not be converted.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeoviewTypesError),
    /// The CRS is not registered or its definition cannot be used.
    #[error("unknown projection: {0}")]
    UnknownProjection(String),
    /// A point could not be transformed between two projections.
    #[error("failed to transform coordinates from {from} to {to}")]
    Transform {
        /// Source CRS.
        from: String,
        /// Target CRS.
        to: String,
    },
    /// The view is not initialized.
    #[error(transparent)]
    View(#[from] ViewError),
    /// Operation required a state that is not present.
    #[error("{0}")]
    InvalidState(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for GeoviewError {
    fn from(_value: reqwest::Error) -> Self {
        Self::IO
    }
}

/// Violation of the view invariants. These are caused by using a view before it is initialized and are not
/// expected to be recovered from.
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    /// The view has no resolution set.
    #[error("view resolution is not defined")]
    UndefinedResolution,
    /// The view has no center set.
    #[error("view center is not defined")]
    UndefinedCenter,
    /// Units of the projection are unknown.
    #[error("meters per unit are not defined for {0}")]
    UndefinedMetersPerUnit(String),
    /// Projection is not registered.
    #[error("unknown projection: {0}")]
    UnknownProjection(String),
    /// The view has zero size, so nothing can be fitted into it.
    #[error("view size is zero")]
    ZeroSize,
    /// The view center cannot be represented in the target projection.
    #[error("failed to transform view center from {from} to {to}")]
    Transform {
        /// Source CRS.
        from: String,
        /// Target CRS.
        to: String,
    },
}
