//! Implementations for some of the common projections.
mod identity;
mod web_mercator;

pub use identity::IdentityProjection;
pub use web_mercator::WebMercator;

#[cfg(feature = "proj4rs")]
mod proj4;
#[cfg(feature = "proj4rs")]
pub use proj4::Proj4Projection;
