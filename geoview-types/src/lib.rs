//! Geometry and coordinate reference system primitives used by `geoview`.
//!
//! The crate is split into:
//! * [`Geom`] - a tagged union over the GeoJSON geometry kinds, generic over the point type,
//! * [`Rect`] - axis-aligned extents,
//! * [`geo`] - geographic points, CRS descriptors ([`geo::Crs`]) and [`geo::Projection`]s between
//!   geographic and projected coordinates.

pub mod error;
pub mod geo;
mod geometry;
mod point;
mod rect;
mod size;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use geometry::{Geom, Polygon};
pub use point::Point2d;
pub use rect::Rect;
pub use size::Size;
