//! Concrete geographic point and projection types.

pub mod point;
pub mod projection;

pub use point::GeoPoint2d;
