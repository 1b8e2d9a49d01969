use crate::geo::impls::point::GeoPoint2d;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;
use crate::point::Point2d;

/// Projection of geographic CRSs: longitude becomes `x` and latitude becomes `y`, both in degrees.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityProjection;

impl IdentityProjection {
    /// Creates a new projection.
    pub fn new() -> Self {
        Self
    }
}

impl Projection for IdentityProjection {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        Some(Point2d::new(input.lon(), input.lat()))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        Some(GeoPoint2d::latlon(input.y, input.x))
    }
}
