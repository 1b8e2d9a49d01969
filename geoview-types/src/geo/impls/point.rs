use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use serde::{Deserialize, Serialize};

/// 2d point on the surface of a celestial body.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a new from point from another.
    pub fn from(other: &impl GeoPoint) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use geoview_types::geo::GeoPoint;
/// use geoview_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::geo::impls::GeoPoint2d as $crate::geo::NewGeoPoint>::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_of_one_degree_on_equator() {
        let a = GeoPoint2d::latlon(0.0, 0.0);
        let b = GeoPoint2d::latlon(0.0, 1.0);
        assert_relative_eq!(a.distance(&b), 111_195.08, max_relative = 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint2d::latlon(52.37, 4.89);
        let b = GeoPoint2d::latlon(48.85, 2.35);
        assert_relative_eq!(a.distance(&b), b.distance(&a));
        assert_relative_eq!(a.distance(&b), 430_000.0, max_relative = 0.01);
    }
}
