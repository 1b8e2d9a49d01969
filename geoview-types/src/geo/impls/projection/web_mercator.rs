use crate::geo::datum::Datum;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;
use crate::point::Point2d;

/// Spherical mercator projection used by web maps (EPSG:3857).
#[derive(Debug, Copy, Clone)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a projection on the sphere of the datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            datum: Datum::WGS84,
        }
    }
}

impl Projection for WebMercator {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.lat_rad() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Point2d::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let lat = 2.0 * (input.y / self.datum.semimajor()).exp().atan()
            - std::f64::consts::FRAC_PI_2;
        let lon = input.x / self.datum.semimajor();

        if lat.is_finite() && lon.is_finite() {
            Some(GeoPoint2d::latlon(lat.to_degrees(), lon.to_degrees()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn project_known_point() {
        let projection = WebMercator::default();
        let projected = projection
            .project(&GeoPoint2d::latlon(52.0, 10.0))
            .expect("point is inside the projection domain");
        assert_abs_diff_eq!(projected.x, 1_113_194.91, epsilon = 0.01);
        assert_abs_diff_eq!(projected.y, 6_800_125.45, epsilon = 0.01);
    }

    #[test]
    fn unproject_restores_point() {
        let projection = WebMercator::default();
        let point = GeoPoint2d::latlon(-33.86, 151.2);
        let projected = projection.project(&point).expect("projected");
        let unprojected = projection.unproject(&projected).expect("unprojected");
        assert_abs_diff_eq!(unprojected.lat(), point.lat(), epsilon = 1e-9);
        assert_abs_diff_eq!(unprojected.lon(), point.lon(), epsilon = 1e-9);
    }

    #[test]
    fn invalid_point_is_not_projected() {
        let projection = WebMercator::default();
        assert!(projection
            .project(&GeoPoint2d::latlon(f64::NAN, 0.0))
            .is_none());
    }
}
