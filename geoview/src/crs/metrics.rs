use geoview_types::geo::{Crs, Datum, GeoPoint, ProjectionType};
use geoview_types::Point2d;

/// Ground distance in meters covered by `resolution` units of the CRS at the given point.
///
/// For web mercator the scale factor of the projection is applied directly. For other projections the length of
/// a cross of `resolution` size around the point is measured on the sphere. Returns `None` if the point cannot be
/// transformed into geographic coordinates.
pub fn point_resolution(crs: &Crs, resolution: f64, point: &Point2d) -> Option<f64> {
    if crs.projection_type() == ProjectionType::WebMercator {
        let mpu = crs.meters_per_unit()?;
        return Some(resolution * mpu / (point.y / Datum::WGS84.semimajor()).cosh());
    }

    let projection = crs.get_projection()?;
    let half = resolution / 2.0;
    let vertices = [
        Point2d::new(point.x - half, point.y),
        Point2d::new(point.x + half, point.y),
        Point2d::new(point.x, point.y - half),
        Point2d::new(point.x, point.y + half),
    ]
    .map(|vertex| projection.unproject(&vertex));

    let [Some(left), Some(right), Some(bottom), Some(top)] = vertices else {
        return None;
    };

    let width = left.distance(&right);
    let height = bottom.distance(&top);
    Some((width + height) / 2.0)
}
