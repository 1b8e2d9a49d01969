//! Conversion of GeoJSON geometries into [`Geom`].
//!
//! Positions are read as `[x, y, ...]` in whatever CRS the document uses; extra dimensions are dropped.

use geojson::{LineStringType, PolygonType, Position, Value};

use crate::error::GeoviewTypesError;
use crate::geometry::{Geom, Polygon};
use crate::point::Point2d;

impl TryFrom<&geojson::Geometry> for Geom<Point2d> {
    type Error = GeoviewTypesError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        Geom::<Point2d>::try_from(&value.value)
    }
}

impl TryFrom<&Value> for Geom<Point2d> {
    type Error = GeoviewTypesError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Point(p) => Geom::Point(convert_position(p)?),
            Value::MultiPoint(points) => Geom::MultiPoint(convert_line(points)?),
            Value::LineString(line) => Geom::LineString(convert_line(line)?),
            Value::MultiLineString(lines) => Geom::MultiLineString(
                lines.iter().map(convert_line).collect::<Result<_, _>>()?,
            ),
            Value::Polygon(polygon) => Geom::Polygon(convert_polygon(polygon)?),
            Value::MultiPolygon(polygons) => Geom::MultiPolygon(
                polygons
                    .iter()
                    .map(convert_polygon)
                    .collect::<Result<_, _>>()?,
            ),
            Value::GeometryCollection(geometries) => Geom::GeometryCollection(
                geometries
                    .iter()
                    .map(Geom::<Point2d>::try_from)
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn convert_position(position: &Position) -> Result<Point2d, GeoviewTypesError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Point2d::new(*x, *y)),
        _ => Err(GeoviewTypesError::Conversion(
            "point must contain at least 2 dimensions".to_string(),
        )),
    }
}

fn convert_line(line: &LineStringType) -> Result<Vec<Point2d>, GeoviewTypesError> {
    line.iter().map(convert_position).collect()
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon<Point2d>, GeoviewTypesError> {
    let Some((outer, inner)) = polygon.split_first() else {
        return Err(GeoviewTypesError::Conversion(
            "polygon must have an outer ring".to_string(),
        ));
    };

    Ok(Polygon::new(
        convert_line(outer)?,
        inner.iter().map(convert_line).collect::<Result<_, _>>()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(json: &str) -> geojson::Geometry {
        serde_json::from_str(json).expect("valid geometry json")
    }

    #[test]
    fn convert_point_drops_extra_dimensions() {
        let geometry = parse(r#"{"type": "Point", "coordinates": [1.5, 2.5, 100.0]}"#);
        assert_eq!(
            Geom::<Point2d>::try_from(&geometry).expect("valid point"),
            Geom::Point(Point2d::new(1.5, 2.5))
        );
    }

    #[test]
    fn convert_polygon_with_hole() {
        let geometry = parse(
            r#"{"type": "Polygon", "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[2, 2], [3, 2], [3, 3], [2, 2]]
            ]}"#,
        );
        let Geom::Polygon(polygon) = Geom::<Point2d>::try_from(&geometry).expect("valid polygon") else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.outer_contour.len(), 5);
        assert_eq!(polygon.inner_contours.len(), 1);
    }

    #[test]
    fn convert_collection() {
        let geometry = parse(
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "Point", "coordinates": [1, 2]},
                {"type": "LineString", "coordinates": [[1, 2], [3, 4]]}
            ]}"#,
        );
        assert_matches!(
            Geom::<Point2d>::try_from(&geometry),
            Ok(Geom::GeometryCollection(geometries)) if geometries.len() == 2
        );
    }

    #[test]
    fn short_position_is_an_error() {
        let value = Value::Point(vec![1.0]);
        assert_matches!(Geom::<Point2d>::try_from(&value), Err(GeoviewTypesError::Conversion(_)));
    }
}
