//! Reordering of coordinate components when the data CRS and the display CRS disagree on the axis order.

use geojson::{Geometry, Position, Value};
use geoview_types::geo::AxisOrder;

use crate::crs::{CrsRegistry, ProjectionMapping};
use crate::loader::FeatureCollectionDocument;

/// Returns true if the coordinates of data in `mapping.data_projection` must be reordered before they are
/// interpreted in `mapping.visual_projection`.
pub fn needs_swap(mapping: &ProjectionMapping, data_axis: AxisOrder, visual_axis: AxisOrder) -> bool {
    mapping.swap_allowed() && data_axis != visual_axis
}

/// Returns the geometry with the first two components of every position swapped, if the mapping requires it.
/// Otherwise returns an unchanged copy.
///
/// The input is never modified. Positions with less than two components are copied as is.
pub fn normalize(
    geometry: &Geometry,
    mapping: &ProjectionMapping,
    data_axis: AxisOrder,
    visual_axis: AxisOrder,
) -> Geometry {
    if needs_swap(mapping, data_axis, visual_axis) {
        swap_axes(geometry)
    } else {
        geometry.clone()
    }
}

/// Same as [`normalize`], with the axis orders of both projections taken from the registry.
pub fn normalize_with_registry(
    geometry: &Geometry,
    mapping: &ProjectionMapping,
    registry: &CrsRegistry,
) -> Geometry {
    normalize(
        geometry,
        mapping,
        registry.axis_order(mapping.data_projection()),
        registry.axis_order(mapping.visual_projection()),
    )
}

/// Applies [`normalize`] to the geometry of every feature of the collection. Features without geometry are
/// kept as they are.
pub fn normalize_feature_collection(
    collection: &FeatureCollectionDocument,
    mapping: &ProjectionMapping,
    data_axis: AxisOrder,
    visual_axis: AxisOrder,
) -> FeatureCollectionDocument {
    if !needs_swap(mapping, data_axis, visual_axis) {
        return collection.clone();
    }

    let mut normalized = collection.clone();
    for feature in &mut normalized.features {
        if let Some(geometry) = &feature.geometry {
            feature.geometry = Some(swap_axes(geometry));
        }
    }

    normalized
}

/// Swaps the first two components of every position of the geometry.
pub fn swap_axes(geometry: &Geometry) -> Geometry {
    Geometry {
        bbox: geometry.bbox.as_ref().map(|bbox| swap_bbox(bbox)),
        value: swap_value(&geometry.value),
        foreign_members: geometry.foreign_members.clone(),
    }
}

fn swap_value(value: &Value) -> Value {
    match value {
        Value::Point(p) => Value::Point(swap_position(p)),
        Value::MultiPoint(points) => Value::MultiPoint(swap_line(points)),
        Value::LineString(line) => Value::LineString(swap_line(line)),
        Value::MultiLineString(lines) => {
            Value::MultiLineString(lines.iter().map(|line| swap_line(line)).collect())
        }
        Value::Polygon(rings) => Value::Polygon(rings.iter().map(|ring| swap_line(ring)).collect()),
        Value::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .map(|rings| rings.iter().map(|ring| swap_line(ring)).collect())
                .collect(),
        ),
        Value::GeometryCollection(geometries) => {
            Value::GeometryCollection(geometries.iter().map(swap_axes).collect())
        }
    }
}

fn swap_line(line: &[Position]) -> Vec<Position> {
    line.iter().map(swap_position).collect()
}

fn swap_position(position: &Position) -> Position {
    let mut swapped = position.clone();
    if swapped.len() >= 2 {
        swapped.swap(0, 1);
    }

    swapped
}

fn swap_bbox(bbox: &[f64]) -> Vec<f64> {
    match bbox {
        [a, b, c, d] => vec![*b, *a, *d, *c],
        other => other.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(json: &str) -> Geometry {
        serde_json::from_str(json).expect("valid geometry")
    }

    fn swapping() -> ProjectionMapping {
        ProjectionMapping::new("EPSG:3035", "EPSG:3857", true)
    }

    #[test]
    fn swaps_point_and_keeps_extra_dimensions() {
        let point = geometry(r#"{"type": "Point", "coordinates": [52.0, 10.0, 35.5]}"#);
        let normalized = normalize(&point, &swapping(), AxisOrder::Neu, AxisOrder::Enu);
        assert_eq!(normalized.value, Value::Point(vec![10.0, 52.0, 35.5]));
        assert_eq!(point.value, Value::Point(vec![52.0, 10.0, 35.5]));
    }

    #[test]
    fn no_swap_when_not_allowed() {
        let point = geometry(r#"{"type": "Point", "coordinates": [52.0, 10.0]}"#);
        let mapping = ProjectionMapping::new("EPSG:4326", "EPSG:3857", false);
        assert_eq!(
            normalize(&point, &mapping, AxisOrder::Neu, AxisOrder::Enu),
            point
        );
    }

    #[test]
    fn no_swap_when_axis_orders_match() {
        let point = geometry(r#"{"type": "Point", "coordinates": [52.0, 10.0]}"#);
        assert_eq!(
            normalize(&point, &swapping(), AxisOrder::Enu, AxisOrder::Enu),
            point
        );
    }

    #[test]
    fn swaps_nested_collections() {
        let collection = geometry(
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "MultiPolygon", "coordinates": [[[[1, 2], [3, 4], [5, 6], [1, 2]]]]},
                {"type": "GeometryCollection", "geometries": [
                    {"type": "LineString", "coordinates": [[7, 8], [9, 10]]}
                ]}
            ]}"#,
        );

        let normalized = normalize(&collection, &swapping(), AxisOrder::Neu, AxisOrder::Enu);
        let expected = geometry(
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "MultiPolygon", "coordinates": [[[[2, 1], [4, 3], [6, 5], [2, 1]]]]},
                {"type": "GeometryCollection", "geometries": [
                    {"type": "LineString", "coordinates": [[8, 7], [10, 9]]}
                ]}
            ]}"#,
        );
        assert_eq!(normalized, expected);
    }

    #[test]
    fn short_positions_pass_through() {
        let line = Geometry::new(Value::LineString(vec![vec![1.0], vec![], vec![2.0, 3.0]]));
        let normalized = normalize(&line, &swapping(), AxisOrder::Neu, AxisOrder::Enu);
        assert_eq!(
            normalized.value,
            Value::LineString(vec![vec![1.0], vec![], vec![3.0, 2.0]])
        );
    }

    #[test]
    fn swapping_twice_restores_geometry() {
        let polygon = geometry(
            r#"{"type": "Polygon", "bbox": [0, 1, 10, 11], "coordinates": [
                [[0, 1], [10, 1], [10, 11], [0, 11], [0, 1]],
                [[2, 3], [4, 3], [4, 5], [2, 3]]
            ]}"#,
        );

        let once = normalize(&polygon, &swapping(), AxisOrder::Neu, AxisOrder::Enu);
        assert_ne!(once, polygon);
        assert_eq!(once.bbox, Some(vec![1.0, 0.0, 11.0, 10.0]));

        let twice = normalize(&once, &swapping(), AxisOrder::Enu, AxisOrder::Neu);
        assert_eq!(twice, polygon);
    }

    #[test]
    fn collection_keeps_features_without_geometry() {
        let collection = FeatureCollectionDocument::from_slice(
            br#"{"features": [
                {"id": 1, "geometry": {"type": "Point", "coordinates": [52.0, 5.0]}, "properties": {}},
                {"id": 2, "geometry": null, "properties": {"name": "empty"}}
            ]}"#,
        )
        .expect("valid document");

        let normalized =
            normalize_feature_collection(&collection, &swapping(), AxisOrder::Neu, AxisOrder::Enu);
        assert_eq!(normalized.features.len(), 2);
        assert_eq!(
            normalized.features[0].geometry.as_ref().map(|g| &g.value),
            Some(&Value::Point(vec![5.0, 52.0]))
        );
        assert!(normalized.features[1].geometry.is_none());
        assert_eq!(normalized.features[1].id, collection.features[1].id);
        assert_eq!(
            collection.features[0].geometry.as_ref().map(|g| &g.value),
            Some(&Value::Point(vec![52.0, 5.0]))
        );
    }

    #[test]
    fn axis_orders_from_registry() {
        let registry = CrsRegistry::with_defaults();
        let point = geometry(r#"{"type": "Point", "coordinates": [3210000.0, 4321000.0]}"#);

        let normalized = normalize_with_registry(&point, &swapping(), &registry);
        assert_eq!(normalized.value, Value::Point(vec![4_321_000.0, 3_210_000.0]));

        let same_crs = ProjectionMapping::new("EPSG:28992", "EPSG:28992", true);
        assert_eq!(normalize_with_registry(&point, &same_crs, &registry), point);
    }
}
