use crate::geo::Projection;
use crate::point::Point2d;
use crate::rect::Rect;

/// Geometry of a feature, generic over the point type.
///
/// Variants follow the GeoJSON geometry kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Geom<P> {
    /// Single point.
    Point(P),
    /// Set of points.
    MultiPoint(Vec<P>),
    /// Line through the points.
    LineString(Vec<P>),
    /// Set of lines.
    MultiLineString(Vec<Vec<P>>),
    /// Polygon.
    Polygon(Polygon<P>),
    /// Set of polygons.
    MultiPolygon(Vec<Polygon<P>>),
    /// Set of geometries of any kind.
    GeometryCollection(Vec<Geom<P>>),
}

/// Polygon with an outer ring and any number of holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P> {
    /// Outer ring.
    pub outer_contour: Vec<P>,
    /// Holes.
    pub inner_contours: Vec<Vec<P>>,
}

impl<P> Polygon<P> {
    /// Creates a new polygon.
    pub fn new(outer_contour: Vec<P>, inner_contours: Vec<Vec<P>>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Iterates over the outer ring and then the holes.
    pub fn iter_contours(&self) -> impl Iterator<Item = &Vec<P>> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }

    fn project<Proj>(&self, projection: &Proj) -> Option<Polygon<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = P> + ?Sized,
    {
        Some(Polygon {
            outer_contour: project_points(&self.outer_contour, projection)?,
            inner_contours: self
                .inner_contours
                .iter()
                .map(|contour| project_points(contour, projection))
                .collect::<Option<Vec<_>>>()?,
        })
    }
}

fn project_points<P, Proj>(points: &[P], projection: &Proj) -> Option<Vec<Proj::OutPoint>>
where
    Proj: Projection<InPoint = P> + ?Sized,
{
    points.iter().map(|p| projection.project(p)).collect()
}

impl<P> Geom<P> {
    /// Projects every point of the geometry. Returns `None` if any of the points cannot be projected.
    pub fn project<Proj>(&self, projection: &Proj) -> Option<Geom<Proj::OutPoint>>
    where
        Proj: Projection<InPoint = P> + ?Sized,
    {
        Some(match self {
            Geom::Point(p) => Geom::Point(projection.project(p)?),
            Geom::MultiPoint(points) => Geom::MultiPoint(project_points(points, projection)?),
            Geom::LineString(points) => Geom::LineString(project_points(points, projection)?),
            Geom::MultiLineString(lines) => Geom::MultiLineString(
                lines
                    .iter()
                    .map(|line| project_points(line, projection))
                    .collect::<Option<Vec<_>>>()?,
            ),
            Geom::Polygon(polygon) => Geom::Polygon(polygon.project(projection)?),
            Geom::MultiPolygon(polygons) => Geom::MultiPolygon(
                polygons
                    .iter()
                    .map(|polygon| polygon.project(projection))
                    .collect::<Option<Vec<_>>>()?,
            ),
            Geom::GeometryCollection(geometries) => Geom::GeometryCollection(
                geometries
                    .iter()
                    .map(|geometry| geometry.project(projection))
                    .collect::<Option<Vec<_>>>()?,
            ),
        })
    }

    /// Calls `f` for every point of the geometry, including points of nested collections.
    pub fn for_each_point<'a>(&'a self, f: &mut impl FnMut(&'a P)) {
        match self {
            Geom::Point(p) => f(p),
            Geom::MultiPoint(points) | Geom::LineString(points) => points.iter().for_each(f),
            Geom::MultiLineString(lines) => lines.iter().flatten().for_each(f),
            Geom::Polygon(polygon) => polygon.iter_contours().flatten().for_each(f),
            Geom::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|polygon| polygon.iter_contours())
                .flatten()
                .for_each(f),
            Geom::GeometryCollection(geometries) => {
                for geometry in geometries {
                    geometry.for_each_point(&mut *f);
                }
            }
        }
    }
}

impl Geom<Point2d> {
    /// Axis-aligned extent of the geometry. `None` for geometries without points.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        self.for_each_point(&mut |p| {
            let point_rect = Rect::from_point(p);
            rect = Some(match rect {
                Some(rect) => rect.merge(point_rect),
                None => point_rect,
            });
        });

        rect
    }
}

impl<P> From<P> for Geom<P> {
    fn from(value: P) -> Self {
        Self::Point(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Crs;
    use approx::assert_abs_diff_eq;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2d> {
        vec![
            Point2d::new(x, y),
            Point2d::new(x + size, y),
            Point2d::new(x + size, y + size),
            Point2d::new(x, y + size),
            Point2d::new(x, y),
        ]
    }

    #[test]
    fn bounding_rect_of_collection() {
        let geom = Geom::GeometryCollection(vec![
            Geom::Point(Point2d::new(-5.0, 2.0)),
            Geom::Polygon(Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 2.0)])),
        ]);

        assert_eq!(geom.bounding_rect(), Some(Rect::new(-5.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn empty_geometry_has_no_rect() {
        let geom: Geom<Point2d> = Geom::MultiPoint(vec![]);
        assert_eq!(geom.bounding_rect(), None);
    }

    #[test]
    fn project_keeps_structure() {
        let transform = Crs::EPSG4326
            .transform_to(&Crs::EPSG3857)
            .expect("supported");
        let geom = Geom::MultiLineString(vec![
            vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)],
            vec![Point2d::new(2.0, 2.0)],
        ]);

        let Some(Geom::MultiLineString(lines)) = geom.project(&transform) else {
            panic!("projection changed geometry type");
        };
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2);
        assert_abs_diff_eq!(lines[0][0], Point2d::new(0.0, 0.0), epsilon = 1e-6);
        assert!(lines[1][0].x > 200_000.0);
    }

    struct Shift(f64);

    impl Projection for Shift {
        type InPoint = Point2d;
        type OutPoint = Point2d;

        fn project(&self, input: &Point2d) -> Option<Point2d> {
            (input.x < 100.0).then(|| Point2d::new(input.x + self.0, input.y))
        }

        fn unproject(&self, input: &Point2d) -> Option<Point2d> {
            Some(Point2d::new(input.x - self.0, input.y))
        }
    }

    #[test]
    fn project_polygon_with_holes() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 2.0)]);
        let geom = Geom::MultiPolygon(vec![polygon]);

        let Some(Geom::MultiPolygon(projected)) = geom.project(&Shift(5.0)) else {
            panic!("projection changed geometry type");
        };
        assert_eq!(projected[0].outer_contour, square(5.0, 0.0, 10.0));
        assert_eq!(projected[0].inner_contours, vec![square(6.0, 1.0, 2.0)]);

        let out_of_domain = Geom::GeometryCollection(vec![
            Geom::Point(Point2d::new(0.0, 0.0)),
            Geom::Point(Point2d::new(200.0, 0.0)),
        ]);
        assert_eq!(out_of_domain.project(&Shift(5.0)), None);
    }
}
