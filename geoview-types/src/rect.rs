use crate::point::Point2d;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent `[x_min, y_min, x_max, y_max]` in the units of some projection.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum x.
    pub x_min: f64,
    /// Minimum y.
    pub y_min: f64,
    /// Maximum x.
    pub x_max: f64,
    /// Maximum y.
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rect.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Minimum x.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Maximum x.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Minimum y.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum y.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the rect.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rect.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns true if the extent has neither width nor height, i.e. it was built from a single point.
    pub fn is_point(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    /// Smallest rect containing both rects.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Rect of zero size at the point.
    pub fn from_point(p: &Point2d) -> Self {
        Self {
            x_min: p.x,
            x_max: p.x,
            y_min: p.y,
            y_max: p.y,
        }
    }

    /// Extent of the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point2d>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |rect, p| {
            rect.merge(Self::from_point(p))
        }))
    }

    /// Returns true if the point is inside the rect or on its boundary.
    pub fn contains(&self, point: &Point2d) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Scales the extent by `factor` around its own center.
    pub fn magnify(&self, factor: f64) -> Self {
        let center = self.center();
        let half_width = self.width() / 2.0 * factor;
        let half_height = self.height() / 2.0 * factor;
        Self {
            x_min: center.x - half_width,
            x_max: center.x + half_width,
            y_min: center.y - half_height,
            y_max: center.y + half_height,
        }
    }

    /// Center point.
    pub fn center(&self) -> Point2d {
        Point2d::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Corners of the rect, starting from the minimum corner.
    pub fn into_quadrangle(self) -> [Point2d; 4] {
        [
            Point2d::new(self.x_min, self.y_min),
            Point2d::new(self.x_min, self.y_max),
            Point2d::new(self.x_max, self.y_max),
            Point2d::new(self.x_max, self.y_min),
        ]
    }

    /// Points along the boundary of the rectangle, `stops` points per edge (corners included).
    ///
    /// Used to transform an extent into another projection, where straight edges may become curves.
    pub fn boundary_points(&self, stops: usize) -> Vec<Point2d> {
        let stops = stops.max(1);
        let corners = self.into_quadrangle();
        let mut points = Vec::with_capacity(stops * 4);
        for i in 0..4 {
            let from = corners[i];
            let to = corners[(i + 1) % 4];
            for step in 0..stops {
                let k = step as f64 / stops as f64;
                points.push(from + (to - from) * k);
            }
        }

        points
    }

    /// `[x_min, y_min, x_max, y_max]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

impl From<[f64; 4]> for Rect {
    fn from(value: [f64; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}
