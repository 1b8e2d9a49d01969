use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::geo::datum::Datum;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::impls::projection::{IdentityProjection, WebMercator};
use crate::geo::traits::projection::{ChainProjection, InvertedProjection, Projection};
use crate::point::Point2d;

/// Coordinate reference system: a named coordinate space with its units, axis order and the projection that
/// maps geographic coordinates into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    code: Cow<'static, str>,
    proj4: Cow<'static, str>,
    units: Units,
    axis_order: AxisOrder,
}

/// Units of the CRS coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Meters.
    #[serde(rename = "m")]
    Meters,
    /// Degrees of arc (geographic CRSs).
    Degrees,
    /// International foot.
    #[serde(rename = "ft")]
    Feet,
    /// Units are not known, so ground distances cannot be calculated.
    Unknown,
}

impl Units {
    /// Length of one unit in meters, if known.
    pub fn meters_per_unit(&self) -> Option<f64> {
        match self {
            Units::Meters => Some(1.0),
            Units::Degrees => Some(2.0 * std::f64::consts::PI * Datum::DEGREE_SPHERE_RADIUS / 360.0),
            Units::Feet => Some(0.3048),
            Units::Unknown => None,
        }
    }
}

/// Order of the coordinate components as defined by the CRS authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrder {
    /// Easting (longitude) first.
    #[default]
    Enu,
    /// Northing (latitude) first.
    Neu,
}

/// Kind of projection, derived from the CRS definition.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProjectionType {
    /// Longitude and latitude in degrees.
    Geographic,
    /// Spherical web mercator.
    WebMercator,
    /// Any other projection, given by its PROJ.4 parameter string.
    Other(String),
}

impl ProjectionType {
    /// Classifies a PROJ.4 parameter string.
    pub fn from_proj4(definition: &str) -> Self {
        let param = |name: &str| proj4_param(definition, name);

        match param("proj") {
            Some("longlat") | Some("latlong") => ProjectionType::Geographic,
            Some("webmerc") => ProjectionType::WebMercator,
            Some("merc")
                if param("a") == Some("6378137")
                    && param("b") == Some("6378137")
                    && param("lon_0").map_or(true, |v| v == "0")
                    && param("x_0").map_or(true, |v| v == "0")
                    && param("y_0").map_or(true, |v| v == "0") =>
            {
                ProjectionType::WebMercator
            }
            _ => ProjectionType::Other(definition.to_string()),
        }
    }
}

fn proj4_param<'a>(definition: &'a str, name: &str) -> Option<&'a str> {
    definition
        .split_whitespace()
        .find_map(|token| token.strip_prefix('+')?.strip_prefix(name)?.strip_prefix('='))
}

impl Crs {
    /// WGS84 geographic coordinates.
    pub const EPSG4326: Crs = Crs {
        code: Cow::Borrowed("EPSG:4326"),
        proj4: Cow::Borrowed("+proj=longlat +datum=WGS84 +no_defs"),
        units: Units::Degrees,
        axis_order: AxisOrder::Neu,
    };

    /// Web mercator.
    pub const EPSG3857: Crs = Crs {
        code: Cow::Borrowed("EPSG:3857"),
        proj4: Cow::Borrowed(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs",
        ),
        units: Units::Meters,
        axis_order: AxisOrder::Enu,
    };

    /// Creates a new CRS from its definition.
    pub fn new(
        code: impl Into<String>,
        proj4: impl Into<String>,
        units: Units,
        axis_order: AxisOrder,
    ) -> Self {
        Self {
            code: Cow::Owned(code.into()),
            proj4: Cow::Owned(proj4.into()),
            units,
            axis_order,
        }
    }

    /// Identifier of the CRS, e.g. `EPSG:28992`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// PROJ.4 parameter string.
    pub fn proj4(&self) -> &str {
        &self.proj4
    }

    /// Units of the projected coordinates.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Axis order the CRS defines for coordinates.
    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    /// Length of one unit of the CRS in meters, if the units are known.
    pub fn meters_per_unit(&self) -> Option<f64> {
        self.units.meters_per_unit()
    }

    /// Kind of projection, derived from the PROJ.4 string.
    pub fn projection_type(&self) -> ProjectionType {
        ProjectionType::from_proj4(&self.proj4)
    }

    /// Returns the projection from WGS84 geographic coordinates into the coordinates of this CRS.
    ///
    /// Returns `None` if the definition cannot be used by any available projection backend.
    pub fn get_projection(&self) -> Option<GeoProjection> {
        match self.projection_type() {
            ProjectionType::Geographic => Some(Box::new(IdentityProjection::new())),
            ProjectionType::WebMercator => Some(Box::new(WebMercator::new(Datum::WGS84))),
            #[cfg(feature = "proj4rs")]
            ProjectionType::Other(definition) => {
                crate::geo::impls::projection::Proj4Projection::new(&definition)
                    .ok()
                    .map(|p| Box::new(p) as GeoProjection)
            }
            #[cfg(not(feature = "proj4rs"))]
            ProjectionType::Other(_) => None,
        }
    }

    /// Returns the transformation of coordinates of this CRS into coordinates of the `target` CRS.
    pub fn transform_to(&self, target: &Crs) -> Option<CrsTransform> {
        if self.code == target.code && self.proj4 == target.proj4 {
            return Some(CrsTransform::Identity);
        }

        let source = self.get_projection()?;
        let target = target.get_projection()?;
        Some(CrsTransform::Chain(ChainProjection::new(
            InvertedProjection::new(source),
            target,
        )))
    }
}

/// Projection from WGS84 geographic coordinates into the coordinates of a CRS.
pub type GeoProjection = Box<dyn Projection<InPoint = GeoPoint2d, OutPoint = Point2d>>;

/// Transformation between the coordinates of two reference systems.
pub enum CrsTransform {
    /// Both CRSs are the same, points are copied.
    Identity,
    /// Source coordinates are unprojected into geographic coordinates and then projected into the target CRS.
    Chain(ChainProjection<InvertedProjection<GeoProjection>, GeoProjection>),
}

impl std::fmt::Debug for CrsTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrsTransform::Identity => write!(f, "CrsTransform::Identity"),
            CrsTransform::Chain(_) => write!(f, "CrsTransform::Chain"),
        }
    }
}

impl Projection for CrsTransform {
    type InPoint = Point2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        match self {
            CrsTransform::Identity => Some(*input),
            CrsTransform::Chain(chain) => chain.project(input),
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        match self {
            CrsTransform::Identity => Some(*input),
            CrsTransform::Chain(chain) => chain.unproject(input),
        }
    }
}
