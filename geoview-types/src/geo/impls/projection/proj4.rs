use crate::error::GeoviewTypesError;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;
use crate::point::Point2d;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Projection defined by a PROJ.4 parameter string, backed by `proj4rs`.
///
/// Input points are WGS84 geographic coordinates, so datum shifts given with `+towgs84` are applied.
pub struct Proj4Projection {
    definition: String,
    geographic: Proj,
    projected: Proj,
}

impl std::fmt::Debug for Proj4Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proj4Projection")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

impl Proj4Projection {
    /// Parses the definition.
    pub fn new(definition: &str) -> Result<Self, GeoviewTypesError> {
        let projected = Proj::from_proj_string(definition).map_err(|err| {
            GeoviewTypesError::Projection {
                definition: definition.to_string(),
                reason: format!("{err:?}"),
            }
        })?;
        let geographic =
            Proj::from_proj_string(WGS84_LONGLAT).map_err(|err| GeoviewTypesError::Projection {
                definition: WGS84_LONGLAT.to_string(),
                reason: format!("{err:?}"),
            })?;

        Ok(Self {
            definition: definition.to_string(),
            geographic,
            projected,
        })
    }

    /// Definition string of the projection.
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl Projection for Proj4Projection {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let mut point = (input.lon_rad(), input.lat_rad(), 0.0);
        transform(&self.geographic, &self.projected, &mut point).ok()?;

        if !point.0.is_finite() || !point.1.is_finite() {
            return None;
        }

        Some(Point2d::new(point.0, point.1))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let mut point = (input.x, input.y, 0.0);
        transform(&self.projected, &self.geographic, &mut point).ok()?;

        if !point.0.is_finite() || !point.1.is_finite() {
            return None;
        }

        Some(GeoPoint2d::latlon(point.1.to_degrees(), point.0.to_degrees()))
    }
}
