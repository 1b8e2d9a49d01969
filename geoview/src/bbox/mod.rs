//! Conversion of extents drawn on the map into geographic bounding box strings for external consumers.

use std::sync::Arc;

use geoview_types::geo::{Crs, Projection};
use geoview_types::{Geom, Point2d, Rect};

use crate::crs::{registry, CrsRegistry};
use crate::error::GeoviewError;
use crate::view::ViewState;

mod draw;

pub use draw::{BoxDrawControl, BoxOverlay, DrawState};

/// Number of points sampled along every edge of an extent when it is transformed into geographic coordinates.
const EDGE_STOPS: usize = 8;

/// Receiver of the bounding boxes emitted by a [`BboxEmitter`].
pub trait BboxObserver: Send + Sync {
    /// Called with the `minLon,minLat,maxLon,maxLat` string of every emitted bounding box.
    fn notify(&self, bbox: &str);
}

impl<F: Fn(&str) + Send + Sync> BboxObserver for F {
    fn notify(&self, bbox: &str) {
        self(bbox)
    }
}

/// Transforms extents into geographic coordinates and hands them to a single observer.
///
/// The emitter does not keep emitted boxes.
pub struct BboxEmitter {
    observer: Box<dyn BboxObserver>,
    registry: Arc<CrsRegistry>,
}

impl std::fmt::Debug for BboxEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BboxEmitter").finish_non_exhaustive()
    }
}

impl BboxEmitter {
    /// Creates an emitter notifying the given observer.
    pub fn new(observer: impl BboxObserver + 'static) -> Self {
        Self::with_registry(observer, registry().clone())
    }

    /// Creates an emitter that looks up projections in the given registry.
    pub fn with_registry(observer: impl BboxObserver + 'static, registry: Arc<CrsRegistry>) -> Self {
        Self {
            observer: Box::new(observer),
            registry,
        }
    }

    /// Converts `extent` given in `projection` into a geographic bounding box string and notifies the observer.
    pub fn emit(&self, projection: &str, extent: &Rect) -> Result<String, GeoviewError> {
        let bbox = format_bbox(&geographic_bbox(&self.registry, projection, extent)?);
        log::debug!("Emitting bounding box {bbox}");
        self.observer.notify(&bbox);
        Ok(bbox)
    }

    /// Emits the extent of the geometry.
    pub fn emit_geometry(&self, projection: &str, geometry: &Geom<Point2d>) -> Result<String, GeoviewError> {
        let extent = geometry
            .bounding_rect()
            .ok_or_else(|| GeoviewError::InvalidState("geometry has no points".into()))?;
        self.emit(projection, &extent)
    }

    /// Emits the extent visible in the view.
    pub fn emit_view(&self, view: &ViewState) -> Result<String, GeoviewError> {
        self.emit(view.projection(), &view.visible_extent()?)
    }
}

/// Bounding box of `extent` in `EPSG:4326`, as `[min_lon, min_lat, max_lon, max_lat]`.
///
/// Edges of the extent are sampled, since straight lines of a projected CRS are generally curves in geographic
/// coordinates.
pub fn geographic_bbox(
    registry: &CrsRegistry,
    projection: &str,
    extent: &Rect,
) -> Result<Rect, GeoviewError> {
    let source = registry
        .get(projection)
        .ok_or_else(|| GeoviewError::UnknownProjection(projection.to_string()))?;
    let target = registry.get(Crs::EPSG4326.code()).unwrap_or(Crs::EPSG4326);
    let transform_error = || GeoviewError::Transform {
        from: source.code().to_string(),
        to: target.code().to_string(),
    };

    let transform = source.transform_to(&target).ok_or_else(transform_error)?;
    let points = extent
        .boundary_points(EDGE_STOPS)
        .iter()
        .map(|point| transform.project(point))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(transform_error)?;

    Rect::from_points(points.iter()).ok_or_else(transform_error)
}

/// Formats the box as `minX,minY,maxX,maxY`.
pub fn format_bbox(bbox: &Rect) -> String {
    format!("{},{},{},{}", bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max)
}
