//! Map viewport state, fitting it to an extent and carrying it over into another projection.

use geoview_types::geo::Projection;
use geoview_types::{Point2d, Rect, Size};
use nalgebra::{Rotation2, Vector2};

use crate::crs::{point_resolution, registry, CrsRegistry};
use crate::error::ViewError;

/// Scale factor applied to the extent of a single point, so that fitting to it does not zoom in to the
/// minimum resolution.
pub const POINT_SCALE_FACTOR: f64 = 10.0;

/// Scale factor applied to extents of several features, leaving a small margin around them.
pub const EXTENT_SCALE_FACTOR: f64 = 1.05;

/// Viewport of a map: center, resolution (units of the projection per pixel), rotation in radians and size in
/// pixels.
///
/// A view is never changed in place. All operations return a new view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    projection: String,
    center: Option<Point2d>,
    resolution: Option<f64>,
    rotation: f64,
    size: Size,
}

impl ViewState {
    /// Creates an uninitialized view in the given projection.
    pub fn new(projection: impl Into<String>) -> Self {
        Self {
            projection: projection.into(),
            center: None,
            resolution: None,
            rotation: 0.0,
            size: Size::default(),
        }
    }

    /// Code of the projection the view is shown in.
    pub fn projection(&self) -> &str {
        &self.projection
    }

    /// Center of the view in projected coordinates.
    pub fn center(&self) -> Option<Point2d> {
        self.center
    }

    /// Returns a copy of the view with the given center.
    pub fn with_center(&self, center: Point2d) -> Self {
        Self {
            center: Some(center),
            ..self.clone()
        }
    }

    /// Projection units per pixel.
    pub fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    /// Returns a copy of the view with the given resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution: Some(resolution),
            ..self.clone()
        }
    }

    /// Rotation of the view in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns a copy of the view with the given rotation.
    pub fn with_rotation(&self, rotation: f64) -> Self {
        Self {
            rotation,
            ..self.clone()
        }
    }

    /// Size of the viewport in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy of the view with the given viewport size.
    pub fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Extent of the map visible in the viewport, taking rotation into account.
    pub fn visible_extent(&self) -> Result<Rect, ViewError> {
        let center = self.center.ok_or(ViewError::UndefinedCenter)?;
        let resolution = self.resolution.ok_or(ViewError::UndefinedResolution)?;
        if self.size.is_zero() {
            return Err(ViewError::ZeroSize);
        }

        let half = Rect::new(
            -self.size.half_width() * resolution,
            -self.size.half_height() * resolution,
            self.size.half_width() * resolution,
            self.size.half_height() * resolution,
        );
        let (width, height) = rotated_dimensions(&half, self.rotation);

        Ok(Rect::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        ))
    }

    /// Returns a view centered on the extent with the resolution that makes the extent fit into the viewport.
    ///
    /// The extent is first scaled by `scale_factor` around its center. An extent of a single point is grown to
    /// `min_resolution` pixels of the viewport before scaling, so larger scale factors always give larger
    /// resolutions. The result is never below `min_resolution` and never above `max_resolution` if it is given.
    pub fn fit(
        &self,
        extent: &Rect,
        scale_factor: f64,
        min_resolution: f64,
        max_resolution: Option<f64>,
    ) -> Result<Self, ViewError> {
        if self.size.is_zero() {
            return Err(ViewError::ZeroSize);
        }

        let extent = if extent.is_point() {
            let center = extent.center();
            let half_width = self.size.half_width() * min_resolution;
            let half_height = self.size.half_height() * min_resolution;
            Rect::new(
                center.x - half_width,
                center.y - half_height,
                center.x + half_width,
                center.y + half_height,
            )
        } else {
            *extent
        };

        let scaled = extent.magnify(scale_factor);
        let (width, height) = rotated_dimensions(&scaled, -self.rotation);

        let mut resolution = (width / self.size.width())
            .max(height / self.size.height())
            .max(min_resolution);
        if let Some(max_resolution) = max_resolution {
            resolution = resolution.min(max_resolution);
        }

        log::debug!(
            "Fitted view in {} to {:?} with resolution {resolution}",
            self.projection,
            scaled
        );

        Ok(Self {
            center: Some(scaled.center()),
            resolution: Some(resolution),
            ..self.clone()
        })
    }

    /// Fits the view to the combined extent of `extents`, e.g. extents of the loaded features.
    ///
    /// Uses [`POINT_SCALE_FACTOR`] if the combined extent is a single point and [`EXTENT_SCALE_FACTOR`]
    /// otherwise. Returns an unchanged view if there are no extents.
    pub fn fit_extents(
        &self,
        extents: impl IntoIterator<Item = Rect>,
        min_resolution: f64,
        max_resolution: Option<f64>,
    ) -> Result<Self, ViewError> {
        let Some(extent) = extents.into_iter().reduce(|a, b| a.merge(b)) else {
            return Ok(self.clone());
        };

        let scale_factor = if extent.is_point() {
            POINT_SCALE_FACTOR
        } else {
            EXTENT_SCALE_FACTOR
        };

        self.fit(&extent, scale_factor, min_resolution, max_resolution)
    }

    /// Returns the view in another projection, using the process-wide CRS registry.
    pub fn reproject(&self, projection: &str) -> Result<Self, ViewError> {
        self.reproject_with(registry(), projection)
    }

    /// Returns the view in another projection.
    ///
    /// The center is transformed into the new projection, and the resolution is changed so that one pixel
    /// covers the same ground distance at the center as before. Rotation and size are kept.
    pub fn reproject_with(&self, registry: &CrsRegistry, projection: &str) -> Result<Self, ViewError> {
        let resolution = self.resolution.ok_or(ViewError::UndefinedResolution)?;
        let center = self.center.ok_or(ViewError::UndefinedCenter)?;

        let old_crs = registry
            .get(&self.projection)
            .ok_or_else(|| ViewError::UnknownProjection(self.projection.clone()))?;
        let new_crs = registry
            .get(projection)
            .ok_or_else(|| ViewError::UnknownProjection(projection.to_string()))?;

        let old_mpu = old_crs
            .meters_per_unit()
            .ok_or_else(|| ViewError::UndefinedMetersPerUnit(old_crs.code().to_string()))?;
        let new_mpu = new_crs
            .meters_per_unit()
            .ok_or_else(|| ViewError::UndefinedMetersPerUnit(new_crs.code().to_string()))?;

        let transform_error = || ViewError::Transform {
            from: old_crs.code().to_string(),
            to: new_crs.code().to_string(),
        };
        let new_center = old_crs
            .transform_to(&new_crs)
            .and_then(|transform| transform.project(&center))
            .ok_or_else(transform_error)?;

        let old_pixel = point_resolution(&old_crs, 1.0 / old_mpu, &center).ok_or_else(transform_error)?
            * old_mpu;
        let new_pixel = point_resolution(&new_crs, 1.0 / new_mpu, &new_center)
            .ok_or_else(transform_error)?
            * new_mpu;

        Ok(Self {
            projection: projection.to_string(),
            center: Some(new_center),
            resolution: Some(resolution * old_pixel / new_pixel),
            ..self.clone()
        })
    }
}

/// Width and height of the bounding box of the rectangle rotated by `rotation` radians around its center.
fn rotated_dimensions(rect: &Rect, rotation: f64) -> (f64, f64) {
    if rotation == 0.0 {
        return (rect.width(), rect.height());
    }

    let rotation = Rotation2::new(rotation);
    let center = rect.center();
    let corners = rect
        .into_quadrangle()
        .map(|corner| center + rotation * Vector2::new(corner.x - center.x, corner.y - center.y));

    Rect::from_points(corners.iter())
        .map(|rotated| (rotated.width(), rotated.height()))
        .unwrap_or((rect.width(), rect.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;

    fn view(projection: &str) -> ViewState {
        ViewState::new(projection).with_size(Size::new(800.0, 600.0))
    }

    #[test]
    fn fit_extent() {
        let fitted = view("EPSG:3857")
            .fit(&Rect::new(0.0, 0.0, 8000.0, 3000.0), 1.0, 0.5, None)
            .expect("view has size");
        assert_eq!(fitted.center(), Some(Point2d::new(4000.0, 1500.0)));
        assert_eq!(fitted.resolution(), Some(10.0));
    }

    #[test]
    fn fit_respects_resolution_limits() {
        let extent = Rect::new(0.0, 0.0, 8000.0, 3000.0);
        let view = view("EPSG:3857");

        let fitted = view.fit(&extent, 1.0, 20.0, None).expect("fitted");
        assert_eq!(fitted.resolution(), Some(20.0));

        let fitted = view.fit(&extent, 1.0, 0.5, Some(5.0)).expect("fitted");
        assert_eq!(fitted.resolution(), Some(5.0));
    }

    #[test]
    fn fit_scales_extent_around_center() {
        let fitted = view("EPSG:3857")
            .fit(&Rect::new(0.0, 0.0, 8000.0, 3000.0), 1.05, 0.5, None)
            .expect("fitted");
        assert_eq!(fitted.center(), Some(Point2d::new(4000.0, 1500.0)));
        assert_relative_eq!(fitted.resolution().expect("fitted"), 10.5, max_relative = 1e-12);
    }

    #[test]
    fn point_fit_zooms_out_with_larger_scale_factor() {
        let point = Rect::from_point(&Point2d::new(155_000.0, 463_000.0));
        let view = view("EPSG:28992");

        let wide = view.fit(&point, 10.0, 0.25, None).expect("fitted");
        let narrow = view.fit(&point, 1.05, 0.25, None).expect("fitted");

        assert!(wide.resolution() > narrow.resolution());
        assert_eq!(wide.center(), Some(Point2d::new(155_000.0, 463_000.0)));
    }

    #[test]
    fn fit_extents_picks_scale_factor() {
        let view = view("EPSG:3857");
        let point = Rect::from_point(&Point2d::new(100.0, 100.0));
        let fitted = view.fit_extents([point], 1.0, None).expect("fitted");
        assert_relative_eq!(fitted.resolution().expect("fitted"), 10.0, max_relative = 1e-12);

        let extents = [
            Rect::new(0.0, 0.0, 4000.0, 1000.0),
            Rect::new(4000.0, 2000.0, 8000.0, 3000.0),
        ];
        let fitted = view.fit_extents(extents, 1.0, None).expect("fitted");
        assert_relative_eq!(fitted.resolution().expect("fitted"), 10.5, max_relative = 1e-12);

        assert_eq!(
            view.fit_extents(Vec::<Rect>::new(), 1.0, None),
            Ok(view.clone())
        );
    }

    #[test]
    fn fit_accounts_for_rotation() {
        let extent = Rect::new(-400.0, -300.0, 400.0, 300.0);
        let square = ViewState::new("EPSG:3857").with_size(Size::new(100.0, 100.0));

        let straight = square.fit(&extent, 1.0, 0.0, None).expect("fitted");
        let rotated = square
            .with_rotation(std::f64::consts::FRAC_PI_2)
            .fit(&extent, 1.0, 0.0, None)
            .expect("fitted");

        assert_relative_eq!(straight.resolution().expect("fitted"), 8.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.resolution().expect("fitted"), 8.0, epsilon = 1e-9);
        assert_eq!(rotated.rotation(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn fit_zero_size() {
        let view = ViewState::new("EPSG:3857");
        assert_eq!(
            view.fit(&Rect::new(0.0, 0.0, 1.0, 1.0), 1.0, 0.0, None),
            Err(ViewError::ZeroSize)
        );
    }

    #[test]
    fn visible_extent() {
        let view = view("EPSG:3857")
            .with_center(Point2d::new(1000.0, 2000.0))
            .with_resolution(2.0);
        assert_eq!(
            view.visible_extent(),
            Ok(Rect::new(200.0, 1400.0, 1800.0, 2600.0))
        );

        let rotated = view.with_rotation(std::f64::consts::FRAC_PI_2);
        let extent = rotated.visible_extent().expect("initialized");
        assert_abs_diff_eq!(extent.width(), 1200.0, epsilon = 1e-6);
        assert_abs_diff_eq!(extent.height(), 1600.0, epsilon = 1e-6);

        assert_eq!(
            ViewState::new("EPSG:3857").visible_extent(),
            Err(ViewError::UndefinedCenter)
        );
    }

    #[test]
    fn reproject_keeps_ground_resolution() {
        let geographic = view("EPSG:4326")
            .with_center(Point2d::new(0.0, 0.0))
            .with_resolution(0.01)
            .with_rotation(0.3);

        let mercator = geographic.reproject("EPSG:3857").expect("reprojected");
        assert_eq!(mercator.projection(), "EPSG:3857");
        assert_abs_diff_eq!(
            mercator.center().expect("defined"),
            Point2d::new(0.0, 0.0),
            epsilon = 1e-6
        );
        let degree_meters = 2.0 * std::f64::consts::PI * 6_370_997.0 / 360.0;
        assert_relative_eq!(
            mercator.resolution().expect("defined"),
            0.01 * degree_meters,
            max_relative = 1e-5
        );
        assert_eq!(mercator.rotation(), 0.3);
        assert_eq!(mercator.size(), geographic.size());

        let back = mercator.reproject("EPSG:4326").expect("reprojected");
        assert_relative_eq!(back.resolution().expect("defined"), 0.01, max_relative = 1e-9);
    }

    #[test]
    fn reproject_accounts_for_mercator_scale() {
        // 52N 10E
        let mercator = view("EPSG:3857")
            .with_center(Point2d::new(1_113_194.91, 6_800_125.45))
            .with_resolution(100.0);
        let laea = mercator.reproject("EPSG:3035").expect("reprojected");

        let center = laea.center().expect("defined");
        assert_abs_diff_eq!(center.x, 4_321_000.0, epsilon = 1.0);
        assert_abs_diff_eq!(center.y, 3_210_000.0, epsilon = 1.0);
        // Mercator scale at 52N is 1 / cos(52)
        assert_relative_eq!(
            laea.resolution().expect("defined"),
            100.0 * 52f64.to_radians().cos(),
            max_relative = 5e-3
        );
    }

    #[test]
    fn reproject_uninitialized_view_fails() {
        let view = view("EPSG:4326");
        assert_eq!(
            view.reproject("EPSG:3857"),
            Err(ViewError::UndefinedResolution)
        );
        assert_eq!(
            view.with_resolution(1.0).reproject("EPSG:3857"),
            Err(ViewError::UndefinedCenter)
        );
        assert_matches!(
            view.with_resolution(1.0)
                .with_center(Point2d::new(0.0, 0.0))
                .reproject("EPSG:999999"),
            Err(ViewError::UnknownProjection(code)) if code == "EPSG:999999"
        );
    }
}
