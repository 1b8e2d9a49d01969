//! Loading of feature collections from a data service and decoding them into display geometries.
//!
//! [`FeatureLoader`] fetches a document with a [`DataProvider`], reorders axes if needed (see
//! [`normalize`](crate::normalize)), and projects every geometry from the data projection into the visual
//! projection of a [`ProjectionMapping`]. Failures are logged and reported as an empty feature list.
//!
//! [`FeatureSource`] tracks the inputs of a single map component and makes sure only the result of the latest
//! request is shown.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use geoview_types::{Geom, Point2d, Rect};
use serde_json::{Map, Value};

use crate::crs::{registry, CrsRegistry, ProjectionMapping};
use crate::error::GeoviewError;
use crate::normalize::normalize_feature_collection;

mod document;
mod source;

pub use document::{FeatureCollectionDocument, FeatureDocument, Link};
pub use source::{FeatureSource, FetchIntent};

/// Source of raw documents.
pub trait DataProvider {
    /// Loads the document at the given url.
    fn load(&self, url: &str) -> impl Future<Output = Result<Bytes, GeoviewError>> + Send;
}

/// [`DataProvider`] that loads documents over HTTP using the platform service.
#[cfg(feature = "http")]
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlDataProvider;

#[cfg(feature = "http")]
impl DataProvider for UrlDataProvider {
    fn load(&self, url: &str) -> impl Future<Output = Result<Bytes, GeoviewError>> + Send {
        use crate::platform::PlatformService;
        crate::platform::instance().load_bytes_from_url(url)
    }
}

/// Feature decoded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature id, if the service provides one.
    pub id: Option<Value>,
    /// Feature attributes.
    pub properties: Map<String, Value>,
    /// Links of the feature.
    pub links: Vec<Link>,
    /// Geometry in the visual projection. Features with `null` geometry keep `None`.
    pub geometry: Option<Geom<Point2d>>,
}

impl Feature {
    /// Extent of the geometry in the visual projection.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.geometry.as_ref()?.bounding_rect()
    }
}

/// Decoded page of a feature collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollectionPage {
    /// Features of the page.
    pub features: Vec<Feature>,
    /// Links of the collection, e.g. to the next page.
    pub links: Vec<Link>,
    /// Number of features in the page as reported by the service.
    pub number_returned: Option<u64>,
    /// Number of features matching the request as reported by the service.
    pub number_matched: Option<u64>,
}

impl FeatureCollectionPage {
    /// Combined extent of all features.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.features
            .iter()
            .filter_map(Feature::bounding_rect)
            .reduce(|a, b| a.merge(b))
    }
}

/// Loads feature collections and decodes them into the visual projection.
///
/// The loader does not cache or de-duplicate requests.
#[derive(Debug)]
pub struct FeatureLoader<P> {
    provider: P,
    registry: Arc<CrsRegistry>,
}

#[cfg(feature = "http")]
impl Default for FeatureLoader<UrlDataProvider> {
    fn default() -> Self {
        Self::new(UrlDataProvider)
    }
}

impl<P: DataProvider> FeatureLoader<P> {
    /// Creates a loader that uses the process-wide CRS registry.
    pub fn new(provider: P) -> Self {
        Self::with_registry(provider, registry().clone())
    }

    /// Creates a loader that uses the given CRS registry, e.g. one built with [`CrsRegistry::from_config`].
    pub fn with_registry(provider: P, registry: Arc<CrsRegistry>) -> Self {
        Self { provider, registry }
    }

    /// Loads and decodes the collection at `url`.
    ///
    /// Any failure is logged and results in an empty list, so "no features" and "failed to load" look the same
    /// to the caller. Use [`FeatureLoader::load_page`] to get the error.
    pub async fn load(&self, url: &str, mapping: &ProjectionMapping) -> Vec<Feature> {
        match self.load_page(url, mapping).await {
            Ok(page) => page.features,
            Err(err) => {
                log::error!("Failed to load features from {url}: {err}");
                vec![]
            }
        }
    }

    /// Loads and decodes the collection at `url`, returning the error on failure.
    pub async fn load_page(
        &self,
        url: &str,
        mapping: &ProjectionMapping,
    ) -> Result<FeatureCollectionPage, GeoviewError> {
        let bytes = self.provider.load(url).await?;
        log::debug!("Loaded {} bytes from {url}", bytes.len());
        decode_page(&bytes, mapping, &self.registry)
    }
}

/// Decodes a feature collection document into the visual projection of the mapping.
pub fn decode_page(
    bytes: &[u8],
    mapping: &ProjectionMapping,
    registry: &CrsRegistry,
) -> Result<FeatureCollectionPage, GeoviewError> {
    let document = FeatureCollectionDocument::from_slice(bytes)?;

    let data_crs = registry
        .get(mapping.data_projection())
        .ok_or_else(|| GeoviewError::UnknownProjection(mapping.data_projection().to_string()))?;
    let visual_crs = registry
        .get(mapping.visual_projection())
        .ok_or_else(|| GeoviewError::UnknownProjection(mapping.visual_projection().to_string()))?;
    let transform = data_crs.transform_to(&visual_crs).ok_or_else(|| {
        GeoviewError::UnknownProjection(format!(
            "{} -> {}",
            data_crs.code(),
            visual_crs.code()
        ))
    })?;

    let document = normalize_feature_collection(
        &document,
        mapping,
        data_crs.axis_order(),
        visual_crs.axis_order(),
    );

    let features = document
        .features
        .into_iter()
        .map(|feature| {
            let geometry = match &feature.geometry {
                Some(geometry) => {
                    let geom = Geom::<Point2d>::try_from(geometry)?;
                    Some(geom.project(&transform).ok_or_else(|| GeoviewError::Transform {
                        from: data_crs.code().to_string(),
                        to: visual_crs.code().to_string(),
                    })?)
                }
                None => None,
            };

            Ok(Feature {
                id: feature.id,
                properties: feature.properties.unwrap_or_default(),
                links: feature.links,
                geometry,
            })
        })
        .collect::<Result<Vec<_>, GeoviewError>>()?;

    Ok(FeatureCollectionPage {
        features,
        links: document.links,
        number_returned: document.number_returned,
        number_matched: document.number_matched,
    })
}
