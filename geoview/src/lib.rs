//! Geoview loads geographic features from data services and prepares them, and the map view showing them, for
//! display in a projection that may differ from the one the data comes in.
//!
//! # Quick start
//!
//! ```no_run
//! use geoview::{resolve, FeatureLoader, ViewState};
//! use geoview::geoview_types::Size;
//!
//! # tokio_test::block_on(async {
//! let mapping = resolve(Some("http://www.opengis.net/def/crs/EPSG/0/28992"));
//! let features = FeatureLoader::default()
//!     .load("https://example.com/collections/buildings/items", &mapping)
//!     .await;
//!
//! let view = ViewState::new(mapping.visual_projection())
//!     .with_size(Size::new(800.0, 600.0))
//!     .fit_extents(features.iter().filter_map(|f| f.bounding_rect()), 0.25, None)
//!     .expect("view has size");
//! # });
//! ```
//!
//! # Main components
//!
//! * [`crs`] holds the process-wide registry of CRS definitions and the [`CrsResolver`] that turns CRS
//!   identifiers given by a data service into a [`ProjectionMapping`]: the projection of the data, the projection
//!   to show it in, and whether coordinates may be reordered between them.
//! * [`normalize`] swaps the coordinate axes of GeoJSON geometries when the two projections disagree on the axis
//!   order.
//! * [`loader`] fetches feature collections, normalizes and projects them. [`FeatureSource`] keeps the features of
//!   one map component in sync with its inputs, applying only the result of the latest request.
//! * [`ViewState`] is the map viewport. It can be fitted to an extent and carried over into another projection
//!   keeping the ground resolution at its center.
//! * [`bbox`] converts drawn boxes and view extents into geographic bounding box strings.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod bbox;
pub mod crs;
pub mod error;
pub mod loader;
pub mod normalize;
#[cfg(feature = "http")]
mod platform;
mod view;

pub use bbox::{BboxEmitter, BboxObserver, BoxDrawControl};
pub use crs::{register_projections, registry, resolve, CrsResolver, ProjectionMapping};
pub use error::{GeoviewError, ViewError};
pub use loader::{DataProvider, Feature, FeatureLoader, FeatureSource, FetchIntent};
pub use view::{ViewState, EXTENT_SCALE_FACTOR, POINT_SCALE_FACTOR};

#[cfg(feature = "http")]
pub use loader::UrlDataProvider;

// Reexport geoview_types
pub use geoview_types;
