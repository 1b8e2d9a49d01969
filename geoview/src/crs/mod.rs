//! Coordinate reference systems known to the viewer and resolution of external CRS identifiers.
//!
//! The process-wide [`registry()`] holds named CRS definitions. It is filled with the built-in definitions on
//! first access, and [`register_projections()`] can be called any number of times from any thread.
//!
//! [`CrsResolver`] maps an identifier given by a data service (`EPSG:28992`,
//! `http://www.opengis.net/def/crs/EPSG/0/3035`, `.../OGC/1.3/CRS84`) into a [`ProjectionMapping`].

mod config;
mod metrics;
mod registry;
mod resolver;

pub use config::RegistryConfig;
pub use metrics::point_resolution;
pub use registry::{default_definitions, register_projections, registry, CrsRegistry};
pub use resolver::{resolve, CrsResolver, ProjectionMapping};
