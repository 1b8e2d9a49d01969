use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::crs::config::RegistryConfig;

static DEFAULT_RESOLVER: LazyLock<CrsResolver> = LazyLock::new(CrsResolver::default);

static EPSG_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/EPSG/(?:[^/]*/)*?(\d+)/?$").expect("EPSG uri pattern is valid")
});

/// Pair of projections used to show data from a service: the projection the data comes in, and the projection
/// it is displayed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionMapping {
    data_projection: String,
    visual_projection: String,
    swap_allowed: bool,
}

impl ProjectionMapping {
    /// Creates a mapping from the data projection to the visual projection.
    pub fn new(
        data_projection: impl Into<String>,
        visual_projection: impl Into<String>,
        swap_allowed: bool,
    ) -> Self {
        Self {
            data_projection: data_projection.into(),
            visual_projection: visual_projection.into(),
            swap_allowed,
        }
    }

    /// Projection of the coordinates in the loaded documents.
    pub fn data_projection(&self) -> &str {
        &self.data_projection
    }

    /// Projection the data is displayed in.
    pub fn visual_projection(&self) -> &str {
        &self.visual_projection
    }

    /// Whether coordinates may be reordered when the axis orders of the two projections differ.
    pub fn swap_allowed(&self) -> bool {
        self.swap_allowed
    }
}

/// Maps external CRS identifiers into [`ProjectionMapping`]s.
#[derive(Debug, Clone)]
pub struct CrsResolver {
    data_projection: String,
    display_projection: String,
    display_reprojected: HashSet<String>,
}

impl Default for CrsResolver {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}

impl CrsResolver {
    /// Creates a resolver with the default projections and display-reprojected set of the config.
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            data_projection: config.data_projection.clone(),
            display_projection: config.display_projection.clone(),
            display_reprojected: config
                .display_reprojected
                .iter()
                .map(|code| code.to_ascii_uppercase())
                .collect(),
        }
    }

    /// Mapping used when the service does not specify a CRS. Coordinates are never swapped.
    pub fn default_mapping(&self) -> ProjectionMapping {
        ProjectionMapping::new(&self.data_projection, &self.display_projection, false)
    }

    /// Resolves the identifier. Never fails: identifiers that are not recognized are used as is for both the
    /// data and the visual projections.
    pub fn resolve(&self, identifier: Option<&str>) -> ProjectionMapping {
        let Some(identifier) = identifier.map(str::trim).filter(|id| !id.is_empty()) else {
            return self.default_mapping();
        };

        let last_segment = identifier
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(identifier);
        if last_segment.eq_ignore_ascii_case("CRS84") {
            return self.default_mapping();
        }

        if let Some(captures) = EPSG_URI.captures(identifier) {
            let code = format!("EPSG:{}", &captures[1]);
            return if self.display_reprojected.contains(&code) {
                ProjectionMapping::new(code, &self.display_projection, true)
            } else {
                ProjectionMapping::new(code.clone(), code, true)
            };
        }

        ProjectionMapping::new(identifier, identifier, true)
    }
}

/// Resolves the identifier with the default resolver configuration.
pub fn resolve(identifier: Option<&str>) -> ProjectionMapping {
    DEFAULT_RESOLVER.resolve(identifier)
}
