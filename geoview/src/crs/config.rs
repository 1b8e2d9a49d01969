use geoview_types::geo::Crs;
use serde::{Deserialize, Serialize};

use crate::error::GeoviewError;

/// Configuration of the CRS registry and resolver.
///
/// ```json
/// {
///   "definitions": [
///     { "code": "EPSG:2056", "proj4": "+proj=somerc ...", "units": "m", "axis_order": "enu" }
///   ],
///   "display_reprojected": ["EPSG:3035", "EPSG:4258"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Extra definitions registered in addition to the built-in ones.
    #[serde(default)]
    pub definitions: Vec<Crs>,
    /// CRSs whose data is displayed in [`display_projection`](Self::display_projection) instead of their own
    /// projection, because their axis order differs from the display one.
    #[serde(default = "default_display_reprojected")]
    pub display_reprojected: Vec<String>,
    /// Projection used to display data when no specific one is requested.
    #[serde(default = "default_display_projection")]
    pub display_projection: String,
    /// Projection of the data when the service does not specify one.
    #[serde(default = "default_data_projection")]
    pub data_projection: String,
}

fn default_display_reprojected() -> Vec<String> {
    vec!["EPSG:3035".to_string(), "EPSG:4258".to_string()]
}

fn default_display_projection() -> String {
    Crs::EPSG3857.code().to_string()
}

fn default_data_projection() -> String {
    Crs::EPSG4326.code().to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            definitions: vec![],
            display_reprojected: default_display_reprojected(),
            display_projection: default_display_projection(),
            data_projection: default_data_projection(),
        }
    }
}

impl RegistryConfig {
    /// Reads the configuration from a JSON document. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, GeoviewError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoview_types::geo::{AxisOrder, Units};

    #[test]
    fn empty_config_uses_defaults() {
        let config = RegistryConfig::from_json("{}").expect("valid json");
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.display_projection, "EPSG:3857");
        assert_eq!(config.data_projection, "EPSG:4326");
    }

    #[test]
    fn config_with_definitions() {
        let config = RegistryConfig::from_json(
            r#"{
                "definitions": [{
                    "code": "EPSG:2056",
                    "proj4": "+proj=somerc +lat_0=46.9524055555556 +lon_0=7.43958333333333 +k_0=1 +x_0=2600000 +y_0=1200000 +ellps=bessel +units=m +no_defs",
                    "units": "m",
                    "axis_order": "enu"
                }],
                "display_reprojected": []
            }"#,
        )
        .expect("valid json");

        assert_eq!(config.definitions.len(), 1);
        assert_eq!(config.definitions[0].units(), Units::Meters);
        assert_eq!(config.definitions[0].axis_order(), AxisOrder::Enu);
        assert!(config.display_reprojected.is_empty());
    }

    #[test]
    fn invalid_config() {
        assert!(RegistryConfig::from_json(r#"{"definitions": 5}"#).is_err());
    }
}
