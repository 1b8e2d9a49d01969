use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock};

use geoview_types::geo::{AxisOrder, Crs, Units};
use parking_lot::RwLock;

use crate::crs::config::RegistryConfig;

static REGISTRY: LazyLock<Arc<CrsRegistry>> =
    LazyLock::new(|| Arc::new(CrsRegistry::with_defaults()));

/// Returns the process-wide registry. Built-in definitions are registered on first access.
///
/// Clone the `Arc` to share the registry with a [`FeatureLoader`](crate::FeatureLoader) or a
/// [`BboxEmitter`](crate::BboxEmitter).
pub fn registry() -> &'static Arc<CrsRegistry> {
    &REGISTRY
}

/// Registers the built-in definitions in the process-wide registry.
///
/// Calling this any number of times, from any number of threads, leaves the registry in the same state as
/// calling it once.
pub fn register_projections() {
    registry().register_defaults();
}

/// Built-in CRS definitions.
pub fn default_definitions() -> Vec<Crs> {
    vec![
        Crs::EPSG4326,
        Crs::EPSG3857,
        Crs::new(
            "EPSG:28992",
            "+proj=sterea +lat_0=52.15616055555555 +lon_0=5.38763888888889 +k=0.9999079 \
             +x_0=155000 +y_0=463000 +ellps=bessel \
             +towgs84=565.417,50.3319,465.552,-0.398957,0.343988,-1.8774,4.0725 +units=m +no_defs",
            Units::Meters,
            AxisOrder::Enu,
        ),
        Crs::new(
            "EPSG:3035",
            "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 \
             +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
            Units::Meters,
            AxisOrder::Neu,
        ),
        Crs::new(
            "EPSG:4258",
            "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs",
            Units::Degrees,
            AxisOrder::Neu,
        ),
    ]
}

/// Set of named CRS definitions.
///
/// All methods take `&self`, so a registry can be shared between threads.
#[derive(Debug, Default)]
pub struct CrsRegistry {
    definitions: RwLock<HashMap<String, Crs>>,
}

impl CrsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in definitions.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Creates a registry with the built-in definitions and the definitions from the config.
    pub fn from_config(config: &RegistryConfig) -> Self {
        let registry = Self::with_defaults();
        registry.apply_config(config);
        registry
    }

    /// Registers all definitions from the config.
    pub fn apply_config(&self, config: &RegistryConfig) {
        for crs in &config.definitions {
            self.register(crs.clone());
        }
    }

    /// Registers the built-in definitions.
    pub fn register_defaults(&self) {
        for crs in default_definitions() {
            self.register(crs);
        }
    }

    /// Registers a definition. Returns `true` if the registry changed.
    ///
    /// Registering an identical definition again does nothing. A different definition with the same code
    /// replaces the old one.
    pub fn register(&self, crs: Crs) -> bool {
        let key = normalize_code(crs.code());
        if self.definitions.read().get(&key) == Some(&crs) {
            return false;
        }

        let mut definitions = self.definitions.write();
        match definitions.insert(key, crs.clone()) {
            Some(previous) if previous == crs => false,
            Some(previous) => {
                log::warn!(
                    "Definition of {} is replaced: '{}' -> '{}'",
                    crs.code(),
                    previous.proj4(),
                    crs.proj4()
                );
                true
            }
            None => {
                log::debug!("Registered projection {}", crs.code());
                true
            }
        }
    }

    /// Returns the definition with the given code. Codes are compared case-insensitively.
    pub fn get(&self, code: &str) -> Option<Crs> {
        self.definitions.read().get(&normalize_code(code)).cloned()
    }

    /// Returns true if the code can be resolved.
    pub fn contains(&self, code: &str) -> bool {
        self.definitions
            .read()
            .contains_key(&normalize_code(code))
    }

    /// Axis order of the CRS. Unknown CRSs are treated as easting-first.
    pub fn axis_order(&self, code: &str) -> AxisOrder {
        self.get(code)
            .map(|crs| crs.axis_order())
            .unwrap_or_default()
    }

    /// Codes of all registered CRSs.
    pub fn codes(&self) -> BTreeSet<String> {
        self.definitions
            .read()
            .values()
            .map(|crs| crs.code().to_string())
            .collect()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
