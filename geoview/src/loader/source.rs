use parking_lot::Mutex;

use crate::crs::{CrsResolver, ProjectionMapping};
use crate::loader::{DataProvider, Feature, FeatureLoader};

/// Request to load features, produced by [`FeatureSource::on_input`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchIntent {
    /// Generation of the request. Only the result of the latest generation is applied.
    pub generation: u64,
    /// Url of the feature collection.
    pub url: String,
    /// Projections to load the features with.
    pub mapping: ProjectionMapping,
}

/// Feature list of a single map component, driven by its `(url, crs)` inputs.
///
/// Every change of the inputs produces one [`FetchIntent`] with a new generation. Results of older intents are
/// dropped when they arrive, so the visible features always correspond to the latest inputs regardless of the
/// order in which requests complete.
#[derive(Debug)]
pub struct FeatureSource {
    resolver: CrsResolver,
    url: Option<String>,
    crs: Option<String>,
    mapping: ProjectionMapping,
    features: Vec<Feature>,
    generation: u64,
    disposed: bool,
}

impl Default for FeatureSource {
    fn default() -> Self {
        Self::new(CrsResolver::default())
    }
}

impl FeatureSource {
    /// Creates an empty source.
    pub fn new(resolver: CrsResolver) -> Self {
        let mapping = resolver.default_mapping();
        Self {
            resolver,
            url: None,
            crs: None,
            mapping,
            features: vec![],
            generation: 0,
            disposed: false,
        }
    }

    /// Updates the inputs. Returns the request to make if anything changed.
    ///
    /// Clearing the url clears the visible features and invalidates pending requests without producing a new
    /// one.
    pub fn on_input(&mut self, url: Option<&str>, crs: Option<&str>) -> Option<FetchIntent> {
        if self.disposed {
            return None;
        }

        let url = url.map(str::trim).filter(|url| !url.is_empty());
        let crs = crs.map(str::trim).filter(|crs| !crs.is_empty());
        if self.url.as_deref() == url && self.crs.as_deref() == crs {
            return None;
        }

        self.url = url.map(str::to_string);
        self.crs = crs.map(str::to_string);
        self.mapping = self.resolver.resolve(crs);
        self.generation += 1;

        match url {
            Some(url) => Some(FetchIntent {
                generation: self.generation,
                url: url.to_string(),
                mapping: self.mapping.clone(),
            }),
            None => {
                self.features.clear();
                None
            }
        }
    }

    /// Replaces the visible features with the result of the request of the given generation. Returns false and
    /// leaves the features unchanged if the result is stale or the source is disposed.
    pub fn apply(&mut self, generation: u64, features: Vec<Feature>) -> bool {
        if self.disposed {
            log::debug!("Dropping result of request {generation}: source is disposed");
            return false;
        }

        if generation != self.generation {
            log::debug!(
                "Dropping stale result of request {generation}, latest is {}",
                self.generation
            );
            return false;
        }

        self.features = features;
        true
    }

    /// Marks the source as disposed. Results that arrive afterwards are ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.features.clear();
    }

    /// Whether [`FeatureSource::dispose`] was called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Visible features.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Mapping resolved from the current `crs` input.
    pub fn mapping(&self) -> &ProjectionMapping {
        &self.mapping
    }

    /// Generation of the latest request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Loads the features of the intent and applies them to the source. Returns whether the result was applied.
    ///
    /// The lock is not held while loading, so new inputs can be given to the source in the meantime.
    pub async fn run<P: DataProvider>(
        source: &Mutex<FeatureSource>,
        loader: &FeatureLoader<P>,
        intent: FetchIntent,
    ) -> bool {
        let features = loader.load(&intent.url, &intent.mapping).await;
        source.lock().apply(intent.generation, features)
    }
}
