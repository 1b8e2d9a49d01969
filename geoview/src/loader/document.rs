use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Feature collection document as returned by an OGC API Features service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollectionDocument {
    /// Features of the page.
    pub features: Vec<FeatureDocument>,
    /// Links of the collection.
    #[serde(default)]
    pub links: Vec<Link>,
    /// `numberReturned` of the response.
    #[serde(default)]
    pub number_returned: Option<u64>,
    /// `numberMatched` of the response.
    #[serde(default)]
    pub number_matched: Option<u64>,
}

/// Single feature of a [`FeatureCollectionDocument`]. Geometry may be `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDocument {
    /// Geometry in the data projection.
    #[serde(default)]
    pub geometry: Option<geojson::Geometry>,
    /// Feature attributes.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    /// Feature id.
    #[serde(default)]
    pub id: Option<Value>,
    /// Links of the feature.
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Hypermedia link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Target url.
    pub href: String,
    /// Relation of the target, e.g. `next` or `self`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// Media type of the target (`type` in JSON).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl FeatureCollectionDocument {
    /// Parses the document from a JSON byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Link with the given relation, e.g. `next`.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|link| link.rel.as_deref() == Some(rel))
    }
}
