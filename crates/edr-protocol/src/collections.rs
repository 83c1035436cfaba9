//! EDR collection listing types.
//!
//! Collections represent the datasets exposed by the upstream service
//! (forecast models, observation networks). The client only reads these,
//! so the types are deserialization-first and tolerate absent sections.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::parameters::Parameter;

/// Response of `GET {base}/collections`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollectionList {
    /// Links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// The available collections.
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl CollectionList {
    /// Find a collection by id.
    pub fn find(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }
}

/// An EDR collection representing one dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Unique identifier for the collection.
    #[serde(default)]
    pub id: String,

    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Detailed description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keywords for discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Links to related resources.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Spatial and temporal extent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,

    /// Output formats supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_formats: Option<Vec<String>>,

    /// Parameters available in this collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_names: Option<HashMap<String, Parameter>>,
}

impl Collection {
    /// Parameter keys offered by this collection, unordered.
    pub fn parameter_keys(&self) -> Vec<&str> {
        self.parameter_names
            .as_ref()
            .map(|p| p.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether the collection offers a parameter, ignoring ASCII case.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter_names
            .as_ref()
            .is_some_and(|p| p.keys().any(|k| k.eq_ignore_ascii_case(name)))
    }
}

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Target URL.
    #[serde(default)]
    pub href: String,

    /// Link relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,

    /// Media type of the target.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Spatial and temporal extent of a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    /// Spatial bounding box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial: Option<SpatialExtent>,

    /// Temporal interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,
}

/// Spatial extent as one or more bounding boxes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes as [min_lon, min_lat, max_lon, max_lat].
    #[serde(default)]
    pub bbox: Vec<Vec<f64>>,

    /// Coordinate reference system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
}

/// Temporal extent as one or more intervals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Intervals as [start, end]; either bound may be null for open ends.
    #[serde(default)]
    pub interval: Vec<Vec<Option<String>>>,

    /// Temporal reference system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trs: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_list_parses() {
        let list: CollectionList = serde_json::from_value(json!({
            "links": [{"href": "https://example.fi/edr/collections", "rel": "self"}],
            "collections": [
                {
                    "id": "harmonie_skandinavia_pinta",
                    "title": "HARMONIE surface forecast",
                    "parameter_names": {
                        "Temperature": {"label": "Air temperature"},
                        "WindSpeedMS": {"label": "Wind speed"}
                    }
                },
                {"id": "observations"}
            ]
        }))
        .unwrap();

        assert_eq!(list.collections.len(), 2);
        let harmonie = list.find("harmonie_skandinavia_pinta").unwrap();
        assert!(harmonie.has_parameter("temperature"));
        assert!(!harmonie.has_parameter("Pressure"));
        assert!(list.find("missing").is_none());
    }

    #[test]
    fn test_extent_open_interval() {
        let extent: Extent = serde_json::from_value(json!({
            "spatial": {"bbox": [[19.0, 59.0, 32.0, 70.0]]},
            "temporal": {"interval": [["2025-01-01T00:00:00Z", null]]}
        }))
        .unwrap();

        let temporal = extent.temporal.unwrap();
        assert_eq!(
            temporal.interval[0][0].as_deref(),
            Some("2025-01-01T00:00:00Z")
        );
        assert!(temporal.interval[0][1].is_none());
    }

    #[test]
    fn test_bare_collection_parses() {
        let collection: Collection = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(collection.parameter_keys().is_empty());
    }
}
