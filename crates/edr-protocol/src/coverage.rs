//! CoverageJSON types for EDR query responses, as seen from the client side.
//!
//! Upstream EDR services answer data queries with CoverageJSON: a domain
//! (time and/or space axes) plus one value array per named parameter.
//! Responses in the wild are loosely typed - parameter keys vary in casing
//! between endpoint versions (`Temperature` vs `temperature`), value arrays
//! contain nulls, and optional sections are simply absent. The types here
//! deserialize that shape without rejecting it; structural validation is
//! the decoder's job, not the deserializer's.
//!
//! See: <https://covjson.org/>

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::parameters::Parameter;

/// A CoverageJSON document returned by a position or area query.
///
/// Every section is optional so that a syntactically valid but structurally
/// incomplete body still parses; the decoder decides what is fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoverageResponse {
    /// Document type ("Coverage" for a single coverage).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// The domain defining the coverage's spatial/temporal extent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,

    /// Parameter metadata (unit, label). Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, Parameter>>,

    /// Data ranges, one value array per parameter key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, NdArray>>,
}

impl CoverageResponse {
    /// Look up a range by parameter name, tolerating casing drift.
    ///
    /// Resolution order: exact key, then the all-lowercase variant, then an
    /// ASCII-case-insensitive scan. Upstream responses are observed to flip
    /// between `Temperature` and `temperature` depending on endpoint version,
    /// so the exact-match-only lookup of a plain `HashMap` is not enough.
    pub fn range(&self, name: &str) -> Option<&NdArray> {
        let ranges = self.ranges.as_ref()?;
        if let Some(arr) = ranges.get(name) {
            return Some(arr);
        }
        if let Some(arr) = ranges.get(&name.to_ascii_lowercase()) {
            return Some(arr);
        }
        ranges
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, arr)| arr)
    }

    /// Look up parameter metadata with the same casing tolerance as [`Self::range`].
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        let parameters = self.parameters.as_ref()?;
        if let Some(p) = parameters.get(name) {
            return Some(p);
        }
        if let Some(p) = parameters.get(&name.to_ascii_lowercase()) {
            return Some(p);
        }
        parameters
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, p)| p)
    }

    /// Get a domain axis by name, if present and well-formed.
    pub fn axis(&self, name: &str) -> Option<&Axis> {
        match self.domain.as_ref()?.axes.get(name)? {
            axis @ Axis::Values { .. } => Some(axis),
            Axis::Other(_) => None,
        }
    }

    /// The time axis values as timestamp strings, in source order.
    ///
    /// Returns `None` when the `t` axis is absent or not a value list.
    /// Numeric entries are rendered with `to_string` so a degenerate axis
    /// still keeps its index alignment.
    pub fn time_values(&self) -> Option<Vec<String>> {
        let Axis::Values { values } = self.axis("t")? else {
            return None;
        };
        Some(
            values
                .iter()
                .map(|v| match v {
                    AxisValue::String(s) => s.clone(),
                    AxisValue::Float(f) => f.to_string(),
                })
                .collect(),
        )
    }

    /// Numeric values of a spatial axis (`x` or `y`), in source order.
    ///
    /// Non-numeric entries are skipped with a warning, since dropping them
    /// narrows the axis and shifts grid indexing for the decoder; a missing
    /// axis yields `None`.
    pub fn axis_numbers(&self, name: &str) -> Option<Vec<f64>> {
        let Axis::Values { values } = self.axis(name)? else {
            return None;
        };
        let numbers: Vec<f64> = values
            .iter()
            .filter_map(|v| match v {
                AxisValue::Float(f) => Some(*f),
                AxisValue::String(_) => None,
            })
            .collect();
        let skipped = values.len() - numbers.len();
        if skipped > 0 {
            warn!(axis = name, skipped, "skipping non-numeric axis entries");
        }
        Some(numbers)
    }
}

/// The domain of a coverage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Domain {
    /// Domain type discriminator ("Domain").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Domain shape (Point, PointSeries, Grid, ...). Informational.
    #[serde(rename = "domainType", default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,

    /// Axis definitions keyed by axis name (t, x, y, z).
    #[serde(default)]
    pub axes: HashMap<String, Axis>,
}

/// An axis in the domain.
///
/// The `Other` arm soaks up anything that is not an explicit value list
/// (regular start/stop/num axes, malformed objects) so that one odd axis
/// never fails deserialization of the whole body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Axis {
    /// Explicit list of values.
    Values {
        /// Axis values in source order.
        values: Vec<AxisValue>,
    },
    /// Any other axis encoding, kept verbatim.
    Other(Value),
}

impl Axis {
    /// Number of values on this axis (0 for non-list axes).
    pub fn len(&self) -> usize {
        match self {
            Axis::Values { values } => values.len(),
            Axis::Other(_) => 0,
        }
    }

    /// Check if the axis carries no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A value on an axis: timestamps are strings, coordinates are numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AxisValue {
    /// Floating-point value (coordinates, levels).
    Float(f64),
    /// String value (timestamps).
    String(String),
}

/// A parameter's value array.
///
/// Values are kept as raw JSON and normalized on access: upstream arrays mix
/// numbers, nulls and (rarely) junk, and a single bad element must degrade to
/// "no value" rather than reject the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NdArray {
    /// Type discriminator ("NdArray").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Declared data type of values.
    #[serde(rename = "dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Names of axes in flattening order.
    #[serde(rename = "axisNames", default, skip_serializing_if = "Option::is_none")]
    pub axis_names: Option<Vec<String>>,

    /// Declared shape of the array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,

    /// The raw data values; may contain nulls for missing data.
    #[serde(default)]
    pub values: Vec<Value>,
}

impl NdArray {
    /// Build an array from optional numeric values (used by the synthesizer
    /// and test fixtures).
    pub fn from_values(values: Vec<Option<f64>>) -> Self {
        let len = values.len();
        Self {
            type_: Some("NdArray".to_string()),
            data_type: Some("float".to_string()),
            axis_names: Some(vec!["t".to_string()]),
            shape: Some(vec![len]),
            values: values
                .into_iter()
                .map(|v| match v {
                    Some(f) => Value::from(f),
                    None => Value::Null,
                })
                .collect(),
        }
    }

    /// Number of raw values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the array is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The normalized value at `index`.
    ///
    /// Anything that is not a finite number - null, a string, an out-of-range
    /// index, NaN or infinity - comes back as `None`. This is the single
    /// normalization point for "number | null" semantics.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> CoverageResponse {
        serde_json::from_value(body).expect("body should deserialize")
    }

    #[test]
    fn test_point_series_deserializes() {
        let response = parse(json!({
            "type": "Coverage",
            "domain": {
                "type": "Domain",
                "domainType": "PointSeries",
                "axes": {
                    "x": {"values": [24.94]},
                    "y": {"values": [60.17]},
                    "t": {"values": ["2025-01-01T00:00:00Z", "2025-01-01T01:00:00Z"]}
                }
            },
            "ranges": {
                "temperature": {
                    "type": "NdArray",
                    "dataType": "float",
                    "axisNames": ["t"],
                    "shape": [2],
                    "values": [5.2, null]
                }
            }
        }));

        let times = response.time_values().unwrap();
        assert_eq!(times, vec!["2025-01-01T00:00:00Z", "2025-01-01T01:00:00Z"]);

        let range = response.range("temperature").unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range.value_at(0), Some(5.2));
        assert_eq!(range.value_at(1), None);
    }

    #[test]
    fn test_range_lookup_is_case_insensitive() {
        let response = parse(json!({
            "ranges": {
                "temperature": {"values": [1.0]},
                "WindSpeedMS": {"values": [2.0]}
            }
        }));

        assert_eq!(response.range("Temperature").unwrap().value_at(0), Some(1.0));
        assert_eq!(response.range("temperature").unwrap().value_at(0), Some(1.0));
        assert_eq!(response.range("windspeedms").unwrap().value_at(0), Some(2.0));
        assert_eq!(response.range("WINDSPEEDMS").unwrap().value_at(0), Some(2.0));
        assert!(response.range("Humidity").is_none());
    }

    #[test]
    fn test_missing_sections_parse_to_none() {
        let response = parse(json!({"type": "Coverage"}));
        assert!(response.domain.is_none());
        assert!(response.ranges.is_none());
        assert!(response.time_values().is_none());
        assert!(response.range("temperature").is_none());
    }

    #[test]
    fn test_malformed_time_axis_is_tolerated() {
        // t.values as a string instead of an array must not reject the body.
        let response = parse(json!({
            "domain": {"axes": {"t": {"values": "not-an-array"}}}
        }));
        assert!(response.time_values().is_none());
    }

    #[test]
    fn test_value_normalization_rejects_non_numbers() {
        let arr = NdArray {
            values: vec![json!(1.5), json!(null), json!("oops"), json!(true)],
            ..NdArray::default()
        };
        assert_eq!(arr.value_at(0), Some(1.5));
        assert_eq!(arr.value_at(1), None);
        assert_eq!(arr.value_at(2), None);
        assert_eq!(arr.value_at(3), None);
        assert_eq!(arr.value_at(99), None);
    }

    #[test]
    fn test_axis_numbers() {
        let response = parse(json!({
            "domain": {"axes": {
                "x": {"values": [24.0, 25.0, 26.0]},
                "y": {"values": [59.5, 60.0]}
            }}
        }));
        assert_eq!(response.axis_numbers("x").unwrap(), vec![24.0, 25.0, 26.0]);
        assert_eq!(response.axis_numbers("y").unwrap(), vec![59.5, 60.0]);
        assert!(response.axis_numbers("z").is_none());
    }

    #[test]
    fn test_axis_numbers_skips_non_numeric_entries() {
        // A stray string on a spatial axis narrows the result; callers that
        // compare against the declared axis length can see the shrinkage.
        let response = parse(json!({
            "domain": {"axes": {
                "x": {"values": [24.0, "junk", 26.0]}
            }}
        }));
        assert_eq!(response.axis_numbers("x").unwrap(), vec![24.0, 26.0]);
        assert_eq!(response.axis("x").unwrap().len(), 3);
    }

    #[test]
    fn test_from_values_roundtrip() {
        let arr = NdArray::from_values(vec![Some(3.0), None, Some(-1.5)]);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.value_at(0), Some(3.0));
        assert_eq!(arr.value_at(1), None);
        assert_eq!(arr.value_at(2), Some(-1.5));

        let json = serde_json::to_value(&arr).unwrap();
        let back: NdArray = serde_json::from_value(json).unwrap();
        assert_eq!(back.value_at(2), Some(-1.5));
    }
}
