//! Parameter metadata types for EDR collections.
//!
//! Parameters describe the data variables available within a collection:
//! units, observed properties, labels. On the client side this metadata is
//! informational - decoding never depends on it - so every field is optional.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parameter (observed property) as described by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    /// The type of parameter (normally "Parameter").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Unique identifier for the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Multi-language description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nString>,

    /// The observed property.
    #[serde(rename = "observedProperty", default, skip_serializing_if = "Option::is_none")]
    pub observed_property: Option<ObservedProperty>,

    /// Unit of measurement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Parameter {
    /// Best-effort display label: explicit label, then observed property
    /// label, then the id.
    pub fn display_label(&self) -> Option<&str> {
        if let Some(label) = self.label.as_deref() {
            return Some(label);
        }
        if let Some(prop) = &self.observed_property {
            if let Some(label) = &prop.label {
                return Some(label.text());
            }
        }
        self.id.as_deref()
    }

    /// The unit symbol, if the server provided one.
    pub fn unit_symbol(&self) -> Option<&str> {
        self.unit.as_ref().and_then(Unit::symbol_text)
    }
}

/// Internationalized string supporting multiple languages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum I18nString {
    /// Simple string (assumes English).
    Simple(String),
    /// Map of language codes to strings.
    Localized(HashMap<String, String>),
}

impl I18nString {
    /// Get the English text, or any available text.
    pub fn text(&self) -> &str {
        match self {
            I18nString::Simple(s) => s,
            I18nString::Localized(map) => map
                .get("en")
                .map(|s| s.as_str())
                .unwrap_or_else(|| map.values().next().map(|s| s.as_str()).unwrap_or("")),
        }
    }
}

/// The property a parameter observes (e.g., air temperature).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ObservedProperty {
    /// Identifier URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,
}

/// Unit of measurement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<I18nString>,

    /// Symbol, either a plain string or an annotated object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<UnitSymbol>,
}

impl Unit {
    /// The symbol text regardless of encoding.
    pub fn symbol_text(&self) -> Option<&str> {
        match self.symbol.as_ref()? {
            UnitSymbol::Plain(s) => Some(s),
            UnitSymbol::Annotated { value, .. } => Some(value),
        }
    }
}

/// Unit symbol encodings seen in the wild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UnitSymbol {
    /// Bare string symbol.
    Plain(String),
    /// Object with symbol value and defining scheme.
    Annotated {
        /// The symbol itself.
        value: String,
        /// Scheme URI defining the symbol.
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        type_: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_with_annotated_symbol() {
        let param: Parameter = serde_json::from_value(json!({
            "type": "Parameter",
            "observedProperty": {"label": {"en": "Air temperature"}},
            "unit": {
                "label": {"en": "degree Celsius"},
                "symbol": {"value": "Cel", "type": "http://www.opengis.net/def/uom/UCUM"}
            }
        }))
        .unwrap();

        assert_eq!(param.display_label(), Some("Air temperature"));
        assert_eq!(param.unit_symbol(), Some("Cel"));
    }

    #[test]
    fn test_parameter_with_plain_symbol() {
        let param: Parameter = serde_json::from_value(json!({
            "label": "Wind speed",
            "unit": {"symbol": "m/s"}
        }))
        .unwrap();

        assert_eq!(param.display_label(), Some("Wind speed"));
        assert_eq!(param.unit_symbol(), Some("m/s"));
    }

    #[test]
    fn test_empty_parameter_parses() {
        let param: Parameter = serde_json::from_value(json!({})).unwrap();
        assert!(param.display_label().is_none());
        assert!(param.unit_symbol().is_none());
    }

    #[test]
    fn test_i18n_text_fallback() {
        let localized: I18nString =
            serde_json::from_value(json!({"fi": "Lämpötila"})).unwrap();
        assert_eq!(localized.text(), "Lämpötila");

        let simple: I18nString = serde_json::from_value(json!("Temperature")).unwrap();
        assert_eq!(simple.text(), "Temperature");
    }
}
