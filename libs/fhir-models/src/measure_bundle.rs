//! Measure bundle lookups
//!
//! A measure bundle is the packaged artifact a calculation engine consumes:
//! one Measure, its Libraries, and the ValueSets the measure logic binds.
//! `MeasureBundle` parses the pieces the test-case tooling needs once and
//! serves lookups over them.

use super::bundle::Bundle;
use super::error::{Error, Result};
use super::measure::Measure;
use super::value_set::ValueSet;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parsed view over a measure bundle
#[derive(Debug, Clone)]
pub struct MeasureBundle {
    /// The raw bundle, kept for pass-through to external engines
    pub bundle: Bundle,
    measure: Option<Measure>,
    value_sets: Vec<ValueSet>,
    libraries: Vec<Value>,
}

/// Canonical URLs may carry a `|version` suffix; comparisons ignore it.
fn canonical_base(url: &str) -> &str {
    url.split('|').next().unwrap_or(url)
}

impl MeasureBundle {
    /// Parse the measure, value sets and libraries out of a bundle
    pub fn from_bundle(bundle: Bundle) -> Result<Self> {
        let mut measure = None;
        let mut value_sets = Vec::new();
        let mut libraries = Vec::new();

        for entry in bundle.entries() {
            let Some(resource) = entry.resource.as_ref() else {
                continue;
            };
            match resource.get("resourceType").and_then(Value::as_str) {
                Some("Measure") if measure.is_none() => {
                    measure = Some(serde_json::from_value(resource.clone())?);
                }
                Some("ValueSet") => {
                    value_sets.push(serde_json::from_value(resource.clone())?);
                }
                Some("Library") => libraries.push(resource.clone()),
                _ => {}
            }
        }

        Ok(Self {
            bundle,
            measure,
            value_sets,
            libraries,
        })
    }

    /// Parse from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_bundle(Bundle::from_value(value)?)
    }

    /// The bundle's Measure resource
    pub fn measure(&self) -> Option<&Measure> {
        self.measure.as_ref()
    }

    /// The bundle's Measure, as an error when absent
    pub fn require_measure(&self) -> Result<&Measure> {
        self.measure
            .as_ref()
            .ok_or_else(|| Error::MissingField("Measure".to_string()))
    }

    /// Library resources embedded in the bundle (untyped)
    pub fn libraries(&self) -> &[Value] {
        &self.libraries
    }

    /// Find an embedded ValueSet by canonical URL (version suffix ignored)
    pub fn find_value_set(&self, url: &str) -> Option<&ValueSet> {
        let wanted = canonical_base(url);
        self.value_sets
            .iter()
            .find(|vs| vs.url.as_deref().map(canonical_base) == Some(wanted))
    }

    /// Map from value-set canonical URL to its display name.
    ///
    /// Display-only derived data; synthesis correctness never depends on it.
    pub fn value_sets_map(&self) -> BTreeMap<String, String> {
        self.value_sets
            .iter()
            .filter_map(|vs| {
                let url = vs.url.clone()?;
                let name = vs.display_name().unwrap_or(&url).to_string();
                Some((url, name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_bundle() -> MeasureBundle {
        MeasureBundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [
                {
                    "resource": {
                        "resourceType": "Measure",
                        "url": "http://example.org/Measure/EXM130"
                    }
                },
                {
                    "resource": {
                        "resourceType": "Library",
                        "id": "lib-1",
                        "url": "http://example.org/Library/EXM130"
                    }
                },
                {
                    "resource": {
                        "resourceType": "ValueSet",
                        "url": "http://example.org/vs/diabetes",
                        "title": "Diabetes Conditions",
                        "status": "active"
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_parses_measure_and_value_sets() {
        let bundle = sample_bundle();
        assert_eq!(
            bundle.measure().unwrap().url.as_deref(),
            Some("http://example.org/Measure/EXM130")
        );
        assert_eq!(bundle.libraries().len(), 1);
        assert!(bundle.find_value_set("http://example.org/vs/diabetes").is_some());
        assert!(bundle.find_value_set("http://example.org/vs/missing").is_none());
    }

    #[test]
    fn test_version_suffix_ignored_in_lookup() {
        let bundle = sample_bundle();
        assert!(bundle
            .find_value_set("http://example.org/vs/diabetes|20230301")
            .is_some());
    }

    #[test]
    fn test_value_sets_map() {
        let map = sample_bundle().value_sets_map();
        assert_eq!(
            map.get("http://example.org/vs/diabetes").map(String::as_str),
            Some("Diabetes Conditions")
        );
    }

    #[test]
    fn test_require_measure_on_empty_bundle() {
        let bundle = MeasureBundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "collection"
        }))
        .unwrap();
        assert!(bundle.require_measure().is_err());
    }
}
