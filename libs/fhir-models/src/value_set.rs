//! FHIR ValueSet model
//!
//! Lenient model for the parts of a ValueSet the synthesis engine reads:
//! the canonical url, display names, and the compose/expansion code lists.

use super::complex::Coding;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR ValueSet resource
///
/// A set of codes drawn from one or more code systems.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    /// Resource type - always "ValueSet"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Business version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Name (computer friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name (human friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Content logical definition (the "intension")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose: Option<ValueSetCompose>,

    /// Used when the value set is "expanded"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<ValueSetExpansion>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ValueSet".to_string()
}

/// Content logical definition of the value set (intension)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetCompose {
    /// Include one or more codes from a code system or other value set
    #[serde(default)]
    pub include: Vec<ValueSetInclude>,

    /// Explicitly exclude codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<ValueSetInclude>>,
}

/// Include codes from a code system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetInclude {
    /// The system the codes come from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Specific version of the code system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Specific codes from the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<Vec<ValueSetConcept>>,

    /// Select only contents included in specified value set(s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<Vec<String>>,
}

/// A concept defined in the system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueSetConcept {
    /// Code from the system
    pub code: String,

    /// Text to display for this code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// Expansion of the value set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetExpansion {
    /// Time valueset expansion was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Total number of codes in the expansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i32>,

    /// Codes in the value set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Vec<ValueSetExpansionContains>>,
}

/// Codes in an expansion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetExpansionContains {
    /// System value for the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Version in which this code/display is defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Code - if blank, this is not a selectable code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// User display for the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ValueSetExpansionContains {
    /// View the expansion entry as a Coding
    pub fn to_coding(&self) -> Coding {
        Coding {
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: None,
        }
    }
}

impl ValueSet {
    /// Human-readable name: title, falling back to name, falling back to url
    pub fn display_name(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .or(self.url.as_deref())
    }

    /// Codes listed in the expansion, if the value set carries one
    pub fn expansion_codings(&self) -> Vec<Coding> {
        self.expansion
            .as_ref()
            .and_then(|e| e.contains.as_ref())
            .map(|contains| contains.iter().map(|c| c.to_coding()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_expansion() {
        let value_set: ValueSet = serde_json::from_value(json!({
            "resourceType": "ValueSet",
            "url": "http://example.org/vs/diabetes",
            "name": "Diabetes",
            "status": "active",
            "expansion": {
                "timestamp": "2023-01-01T00:00:00Z",
                "contains": [
                    { "system": "http://snomed.info/sct", "code": "73211009", "display": "Diabetes mellitus" }
                ]
            }
        }))
        .unwrap();

        let codings = value_set.expansion_codings();
        assert_eq!(codings.len(), 1);
        assert_eq!(codings[0].code.as_deref(), Some("73211009"));
    }

    #[test]
    fn test_display_name_prefers_title() {
        let value_set: ValueSet = serde_json::from_value(json!({
            "resourceType": "ValueSet",
            "url": "http://example.org/vs/1",
            "name": "MachineName",
            "title": "Human Title"
        }))
        .unwrap();
        assert_eq!(value_set.display_name(), Some("Human Title"));
    }

    #[test]
    fn test_compose_only_value_set() {
        let value_set: ValueSet = serde_json::from_value(json!({
            "resourceType": "ValueSet",
            "url": "http://example.org/vs/2",
            "compose": {
                "include": [
                    {
                        "system": "http://snomed.info/sct",
                        "version": "2023-03",
                        "concept": [ { "code": "44054006", "display": "Diabetes mellitus type 2" } ]
                    }
                ]
            }
        }))
        .unwrap();

        assert!(value_set.expansion_codings().is_empty());
        let include = &value_set.compose.as_ref().unwrap().include;
        assert_eq!(include[0].concept.as_ref().unwrap()[0].code, "44054006");
    }
}
