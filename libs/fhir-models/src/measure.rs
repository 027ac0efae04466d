//! FHIR Measure model
//!
//! Lenient model for the parts of a Measure the test-case tooling reads:
//! the canonical url and the group population definitions.

use super::complex::CodeableConcept;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Measure resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Resource type - always "Measure"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Name (computer friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Population criteria group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<MeasureGroup>>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Measure".to_string()
}

/// Population criteria group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureGroup {
    /// Population criteria
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Vec<MeasurePopulation>>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Population criteria definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasurePopulation {
    /// initial-population | numerator | denominator | ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// The criteria that defines this population
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Value>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl Measure {
    /// Populations of the first group (the group the tooling operates over)
    pub fn first_group_populations(&self) -> &[MeasurePopulation] {
        self.group
            .as_deref()
            .and_then(|g| g.first())
            .and_then(|g| g.population.as_deref())
            .unwrap_or(&[])
    }

    /// Population codes of the first group, e.g. `["initial-population", "numerator"]`
    pub fn population_codes(&self) -> Vec<String> {
        self.first_group_populations()
            .iter()
            .filter_map(|p| p.code.as_ref())
            .filter_map(|c| c.first_code())
            .map(str::to_string)
            .collect()
    }
}
