//! FHIR MeasureReport model
//!
//! Covers the CQFM test-case conventions: the test-case profile, the
//! `cqfm-isTestCase` modifier extension, contained input parameters and the
//! per-population counts the editor reads desired-population flags from.

use super::complex::{CodeableConcept, Extension, Meta, Period, Quantity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// CQFM test-case profile carried in `meta.profile`
pub const CQFM_TEST_CASE_PROFILE: &str =
    "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/test-case-cqfm";

/// Modifier extension marking a MeasureReport as a test-case description
pub const CQFM_IS_TEST_CASE_EXTENSION: &str =
    "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-isTestCase";

/// Extension referencing the contained input Parameters resource
pub const CQFM_INPUT_PARAMETERS_EXTENSION: &str =
    "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-inputParameters";

/// FHIR MeasureReport resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasureReport {
    /// Resource type - always "MeasureReport"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Resource metadata (profiles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Contained, inline resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Value>>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Extensions that cannot be ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// complete | pending | error
    pub status: String,

    /// individual | subject-list | summary | data-collection
    #[serde(rename = "type")]
    pub report_type: String,

    /// Canonical URL of the measure being reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,

    /// The period the report covers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Measure results for each group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<MeasureReportGroup>>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "MeasureReport".to_string()
}

/// Measure results for a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureReportGroup {
    /// The populations in the group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Vec<MeasureReportPopulation>>,

    /// What score this group achieved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_score: Option<Quantity>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// The populations in a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureReportPopulation {
    /// initial-population | numerator | denominator | ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Size of the population
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl MeasureReport {
    /// Whether an untyped resource is a test-case MeasureReport: a
    /// MeasureReport carrying the `cqfm-isTestCase` modifier extension with
    /// `valueBoolean: true`.
    pub fn value_is_test_case(resource: &Value) -> bool {
        if resource.get("resourceType").and_then(Value::as_str) != Some("MeasureReport") {
            return false;
        }
        resource
            .get("modifierExtension")
            .and_then(Value::as_array)
            .map(|extensions| {
                extensions.iter().any(|e| {
                    e.get("url").and_then(Value::as_str) == Some(CQFM_IS_TEST_CASE_EXTENSION)
                        && e.get("valueBoolean").and_then(Value::as_bool) == Some(true)
                })
            })
            .unwrap_or(false)
    }

    /// Population codes whose `count` is 1 in the first group
    pub fn flagged_population_codes(&self) -> Vec<String> {
        self.group
            .as_deref()
            .and_then(|g| g.first())
            .and_then(|g| g.population.as_deref())
            .unwrap_or(&[])
            .iter()
            .filter(|p| p.count == Some(1))
            .filter_map(|p| p.code.as_ref())
            .filter_map(|c| c.first_code())
            .map(str::to_string)
            .collect()
    }
}
