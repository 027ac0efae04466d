//! FHIR DataRequirement model
//!
//! Describes a required data item for a measure: the resource type plus
//! optional code and date filters. Consumed read-only by the synthesizer
//! and the resource-set minimizer.

use super::complex::{Coding, Period};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A required data item for measure evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataRequirement {
    /// The type of the required data (a FHIR resource type)
    #[serde(rename = "type")]
    pub data_type: String,

    /// The profile of the required data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,

    /// What codes are expected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_filter: Option<Vec<CodeFilter>>,

    /// What dates/date ranges are expected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<Vec<DateFilter>>,

    /// Additional content
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// What codes are expected on an attribute path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CodeFilter {
    /// A coded attribute path on the resource type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Canonical URL of a bound value set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<String>,

    /// Directly referenced codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<Coding>>,
}

/// What dates/date ranges are expected on an attribute path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    /// A date-bearing attribute path on the resource type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// The period the value must fall within
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_period: Option<Period>,

    /// An exact dateTime the value must equal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_date_time: Option<String>,
}

impl DataRequirement {
    /// Create a requirement for a resource type with no filters
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            profile: None,
            code_filter: None,
            date_filter: None,
            extensions: HashMap::new(),
        }
    }

    /// Code filters as a slice (empty when absent)
    pub fn code_filters(&self) -> &[CodeFilter] {
        self.code_filter.as_deref().unwrap_or(&[])
    }

    /// Date filters as a slice (empty when absent)
    pub fn date_filters(&self) -> &[DateFilter] {
        self.date_filter.as_deref().unwrap_or(&[])
    }
}
