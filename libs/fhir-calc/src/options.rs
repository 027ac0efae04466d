//! Calculation request options
//!
//! Mirrors the option object external measure-calculation engines accept.
//! Serializes with the engines' expected field casing.

use serde::{Deserialize, Serialize};

/// Options passed to a calculation engine
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOptions {
    /// Produce highlighted clause-coverage HTML for each patient
    #[serde(rename = "calculateHTML", skip_serializing_if = "Option::is_none")]
    pub calculate_html: Option<bool>,

    /// Calculate supplemental data elements
    #[serde(rename = "calculateSDEs", skip_serializing_if = "Option::is_none")]
    pub calculate_sdes: Option<bool>,

    /// Produce population-level clause-coverage HTML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculate_clause_coverage: Option<bool>,

    /// Produce HTML highlighting clauses no patient covered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculate_clause_uncoverage: Option<bool>,

    /// individual | subject-list | summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,

    /// Measurement period start, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_period_start: Option<String>,

    /// Measurement period end, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_period_end: Option<String>,

    /// Trust `meta.profile` when resolving resource profiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_meta_profile: Option<bool>,
}
