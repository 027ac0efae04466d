//! Calculation result envelopes

use proband_models::DataRequirement;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a data-requirements calculation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataRequirementsOutput {
    pub results: DataRequirementsResults,
}

/// The Library-shaped payload carrying the extracted requirements
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataRequirementsResults {
    #[serde(default)]
    pub data_requirement: Vec<DataRequirement>,
}

/// Result of a measure calculation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOutput {
    /// Per-patient MeasureReports (untyped pass-through)
    #[serde(default)]
    pub results: Vec<Value>,

    /// Population-level clause-coverage HTML, when requested
    #[serde(rename = "coverageHTML", skip_serializing_if = "Option::is_none")]
    pub coverage_html: Option<String>,

    /// Clause-uncoverage HTML per group, when requested
    #[serde(
        rename = "groupClauseUncoverageHTML",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_clause_uncoverage_html: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_data_requirements_output() {
        let output: DataRequirementsOutput = serde_json::from_value(json!({
            "results": {
                "resourceType": "Library",
                "dataRequirement": [
                    {
                        "type": "Condition",
                        "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/a" } ]
                    }
                ]
            }
        }))
        .unwrap();
        assert_eq!(output.results.data_requirement.len(), 1);
        assert_eq!(output.results.data_requirement[0].data_type, "Condition");
    }

    #[test]
    fn test_deserialize_calculation_output() {
        let output: CalculationOutput = serde_json::from_value(json!({
            "results": [ { "resourceType": "MeasureReport", "status": "complete", "type": "individual" } ],
            "coverageHTML": "<div>coverage</div>"
        }))
        .unwrap();
        assert_eq!(output.results.len(), 1);
        assert_eq!(output.coverage_html.as_deref(), Some("<div>coverage</div>"));
        assert!(output.group_clause_uncoverage_html.is_none());
    }
}
