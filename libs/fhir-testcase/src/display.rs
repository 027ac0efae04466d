//! Human-readable data-requirement summaries

use proband_models::DataRequirement;
use std::collections::BTreeMap;

/// Canonical URLs may carry a `|version` suffix; display lookups ignore it.
fn canonical_base(url: &str) -> &str {
    url.split('|').next().unwrap_or(url)
}

/// Summarize a data requirement's code filters for display.
///
/// Value-set filters render as the value set's display name from
/// `value_sets` (falling back to the canonical URL); direct codes render as
/// `"{code}: {display}"`, or the bare code when no display is present.
/// Filters are joined with `", "`.
pub fn data_requirement_filters_string(
    requirement: &DataRequirement,
    value_sets: &BTreeMap<String, String>,
) -> String {
    let mut parts = Vec::new();
    for filter in requirement.code_filters() {
        if let Some(url) = &filter.value_set {
            let base = canonical_base(url);
            let name = value_sets
                .get(url)
                .or_else(|| value_sets.get(base))
                .map(String::as_str)
                .unwrap_or(base);
            parts.push(name.to_string());
        }
        if let Some(codes) = &filter.code {
            for coding in codes {
                let Some(code) = &coding.code else {
                    continue;
                };
                match &coding.display {
                    Some(display) => parts.push(format!("{code}: {display}")),
                    None => parts.push(code.clone()),
                }
            }
        }
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn requirement(json: serde_json::Value) -> DataRequirement {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_direct_code_with_display() {
        let requirement = requirement(json!({
            "type": "Procedure",
            "codeFilter": [
                {
                    "path": "code",
                    "code": [ { "code": "37687000", "display": "test display" } ]
                }
            ]
        }));
        assert_eq!(
            data_requirement_filters_string(&requirement, &BTreeMap::new()),
            "37687000: test display"
        );
    }

    #[test]
    fn test_direct_code_without_display() {
        let requirement = requirement(json!({
            "type": "Procedure",
            "codeFilter": [ { "path": "code", "code": [ { "code": "37687000" } ] } ]
        }));
        assert_eq!(
            data_requirement_filters_string(&requirement, &BTreeMap::new()),
            "37687000"
        );
    }

    #[test]
    fn test_value_set_name_lookup() {
        let mut value_sets = BTreeMap::new();
        value_sets.insert(
            "http://example.org/vs/diabetes".to_string(),
            "Diabetes Conditions".to_string(),
        );
        let requirement = requirement(json!({
            "type": "Condition",
            "codeFilter": [
                { "path": "code", "valueSet": "http://example.org/vs/diabetes|20230301" }
            ]
        }));
        assert_eq!(
            data_requirement_filters_string(&requirement, &value_sets),
            "Diabetes Conditions"
        );
    }

    #[test]
    fn test_unknown_value_set_falls_back_to_url() {
        let requirement = requirement(json!({
            "type": "Condition",
            "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/unknown" } ]
        }));
        assert_eq!(
            data_requirement_filters_string(&requirement, &BTreeMap::new()),
            "http://example.org/vs/unknown"
        );
    }

    #[test]
    fn test_multiple_filters_joined() {
        let mut value_sets = BTreeMap::new();
        value_sets.insert(
            "http://example.org/vs/visits".to_string(),
            "Office Visit".to_string(),
        );
        let requirement = requirement(json!({
            "type": "Encounter",
            "codeFilter": [
                { "path": "type", "valueSet": "http://example.org/vs/visits" },
                { "path": "type", "code": [ { "code": "99213" } ] }
            ]
        }));
        assert_eq!(
            data_requirement_filters_string(&requirement, &value_sets),
            "Office Visit, 99213"
        );
    }

    #[test]
    fn test_no_filters_is_empty() {
        let requirement = requirement(json!({ "type": "Encounter" }));
        assert_eq!(
            data_requirement_filters_string(&requirement, &BTreeMap::new()),
            ""
        );
    }
}
