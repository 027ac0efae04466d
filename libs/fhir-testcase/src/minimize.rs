//! Resource-Set Minimizer
//!
//! Filters a test case's resource set down to the resources relevant to the
//! measure: resources whose type has a keep-all entry are retained
//! unconditionally; otherwise the resource's primary code must match a
//! directly-listed code or belong to one of the type's value sets.
//! Output is always an order-preserving subset of the input.

use crate::lookup::{RequirementsByType, TypeRequirements};
use crate::model::{TestCase, TestCaseResource};
use proband_meta::CodeType;
use proband_models::{Coding, MeasureBundle};
use serde_json::Value;

/// Minimize a test case's resource set against the measure's requirements
pub fn minimize(
    test_case: &TestCase,
    measure_bundle: &MeasureBundle,
    lookup: &RequirementsByType,
) -> Vec<TestCaseResource> {
    test_case
        .resources
        .iter()
        .filter(|tagged| {
            let Some(resource_type) = tagged
                .resource
                .get("resourceType")
                .and_then(Value::as_str)
            else {
                return false;
            };
            let Some(entry) = lookup.get(resource_type) else {
                // Type not mentioned by any requirement: not relevant.
                return false;
            };
            if entry.keep_all {
                return true;
            }
            match primary_coding(&tagged.resource) {
                Some(coding) => matches_requirements(&coding, entry, measure_bundle),
                None => false,
            }
        })
        .cloned()
        .collect()
}

/// Extract a resource's primary code as a Coding.
///
/// Handles CodeableConcept and Coding primaries across choice-type and
/// multiple-cardinality shapes. Primaries that are bare `code` primitives
/// have no extraction branch and yield `None`, so such resources are always
/// dropped during minimization.
pub fn primary_coding(resource: &Value) -> Option<Coding> {
    let resource_type = resource.get("resourceType")?.as_str()?;
    let info = proband_meta::code_info(resource_type)?;
    let attribute = info.primary_attribute()?;

    let path = if attribute.choice_type {
        format!(
            "{}{}",
            info.primary_code_path,
            attribute.code_type.choice_suffix()
        )
    } else {
        info.primary_code_path.to_string()
    };

    let mut value = resource.get(&path)?;
    if attribute.multiple {
        value = value.as_array()?.first()?;
    }

    match attribute.code_type {
        CodeType::CodeableConcept => {
            let coding = value.get("coding")?.as_array()?.first()?;
            serde_json::from_value(coding.clone()).ok()
        }
        CodeType::Coding => serde_json::from_value(value.clone()).ok(),
        CodeType::Code => {
            tracing::debug!(
                resource_type,
                path = info.primary_code_path,
                "primary code attribute is a bare code primitive; not extracted"
            );
            None
        }
    }
}

/// Whether a coding matches any direct code or value-set member of the entry
fn matches_requirements(
    coding: &Coding,
    entry: &TypeRequirements,
    measure_bundle: &MeasureBundle,
) -> bool {
    if entry.direct_codes.iter().any(|c| c.same_concept(coding)) {
        return true;
    }
    entry.value_sets.iter().any(|url| {
        measure_bundle
            .find_value_set(url)
            .map(|value_set| {
                value_set
                    .expansion_codings()
                    .iter()
                    .any(|c| c.same_concept(coding))
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::requirements_by_type;
    use serde_json::json;

    fn measure_bundle() -> MeasureBundle {
        MeasureBundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [
                {
                    "resource": {
                        "resourceType": "ValueSet",
                        "url": "http://example.org/vs/procedures",
                        "status": "active",
                        "expansion": {
                            "contains": [
                                { "system": "http://snomed.info/sct", "code": "80146002" }
                            ]
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    fn lookup(json: serde_json::Value) -> RequirementsByType {
        let requirements: Vec<proband_models::DataRequirement> =
            serde_json::from_value(json).unwrap();
        requirements_by_type(&requirements)
    }

    fn test_case_with(resources: Vec<Value>) -> TestCase {
        let mut test_case = TestCase::new(json!({ "resourceType": "Patient", "id": "p1" }));
        for resource in resources {
            test_case.add_resource(resource);
        }
        test_case
    }

    fn procedure(id: &str, code: &str) -> Value {
        json!({
            "resourceType": "Procedure",
            "id": id,
            "code": { "coding": [ { "system": "http://snomed.info/sct", "code": code } ] }
        })
    }

    #[test]
    fn test_direct_code_mismatch_drops_resource() {
        let test_case = test_case_with(vec![procedure("pr1", "123")]);
        let lookup = lookup(json!([
            {
                "type": "Procedure",
                "codeFilter": [ { "path": "code", "code": [ { "code": "456" } ] } ]
            }
        ]));
        assert!(minimize(&test_case, &measure_bundle(), &lookup).is_empty());
    }

    #[test]
    fn test_value_set_membership_retains_resource() {
        let test_case = test_case_with(vec![
            procedure("pr1", "80146002"),
            procedure("pr2", "999"),
        ]);
        let lookup = lookup(json!([
            {
                "type": "Procedure",
                "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/procedures" } ]
            }
        ]));

        let kept = minimize(&test_case, &measure_bundle(), &lookup);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].resource["id"], json!("pr1"));
    }

    #[test]
    fn test_keep_all_retains_unconditionally() {
        let test_case = test_case_with(vec![json!({
            "resourceType": "Encounter",
            "id": "e1"
        })]);
        let lookup = lookup(json!([ { "type": "Encounter" } ]));
        assert_eq!(minimize(&test_case, &measure_bundle(), &lookup).len(), 1);
    }

    #[test]
    fn test_type_absent_from_lookup_is_dropped() {
        let test_case = test_case_with(vec![procedure("pr1", "80146002")]);
        let lookup = lookup(json!([ { "type": "Encounter" } ]));
        assert!(minimize(&test_case, &measure_bundle(), &lookup).is_empty());
    }

    #[test]
    fn test_minimize_is_idempotent() {
        let test_case = test_case_with(vec![
            procedure("pr1", "80146002"),
            procedure("pr2", "999"),
            json!({ "resourceType": "Encounter", "id": "e1" }),
        ]);
        let lookup = lookup(json!([
            {
                "type": "Procedure",
                "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/procedures" } ]
            },
            { "type": "Encounter" }
        ]));

        let once = minimize(&test_case, &measure_bundle(), &lookup);
        let mut minimized_case = test_case.clone();
        minimized_case.resources = once.clone();
        let twice = minimize(&minimized_case, &measure_bundle(), &lookup);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_choice_type_primary_extraction() {
        let test_case = test_case_with(vec![json!({
            "resourceType": "MedicationRequest",
            "id": "m1",
            "medicationCodeableConcept": {
                "coding": [ { "system": "http://www.nlm.nih.gov/research/umls/rxnorm", "code": "197361" } ]
            }
        })]);
        let lookup = lookup(json!([
            {
                "type": "MedicationRequest",
                "codeFilter": [
                    {
                        "path": "medication",
                        "code": [ { "system": "http://www.nlm.nih.gov/research/umls/rxnorm", "code": "197361" } ]
                    }
                ]
            }
        ]));
        assert_eq!(minimize(&test_case, &measure_bundle(), &lookup).len(), 1);
    }

    #[test]
    fn test_multiple_cardinality_primary_extraction() {
        let encounter = json!({
            "resourceType": "Encounter",
            "id": "e1",
            "type": [
                { "coding": [ { "system": "http://www.ama-assn.org/go/cpt", "code": "99213" } ] }
            ]
        });
        let coding = primary_coding(&encounter).unwrap();
        assert_eq!(coding.code.as_deref(), Some("99213"));
    }

    #[test]
    fn test_order_preserved() {
        let test_case = test_case_with(vec![
            procedure("pr1", "80146002"),
            json!({ "resourceType": "Encounter", "id": "e1" }),
            procedure("pr2", "80146002"),
        ]);
        let lookup = lookup(json!([
            {
                "type": "Procedure",
                "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/procedures" } ]
            },
            { "type": "Encounter" }
        ]));

        let kept = minimize(&test_case, &measure_bundle(), &lookup);
        let ids: Vec<_> = kept.iter().map(|r| r.resource["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["pr1", "e1", "pr2"]);
    }
}
