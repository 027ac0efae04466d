//! Code Resolver
//!
//! Resolves each `DataRequirement.codeFilter` to a concrete coding - drawn
//! from a bound value set's expansion or compose, or taken from a direct
//! reference code - and writes it into the resource draft at the mapped
//! attribute path with the correct shape (CodeableConcept vs Coding vs
//! primitive code, choice-type suffix, cardinality wrapping).

use crate::error::{Error, Result};
use crate::rng::RandomSource;
use proband_meta::{CodeAttribute, CodeType};
use proband_models::{Coding, DataRequirement, MeasureBundle, ValueSet};
use serde_json::{json, Map, Value};

/// Apply every code filter of `requirement` to the draft.
///
/// Filters referencing attribute paths with no metadata mapping are skipped
/// with a warning; each successfully resolved filter produces exactly one
/// attribute write.
pub fn apply_code_filters(
    draft: &mut Map<String, Value>,
    requirement: &DataRequirement,
    measure_bundle: &MeasureBundle,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    for filter in requirement.code_filters() {
        let coding = if let Some(url) = filter.value_set.as_deref() {
            let value_set = measure_bundle
                .find_value_set(url)
                .ok_or_else(|| Error::UnknownValueSet(url.to_string()))?;
            coding_from_value_set(url, value_set, rng)?
        } else if let Some(first) = filter.code.as_deref().and_then(|codes| codes.first()) {
            Coding {
                system: first.system.clone(),
                version: first.version.clone(),
                code: first.code.clone(),
                display: first.display.clone(),
                user_selected: None,
            }
        } else {
            continue;
        };

        let Some(path) = filter.path.as_deref() else {
            continue;
        };
        let attribute = proband_meta::code_info(&requirement.data_type)
            .and_then(|info| info.attribute(path));
        let Some(attribute) = attribute else {
            tracing::warn!(
                resource_type = %requirement.data_type,
                path,
                "no coded-attribute mapping for code filter; skipping"
            );
            continue;
        };
        write_coding(draft, path, attribute, coding);
    }
    Ok(())
}

/// Pick a concrete coding out of a value set: a uniformly random expansion
/// entry when an expansion is present, otherwise a random concept from a
/// random concept-bearing compose include.
fn coding_from_value_set(
    url: &str,
    value_set: &ValueSet,
    rng: &mut dyn RandomSource,
) -> Result<Coding> {
    if let Some(contains) = value_set
        .expansion
        .as_ref()
        .and_then(|expansion| expansion.contains.as_deref())
    {
        if !contains.is_empty() {
            return Ok(contains[rng.pick_index(contains.len())].to_coding());
        }
    }

    let includes: Vec<_> = value_set
        .compose
        .as_ref()
        .map(|compose| {
            compose
                .include
                .iter()
                .filter(|include| include.concept.as_deref().is_some_and(|c| !c.is_empty()))
                .collect()
        })
        .unwrap_or_default();
    if let Some(include) = (!includes.is_empty()).then(|| includes[rng.pick_index(includes.len())])
    {
        if let Some(concepts) = include.concept.as_deref() {
            let concept = &concepts[rng.pick_index(concepts.len())];
            return Ok(Coding {
                system: include.system.clone(),
                version: include.version.clone(),
                code: Some(concept.code.clone()),
                display: concept.display.clone(),
                user_selected: None,
            });
        }
    }

    Err(Error::EmptyValueSet(url.to_string()))
}

/// Write a resolved coding into the draft with the attribute's shape
fn write_coding(draft: &mut Map<String, Value>, path: &str, attribute: &CodeAttribute, coding: Coding) {
    let value = match attribute.code_type {
        CodeType::CodeableConcept => json!({ "coding": [coding] }),
        CodeType::Coding => match serde_json::to_value(&coding) {
            Ok(value) => value,
            Err(_) => return,
        },
        CodeType::Code => match coding.code {
            Some(code) => Value::String(code),
            None => return,
        },
    };

    let attribute_path = if attribute.choice_type {
        format!("{path}{}", attribute.code_type.choice_suffix())
    } else {
        path.to_string()
    };
    let value = if attribute.multiple {
        Value::Array(vec![value])
    } else {
        value
    };
    draft.insert(attribute_path, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use proband_models::DataRequirement;
    use serde_json::json;

    fn measure_bundle() -> MeasureBundle {
        MeasureBundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [
                {
                    "resource": {
                        "resourceType": "ValueSet",
                        "url": "http://example.org/vs/single",
                        "status": "active",
                        "expansion": {
                            "contains": [
                                {
                                    "system": "http://snomed.info/sct",
                                    "version": "2023-03",
                                    "code": "73211009",
                                    "display": "Diabetes mellitus"
                                }
                            ]
                        }
                    }
                },
                {
                    "resource": {
                        "resourceType": "ValueSet",
                        "url": "http://example.org/vs/compose-only",
                        "status": "active",
                        "compose": {
                            "include": [
                                {
                                    "system": "http://snomed.info/sct",
                                    "concept": [
                                        { "code": "44054006", "display": "Diabetes mellitus type 2" }
                                    ]
                                }
                            ]
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    fn requirement(json: Value) -> DataRequirement {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_single_coding_value_set_is_deterministic() {
        let requirement = requirement(json!({
            "type": "Condition",
            "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/single" } ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        assert_eq!(
            Value::Object(draft)["code"],
            json!({
                "coding": [
                    {
                        "system": "http://snomed.info/sct",
                        "version": "2023-03",
                        "code": "73211009",
                        "display": "Diabetes mellitus"
                    }
                ]
            })
        );
    }

    #[test]
    fn test_compose_fallback() {
        let requirement = requirement(json!({
            "type": "Condition",
            "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/compose-only" } ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        assert_eq!(
            Value::Object(draft)["code"]["coding"][0]["code"],
            json!("44054006")
        );
    }

    #[test]
    fn test_direct_code_takes_first_element() {
        let requirement = requirement(json!({
            "type": "Procedure",
            "codeFilter": [
                {
                    "path": "code",
                    "code": [
                        { "system": "http://snomed.info/sct", "code": "37687000", "display": "test display" },
                        { "system": "http://snomed.info/sct", "code": "999" }
                    ]
                }
            ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        let draft = Value::Object(draft);
        assert_eq!(draft["code"]["coding"][0]["code"], json!("37687000"));
        assert_eq!(draft["code"]["coding"][0]["display"], json!("test display"));
    }

    #[test]
    fn test_choice_type_suffix_and_sibling_absent() {
        let requirement = requirement(json!({
            "type": "MedicationRequest",
            "codeFilter": [
                {
                    "path": "medication",
                    "code": [ { "system": "http://www.nlm.nih.gov/research/umls/rxnorm", "code": "197361" } ]
                }
            ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        assert!(draft.contains_key("medicationCodeableConcept"));
        assert!(!draft.contains_key("medication"));
    }

    #[test]
    fn test_multiple_cardinality_wraps_in_array() {
        let requirement = requirement(json!({
            "type": "Encounter",
            "codeFilter": [
                {
                    "path": "type",
                    "code": [ { "system": "http://www.ama-assn.org/go/cpt", "code": "99213" } ]
                }
            ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        let draft = Value::Object(draft);
        assert!(draft["type"].is_array());
        assert_eq!(draft["type"][0]["coding"][0]["code"], json!("99213"));
    }

    #[test]
    fn test_primitive_code_writes_bare_string() {
        let requirement = requirement(json!({
            "type": "Encounter",
            "codeFilter": [
                { "path": "status", "code": [ { "code": "finished" } ] }
            ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        assert_eq!(Value::Object(draft)["status"], json!("finished"));
    }

    #[test]
    fn test_coding_attribute_writes_object_directly() {
        let requirement = requirement(json!({
            "type": "Encounter",
            "codeFilter": [
                {
                    "path": "class",
                    "code": [ { "system": "http://terminology.hl7.org/CodeSystem/v3-ActCode", "code": "AMB" } ]
                }
            ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();

        let draft = Value::Object(draft);
        assert_eq!(draft["class"]["code"], json!("AMB"));
        assert!(draft["class"].get("coding").is_none());
    }

    #[test]
    fn test_unmapped_path_is_skipped() {
        let requirement = requirement(json!({
            "type": "Condition",
            "codeFilter": [
                { "path": "notAnAttribute", "code": [ { "code": "1" } ] }
            ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_unknown_value_set_is_an_error() {
        let requirement = requirement(json!({
            "type": "Condition",
            "codeFilter": [ { "path": "code", "valueSet": "http://example.org/vs/missing" } ]
        }));
        let mut draft = Map::new();
        let mut rng = SeededRandom::new(0);
        let error =
            apply_code_filters(&mut draft, &requirement, &measure_bundle(), &mut rng).unwrap_err();
        assert!(matches!(error, Error::UnknownValueSet(url) if url.contains("missing")));
    }
}
