//! Resource Synthesizer
//!
//! Composes the code, patient-reference and date resolvers over a fresh
//! `{resourceType, id}` draft. The three resolvers write disjoint attribute
//! sets; all must run before the draft is complete. Unrecognized resource
//! types degrade gracefully to the bare draft rather than failing.

use crate::code::apply_code_filters;
use crate::date::{apply_date_filters, MeasurementPeriod};
use crate::error::Result;
use crate::reference::apply_patient_reference;
use crate::rng::RandomSource;
use proband_models::{DataRequirement, MeasureBundle};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Synthesize a draft resource instance satisfying the data requirement.
///
/// The draft is best-effort: required FHIR fields not implied by the
/// requirement (e.g. `status`) are left unset for manual editing.
pub fn synthesize_resource(
    requirement: &DataRequirement,
    measure_bundle: &MeasureBundle,
    patient_id: Option<&str>,
    period: &MeasurementPeriod,
    rng: &mut dyn RandomSource,
) -> Result<Value> {
    let mut draft = Map::new();
    draft.insert(
        "resourceType".to_string(),
        Value::String(requirement.data_type.clone()),
    );
    draft.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));

    apply_code_filters(&mut draft, requirement, measure_bundle, rng)?;
    apply_patient_reference(&mut draft, &requirement.data_type, patient_id);
    apply_date_filters(&mut draft, requirement, period, rng)?;

    Ok(Value::Object(draft))
}

/// Synthesize a draft resource and serialize it as pretty-printed JSON text
pub fn synthesize_resource_string(
    requirement: &DataRequirement,
    measure_bundle: &MeasureBundle,
    patient_id: Option<&str>,
    period: &MeasurementPeriod,
    rng: &mut dyn RandomSource,
) -> Result<String> {
    let draft = synthesize_resource(requirement, measure_bundle, patient_id, period, rng)?;
    Ok(serde_json::to_string_pretty(&draft)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use serde_json::json;

    fn empty_measure_bundle() -> MeasureBundle {
        MeasureBundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": []
        }))
        .unwrap()
    }

    fn period() -> MeasurementPeriod {
        MeasurementPeriod::parse("2023-01-01", "2023-12-31").unwrap()
    }

    #[test]
    fn test_draft_has_type_id_reference_and_dates() {
        let requirement: DataRequirement = serde_json::from_value(json!({
            "type": "Procedure",
            "codeFilter": [
                {
                    "path": "code",
                    "code": [ { "system": "http://snomed.info/sct", "code": "80146002" } ]
                }
            ]
        }))
        .unwrap();
        let mut rng = SeededRandom::new(21);
        let draft = synthesize_resource(
            &requirement,
            &empty_measure_bundle(),
            Some("p1"),
            &period(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(draft["resourceType"], "Procedure");
        assert!(!draft["id"].as_str().unwrap().is_empty());
        assert_eq!(draft["code"]["coding"][0]["code"], json!("80146002"));
        assert_eq!(draft["subject"]["reference"], json!("Patient/p1"));
        assert!(draft["performedPeriod"].is_object());
        // Best-effort draft: status is left for manual editing.
        assert!(draft.get("status").is_none());
    }

    #[test]
    fn test_unknown_resource_type_degrades_to_bare_draft() {
        let requirement = DataRequirement::new("NotAResource");
        let mut rng = SeededRandom::new(0);
        let draft = synthesize_resource(
            &requirement,
            &empty_measure_bundle(),
            Some("p1"),
            &period(),
            &mut rng,
        )
        .unwrap();

        let object = draft.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(draft["resourceType"], "NotAResource");
        assert!(object.contains_key("id"));
    }

    #[test]
    fn test_each_draft_gets_a_fresh_id() {
        let requirement = DataRequirement::new("Encounter");
        let mut rng = SeededRandom::new(0);
        let first = synthesize_resource(
            &requirement,
            &empty_measure_bundle(),
            None,
            &period(),
            &mut rng,
        )
        .unwrap();
        let second = synthesize_resource(
            &requirement,
            &empty_measure_bundle(),
            None,
            &period(),
            &mut rng,
        )
        .unwrap();
        assert_ne!(first["id"], second["id"]);
    }

    #[test]
    fn test_serialized_draft_is_valid_json() {
        let requirement = DataRequirement::new("Encounter");
        let mut rng = SeededRandom::new(0);
        let text = synthesize_resource_string(
            &requirement,
            &empty_measure_bundle(),
            Some("p1"),
            &period(),
            &mut rng,
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["resourceType"], "Encounter");
    }
}
