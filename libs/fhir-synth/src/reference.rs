//! Patient Reference Resolver
//!
//! Determines the attribute path a resource type uses to reference its
//! subject patient (`subject` preferred, otherwise the first single-segment
//! candidate) and writes the reference. Resource types with no
//! patient-referencing attribute receive no reference.

use proband_models::Reference;
use serde_json::{Map, Value};

/// Write a `Patient/<id>` reference into the draft at the type's
/// patient-reference path. At most one attribute is written.
pub fn apply_patient_reference(
    draft: &mut Map<String, Value>,
    resource_type: &str,
    patient_id: Option<&str>,
) {
    let Some(patient_id) = patient_id else {
        return;
    };
    let Some(paths) = proband_meta::patient_paths(resource_type) else {
        return;
    };

    let path = if paths.contains(&"subject") {
        "subject"
    } else {
        match paths.first() {
            // Nested candidate paths (e.g. `performer.actor`) are not synthesized.
            Some(path) if !path.contains('.') => path,
            _ => return,
        }
    };

    if let Ok(value) = serde_json::to_value(Reference::relative("Patient", patient_id)) {
        draft.insert(path.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subject_preferred() {
        let mut draft = Map::new();
        apply_patient_reference(&mut draft, "Condition", Some("p1"));
        assert_eq!(
            Value::Object(draft)["subject"],
            json!({ "reference": "Patient/p1" })
        );
    }

    #[test]
    fn test_type_specific_fallback() {
        let mut draft = Map::new();
        apply_patient_reference(&mut draft, "AllergyIntolerance", Some("p1"));
        let draft = Value::Object(draft);
        assert_eq!(draft["patient"]["reference"], json!("Patient/p1"));
        assert!(draft.get("subject").is_none());

        let mut draft = Map::new();
        apply_patient_reference(&mut draft, "Schedule", Some("p1"));
        assert_eq!(
            Value::Object(draft)["actor"]["reference"],
            json!("Patient/p1")
        );
    }

    #[test]
    fn test_no_patient_id_is_a_no_op() {
        let mut draft = Map::new();
        apply_patient_reference(&mut draft, "Condition", None);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_unknown_type_receives_no_reference() {
        let mut draft = Map::new();
        apply_patient_reference(&mut draft, "Location", Some("p1"));
        assert!(draft.is_empty());
    }
}
