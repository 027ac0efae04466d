//! FHIR resource-model metadata tables
//!
//! Static, process-lifetime lookup tables mapping each FHIR resource type to:
//!
//! - its coded attribute paths and their shapes ([`ResourceCodeInfo`]),
//!   including the type's principal coded value (`primary_code_path`)
//! - its date-bearing attribute paths and the date types each supports
//!   ([`DateAttribute`]), ordered by resolution priority (Period over
//!   dateTime over date)
//! - the candidate attribute paths usable to reference the subject patient
//!
//! The tables are a generated data asset derived from the FHIR R4 model
//! definitions and carry no logic. Uses compile-time perfect hash maps (phf)
//! for O(1) resource-type lookups with zero runtime allocation.

pub mod shapes;
pub mod tables;

pub use shapes::{CodeAttribute, CodeType, DateAttribute, DateType, ResourceCodeInfo};

/// Coded-attribute metadata for a resource type, if the type is known
pub fn code_info(resource_type: &str) -> Option<&'static ResourceCodeInfo> {
    tables::RESOURCE_CODE_INFO.get(resource_type)
}

/// Date-bearing attribute metadata for a resource type (empty when unknown)
pub fn date_attributes(resource_type: &str) -> &'static [(&'static str, DateAttribute)] {
    tables::RESOURCE_DATE_INFO
        .get(resource_type)
        .copied()
        .unwrap_or(&[])
}

/// Candidate patient-reference attribute paths for a resource type
pub fn patient_paths(resource_type: &str) -> Option<&'static [&'static str]> {
    tables::PATIENT_ATTRIBUTE_PATHS.get(resource_type).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_code_info() {
        let info = code_info("Condition").unwrap();
        assert_eq!(info.primary_code_path, "code");
        let attribute = info.attribute("code").unwrap();
        assert_eq!(attribute.code_type, CodeType::CodeableConcept);
        assert!(!attribute.multiple);
        assert!(!attribute.choice_type);
    }

    #[test]
    fn test_encounter_type_is_multiple() {
        let info = code_info("Encounter").unwrap();
        let attribute = info.attribute("type").unwrap();
        assert!(attribute.multiple);
    }

    #[test]
    fn test_medication_request_primary_is_choice() {
        let info = code_info("MedicationRequest").unwrap();
        assert_eq!(info.primary_code_path, "medication");
        let attribute = info.attribute("medication").unwrap();
        assert!(attribute.choice_type);
        assert_eq!(attribute.code_type, CodeType::CodeableConcept);
    }

    #[test]
    fn test_unknown_type_has_no_metadata() {
        assert!(code_info("NotAResource").is_none());
        assert!(date_attributes("NotAResource").is_empty());
        assert!(patient_paths("NotAResource").is_none());
    }

    #[test]
    fn test_condition_onset_prefers_period() {
        let attributes = date_attributes("Condition");
        let (_, onset) = attributes
            .iter()
            .find(|(name, _)| *name == "onset")
            .unwrap();
        assert!(onset.choice_type);
        assert_eq!(onset.best_type(), Some(DateType::Period));
    }

    #[test]
    fn test_medication_request_authored_on_is_date_time() {
        let attributes = date_attributes("MedicationRequest");
        let (_, authored) = attributes
            .iter()
            .find(|(name, _)| *name == "authoredOn")
            .unwrap();
        assert!(!authored.choice_type);
        assert_eq!(authored.best_type(), Some(DateType::DateTime));
    }

    #[test]
    fn test_schedule_references_patient_through_actor() {
        assert_eq!(patient_paths("Schedule"), Some(&["actor"][..]));
    }

    #[test]
    fn test_allergy_intolerance_references_patient_directly() {
        let paths = patient_paths("AllergyIntolerance").unwrap();
        assert!(paths.contains(&"patient"));
        assert!(!paths.contains(&"subject"));
    }
}
