//! Generated metadata tables.
//!
//! Derived from the FHIR R4 model definitions for the resource types that
//! appear in eCQM data requirements. Do not edit by hand; regenerate from
//! the model-info definition instead.

use crate::shapes::{CodeAttribute, CodeType, DateAttribute, DateType, ResourceCodeInfo};
use phf::phf_map;

const CC: CodeAttribute = CodeAttribute {
    code_type: CodeType::CodeableConcept,
    multiple: false,
    choice_type: false,
};
const CC_MANY: CodeAttribute = CodeAttribute {
    code_type: CodeType::CodeableConcept,
    multiple: true,
    choice_type: false,
};
const CC_CHOICE: CodeAttribute = CodeAttribute {
    code_type: CodeType::CodeableConcept,
    multiple: false,
    choice_type: true,
};
const CODING: CodeAttribute = CodeAttribute {
    code_type: CodeType::Coding,
    multiple: false,
    choice_type: false,
};
const CODE: CodeAttribute = CodeAttribute {
    code_type: CodeType::Code,
    multiple: false,
    choice_type: false,
};
const CODE_MANY: CodeAttribute = CodeAttribute {
    code_type: CodeType::Code,
    multiple: true,
    choice_type: false,
};

const PERIOD: DateAttribute = DateAttribute {
    choice_type: false,
    types: &[DateType::Period],
};
const DATE_TIME: DateAttribute = DateAttribute {
    choice_type: false,
    types: &[DateType::DateTime],
};
const DATE: DateAttribute = DateAttribute {
    choice_type: false,
    types: &[DateType::Date],
};
const PERIOD_OR_DATE_TIME: DateAttribute = DateAttribute {
    choice_type: true,
    types: &[DateType::Period, DateType::DateTime],
};
const DATE_TIME_CHOICE: DateAttribute = DateAttribute {
    choice_type: true,
    types: &[DateType::DateTime],
};

/// Coded attribute paths and shapes per resource type
pub static RESOURCE_CODE_INFO: phf::Map<&'static str, ResourceCodeInfo> = phf_map! {
    "AdverseEvent" => ResourceCodeInfo {
        primary_code_path: "event",
        attributes: &[
            ("actuality", CODE),
            ("category", CC_MANY),
            ("event", CC),
            ("severity", CC),
            ("outcome", CC),
        ],
    },
    "AllergyIntolerance" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("clinicalStatus", CC),
            ("verificationStatus", CC),
            ("type", CODE),
            ("category", CODE_MANY),
            ("criticality", CODE),
            ("code", CC),
        ],
    },
    "CarePlan" => ResourceCodeInfo {
        primary_code_path: "category",
        attributes: &[
            ("status", CODE),
            ("intent", CODE),
            ("category", CC_MANY),
        ],
    },
    "Communication" => ResourceCodeInfo {
        primary_code_path: "reasonCode",
        attributes: &[
            ("status", CODE),
            ("statusReason", CC),
            ("category", CC_MANY),
            ("priority", CODE),
            ("medium", CC_MANY),
            ("topic", CC),
            ("reasonCode", CC_MANY),
        ],
    },
    "Condition" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("clinicalStatus", CC),
            ("verificationStatus", CC),
            ("category", CC_MANY),
            ("severity", CC),
            ("code", CC),
            ("bodySite", CC_MANY),
        ],
    },
    "Coverage" => ResourceCodeInfo {
        primary_code_path: "type",
        attributes: &[
            ("status", CODE),
            ("type", CC),
            ("relationship", CC),
        ],
    },
    "Device" => ResourceCodeInfo {
        primary_code_path: "type",
        attributes: &[
            ("status", CODE),
            ("type", CC),
        ],
    },
    "DeviceRequest" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("intent", CODE),
            ("priority", CODE),
            ("code", CC_CHOICE),
        ],
    },
    "DiagnosticReport" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("category", CC_MANY),
            ("code", CC),
        ],
    },
    "Encounter" => ResourceCodeInfo {
        primary_code_path: "type",
        attributes: &[
            ("status", CODE),
            ("class", CODING),
            ("type", CC_MANY),
            ("serviceType", CC),
            ("priority", CC),
            ("reasonCode", CC_MANY),
        ],
    },
    "Flag" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("category", CC_MANY),
            ("code", CC),
        ],
    },
    "Immunization" => ResourceCodeInfo {
        primary_code_path: "vaccineCode",
        attributes: &[
            ("status", CODE),
            ("statusReason", CC),
            ("vaccineCode", CC),
            ("reportOrigin", CC),
            ("site", CC),
            ("route", CC),
        ],
    },
    "MedicationAdministration" => ResourceCodeInfo {
        primary_code_path: "medication",
        attributes: &[
            ("status", CODE),
            ("statusReason", CC_MANY),
            ("category", CC),
            ("medication", CC_CHOICE),
        ],
    },
    "MedicationDispense" => ResourceCodeInfo {
        primary_code_path: "medication",
        attributes: &[
            ("status", CODE),
            ("category", CC),
            ("medication", CC_CHOICE),
        ],
    },
    "MedicationRequest" => ResourceCodeInfo {
        primary_code_path: "medication",
        attributes: &[
            ("status", CODE),
            ("statusReason", CC),
            ("intent", CODE),
            ("category", CC_MANY),
            ("priority", CODE),
            ("medication", CC_CHOICE),
        ],
    },
    "MedicationStatement" => ResourceCodeInfo {
        primary_code_path: "medication",
        attributes: &[
            ("status", CODE),
            ("statusReason", CC_MANY),
            ("category", CC),
            ("medication", CC_CHOICE),
        ],
    },
    "Observation" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("category", CC_MANY),
            ("code", CC),
            ("value", CC_CHOICE),
            ("dataAbsentReason", CC),
            ("interpretation", CC_MANY),
            ("method", CC),
        ],
    },
    "Procedure" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("statusReason", CC),
            ("category", CC),
            ("code", CC),
            ("outcome", CC),
            ("bodySite", CC_MANY),
        ],
    },
    "Schedule" => ResourceCodeInfo {
        primary_code_path: "serviceType",
        attributes: &[
            ("serviceCategory", CC_MANY),
            ("serviceType", CC_MANY),
            ("specialty", CC_MANY),
        ],
    },
    "ServiceRequest" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("intent", CODE),
            ("category", CC_MANY),
            ("priority", CODE),
            ("code", CC),
        ],
    },
    "Task" => ResourceCodeInfo {
        primary_code_path: "code",
        attributes: &[
            ("status", CODE),
            ("intent", CODE),
            ("priority", CODE),
            ("code", CC),
        ],
    },
};

/// Date-bearing attribute paths and shapes per resource type
pub static RESOURCE_DATE_INFO: phf::Map<&'static str, &'static [(&'static str, DateAttribute)]> = phf_map! {
    "AdverseEvent" => &[
        ("date", DATE_TIME),
        ("detected", DATE_TIME),
        ("recordedDate", DATE_TIME),
    ],
    "AllergyIntolerance" => &[
        ("onset", PERIOD_OR_DATE_TIME),
        ("recordedDate", DATE_TIME),
        ("lastOccurrence", DATE_TIME),
    ],
    "CarePlan" => &[
        ("period", PERIOD),
        ("created", DATE_TIME),
    ],
    "Communication" => &[
        ("sent", DATE_TIME),
        ("received", DATE_TIME),
    ],
    "Condition" => &[
        ("onset", PERIOD_OR_DATE_TIME),
        ("abatement", PERIOD_OR_DATE_TIME),
        ("recordedDate", DATE_TIME),
    ],
    "Coverage" => &[
        ("period", PERIOD),
    ],
    "Device" => &[
        ("manufactureDate", DATE_TIME),
        ("expirationDate", DATE_TIME),
    ],
    "DeviceRequest" => &[
        ("occurrence", PERIOD_OR_DATE_TIME),
        ("authoredOn", DATE_TIME),
    ],
    "DiagnosticReport" => &[
        ("effective", PERIOD_OR_DATE_TIME),
    ],
    "Encounter" => &[
        ("period", PERIOD),
    ],
    "Flag" => &[
        ("period", PERIOD),
    ],
    "Immunization" => &[
        ("occurrence", DATE_TIME_CHOICE),
        ("recorded", DATE_TIME),
        ("expirationDate", DATE),
    ],
    "MedicationAdministration" => &[
        ("effective", PERIOD_OR_DATE_TIME),
    ],
    "MedicationDispense" => &[
        ("whenPrepared", DATE_TIME),
        ("whenHandedOver", DATE_TIME),
    ],
    "MedicationRequest" => &[
        ("authoredOn", DATE_TIME),
    ],
    "MedicationStatement" => &[
        ("effective", PERIOD_OR_DATE_TIME),
        ("dateAsserted", DATE_TIME),
    ],
    "Observation" => &[
        ("effective", PERIOD_OR_DATE_TIME),
    ],
    "Procedure" => &[
        ("performed", PERIOD_OR_DATE_TIME),
    ],
    "Schedule" => &[
        ("planningHorizon", PERIOD),
    ],
    "ServiceRequest" => &[
        ("occurrence", PERIOD_OR_DATE_TIME),
        ("authoredOn", DATE_TIME),
    ],
    "Task" => &[
        ("executionPeriod", PERIOD),
        ("authoredOn", DATE_TIME),
    ],
};

/// Candidate patient-reference attribute paths per resource type.
/// `subject` is preferred when present; otherwise the first single-segment
/// entry is used.
pub static PATIENT_ATTRIBUTE_PATHS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "AdverseEvent" => &["subject"],
    "AllergyIntolerance" => &["patient", "recorder", "asserter"],
    "CarePlan" => &["subject"],
    "Communication" => &["subject", "recipient", "sender"],
    "Condition" => &["subject", "asserter"],
    "Coverage" => &["beneficiary", "policyHolder", "subscriber"],
    "Device" => &["patient"],
    "DeviceRequest" => &["subject"],
    "DiagnosticReport" => &["subject"],
    "Encounter" => &["subject"],
    "Flag" => &["subject"],
    "Immunization" => &["patient"],
    "MedicationAdministration" => &["subject"],
    "MedicationDispense" => &["subject"],
    "MedicationRequest" => &["subject"],
    "MedicationStatement" => &["subject"],
    "Observation" => &["subject"],
    "Procedure" => &["subject"],
    "Schedule" => &["actor"],
    "ServiceRequest" => &["subject"],
    "Task" => &["for"],
};
