//! Test-case state entities
//!
//! A `TestCase` is the per-patient editing-session state: the patient, the
//! associated resources (each tagged with its `urn:uuid:` full URL), the
//! minimize-on-export flag and the desired-population flags. The owning
//! collection is keyed by `patient.id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resource belonging to a test case, tagged with its bundle full URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResource {
    pub resource: Value,
    pub full_url: String,
}

impl TestCaseResource {
    /// Tag a resource with a `urn:uuid:<id>` full URL derived from its id
    pub fn tagged(resource: Value, id: &str) -> Self {
        Self {
            full_url: format!("urn:uuid:{id}"),
            resource,
        }
    }
}

/// Per-patient test-case state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// The FHIR Patient resource; `id` is always set
    pub patient: Value,

    /// `urn:uuid:<patient.id>`
    pub full_url: String,

    /// Resources associated with the patient
    pub resources: Vec<TestCaseResource>,

    /// Whether export should minimize the resource set against the measure
    pub min_resources: bool,

    /// Population codes the author expects this patient to land in
    pub desired_populations: Vec<String>,
}

impl TestCase {
    /// Create a test case for a patient resource
    pub fn new(patient: Value) -> Self {
        let id = patient
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            full_url: format!("urn:uuid:{id}"),
            patient,
            resources: Vec::new(),
            min_resources: false,
            desired_populations: Vec::new(),
        }
    }

    /// The patient's logical id
    pub fn patient_id(&self) -> Option<&str> {
        self.patient.get("id").and_then(Value::as_str)
    }

    /// Add a resource, tagging it with a full URL from its id
    pub fn add_resource(&mut self, resource: Value) {
        let id = resource
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.resources.push(TestCaseResource::tagged(resource, &id));
    }
}
