//! Bundle import and reconciliation
//!
//! Converts an externally supplied patient bundle into a test case. Each
//! structural problem is rejected with a descriptive error so batch import
//! can report a per-file outcome.

use crate::error::{Error, Result};
use crate::model::{TestCase, TestCaseResource};
use proband_models::{Bundle, MeasureReport};
use serde_json::Value;

/// Reconcile an external bundle into a test case.
///
/// The bundle must contain exactly one Patient (the first one found is
/// taken) with a logical id, and at most one test-case MeasureReport. The
/// report's flagged population codes, when present, must all appear in
/// `valid_population_codes`; they become the test case's desired
/// populations. Every other entry resource is carried over unchanged.
pub fn bundle_to_test_case(bundle: &Bundle, valid_population_codes: &[String]) -> Result<TestCase> {
    if bundle.entry_count() == 0 {
        return Err(Error::EmptyBundle);
    }

    let patient = bundle
        .resources_of_type("Patient")
        .next()
        .ok_or(Error::MissingPatient)?;
    if patient.get("id").and_then(Value::as_str).is_none() {
        return Err(Error::MissingPatientId);
    }

    let reports: Vec<&Value> = bundle
        .entries()
        .iter()
        .filter_map(|e| e.resource.as_ref())
        .filter(|r| MeasureReport::value_is_test_case(r))
        .collect();
    if reports.len() > 1 {
        return Err(Error::AmbiguousTestCaseReport(reports.len()));
    }

    let mut desired_populations = Vec::new();
    if let Some(report_value) = reports.first() {
        let report: MeasureReport = serde_json::from_value((*report_value).clone())?;
        let flagged = report.flagged_population_codes();
        let invalid: Vec<&str> = flagged
            .iter()
            .filter(|code| !valid_population_codes.contains(code))
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            return Err(Error::InvalidPopulationCodes(invalid.join(", ")));
        }
        desired_populations = flagged;
    }

    let mut test_case = TestCase::new(patient.clone());
    test_case.desired_populations = desired_populations;
    for entry in bundle.entries() {
        let Some(resource) = &entry.resource else {
            continue;
        };
        let resource_type = entry.resource_type();
        if resource_type == Some("Patient") || MeasureReport::value_is_test_case(resource) {
            continue;
        }
        let full_url = match entry.resource_id() {
            Some(id) => format!("urn:uuid:{id}"),
            // Carried resources keep a stable bundle-local address even
            // when the source entry had no id.
            None => format!("urn:uuid:{}", uuid::Uuid::new_v4()),
        };
        test_case.resources.push(TestCaseResource {
            resource: resource.clone(),
            full_url,
        });
    }

    Ok(test_case)
}
