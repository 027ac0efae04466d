//! Export assembly
//!
//! Builds the transaction bundle for a test case and the CQFM test-case
//! MeasureReport describing its desired populations.

use crate::error::Result;
use crate::model::TestCaseResource;
use proband_models::{
    Bundle, BundleType, Extension, MeasureBundle, MeasureReport, MeasureReportGroup,
    MeasureReportPopulation, Meta, Period, Quantity, CQFM_INPUT_PARAMETERS_EXTENSION,
    CQFM_IS_TEST_CASE_EXTENSION, CQFM_TEST_CASE_PROFILE,
};
use serde_json::{json, Value};

/// Assemble a patient's transaction bundle.
///
/// The patient entry comes first, followed by the patient's resources in
/// order, each as a `PUT <Type>/<id>` entry, and finally the test-case
/// MeasureReport when one is supplied. Resources without a `resourceType`
/// or `id` are skipped.
pub fn create_patient_bundle(
    patient: &Value,
    resources: &[TestCaseResource],
    report: Option<&MeasureReport>,
) -> Bundle {
    let mut bundle = Bundle::new(BundleType::Transaction);

    let patient_full_url = patient
        .get("id")
        .and_then(Value::as_str)
        .map(|id| format!("urn:uuid:{id}"));
    bundle.add_put_entry(patient_full_url, patient.clone());

    for tagged in resources {
        bundle.add_put_entry(Some(tagged.full_url.clone()), tagged.resource.clone());
    }

    if let Some(report) = report {
        let full_url = report.id.as_ref().map(|id| format!("urn:uuid:{id}"));
        if let Ok(value) = serde_json::to_value(report) {
            bundle.add_put_entry(full_url, value);
        }
    }

    bundle
}

/// Build the CQFM test-case MeasureReport for a patient.
///
/// The report mirrors the measure's first-group populations: each desired
/// population gets a count of 1, everything else 0. The measure score is 1
/// exactly when "numerator" is desired. The subject is carried in a
/// contained Parameters resource referenced by the `cqfm-inputParameters`
/// extension.
pub fn create_test_case_measure_report(
    measure_bundle: &MeasureBundle,
    period: &Period,
    subject_id: &str,
    desired_populations: &[String],
) -> Result<MeasureReport> {
    let measure = measure_bundle.require_measure()?;
    let id = uuid::Uuid::new_v4().to_string();
    let parameters_id = format!("{id}-parameters");

    let population: Vec<MeasureReportPopulation> = measure
        .first_group_populations()
        .iter()
        .map(|p| {
            let desired = p
                .code
                .as_ref()
                .and_then(|c| c.first_code())
                .map(|code| desired_populations.iter().any(|d| d == code))
                .unwrap_or(false);
            MeasureReportPopulation {
                code: p.code.clone(),
                count: Some(if desired { 1 } else { 0 }),
                ..Default::default()
            }
        })
        .collect();

    let numerator_desired = desired_populations.iter().any(|d| d == "numerator");
    let group = MeasureReportGroup {
        population: Some(population),
        measure_score: Some(Quantity {
            value: Some(if numerator_desired { 1.0 } else { 0.0 }),
            ..Default::default()
        }),
        ..Default::default()
    };

    Ok(MeasureReport {
        resource_type: "MeasureReport".to_string(),
        id: Some(id),
        meta: Some(Meta {
            profile: Some(vec![CQFM_TEST_CASE_PROFILE.to_string()]),
            ..Default::default()
        }),
        contained: Some(vec![json!({
            "resourceType": "Parameters",
            "id": parameters_id,
            "parameter": [
                { "name": "subject", "valueString": subject_id }
            ]
        })]),
        extension: Some(vec![Extension {
            url: CQFM_INPUT_PARAMETERS_EXTENSION.to_string(),
            value: json!({ "valueReference": { "reference": format!("#{parameters_id}") } }),
        }]),
        modifier_extension: Some(vec![Extension {
            url: CQFM_IS_TEST_CASE_EXTENSION.to_string(),
            value: json!({ "valueBoolean": true }),
        }]),
        status: "complete".to_string(),
        report_type: "individual".to_string(),
        measure: measure.url.clone(),
        period: Some(period.clone()),
        group: Some(vec![group]),
        extensions: Default::default(),
    })
}
