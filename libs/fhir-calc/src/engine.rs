//! Calculation engine abstraction
//!
//! `CalculationEngine` is the seam between the test-case tooling and a
//! measure-calculation backend. The tooling only ever needs two operations:
//! extracting a measure's data requirements and calculating patient bundles
//! against the measure.
//!
//! `EmbeddedLibraryEngine` is the offline implementation: it serves data
//! requirements straight from the `dataRequirement` elements of the measure
//! bundle's Library resources and does not support calculation.

use crate::error::{Error, Result};
use crate::options::CalculationOptions;
use crate::output::{CalculationOutput, DataRequirementsOutput, DataRequirementsResults};
use async_trait::async_trait;
use proband_models::{DataRequirement, MeasureBundle};
use serde_json::Value;

/// A measure-calculation backend
#[async_trait]
pub trait CalculationEngine: Send + Sync {
    /// Extract the measure's data requirements
    async fn calculate_data_requirements(
        &self,
        measure_bundle: &MeasureBundle,
        options: &CalculationOptions,
    ) -> Result<DataRequirementsOutput>;

    /// Calculate patient bundles against the measure
    async fn calculate(
        &self,
        measure_bundle: &MeasureBundle,
        patient_bundles: &[Value],
        options: &CalculationOptions,
    ) -> Result<CalculationOutput>;
}

/// Serves data requirements from the bundle's own Library resources
#[derive(Debug, Default)]
pub struct EmbeddedLibraryEngine;

impl EmbeddedLibraryEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CalculationEngine for EmbeddedLibraryEngine {
    async fn calculate_data_requirements(
        &self,
        measure_bundle: &MeasureBundle,
        _options: &CalculationOptions,
    ) -> Result<DataRequirementsOutput> {
        let mut data_requirement: Vec<DataRequirement> = Vec::new();
        for library in measure_bundle.libraries() {
            let Some(elements) = library.get("dataRequirement").and_then(Value::as_array) else {
                continue;
            };
            for element in elements {
                data_requirement.push(serde_json::from_value(element.clone())?);
            }
        }
        if data_requirement.is_empty() {
            return Err(Error::MissingContent(
                "a Library with dataRequirement elements".to_string(),
            ));
        }
        tracing::debug!(
            count = data_requirement.len(),
            "served data requirements from embedded libraries"
        );
        Ok(DataRequirementsOutput {
            results: DataRequirementsResults { data_requirement },
        })
    }

    async fn calculate(
        &self,
        _measure_bundle: &MeasureBundle,
        _patient_bundles: &[Value],
        _options: &CalculationOptions,
    ) -> Result<CalculationOutput> {
        Err(Error::Unsupported("calculate".to_string()))
    }
}
