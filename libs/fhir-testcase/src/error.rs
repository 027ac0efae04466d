//! Error types for test-case import and assembly
//!
//! Import errors carry the human-readable messages the editor surfaces
//! per-file during batch import.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bundle has no entries")]
    EmptyBundle,

    #[error("Bundle does not contain a patient resource")]
    MissingPatient,

    #[error("Patient resource in bundle has no id")]
    MissingPatientId,

    #[error("Found {0} test case MeasureReports; bundle must contain at most one")]
    AmbiguousTestCaseReport(usize),

    #[error("MeasureReport contains invalid population codes: {0}")]
    InvalidPopulationCodes(String),

    #[error("model error: {0}")]
    Model(#[from] proband_models::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
