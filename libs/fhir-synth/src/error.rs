//! Error types for resource synthesis

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("value set not found in measure bundle: {0}")]
    UnknownValueSet(String),

    #[error("value set has no selectable codes: {0}")]
    EmptyValueSet(String),

    #[error("invalid date value: {0}")]
    InvalidDate(String),

    #[error("measurement period end precedes start")]
    InvalidMeasurementPeriod,

    #[error("model error: {0}")]
    Model(#[from] proband_models::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
