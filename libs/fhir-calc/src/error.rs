//! Error types for calculation-engine interactions

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The engine does not implement the requested operation
    #[error("operation not supported by this engine: {0}")]
    Unsupported(String),

    /// The measure bundle is missing content the engine needs
    #[error("measure bundle is missing {0}")]
    MissingContent(String),

    #[error("engine returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("model error: {0}")]
    Model(#[from] proband_models::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
