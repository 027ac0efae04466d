//! Calculation engine abstraction for eCQM measure bundles
//!
//! Defines the [`CalculationEngine`] trait the test-case tooling talks to,
//! the option and result envelopes engines exchange, and the offline
//! [`EmbeddedLibraryEngine`] that serves data requirements from the measure
//! bundle's own Library resources.

pub mod engine;
pub mod error;
pub mod options;
pub mod output;

pub use engine::{CalculationEngine, EmbeddedLibraryEngine};
pub use error::{Error, Result};
pub use options::CalculationOptions;
pub use output::{CalculationOutput, DataRequirementsOutput, DataRequirementsResults};
