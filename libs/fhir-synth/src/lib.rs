//! Data-requirement-driven FHIR resource synthesis
//!
//! Given a FHIR `DataRequirement`, a measure bundle and a measurement
//! period, this crate produces a syntactically valid draft resource instance
//! satisfying the requirement's code and date filters, referencing a subject
//! patient through the correct attribute path. Drafts are best-effort:
//! required FHIR fields not implied by the requirement (e.g. `status`) are
//! left for manual editing.
//!
//! Value and date selection is randomized so repeated synthesis yields varied
//! data; all randomness flows through the injectable [`RandomSource`] so
//! deterministic scenarios can be constructed.
//!
//! # Example
//!
//! ```rust
//! use proband_models::{DataRequirement, MeasureBundle};
//! use proband_synth::{synthesize_resource, MeasurementPeriod, SeededRandom};
//! use serde_json::json;
//!
//! let measure_bundle = MeasureBundle::from_value(&json!({
//!     "resourceType": "Bundle",
//!     "type": "transaction",
//!     "entry": []
//! }))
//! .unwrap();
//! let requirement = DataRequirement::new("Encounter");
//! let period = MeasurementPeriod::parse("2023-01-01", "2023-12-31").unwrap();
//! let mut rng = SeededRandom::new(42);
//!
//! let draft =
//!     synthesize_resource(&requirement, &measure_bundle, Some("p1"), &period, &mut rng).unwrap();
//! assert_eq!(draft["resourceType"], "Encounter");
//! assert_eq!(draft["subject"]["reference"], "Patient/p1");
//! ```

pub mod code;
pub mod date;
pub mod dates;
pub mod error;
pub mod patient;
pub mod reference;
pub mod rng;
pub mod synthesize;

pub use date::MeasurementPeriod;
pub use error::{Error, Result};
pub use patient::synthesize_patient;
pub use rng::{RandomSource, SeededRandom, ThreadRandom};
pub use synthesize::{synthesize_resource, synthesize_resource_string};
