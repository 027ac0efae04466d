//! FHIR data models for eCQM test-case tooling
//!
//! This crate provides lenient, version-agnostic Rust structures for the
//! FHIR shapes the synthesis engine consumes: bundles, value sets, measures,
//! measure reports and data requirements.
//!
//! # Design Philosophy
//!
//! - **Lenient**: models only require the fields the engine reads; everything
//!   else round-trips through flattened `extensions` maps
//! - **Version-agnostic**: common fields present across FHIR R4, R4B, and R5
//! - **Compatible**: works with existing `serde_json::Value`-based code —
//!   resource payloads inside bundle entries stay untyped
//!
//! # Example
//!
//! ```rust
//! use proband_models::{Bundle, BundleType};
//! use serde_json::json;
//!
//! let bundle: Bundle = serde_json::from_value(json!({
//!     "resourceType": "Bundle",
//!     "type": "transaction",
//!     "entry": [
//!         { "resource": { "resourceType": "Patient", "id": "p1" } }
//!     ]
//! }))
//! .unwrap();
//! assert_eq!(bundle.bundle_type, BundleType::Transaction);
//! assert_eq!(bundle.entry_count(), 1);
//! ```

pub mod bundle;
pub mod complex;
pub mod data_requirement;
pub mod error;
pub mod measure;
pub mod measure_bundle;
pub mod measure_report;
pub mod value_set;

pub use bundle::{Bundle, BundleEntry, BundleEntryRequest, BundleType};
pub use complex::{CodeableConcept, Coding, Extension, Meta, Period, Quantity, Reference};
pub use data_requirement::{CodeFilter, DataRequirement, DateFilter};
pub use error::{Error, Result};
pub use measure::{Measure, MeasureGroup, MeasurePopulation};
pub use measure_bundle::MeasureBundle;
pub use measure_report::{
    MeasureReport, MeasureReportGroup, MeasureReportPopulation, CQFM_INPUT_PARAMETERS_EXTENSION,
    CQFM_IS_TEST_CASE_EXTENSION, CQFM_TEST_CASE_PROFILE,
};
pub use value_set::{
    ValueSet, ValueSetCompose, ValueSetConcept, ValueSetExpansion, ValueSetExpansionContains,
    ValueSetInclude,
};
