//! eCQM test-case management
//!
//! The pieces that operate on stored per-patient resource sets at the
//! import/export boundary of the test-case editor:
//!
//! - [`TestCase`]: the per-patient editing-session state entity
//! - [`lookup::requirements_by_type`]: the many-to-one reduction of a
//!   measure's data requirements into a per-resource-type relevance lookup
//! - [`minimize::minimize`]: filters a patient's resource set down to the
//!   resources relevant to the measure
//! - [`import::bundle_to_test_case`]: reconciles an externally supplied
//!   bundle into a test case, rejecting structurally invalid bundles with
//!   descriptive errors
//! - [`assemble`]: transaction-bundle and CQFM test-case MeasureReport
//!   constructors
//! - [`display`]: human-readable data-requirement filter summaries
//!
//! All functions treat their inputs as immutable and return new values;
//! the caller owns atomic replacement of the test-case collection.

pub mod assemble;
pub mod display;
pub mod error;
pub mod import;
pub mod lookup;
pub mod minimize;
pub mod model;

pub use assemble::{create_patient_bundle, create_test_case_measure_report};
pub use display::data_requirement_filters_string;
pub use error::{Error, Result};
pub use import::bundle_to_test_case;
pub use lookup::{requirements_by_type, RequirementsByType, TypeRequirements};
pub use minimize::minimize;
pub use model::{TestCase, TestCaseResource};
