//! Data-requirements-by-type lookup
//!
//! Reduces a measure's full data-requirement set to one entry per resource
//! type. This is a deliberate many-to-one reduction: which requirement
//! produced a given value set or code is discarded - membership is a simple
//! OR across all of a type's requirements.

use proband_models::{Coding, DataRequirement};
use std::collections::BTreeMap;

/// Aggregated code constraints for one resource type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeRequirements {
    /// At least one requirement of this type had no code filter: every
    /// instance of the type is relevant
    pub keep_all: bool,

    /// Value-set canonical URLs accumulated across all code filters
    pub value_sets: Vec<String>,

    /// Directly-listed codes accumulated across all code filters
    pub direct_codes: Vec<Coding>,
}

/// One entry per resource type appearing in the requirement set
pub type RequirementsByType = BTreeMap<String, TypeRequirements>;

/// Build the per-type lookup from a measure's data requirements
pub fn requirements_by_type(requirements: &[DataRequirement]) -> RequirementsByType {
    let mut lookup = RequirementsByType::new();
    for requirement in requirements {
        let entry = lookup.entry(requirement.data_type.clone()).or_default();
        let filters = requirement.code_filters();
        if filters.is_empty() {
            entry.keep_all = true;
            continue;
        }
        for filter in filters {
            if let Some(url) = &filter.value_set {
                if !entry.value_sets.contains(url) {
                    entry.value_sets.push(url.clone());
                }
            }
            if let Some(codes) = &filter.code {
                for code in codes {
                    if !entry.direct_codes.iter().any(|c| c.same_concept(code)) {
                        entry.direct_codes.push(code.clone());
                    }
                }
            }
        }
    }
    lookup
}
