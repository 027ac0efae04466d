//! Date Resolver
//!
//! Resolves `DataRequirement.dateFilter` entries to concrete date, dateTime
//! or Period values satisfying the filter, confined to the measurement
//! period. When a requirement carries no date filters every date-bearing
//! field of the resource type is populated with a default inside the
//! measurement period, so producible resources always have plausible date
//! coverage.

use crate::dates::{
    format_date, format_date_time, parse_bound, random_instant_in, random_period_in,
};
use crate::error::{Error, Result};
use crate::rng::RandomSource;
use chrono::{DateTime, Utc};
use proband_meta::{DateAttribute, DateType};
use proband_models::{DataRequirement, DateFilter};
use serde_json::{json, Map, Value};

/// The measurement period the measure is calculated over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MeasurementPeriod {
    /// Parse period bounds from FHIR date or dateTime strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_bound(start)?;
        let end = parse_bound(end)?;
        if end < start {
            return Err(Error::InvalidMeasurementPeriod);
        }
        Ok(Self { start, end })
    }
}

/// Apply the requirement's date filters to the draft, or default every
/// date-bearing field when no filters exist.
pub fn apply_date_filters(
    draft: &mut Map<String, Value>,
    requirement: &DataRequirement,
    period: &MeasurementPeriod,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    let attributes = proband_meta::date_attributes(&requirement.data_type);
    let filters = requirement.date_filters();

    if filters.is_empty() {
        for (name, attribute) in attributes {
            write_date(draft, name, attribute, None, period, rng)?;
        }
        return Ok(());
    }

    for filter in filters {
        let Some(path) = filter.path.as_deref() else {
            continue;
        };
        // Sub-paths like `period.start` resolve against the root field.
        let field = path.split('.').next().unwrap_or(path);
        let Some((name, attribute)) = attributes.iter().find(|(name, _)| *name == field) else {
            tracing::warn!(
                resource_type = %requirement.data_type,
                path,
                "no date-attribute mapping for date filter; skipping"
            );
            continue;
        };
        write_date(draft, name, attribute, Some(filter), period, rng)?;
    }
    Ok(())
}

/// Resolve one date-bearing field to its best representable type and write it
fn write_date(
    draft: &mut Map<String, Value>,
    name: &str,
    attribute: &DateAttribute,
    filter: Option<&DateFilter>,
    period: &MeasurementPeriod,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    let Some(target) = attribute.best_type() else {
        return Ok(());
    };

    let value = match target {
        DateType::Period => {
            if let Some(value_period) = filter.and_then(|f| f.value_period.as_ref()) {
                serde_json::to_value(value_period)?
            } else if let Some(date_time) = filter.and_then(|f| f.value_date_time.as_deref()) {
                // Degenerate period covering exactly the filtered instant.
                json!({ "start": date_time, "end": date_time })
            } else {
                let (start, end) = random_period_in(period.start, period.end, rng);
                json!({ "start": format_date_time(start), "end": format_date_time(end) })
            }
        }
        DateType::DateTime | DateType::Date => {
            let formatted = if let Some(date_time) = filter.and_then(|f| f.value_date_time.as_deref())
            {
                match target {
                    DateType::Date => format_date(parse_bound(date_time)?),
                    _ => date_time.to_string(),
                }
            } else {
                let (start, end) = match filter.and_then(|f| f.value_period.as_ref()) {
                    Some(value_period) => (
                        value_period
                            .start
                            .as_deref()
                            .map(parse_bound)
                            .transpose()?
                            .unwrap_or(period.start),
                        value_period
                            .end
                            .as_deref()
                            .map(parse_bound)
                            .transpose()?
                            .unwrap_or(period.end),
                    ),
                    None => (period.start, period.end),
                };
                let instant = random_instant_in(start, end, rng);
                match target {
                    DateType::Date => format_date(instant),
                    _ => format_date_time(instant),
                }
            };
            Value::String(formatted)
        }
    };

    let attribute_path = if attribute.choice_type {
        format!("{name}{}", target.choice_suffix())
    } else {
        name.to_string()
    };
    draft.insert(attribute_path, value);
    Ok(())
}
