//! Date parsing, formatting and random drawing utilities

use crate::error::{Error, Result};
use crate::rng::RandomSource;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Parse a FHIR date or dateTime string into a UTC instant.
/// Bare dates are interpreted at UTC midnight.
pub fn parse_bound(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(value.to_string()))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Format an instant as a FHIR dateTime string
pub fn format_date_time(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format an instant as a FHIR calendar date (`year-month-day`, zero-padded)
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Uniform instant in `[start, end - 1 day]`.
///
/// The one-day subtraction keeps drawn instants (and periods extended from
/// them) off the exclusive upper boundary. Degenerate ranges collapse to
/// `start`.
pub fn random_instant_in(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut dyn RandomSource,
) -> DateTime<Utc> {
    let upper = end - Duration::days(1);
    if upper <= start {
        return start;
    }
    let span_ms = (upper - start).num_milliseconds();
    let offset_ms = (rng.next_f64() * span_ms as f64) as i64;
    start + Duration::milliseconds(offset_ms)
}

/// Random one-day period inside `[start, end]`: a random start instant
/// extended by the default duration of one day
pub fn random_period_in(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut dyn RandomSource,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let period_start = random_instant_in(start, end, rng);
    (period_start, period_start + Duration::days(1))
}
