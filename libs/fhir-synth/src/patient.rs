//! Synthetic Patient generation
//!
//! Creates the minimal Patient draft a new test case starts from: a fresh
//! id, a name drawn from small static pools, a gender, and a birth date
//! that makes the patient an adult at the start of the measurement period.

use crate::date::MeasurementPeriod;
use crate::dates::format_date;
use crate::rng::RandomSource;
use chrono::Duration;
use serde_json::{json, Value};
use uuid::Uuid;

static FAMILY_NAMES: &[&str] = &[
    "Abernathy",
    "Baumbach",
    "Cruickshank",
    "Dickens",
    "Franecki",
    "Gleason",
    "Hettinger",
    "Kertzmann",
    "Langworth",
    "Mueller",
    "Schamberger",
    "Veum",
];

static GIVEN_NAMES_FEMALE: &[&str] = &[
    "Amara", "Brigitte", "Celine", "Dorothea", "Elena", "Franka", "Greta", "Ingrid", "Johanna",
    "Katrin", "Liesel", "Margarete",
];

static GIVEN_NAMES_MALE: &[&str] = &[
    "Anton", "Bernhard", "Claas", "Dietrich", "Emil", "Friedrich", "Gunther", "Henrik", "Jonas",
    "Konrad", "Lorenz", "Matthias",
];

const MIN_AGE_YEARS: i64 = 18;
const MAX_AGE_YEARS: i64 = 85;

/// Generate a minimal synthetic Patient resource
pub fn synthesize_patient(period: &MeasurementPeriod, rng: &mut dyn RandomSource) -> Value {
    let female = rng.next_f64() < 0.5;
    let given_pool = if female {
        GIVEN_NAMES_FEMALE
    } else {
        GIVEN_NAMES_MALE
    };
    let given = given_pool[rng.pick_index(given_pool.len())];
    let family = FAMILY_NAMES[rng.pick_index(FAMILY_NAMES.len())];

    let age_span_days = (MAX_AGE_YEARS - MIN_AGE_YEARS) * 365;
    let age_days = MIN_AGE_YEARS * 365 + (rng.next_f64() * age_span_days as f64) as i64;
    let birth_date = period.start - Duration::days(age_days);

    json!({
        "resourceType": "Patient",
        "id": Uuid::new_v4().to_string(),
        "name": [
            { "family": family, "given": [given] }
        ],
        "gender": if female { "female" } else { "male" },
        "birthDate": format_date(birth_date)
    })
}
