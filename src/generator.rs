use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};
use metrics::counter;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::alphabet::{ALLOWED_CHARS, FIRST_CHARS};
use crate::checksum::checksum;
use crate::clock::{Clock, SystemClock};
use crate::error::GenerateError;
use crate::field::{DateField, IdField, ID_PAYLOAD_LENGTH};
use crate::verifier::DAYS_PER_YEAR;

pub const DEFAULT_MIN_AGE: u32 = 18;
pub const DEFAULT_MAX_AGE: u32 = 99;

/// Two-digit years cannot tell a 100 year old from a newborn.
pub const AGE_LIMIT: u32 = 99;

const EXPIRY_DAYS: RangeInclusive<i64> = 100..=365 * 5;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_age: u32,
    /// `0` means exactly `min_age`.
    pub max_age: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_age(&self, min_age: u32) -> Self {
        self.mutate_clone(|x| x.min_age = min_age)
    }

    pub fn max_age(&self, max_age: u32) -> Self {
        self.mutate_clone(|x| x.max_age = max_age)
    }

    pub fn age_range(&self) -> Result<RangeInclusive<u32>, GenerateError> {
        let max_age = if self.max_age == 0 {
            self.min_age
        } else {
            self.max_age
        };
        if max_age < self.min_age {
            return Err(GenerateError::InvalidAgeRange {
                min_age: self.min_age,
                max_age,
            });
        }
        if max_age > AGE_LIMIT {
            return Err(GenerateError::AgeOutOfRange {
                age: max_age,
                limit: AGE_LIMIT,
            });
        }
        Ok(self.min_age..=max_age)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

/// A random but consistent set of ID card fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub id: String,
    pub birth_date: String,
    pub expiry_date: String,
    pub composite_check: u8,
    /// Age the birth date was generated for.
    pub age: u32,
    pub birth: NaiveDate,
    pub expiry: NaiveDate,
}

/// Same order as the arguments of [crate::verify].
impl fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id, self.birth_date, self.expiry_date, self.composite_check
        )
    }
}

/// Generates a document for the local date using the thread-local RNG.
pub fn generate(min_age: u32, max_age: u32) -> Result<GeneratedDocument, GenerateError> {
    let config = GeneratorConfig::new().min_age(min_age).max_age(max_age);
    generate_with(&config, &SystemClock, &mut rand::thread_rng())
}

pub fn generate_with<C: Clock + ?Sized, R: Rng + ?Sized>(
    config: &GeneratorConfig,
    clock: &C,
    rng: &mut R,
) -> Result<GeneratedDocument, GenerateError> {
    let age_range = config.age_range()?;
    let today = clock.today();

    let id = IdField::encode(&random_id_payload(rng))?;

    let age = rng.gen_range(age_range);
    let birth = random_birth_date(age, today, rng);
    let birth_date = DateField::encode(birth)?;

    let expiry = today + Duration::days(rng.gen_range(EXPIRY_DAYS));
    let expiry_date = DateField::encode(expiry)?;

    let composite_check = checksum(&[id.as_str(), &birth_date, &expiry_date].concat())?;

    counter!("age_verification.generated").increment(1);

    Ok(GeneratedDocument {
        id,
        birth_date,
        expiry_date,
        composite_check,
        age,
        birth,
        expiry,
    })
}

fn random_id_payload<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut payload = String::with_capacity(ID_PAYLOAD_LENGTH);
    payload.push(FIRST_CHARS[rng.gen_range(0..FIRST_CHARS.len())]);
    for _ in 1..ID_PAYLOAD_LENGTH {
        payload.push(ALLOWED_CHARS[rng.gen_range(0..ALLOWED_CHARS.len())]);
    }
    payload
}

/// Picks one of the 365 days that are exactly `age` 365-day years before `today`.
/// Leap days are not accounted for.
fn random_birth_date<R: Rng + ?Sized>(age: u32, today: NaiveDate, rng: &mut R) -> NaiveDate {
    let day_of_year: i64 = rng.gen_range(1..=DAYS_PER_YEAR);
    today - Duration::days(i64::from(age) * DAYS_PER_YEAR + day_of_year - 1)
}
