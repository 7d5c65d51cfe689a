pub mod config;
pub mod metrics;

use crate::alphabet::invalid_characters;
use crate::checksum::checksum;
use crate::clock::{Clock, SystemClock};
use crate::error::{DateKind, VerificationError};
use crate::field::{DateField, FieldError, IdField};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use self::config::VerifierConfig;
use self::metrics::Metrics;

pub(crate) const DAYS_PER_YEAR: i64 = 365;

/// Added to a negative age, which happens when a [crate::CenturyRule::Pivot]
/// puts the birth date in the next century.
const FUTURE_BIRTH_DATE_CORRECTION: i64 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verified {
    pub age: u32,
}

pub type VerificationResult = Result<Verified, VerificationError>;

/// Checks an ID card number, birth date, expiry date and composite checksum
/// against each other. The first failing check is reported.
pub struct Verifier<C: Clock = SystemClock> {
    config: VerifierConfig,
    clock: C,
    metrics: Metrics,
}

impl Verifier<SystemClock> {
    pub fn new(config: VerifierConfig) -> Self {
        Verifier::with_clock(config, SystemClock)
    }
}

impl Default for Verifier<SystemClock> {
    fn default() -> Self {
        Verifier::new(VerifierConfig::default())
    }
}

impl<C: Clock> Verifier<C> {
    pub fn with_clock(config: VerifierConfig, clock: C) -> Self {
        Verifier {
            config,
            clock,
            metrics: Metrics::new(),
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn verify(
        &self,
        full_id: &str,
        full_birth_date: &str,
        full_expiry_date: &str,
        composite_check: &str,
    ) -> VerificationResult {
        let result = self.run_checks(full_id, full_birth_date, full_expiry_date, composite_check);
        match &result {
            Ok(_) => self.metrics.verified.increment(1),
            Err(err) => self.metrics.record_rejection(err),
        }
        result
    }

    fn run_checks(
        &self,
        full_id: &str,
        full_birth_date: &str,
        full_expiry_date: &str,
        composite_check: &str,
    ) -> VerificationResult {
        let now = self.clock.now();
        let today = now.date();

        let expiry = DateField::decode(full_expiry_date, &self.config.expiry_century, today)?;
        check_not_expired(expiry.date, now)?;

        let birth = DateField::decode(full_birth_date, &self.config.birth_century, today)?;
        let age = age_on(birth.date, now);

        check_date_checksum(&birth, DateKind::Birth)?;
        check_date_checksum(&expiry, DateKind::Expiry)?;
        check_id_characters(full_id)?;
        check_id_checksum(full_id)?;
        check_composite_checksum(full_id, full_birth_date, full_expiry_date, composite_check)?;

        Ok(Verified { age })
    }
}

/// Verifies with the local clock and the default century rules.
pub fn verify(
    full_id: &str,
    full_birth_date: &str,
    full_expiry_date: &str,
    composite_check: &str,
) -> VerificationResult {
    Verifier::default().verify(full_id, full_birth_date, full_expiry_date, composite_check)
}

/// The document is valid until the start of its expiry day.
fn check_not_expired(expiry_date: NaiveDate, now: NaiveDateTime) -> Result<(), VerificationError> {
    if expiry_date.and_time(NaiveTime::MIN) < now {
        return Err(VerificationError::ExpiredDocument(expiry_date));
    }
    Ok(())
}

/// Full 365-day periods elapsed since the start of the birth day.
pub(crate) fn age_on(birth_date: NaiveDate, now: NaiveDateTime) -> u32 {
    let days = (now - birth_date.and_time(NaiveTime::MIN)).num_days();
    let mut age = days / DAYS_PER_YEAR;
    if age < 0 {
        age += FUTURE_BIRTH_DATE_CORRECTION;
    }
    u32::try_from(age).unwrap_or(0)
}

fn check_date_checksum(date: &DateField, kind: DateKind) -> Result<(), VerificationError> {
    // A parsed date payload is all digits, so its checksum cannot fail.
    if !date.field.is_well_formed().unwrap_or(false) {
        return Err(VerificationError::BadDateChecksum(kind));
    }
    Ok(())
}

fn check_id_characters(full_id: &str) -> Result<(), VerificationError> {
    let invalid = invalid_characters(full_id);
    if !invalid.is_empty() {
        return Err(VerificationError::InvalidCharacters(invalid));
    }
    Ok(())
}

fn check_id_checksum(full_id: &str) -> Result<(), VerificationError> {
    let id = IdField::decode(full_id)?;
    if !id.field.is_well_formed().map_err(FieldError::from)? {
        return Err(VerificationError::BadIdChecksum);
    }
    Ok(())
}

fn check_composite_checksum(
    full_id: &str,
    full_birth_date: &str,
    full_expiry_date: &str,
    composite_check: &str,
) -> Result<(), VerificationError> {
    let declared = parse_check_digit(composite_check)?;
    let composite = [full_id, full_birth_date, full_expiry_date].concat();
    if checksum(&composite).map_err(FieldError::from)? != declared {
        return Err(VerificationError::BadCompositeChecksum);
    }
    Ok(())
}

fn parse_check_digit(input: &str) -> Result<u8, FieldError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c
            .to_digit(10)
            .map(|digit| digit as u8)
            .ok_or(FieldError::InvalidCheckDigit(c)),
        _ => Err(FieldError::WrongLength {
            expected: 1,
            actual: input.chars().count(),
        }),
    }
}
