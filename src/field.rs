use crate::checksum::{append_check_digit, checksum, ChecksumError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

pub const DATE_PAYLOAD_LENGTH: usize = 6;
pub const ID_PAYLOAD_LENGTH: usize = 9;

const DATE_FORMAT: &str = "%y%m%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Expected {expected} characters but got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("The check digit '{0}' is not a digit")]
    InvalidCheckDigit(char),

    #[error("'{0}' is not a valid YYMMDD date")]
    DateParse(String),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),
}

/// A payload followed by a single check character, which is a digit when the
/// field is well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedField<'a> {
    pub payload: &'a str,
    pub check: char,
}

impl<'a> CheckedField<'a> {
    /// Splits `field` into its payload and trailing check character by length
    /// alone. The check character is judged by [CheckedField::is_well_formed].
    pub fn decode(field: &'a str, payload_length: usize) -> Result<Self, FieldError> {
        let actual = field.chars().count();
        let wrong_length = FieldError::WrongLength {
            expected: payload_length + 1,
            actual,
        };
        if actual != payload_length + 1 {
            return Err(wrong_length);
        }
        let (split_at, check) = field.char_indices().next_back().ok_or(wrong_length)?;

        Ok(CheckedField {
            payload: &field[..split_at],
            check,
        })
    }

    pub fn check_digit(&self) -> Option<u8> {
        self.check.to_digit(10).map(|digit| digit as u8)
    }

    /// True when the check character is a digit equal to the payload's checksum.
    pub fn is_well_formed(&self) -> Result<bool, ChecksumError> {
        let computed = checksum(self.payload)?;
        Ok(self.check_digit() == Some(computed))
    }
}

/// How the century of a two-digit year is chosen.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CenturyRule {
    /// Years below `pivot` are in the 2000s, the others in the 1900s.
    Pivot { pivot: u8 },
    /// The latest date that is not after the reference date.
    NotAfterReference,
    /// The date closest to the reference date.
    ClosestToReference,
}

impl CenturyRule {
    /// Same interpretation as `strptime("%y")`.
    pub const POSIX: CenturyRule = CenturyRule::Pivot { pivot: 69 };

    pub fn resolve(
        &self,
        yy: i32,
        month: u32,
        day: u32,
        reference: NaiveDate,
    ) -> Option<NaiveDate> {
        match *self {
            CenturyRule::Pivot { pivot } => {
                let century = if yy < i32::from(pivot) { 2000 } else { 1900 };
                NaiveDate::from_ymd_opt(century + yy, month, day)
            }
            CenturyRule::NotAfterReference => candidates(yy, month, day, reference)
                .filter(|date| *date <= reference)
                .max(),
            CenturyRule::ClosestToReference => candidates(yy, month, day, reference)
                .min_by_key(|date| (*date - reference).num_days().abs()),
        }
    }
}

fn candidates(
    yy: i32,
    month: u32,
    day: u32,
    reference: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    let century = reference.year() - reference.year().rem_euclid(100);
    [century - 100, century, century + 100]
        .into_iter()
        .filter_map(move |c| NaiveDate::from_ymd_opt(c + yy, month, day))
}

/// A `YYMMDD` date followed by its check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateField<'a> {
    pub date: NaiveDate,
    pub field: CheckedField<'a>,
}

impl<'a> DateField<'a> {
    pub fn decode(
        field: &'a str,
        rule: &CenturyRule,
        reference: NaiveDate,
    ) -> Result<Self, FieldError> {
        let field = CheckedField::decode(field, DATE_PAYLOAD_LENGTH)?;
        let date = parse_date(field.payload, rule, reference)?;
        Ok(DateField { date, field })
    }

    pub fn encode(date: NaiveDate) -> Result<String, ChecksumError> {
        append_check_digit(&date.format(DATE_FORMAT).to_string())
    }
}

fn parse_date(
    payload: &str,
    rule: &CenturyRule,
    reference: NaiveDate,
) -> Result<NaiveDate, FieldError> {
    let parse_error = || FieldError::DateParse(payload.to_string());
    if payload.len() != DATE_PAYLOAD_LENGTH || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error());
    }
    let number = |range: Range<usize>| {
        payload[range]
            .parse::<u32>()
            .map_err(|_| parse_error())
    };
    let yy = number(0..2)? as i32;
    let month = number(2..4)?;
    let day = number(4..6)?;
    rule.resolve(yy, month, day, reference).ok_or_else(parse_error)
}

/// A 9-character document number followed by its check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdField<'a> {
    pub field: CheckedField<'a>,
}

impl<'a> IdField<'a> {
    pub fn decode(field: &'a str) -> Result<Self, FieldError> {
        Ok(IdField {
            field: CheckedField::decode(field, ID_PAYLOAD_LENGTH)?,
        })
    }

    pub fn encode(payload: &str) -> Result<String, ChecksumError> {
        append_check_digit(payload)
    }
}
