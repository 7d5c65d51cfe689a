use std::collections::BTreeSet;

use chrono::NaiveDate;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::checksum::ChecksumError;
use crate::field::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DateKind {
    #[strum(serialize = "birth date")]
    Birth,
    #[strum(serialize = "expiry date")]
    Expiry,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum VerificationError {
    #[error("The document expired on {0}")]
    ExpiredDocument(NaiveDate),

    #[error("The checksum for the {0} is invalid")]
    BadDateChecksum(DateKind),

    #[error("The checksum for the document ID is invalid")]
    BadIdChecksum,

    #[error("The composite checksum is invalid, the ID does not match the birth or expiry date")]
    BadCompositeChecksum,

    #[error("The ID contains the following invalid characters: {}", join_chars(.0))]
    InvalidCharacters(BTreeSet<char>),

    /// The input could not be split into a payload and check digit or the date is not a date.
    #[error(transparent)]
    MalformedField(#[from] FieldError),
}

impl VerificationError {
    /// Stable, low-cardinality name of the failure kind.
    pub fn reason(&self) -> &'static str {
        self.into()
    }
}

fn join_chars(chars: &BTreeSet<char>) -> String {
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Process exit code for each failure kind.
impl From<&VerificationError> for i32 {
    fn from(value: &VerificationError) -> i32 {
        match value {
            VerificationError::ExpiredDocument(_) => 2,
            VerificationError::BadDateChecksum(_) => 3,
            VerificationError::BadIdChecksum => 4,
            VerificationError::BadCompositeChecksum => 5,
            VerificationError::InvalidCharacters(_) => 6,
            VerificationError::MalformedField(_) => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("The maximum age {max_age} is lower than the minimum age {min_age}")]
    InvalidAgeRange { min_age: u32, max_age: u32 },

    #[error("Ages above {limit} cannot be encoded with two-digit years (got {age})")]
    AgeOutOfRange { age: u32, limit: u32 },

    #[error(transparent)]
    Checksum(#[from] ChecksumError),
}
