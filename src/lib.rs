// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod alphabet;
mod checksum;
mod clock;
mod error;
mod field;
mod generator;
mod verifier;

// This is the public API of the age verification library
pub use alphabet::{invalid_characters, is_allowed, ALLOWED_CHARS, FIRST_CHARS};
pub use checksum::{append_check_digit, checksum, CheckDigitValidator, ChecksumError, Validator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DateKind, GenerateError, VerificationError};
pub use field::{
    CenturyRule, CheckedField, DateField, FieldError, IdField, DATE_PAYLOAD_LENGTH,
    ID_PAYLOAD_LENGTH,
};
pub use generator::{
    generate, generate_with, GeneratedDocument, GeneratorConfig, AGE_LIMIT, DEFAULT_MAX_AGE,
    DEFAULT_MIN_AGE,
};
pub use verifier::{config::VerifierConfig, verify, VerificationResult, Verified, Verifier};
