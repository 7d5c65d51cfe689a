use thiserror::Error;

const MULTIPLIERS: &[u32] = &[7, 3, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChecksumError {
    #[error("Character '{0}' is neither a digit nor an uppercase letter")]
    InvalidCharacter(char),
}

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, input: &str) -> bool;
}

/// Computes the 7-3-1 weighted check digit used on German ID cards and
/// passports (ICAO 9303 machine readable zone).
///
/// Letters map to `10..=35` whether or not they are part of the allowed
/// alphabet, so `A` is accepted here even though an ID containing it is not.
pub fn checksum(payload: &str) -> Result<u8, ChecksumError> {
    let mut sum = 0;
    for (idx, c) in payload.chars().enumerate() {
        let value = char_value(c).ok_or(ChecksumError::InvalidCharacter(c))?;
        sum = (sum + (value * MULTIPLIERS[idx % MULTIPLIERS.len()]) % 10) % 10;
    }
    Ok(sum as u8)
}

/// Appends the check digit of `payload` to it.
pub fn append_check_digit(payload: &str) -> Result<String, ChecksumError> {
    let digit = checksum(payload)?;
    let mut field = String::with_capacity(payload.len() + 1);
    field.push_str(payload);
    field.push(char::from(b'0' + digit));
    Ok(field)
}

#[inline]
fn char_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() || c.is_ascii_uppercase() {
        c.to_digit(36)
    } else {
        None
    }
}

/// Accepts a field whose last character is the check digit of everything before it.
pub struct CheckDigitValidator;

impl Validator for CheckDigitValidator {
    fn is_valid_match(&self, input: &str) -> bool {
        let mut chars = input.chars();
        let Some(check_digit) = chars.next_back().and_then(|c| c.to_digit(10)) else {
            return false;
        };
        match checksum(chars.as_str()) {
            Ok(computed) => u32::from(computed) == check_digit,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::checksum::*;

    #[test]
    fn date_checksum_uses_7_3_1_weights() {
        // 1*7 + 5*3 + 0*1 + 2*7 + 2*3 + 4*1, each taken mod 10
        assert_eq!(checksum("150224"), Ok(6));
        assert_eq!(checksum("900101"), Ok(1));
        assert_eq!(checksum("310115"), Ok(9));
    }

    #[test]
    fn letters_map_from_ten() {
        // https://de.wikipedia.org/wiki/Personalausweis_(Deutschland)
        assert_eq!(checksum("T22000129"), Ok(3));
        assert_eq!(checksum("LZ6311T47"), Ok(5));
        // A is outside the allowed alphabet but still has a numeric value
        assert_eq!(checksum("L1234567A"), Ok(3));
    }

    #[test]
    fn empty_payload_is_zero() {
        assert_eq!(checksum(""), Ok(0));
    }

    #[test]
    fn checksum_is_order_sensitive() {
        assert_ne!(checksum("12"), checksum("21"));
    }

    #[test]
    fn long_payloads_do_not_overflow() {
        // every block of three 9s adds 3 + 7 + 9
        assert_eq!(checksum(&"9".repeat(3_000_000)), Ok(0));
        assert_eq!(checksum(&"9".repeat(3_000_001)), Ok(3));
        assert_eq!(checksum(&"Z".repeat(1_000_001)), checksum("Z"));
    }

    #[test]
    fn random_alphabet_strings_have_a_single_digit_checksum() {
        use crate::alphabet::ALLOWED_CHARS;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(731);
        for _ in 0..1000 {
            let len = rng.gen_range(0..40);
            let payload: String = (0..len)
                .map(|_| ALLOWED_CHARS[rng.gen_range(0..ALLOWED_CHARS.len())])
                .collect();
            let digit = checksum(&payload).unwrap();
            assert!(digit <= 9, "{payload} has checksum {digit}");
            assert_eq!(checksum(&payload), Ok(digit));
        }
    }

    #[test]
    fn rejects_lowercase_and_symbols() {
        assert_eq!(
            checksum("lz6311t47"),
            Err(ChecksumError::InvalidCharacter('l'))
        );
        assert_eq!(
            checksum("15-02-24"),
            Err(ChecksumError::InvalidCharacter('-'))
        );
        assert_eq!(
            checksum("١٥٠٢٢٤"),
            Err(ChecksumError::InvalidCharacter('١'))
        );
    }

    #[test]
    fn appends_check_digit() {
        assert_eq!(append_check_digit("150224").unwrap(), "1502246");
        assert_eq!(append_check_digit("LZ6311T47").unwrap(), "LZ6311T475");
        assert!(append_check_digit("lz").is_err());
    }

    #[test]
    fn validate_check_digit_terminated_fields() {
        let valid_fields = vec!["1502246", "9001011", "T220001293", "LZ6311T475", "0"];
        for field in valid_fields {
            println!("testing for input {}", field);
            assert!(CheckDigitValidator.is_valid_match(field));
        }

        let invalid_fields = vec![
            // wrong checksum
            "1502247",
            "LZ6311T476",
            // missing check digit
            "",
            "LZ6311T47X",
            // lowercase payload
            "lz6311t475",
        ];
        for field in invalid_fields {
            println!("testing for input {}", field);
            assert!(!CheckDigitValidator.is_valid_match(field));
        }
    }
}
