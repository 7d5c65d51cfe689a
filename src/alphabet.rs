use std::collections::BTreeSet;

/// Characters that may appear in an ID card number. The letters
/// `A B D E I O Q S U` are left out because they are easily confused with
/// digits or other letters.
pub const ALLOWED_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'C', 'F', 'G', 'H', 'J', 'K', 'L', 'M',
    'N', 'P', 'R', 'T', 'V', 'W', 'X', 'Y', 'Z',
];

/// Characters an ID card number may start with (the issuing authority code).
pub const FIRST_CHARS: &[char] = &['L', 'M', 'N', 'P', 'R', 'T', 'V', 'W', 'X', 'Y'];

#[inline]
pub fn is_allowed(c: char) -> bool {
    ALLOWED_CHARS.contains(&c)
}

/// Returns every distinct character of `input` that is not in [ALLOWED_CHARS].
pub fn invalid_characters(input: &str) -> BTreeSet<char> {
    input.chars().filter(|c| !is_allowed(*c)).collect()
}
