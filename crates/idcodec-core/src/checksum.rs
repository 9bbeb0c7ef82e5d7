//! # Check Code Calculator
//!
//! The 18th character of an identity number is a weighted mod-11 check code
//! over the first 17 digits (GB 11643-1999):
//!
//! 1. Multiply digit `i` by `WEIGHTS[i]`.
//! 2. Sum the 17 products and reduce modulo 11.
//! 3. Map the remainder through `CHECK_CODES` (`0 → '1'`, `2 → 'X'`, …).
//!
//! All functions are pure and zero-allocation except [`append_check_code`].

use crate::error::IdentityError;

/// Per-position weights for the first 17 digits.
pub const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Check code for each remainder `0..=10`.
pub const CHECK_CODES: [u8; 11] = *b"10X98765432";

/// Number of digits the check code is computed over.
pub const BODY_LEN: usize = 17;

/// Length of a complete identity number.
pub const NUMBER_LEN: usize = 18;

/// Computes the check code over the first 17 bytes of `digits`.
///
/// Accepts either the 17-digit body or a full 18-character number, in which
/// case the trailing character is ignored.
///
/// # Errors
///
/// - [`IdentityError::InvalidLength`] if `digits` is not 17 or 18 bytes long.
/// - [`IdentityError::InvalidCharacter`] if any of the first 17 bytes is not
///   an ASCII digit.
///
/// # Examples
///
/// ```
/// use idcodec_core::checksum::checksum;
///
/// assert_eq!(checksum(b"11010519491231002").unwrap(), 'X');
/// assert_eq!(checksum(b"110101199001011237").unwrap(), '7');
/// ```
pub fn checksum(digits: &[u8]) -> Result<char, IdentityError> {
    if digits.len() != BODY_LEN && digits.len() != NUMBER_LEN {
        return Err(IdentityError::InvalidLength {
            expected: BODY_LEN,
            actual: digits.len(),
        });
    }
    let mut body = [0u8; BODY_LEN];
    for (position, &byte) in digits[..BODY_LEN].iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(IdentityError::InvalidCharacter {
                position,
                found: char::from(byte),
                expected: "a decimal digit",
            });
        }
        body[position] = byte;
    }
    Ok(char::from(check_code_of(&body)))
}

/// Verifies the check code of a complete 18-character number.
///
/// The trailing character is compared case-insensitively, so `x` matches `X`.
///
/// # Errors
///
/// - [`IdentityError::InvalidLength`] unless `number` is exactly 18 bytes.
/// - [`IdentityError::InvalidCharacter`] for a non-digit in positions 0–16.
/// - [`IdentityError::InvalidCheckCode`] if the trailing character differs
///   from the computed check code.
pub fn validate(number: &[u8]) -> Result<(), IdentityError> {
    if number.len() != NUMBER_LEN {
        return Err(IdentityError::InvalidLength {
            expected: NUMBER_LEN,
            actual: number.len(),
        });
    }
    let expected = checksum(number)?;
    let actual = char::from(number[BODY_LEN].to_ascii_uppercase());
    if expected != actual {
        return Err(IdentityError::InvalidCheckCode { expected, actual });
    }
    Ok(())
}

/// Returns `true` if `number` is 18 characters with a matching check code.
///
/// Only the check code is verified; use
/// [`IdentityNumber::parse`](crate::IdentityNumber::parse) for full
/// validation including the birth date.
pub fn is_valid(number: &str) -> bool {
    validate(number.as_bytes()).is_ok()
}

/// Appends the computed check code to a 17-digit body.
///
/// # Errors
///
/// - [`IdentityError::InvalidLength`] unless `body` is exactly 17 characters.
/// - [`IdentityError::InvalidCharacter`] for any non-digit.
pub fn append_check_code(body: &str) -> Result<String, IdentityError> {
    let length = body.chars().count();
    if length != BODY_LEN {
        return Err(IdentityError::InvalidLength {
            expected: BODY_LEN,
            actual: length,
        });
    }
    for (position, found) in body.chars().enumerate() {
        character_at(position, found)?;
    }
    let code = checksum(body.as_bytes())?;
    let mut number = String::with_capacity(NUMBER_LEN);
    number.push_str(body);
    number.push(code);
    Ok(number)
}

/// Checks one character against what `position` admits: a decimal digit in
/// the body, a digit or `X`/`x` in the check code slot. Returns the
/// upper-cased ASCII byte.
pub(crate) fn character_at(position: usize, found: char) -> Result<u8, IdentityError> {
    let expected = if position < BODY_LEN {
        "a decimal digit"
    } else {
        "a decimal digit or 'X'"
    };
    let admitted =
        found.is_ascii_digit() || (position == BODY_LEN && found.eq_ignore_ascii_case(&'X'));
    if !admitted {
        return Err(IdentityError::InvalidCharacter {
            position,
            found,
            expected,
        });
    }
    // Admitted characters are ASCII.
    Ok(found.to_ascii_uppercase() as u8)
}

/// Check code of a body already known to be 17 ASCII digits.
pub(crate) fn check_code_of(body: &[u8; BODY_LEN]) -> u8 {
    let sum: u32 = body
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&digit, &weight)| u32::from(digit - b'0') * weight)
        .sum();
    CHECK_CODES[(sum % 11) as usize]
}
