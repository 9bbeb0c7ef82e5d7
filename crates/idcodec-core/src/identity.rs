//! # Identity Number
//!
//! [`IdentityNumber`] is a validated 18-character resident identity number:
//!
//! ```text
//! position   width   field
//!  0 ..  6     6     region code (administrative division)
//!  6 .. 10     4     birth year
//! 10 .. 12     2     birth month
//! 12 .. 14     2     birth day
//! 14 .. 17     3     sequence number
//! 17 .. 18     1     check code ('0'-'9' or 'X')
//! ```
//!
//! ## Construction
//!
//! - [`IdentityNumber::parse`] validates an external string: length, digit
//!   positions, check code, then calendar validity of the birth date.
//! - [`IdentityNumber::format`] assembles a number from explicit fields and
//!   computes the check code itself.
//!
//! Both paths reject anything that violates an invariant, so an
//! `IdentityNumber` in hand always carries a matching check code and a real
//! calendar date.
//!
//! ## Privacy
//!
//! `Display` and `Debug` show only the masked form (`1101**********002X`).
//! The full number is available through [`IdentityNumber::as_str`].

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::checksum::{self, BODY_LEN, NUMBER_LEN};
use crate::error::IdentityError;
use crate::temporal;

/// Character substituted for the hidden middle of a masked number.
pub const MASK_CHAR: char = '*';

/// Leading characters left visible by [`IdentityNumber::masked`].
const MASK_KEEP_HEAD: usize = 4;

/// Trailing characters left visible by [`IdentityNumber::masked`].
const MASK_KEEP_TAIL: usize = 4;

/// A fixed-width decimal field within the first 17 characters.
struct Segment {
    name: &'static str,
    start: usize,
    width: usize,
    min: u32,
    max: u32,
}

const REGION: Segment = Segment {
    name: "region_code",
    start: 0,
    width: 6,
    min: 0,
    max: 999_999,
};
const YEAR: Segment = Segment {
    name: "year",
    start: 6,
    width: 4,
    min: 0,
    max: 9999,
};
const MONTH: Segment = Segment {
    name: "month",
    start: 10,
    width: 2,
    min: 1,
    max: 12,
};
const DAY: Segment = Segment {
    name: "day",
    start: 12,
    width: 2,
    min: 1,
    max: 31,
};
const SEQUENCE: Segment = Segment {
    name: "sequence",
    start: 14,
    width: 3,
    min: 0,
    max: 999,
};

impl Segment {
    fn read(&self, digits: &[u8; NUMBER_LEN]) -> u32 {
        digits[self.start..self.start + self.width]
            .iter()
            .fold(0, |acc, &b| acc * 10 + u32::from(b - b'0'))
    }

    fn write(&self, digits: &mut [u8; NUMBER_LEN], mut value: u32) {
        for slot in digits[self.start..self.start + self.width].iter_mut().rev() {
            // value % 10 < 10, so the cast cannot truncate.
            *slot = b'0' + (value % 10) as u8;
            value /= 10;
        }
    }

    fn check_range(&self, value: u32) -> Result<u32, IdentityError> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(IdentityError::FieldOutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A validated 18-character identity number.
///
/// Equality, ordering and hashing use the canonical (upper-cased) string.
#[derive(Clone)]
pub struct IdentityNumber {
    number: String,
    region_code: u32,
    birth_date: NaiveDate,
    sequence: u16,
}

impl IdentityNumber {
    /// Parse and validate an 18-character identity number.
    ///
    /// A trailing lowercase `x` is accepted and normalized to `X`.
    ///
    /// # Errors
    ///
    /// In order of checking:
    /// - [`IdentityError::InvalidLength`] unless the input is 18 characters.
    /// - [`IdentityError::InvalidCharacter`] for a non-digit in positions
    ///   0–16, or a final character other than a digit or `X`.
    /// - [`IdentityError::InvalidCheckCode`] if the final character does not
    ///   match the computed check code.
    /// - [`IdentityError::InvalidDate`] if the birth date is not a real
    ///   calendar day.
    ///
    /// # Examples
    ///
    /// ```
    /// use idcodec_core::IdentityNumber;
    ///
    /// let id = IdentityNumber::parse("11010519491231002x").unwrap();
    /// assert_eq!(id.as_str(), "11010519491231002X");
    /// assert_eq!(id.region_code(), 110105);
    /// assert_eq!((id.year(), id.month(), id.day()), (1949, 12, 31));
    /// assert_eq!(id.sequence(), 2);
    /// assert_eq!(id.to_string(), "1101**********002X");
    /// ```
    pub fn parse(input: &str) -> Result<Self, IdentityError> {
        let length = input.chars().count();
        if length != NUMBER_LEN {
            return Err(IdentityError::InvalidLength {
                expected: NUMBER_LEN,
                actual: length,
            });
        }

        let mut digits = [0u8; NUMBER_LEN];
        for ((position, found), slot) in input.chars().enumerate().zip(digits.iter_mut()) {
            *slot = checksum::character_at(position, found)?;
        }
        Self::from_digits(digits)
    }

    /// Assemble an identity number from its fields, computing the check code.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::FieldOutOfRange`] naming the first field outside
    ///   its range: `region_code` 0–999999, `year` 0–9999, `month` 1–12,
    ///   `day` 1–31, `sequence` 0–999.
    /// - [`IdentityError::InvalidDate`] if the assembled date does not exist
    ///   (for example April 31, or February 29 of a common year).
    ///
    /// # Examples
    ///
    /// ```
    /// use idcodec_core::IdentityNumber;
    ///
    /// let id = IdentityNumber::format(110105, 1949, 12, 31, 2).unwrap();
    /// assert_eq!(id.as_str(), "11010519491231002X");
    /// ```
    pub fn format(
        region_code: u32,
        year: u32,
        month: u32,
        day: u32,
        sequence: u32,
    ) -> Result<Self, IdentityError> {
        let region_code = REGION.check_range(region_code)?;
        let year = YEAR.check_range(year)?;
        let month = MONTH.check_range(month)?;
        let day = DAY.check_range(day)?;
        let sequence = SEQUENCE.check_range(sequence)?;

        let digits = assemble(region_code, year, month, day, sequence);
        let birth_date = temporal::calendar_date(year, month, day)?;
        Ok(Self::from_parts(digits, region_code, birth_date, sequence))
    }

    /// Validate already upper-cased ASCII bytes and build the number.
    pub(crate) fn from_digits(digits: [u8; NUMBER_LEN]) -> Result<Self, IdentityError> {
        for (position, &byte) in digits.iter().enumerate() {
            checksum::character_at(position, char::from(byte))?;
        }
        checksum::validate(&digits)?;

        let region_code = REGION.read(&digits);
        let sequence = SEQUENCE.read(&digits);
        let birth_date =
            temporal::calendar_date(YEAR.read(&digits), MONTH.read(&digits), DAY.read(&digits))?;
        Ok(Self::from_parts(digits, region_code, birth_date, sequence))
    }

    fn from_parts(
        digits: [u8; NUMBER_LEN],
        region_code: u32,
        birth_date: NaiveDate,
        sequence: u32,
    ) -> Self {
        Self {
            number: digits.iter().map(|&b| char::from(b)).collect(),
            region_code,
            birth_date,
            // Segment width caps the sequence at 999.
            sequence: sequence as u16,
        }
    }

    /// The canonical 18-character number, with an upper-case `X` if present.
    pub fn as_str(&self) -> &str {
        &self.number
    }

    /// The canonical number as an owned string.
    pub fn number(&self) -> String {
        self.number.clone()
    }

    /// Six-digit administrative region code.
    pub fn region_code(&self) -> u32 {
        self.region_code
    }

    /// Birth year, 0–9999.
    pub fn year(&self) -> u32 {
        // Birth dates are validated into 0..=9999 at construction.
        self.birth_date.year() as u32
    }

    /// Birth month, 1–12.
    pub fn month(&self) -> u32 {
        self.birth_date.month()
    }

    /// Birth day of month, 1–31.
    pub fn day(&self) -> u32 {
        self.birth_date.day()
    }

    /// Birth date as a calendar date.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Three-digit sequence number.
    pub fn sequence(&self) -> u32 {
        u32::from(self.sequence)
    }

    /// The check code character, `'0'`–`'9'` or `'X'`.
    pub fn checksum(&self) -> char {
        self.number.chars().last().unwrap_or('?')
    }

    /// Privacy-preserving rendering: first and last four characters visible,
    /// the middle ten replaced by [`MASK_CHAR`].
    pub fn masked(&self) -> String {
        let hidden = NUMBER_LEN - MASK_KEEP_HEAD - MASK_KEEP_TAIL;
        let mut masked = String::with_capacity(NUMBER_LEN);
        masked.push_str(&self.number[..MASK_KEEP_HEAD]);
        masked.extend(std::iter::repeat(MASK_CHAR).take(hidden));
        masked.push_str(&self.number[NUMBER_LEN - MASK_KEEP_TAIL..]);
        masked
    }
}

/// Write the five fields as zero-padded digits and append the check code.
///
/// Callers must pass values already within their segment widths.
pub(crate) fn assemble(
    region_code: u32,
    year: u32,
    month: u32,
    day: u32,
    sequence: u32,
) -> [u8; NUMBER_LEN] {
    let mut digits = [b'0'; NUMBER_LEN];
    REGION.write(&mut digits, region_code);
    YEAR.write(&mut digits, year);
    MONTH.write(&mut digits, month);
    DAY.write(&mut digits, day);
    SEQUENCE.write(&mut digits, sequence);

    let mut body = [0u8; BODY_LEN];
    body.copy_from_slice(&digits[..BODY_LEN]);
    digits[BODY_LEN] = checksum::check_code_of(&body);
    digits
}

impl PartialEq for IdentityNumber {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for IdentityNumber {}

impl PartialOrd for IdentityNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IdentityNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.number.cmp(&other.number)
    }
}

impl Hash for IdentityNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl std::fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

impl std::fmt::Debug for IdentityNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IdentityNumber({})", self.masked())
    }
}

impl FromStr for IdentityNumber {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for IdentityNumber {
    type Error = IdentityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl Serialize for IdentityNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.number)
    }
}

impl<'de> Deserialize<'de> for IdentityNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
