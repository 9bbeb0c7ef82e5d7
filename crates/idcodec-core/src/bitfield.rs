//! # Bit-Field Codec
//!
//! Packs an [`IdentityNumber`] into a single `u64` and back. The layout is
//! the only wire contract of this crate and must stay stable:
//!
//! ```text
//!  63      56 55               36 35                    14 13       4 3   0
//! +----------+-------------------+------------------------+----------+-----+
//! | reserved |   region code     |   day offset           | sequence | ver |
//! |  8 bits  |   20 bits         |   22 bits              | 10 bits  |  4  |
//! +----------+-------------------+------------------------+----------+-----+
//! ```
//!
//! The day offset counts days from `0000-01-01` in the proleptic Gregorian
//! calendar. The check code is not stored: decoding rebuilds the 17-digit
//! body, recomputes the check code and re-validates the whole number.

use crate::error::EncodingError;
use crate::identity::{self, IdentityNumber};
use crate::temporal;

/// Layout version written into bits 3–0.
pub const VERSION: u8 = 1;

/// Shift of the reserved byte.
pub const RESERVED_SHIFT: u32 = 56;
/// Shift of the region code field.
pub const REGION_SHIFT: u32 = 36;
/// Shift of the day offset field.
pub const DAY_OFFSET_SHIFT: u32 = 14;
/// Shift of the sequence field.
pub const SEQUENCE_SHIFT: u32 = 4;

/// Mask of the region code field, after shifting.
pub const REGION_MASK: u64 = (1 << 20) - 1;
/// Mask of the day offset field, after shifting.
pub const DAY_OFFSET_MASK: u64 = (1 << 22) - 1;
/// Mask of the sequence field, after shifting.
pub const SEQUENCE_MASK: u64 = (1 << 10) - 1;
/// Mask of the version nibble.
pub const VERSION_MASK: u64 = 0xF;

const MAX_REGION: u64 = 999_999;
const MAX_SEQUENCE: u64 = 999;

/// Pack an identity number into its 64-bit representation.
///
/// Infallible: every valid `IdentityNumber` fits the layout. The reserved
/// byte is always zero and the version nibble is always [`VERSION`].
///
/// # Examples
///
/// ```
/// use idcodec_core::{bitfield, IdentityNumber};
///
/// let id = IdentityNumber::parse("11010519491231002X").unwrap();
/// let packed = bitfield::encode(&id);
/// assert_eq!(packed >> 56, 0);
/// assert_eq!(packed & 0xF, 1);
/// assert_eq!(bitfield::decode(packed).unwrap(), id);
/// ```
pub fn encode(id: &IdentityNumber) -> u64 {
    // Birth dates lie in 0000-01-01..=9999-12-31, so the offset is
    // non-negative and below 2^22.
    let offset = temporal::day_offset(id.birth_date()) as u64;
    debug_assert!(offset <= DAY_OFFSET_MASK, "day offset {offset} overflows 22 bits");

    (u64::from(id.region_code()) & REGION_MASK) << REGION_SHIFT
        | (offset & DAY_OFFSET_MASK) << DAY_OFFSET_SHIFT
        | (u64::from(id.sequence()) & SEQUENCE_MASK) << SEQUENCE_SHIFT
        | u64::from(VERSION)
}

/// Unpack a 64-bit value into a validated identity number.
///
/// # Errors
///
/// - [`EncodingError::UnsupportedVersion`] unless bits 3–0 equal [`VERSION`].
///   Checked first.
/// - [`EncodingError::ReservedBitsNotZero`] unless bits 63–56 are zero.
/// - [`EncodingError::InvalidBitField`] if the region code exceeds six
///   digits, the sequence exceeds three digits, or the day offset lands
///   past year 9999.
/// - [`EncodingError::InvalidReassembly`] if the rebuilt number fails
///   validation.
pub fn decode(value: u64) -> Result<IdentityNumber, EncodingError> {
    let version = (value & VERSION_MASK) as u8;
    if version != VERSION {
        return Err(EncodingError::UnsupportedVersion(version));
    }
    let reserved = (value >> RESERVED_SHIFT) as u8;
    if reserved != 0 {
        return Err(EncodingError::ReservedBitsNotZero(reserved));
    }

    let region = (value >> REGION_SHIFT) & REGION_MASK;
    let offset = (value >> DAY_OFFSET_SHIFT) & DAY_OFFSET_MASK;
    let sequence = (value >> SEQUENCE_SHIFT) & SEQUENCE_MASK;

    if region > MAX_REGION {
        return Err(EncodingError::InvalidBitField {
            detail: format!("region code {region} exceeds {MAX_REGION}"),
        });
    }
    if sequence > MAX_SEQUENCE {
        return Err(EncodingError::InvalidBitField {
            detail: format!("sequence {sequence} exceeds {MAX_SEQUENCE}"),
        });
    }

    let date = temporal::date_from_offset(offset).ok_or_else(|| EncodingError::InvalidBitField {
        detail: format!("day offset {offset} is not a representable date"),
    })?;
    let (year, month, day) = ymd(date);
    if year > temporal::MAX_YEAR {
        return Err(EncodingError::InvalidBitField {
            detail: format!(
                "day offset {offset} falls in year {year}, beyond {}",
                temporal::MAX_YEAR
            ),
        });
    }

    // Region and sequence were bounded above, so both fit u32.
    let digits = identity::assemble(region as u32, year, month, day, sequence as u32);
    IdentityNumber::from_digits(digits).map_err(EncodingError::InvalidReassembly)
}

fn ymd(date: chrono::NaiveDate) -> (u32, u32, u32) {
    use chrono::Datelike;
    // Offsets are non-negative, so the year is never before 0.
    (date.year().unsigned_abs(), date.month(), date.day())
}

/// Compose a raw value from explicit field values, bypassing validation.
/// Fields are masked to their widths.
#[cfg(test)]
fn pack_raw(reserved: u8, region: u64, day_offset: u64, sequence: u64, version: u8) -> u64 {
    u64::from(reserved) << RESERVED_SHIFT
        | (region & REGION_MASK) << REGION_SHIFT
        | (day_offset & DAY_OFFSET_MASK) << DAY_OFFSET_SHIFT
        | (sequence & SEQUENCE_MASK) << SEQUENCE_SHIFT
        | (u64::from(version) & VERSION_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn id(s: &str) -> IdentityNumber {
        IdentityNumber::parse(s).unwrap()
    }

    #[test]
    fn encode_places_fields_in_their_ranges() {
        let packed = encode(&id("110101000001011236"));
        assert_eq!(packed, pack_raw(0, 110_101, 0, 123, 1));
        assert_eq!(packed >> REGION_SHIFT, 110_101);
        assert_eq!((packed >> SEQUENCE_SHIFT) & SEQUENCE_MASK, 123);
    }

    #[test]
    fn encode_stores_day_offset_from_year_zero() {
        let packed = encode(&id("110101999912311236"));
        assert_eq!((packed >> DAY_OFFSET_SHIFT) & DAY_OFFSET_MASK, 3_652_424);
    }

    #[test]
    fn round_trips_known_numbers() {
        for s in [
            "11010519491231002X",
            "110101199001011237",
            "110101000001011236",
            "110101999912311236",
            "310101198506152345",
        ] {
            assert_eq!(decode(encode(&id(s))).unwrap().as_str(), s);
        }
    }

    #[test]
    fn lowercase_x_decodes_to_canonical_form() {
        let packed = encode(&id("11010519491231002x"));
        assert_eq!(decode(packed).unwrap().as_str(), "11010519491231002X");
    }

    #[test]
    fn version_is_checked_before_reserved_bits() {
        let value = pack_raw(0xFF, 110_101, 0, 123, 2);
        assert_eq!(decode(value).unwrap_err(), EncodingError::UnsupportedVersion(2));
    }

    #[test]
    fn rejects_version_zero() {
        assert_eq!(decode(0).unwrap_err(), EncodingError::UnsupportedVersion(0));
    }

    #[test]
    fn rejects_nonzero_reserved_bits() {
        let valid = encode(&id("110101199001011237"));
        let tampered = valid | 1 << 63;
        assert_eq!(
            decode(tampered).unwrap_err(),
            EncodingError::ReservedBitsNotZero(0x80)
        );
    }

    #[test]
    fn rejects_region_beyond_six_digits() {
        let err = decode(pack_raw(0, 1_000_000, 0, 0, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBitField);
    }

    #[test]
    fn rejects_sequence_beyond_three_digits() {
        let err = decode(pack_raw(0, 110_101, 0, 1000, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBitField);
    }

    #[test]
    fn rejects_offset_past_year_9999() {
        let err = decode(pack_raw(0, 110_101, 3_652_425, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBitField);
        assert!(format!("{err}").contains("10000"), "{err}");

        let err = decode(pack_raw(0, 110_101, DAY_OFFSET_MASK, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBitField);
    }

    #[test]
    fn smallest_valid_value_decodes() {
        let decoded = decode(pack_raw(0, 0, 0, 0, 1)).unwrap();
        assert_eq!(decoded.as_str(), "000000000001010009");
    }
}
