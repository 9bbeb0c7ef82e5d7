//! # Error Hierarchy
//!
//! Structured error types for idcodec, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each layer of the pipeline has its own error enum:
//!
//! - [`IdentityError`]: the 18-character string failed parsing or the
//!   explicit fields failed formatting.
//! - [`EncodingError`]: a packed 64-bit value failed bit-field decoding.
//! - [`CipherError`]: key material or cipher parameters were rejected.
//!
//! [`IdCodecError`] wraps all three so the codec composer reports
//! cipher-layer and codec-layer failures as distinct variants. Every error
//! maps onto a flat [`ErrorKind`] with a stable short code for logs and
//! user-facing messages.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Top-level error type for the encode/decode pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdCodecError {
    /// The identity number string or its fields are invalid.
    #[error("identity number error: {0}")]
    Identity(#[from] IdentityError),

    /// The packed 64-bit value could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// The cipher layer rejected its configuration.
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
}

impl IdCodecError {
    /// The flat error kind of the wrapped error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(e) => e.kind(),
            Self::Encoding(e) => e.kind(),
            Self::Cipher(e) => e.kind(),
        }
    }
}

/// Errors raised while parsing or formatting an identity number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Input is not the expected number of characters.
    #[error("invalid identity number length: expected {expected} characters, got {actual}")]
    InvalidLength {
        /// Required length (17 for bare digit strings, 18 for full numbers).
        expected: usize,
        /// Length of the rejected input, in characters.
        actual: usize,
    },

    /// A character appears where it is not permitted.
    #[error("invalid character {found:?} at position {position}: expected {expected}")]
    InvalidCharacter {
        /// Zero-based character position.
        position: usize,
        /// The offending character.
        found: char,
        /// What the position accepts.
        expected: &'static str,
    },

    /// The 18th character does not match the computed check code.
    #[error("invalid check code: expected '{expected}', got '{actual}'")]
    InvalidCheckCode {
        /// Check code computed from the first 17 digits.
        expected: char,
        /// Check code present in the input (upper-cased).
        actual: char,
    },

    /// The birth-date digits do not name a real calendar day.
    #[error("invalid birth date {year:04}-{month:02}-{day:02}: {reason}")]
    InvalidDate {
        /// Year digits.
        year: u32,
        /// Month digits.
        month: u32,
        /// Day digits.
        day: u32,
        /// Why the date was rejected.
        reason: String,
    },

    /// A field passed to `format` lies outside its declared range.
    #[error("{field} {value} is out of range {min}..={max}")]
    FieldOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
}

impl IdentityError {
    /// The flat error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::InvalidCheckCode { .. } => ErrorKind::InvalidCheckCode,
            Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::FieldOutOfRange { .. } => ErrorKind::FieldOutOfRange,
        }
    }
}

/// Errors raised while unpacking a 64-bit value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The version nibble (bits 3–0) names a layout this codec does not know.
    #[error("unsupported encoding version {0} (expected 1)")]
    UnsupportedVersion(u8),

    /// The reserved byte (bits 63–56) is not zero.
    #[error("reserved bits must be zero, got {0:#04x}")]
    ReservedBitsNotZero(u8),

    /// A decoded field is outside the range an identity number can express.
    #[error("invalid bit field: {detail}")]
    InvalidBitField {
        /// Which field was out of range and by how much.
        detail: String,
    },

    /// The decoded fields did not reassemble into a valid identity number.
    #[error("invalid bit field: decoded fields do not form a valid identity number: {0}")]
    InvalidReassembly(#[source] IdentityError),
}

impl EncodingError {
    /// The flat error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::ReservedBitsNotZero(_) => ErrorKind::ReservedBitsNotZero,
            Self::InvalidBitField { .. } | Self::InvalidReassembly(_) => {
                ErrorKind::InvalidBitField
            }
        }
    }
}

/// Errors raised while building a cipher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Key material has the wrong length or cannot be decoded.
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// Cipher parameters (round count, rotations) are unusable.
    #[error("invalid cipher parameters: {reason}")]
    InvalidParameters {
        /// Why the parameters were rejected.
        reason: String,
    },
}

impl CipherError {
    /// The flat error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::InvalidParameters { .. } => ErrorKind::InvalidParameters,
        }
    }
}

/// Flat error taxonomy shared by every layer.
///
/// Codes are stable and safe to persist or show to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is not exactly 18 (or 17) characters.
    InvalidLength,
    /// A non-digit where a digit is required, or a trailing character other than a digit or `X`.
    InvalidCharacter,
    /// Check code mismatch.
    InvalidCheckCode,
    /// Well-formed but calendrically impossible date.
    InvalidDate,
    /// A formatted field lies outside its declared range.
    FieldOutOfRange,
    /// Version nibble is not understood.
    UnsupportedVersion,
    /// Reserved bits are nonzero.
    ReservedBitsNotZero,
    /// Decoded fields fail identity-number validation.
    InvalidBitField,
    /// Cipher key length outside the accepted range.
    InvalidKey,
    /// Cipher parameters outside the accepted range.
    InvalidParameters,
}

impl ErrorKind {
    /// Short stable code, e.g. `IIN-002`.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidLength => "IIN-001",
            Self::InvalidCheckCode => "IIN-002",
            Self::InvalidCharacter => "IIN-003",
            Self::InvalidDate => "IIN-004",
            Self::FieldOutOfRange => "IIN-005",
            Self::UnsupportedVersion => "IDC-001",
            Self::ReservedBitsNotZero => "IDC-002",
            Self::InvalidBitField => "IDC-003",
            Self::InvalidKey => "ENC-003",
            Self::InvalidParameters => "ENC-005",
        }
    }

    /// One-line description of the kind.
    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidLength => "Invalid ID number length",
            Self::InvalidCheckCode => "Invalid check code",
            Self::InvalidCharacter => "Invalid character in ID number",
            Self::InvalidDate => "Invalid birth date",
            Self::FieldOutOfRange => "Field out of range",
            Self::UnsupportedVersion => "Unsupported encoding version",
            Self::ReservedBitsNotZero => "Reserved bits must be zero",
            Self::InvalidBitField => "Invalid bit field extraction",
            Self::InvalidKey => "Invalid encryption key",
            Self::InvalidParameters => "Invalid cipher parameters",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.description())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
