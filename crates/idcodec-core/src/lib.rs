#![deny(missing_docs)]

//! # idcodec-core — Identity Numbers as 64-bit Integers
//!
//! This crate converts 18-character resident identity numbers into compact
//! `u64` values and back. It has no internal crate dependencies, only
//! `serde`, `thiserror` and `chrono` from the external ecosystem.
//!
//! ## Pipeline
//!
//! 1. [`IdentityNumber::parse`] validates the string: length, digits, the
//!    GB 11643 check code ([`checksum`]) and the birth date ([`temporal`]).
//! 2. [`bitfield::encode`] packs region code, day offset and sequence into a
//!    versioned 64-bit layout. The check code is re-derived on decode.
//! 3. [`IdentityCodec`] optionally passes the packed value through any
//!    [`Cipher`], for example the SPECK64 implementation in `idcodec-crypto`.
//!
//! ## Design Principles
//!
//! 1. **Validated newtype.** An [`IdentityNumber`] can only be built through
//!    `parse` or `format`, so every instance has a correct check code and a
//!    real calendar date.
//!
//! 2. **Masked by default.** `Display` and `Debug` never print the full
//!    number; call [`IdentityNumber::as_str`] explicitly.
//!
//! 3. **[`IdCodecError`] hierarchy.** Structured errors with `thiserror` and
//!    a flat [`ErrorKind`] with stable codes. No panics on any input.

pub mod bitfield;
pub mod checksum;
pub mod codec;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use checksum::{append_check_code, is_valid};
pub use codec::{Cipher, IdentityCodec, NoCipher};
pub use error::{CipherError, EncodingError, ErrorKind, IdCodecError, IdentityError};
pub use identity::IdentityNumber;
