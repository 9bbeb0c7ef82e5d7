//! # idcodec-crypto — Ciphers for Packed Identity Numbers
//!
//! Provides the [`Cipher`](idcodec_core::Cipher) implementations that the
//! codec composer in `idcodec-core` can apply to packed 64-bit values:
//!
//! - **SPECK64** ([`Speck64`]), a lightweight ARX block cipher over two
//!   32-bit words. Standard configuration is SPECK64/128.
//! - **XOR whitening** ([`XorCipher`]), a weak obfuscation kept for
//!   compatibility with existing stored values.
//!
//! It also handles key material ([`key`]), cipher configuration from flags,
//! YAML and environment ([`config`]), and builds ready-made codecs
//! ([`codecs`]).
//!
//! ## Crate Policy
//!
//! - Depends only on `idcodec-core` internally.
//! - Round keys are zeroized on drop. Keys never appear in `Debug` output,
//!   error messages or log events.
//! - Ciphers are immutable after construction and shared freely across
//!   threads.

pub mod codecs;
pub mod config;
pub mod key;
pub mod speck;
pub mod xor;

pub use codecs::DynCodec;
pub use config::{CipherConfig, CipherKind, ConfigError, ConfigLayer};
pub use speck::{Speck64, SpeckParams};
pub use xor::XorCipher;
