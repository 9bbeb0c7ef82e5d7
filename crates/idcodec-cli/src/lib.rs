//! # idcodec-cli — Command Line for idcodec
//!
//! Provides the `idcodec` binary. Each subcommand lives in its own module
//! and returns `anyhow::Result<u8>` (the process exit code), writing to any
//! `std::io::Write` so handlers are testable without spawning a process.
//!
//! ## Subcommands
//!
//! - `idcodec encode` / `idcodec decode`: string ⇄ (encrypted) u64.
//! - `idcodec inspect`: all fields of a number, text or JSON.
//! - `idcodec format`: build a number from fields.
//! - `idcodec checksum`: check code of a 17-digit body.
//! - `idcodec keygen`: random key for `--key` or a config file.
//!
//! ## Cipher selection
//!
//! ```bash
//! export IDCODEC_CIPHER=speck64
//! export IDCODEC_KEY=$(idcodec keygen)
//! idcodec encode 11010519491231002X
//! idcodec --config idcodec.yaml decode 9583134876398791589
//! ```

pub mod cipher;
pub mod encode;
pub mod inspect;
pub mod keygen;
