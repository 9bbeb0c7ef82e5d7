//! # Keygen Subcommand
//!
//! Prints a fresh random key as hex, drawn from the OS RNG. The key is
//! sized for the selected cipher: 16 bytes for SPECK64/128 (the default),
//! 8 bytes for XOR.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use zeroize::Zeroizing;

use idcodec_crypto::key;
use idcodec_crypto::CipherKind;

/// Arguments for `idcodec keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print a YAML config snippet instead of the bare key.
    #[arg(long)]
    pub yaml: bool,
}

/// Execute `idcodec keygen`.
pub fn run_keygen(args: &KeygenArgs, cipher: Option<CipherKind>, out: &mut impl Write) -> Result<u8> {
    let cipher = match cipher {
        Some(CipherKind::Xor) => CipherKind::Xor,
        _ => CipherKind::Speck64,
    };
    let len = match cipher {
        CipherKind::Xor => 8,
        _ => key::STANDARD_KEY_BYTES,
    };
    let material = key::generate_key();
    let hex = Zeroizing::new(key::to_hex(&material[..len]));
    tracing::info!(cipher = %cipher, bytes = len, "generated key");

    if args.yaml {
        writeln!(out, "cipher: {cipher}")?;
        writeln!(out, "key: \"{}\"", hex.as_str())?;
    } else {
        writeln!(out, "{}", hex.as_str())?;
    }
    Ok(0)
}
