//! # Encode and Decode Subcommands
//!
//! `idcodec encode <ID>` parses an identity number, packs it and applies the
//! configured cipher. `idcodec decode <VALUE>` reverses the process.
//!
//! ```bash
//! idcodec encode 11010519491231002X
//! idcodec --cipher speck64 --key 000102030405060708090a0b0c0d0e0f encode 11010519491231002X --hex
//! idcodec decode 0x84fe22657e682ba5 --cipher speck64 --key 000102030405060708090a0b0c0d0e0f
//! ```

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;

use idcodec_core::{Cipher, IdentityCodec, IdentityNumber};

/// Arguments for `idcodec encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// 18-character identity number.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the value as 0x-prefixed hex instead of decimal.
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `idcodec decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded value, decimal or 0x-prefixed hex.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Print the masked form instead of the full number.
    #[arg(long)]
    pub mask: bool,
}

/// Execute `idcodec encode`.
pub fn run_encode<C: Cipher>(
    args: &EncodeArgs,
    codec: &IdentityCodec<C>,
    out: &mut impl Write,
) -> Result<u8> {
    let id = IdentityNumber::parse(&args.id).context("cannot encode identity number")?;
    let value = codec.encode(&id);
    tracing::info!(id = %id, cipher = codec.cipher().name(), "encoded");

    if args.hex {
        writeln!(out, "{value:#018x}")?;
    } else {
        writeln!(out, "{value}")?;
    }
    Ok(0)
}

/// Execute `idcodec decode`.
pub fn run_decode<C: Cipher>(
    args: &DecodeArgs,
    codec: &IdentityCodec<C>,
    out: &mut impl Write,
) -> Result<u8> {
    let value = parse_value(&args.value)?;
    let id = codec
        .decode(value)
        .with_context(|| format!("cannot decode {}", args.value.trim()))?;
    tracing::info!(id = %id, cipher = codec.cipher().name(), "decoded");

    if args.mask {
        writeln!(out, "{}", id.masked())?;
    } else {
        writeln!(out, "{}", id.as_str())?;
    }
    Ok(0)
}

/// Parse a decimal or `0x`-prefixed hexadecimal u64.
pub fn parse_value(text: &str) -> Result<u64> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    match parsed {
        Ok(value) => Ok(value),
        Err(e) => bail!("invalid value {text:?}: expected a decimal or 0x-prefixed hex u64 ({e})"),
    }
}
