//! # Inspect, Format and Checksum Subcommands
//!
//! Field-level tools that do not round-trip through a packed value:
//!
//! - `idcodec inspect <ID>` shows every field, as text or JSON.
//! - `idcodec format --region .. --year .. --month .. --day .. --sequence ..`
//!   builds a number and its check code from fields.
//! - `idcodec checksum <17 DIGITS>` prints the check code of a body.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use idcodec_core::{append_check_code, bitfield, Cipher, IdentityCodec, IdentityNumber};

/// Arguments for `idcodec inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// 18-character identity number.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `idcodec format`.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Six-digit region code.
    #[arg(long)]
    pub region: u32,
    /// Birth year, 0-9999.
    #[arg(long)]
    pub year: u32,
    /// Birth month, 1-12.
    #[arg(long)]
    pub month: u32,
    /// Birth day, 1-31.
    #[arg(long)]
    pub day: u32,
    /// Sequence number, 0-999.
    #[arg(long)]
    pub sequence: u32,
}

/// Arguments for `idcodec checksum`.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// The first 17 digits of an identity number.
    #[arg(value_name = "DIGITS")]
    pub digits: String,
}

/// Everything `inspect` reports about one number.
#[derive(Debug, Serialize)]
pub struct Inspection {
    /// Canonical number.
    pub number: String,
    /// Masked form.
    pub masked: String,
    /// Region code.
    pub region_code: u32,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Sequence number.
    pub sequence: u32,
    /// Check code.
    pub checksum: char,
    /// Bit-field layout before encryption.
    pub packed: u64,
    /// Value after the configured cipher.
    pub encoded: u64,
    /// Name of the configured cipher.
    pub cipher: &'static str,
}

impl Inspection {
    fn new<C: Cipher>(id: &IdentityNumber, codec: &IdentityCodec<C>) -> Self {
        Self {
            number: id.number(),
            masked: id.masked(),
            region_code: id.region_code(),
            birth_date: id.birth_date(),
            sequence: id.sequence(),
            checksum: id.checksum(),
            packed: bitfield::encode(id),
            encoded: codec.encode(id),
            cipher: codec.cipher().name(),
        }
    }
}

/// Execute `idcodec inspect`.
pub fn run_inspect<C: Cipher>(
    args: &InspectArgs,
    codec: &IdentityCodec<C>,
    out: &mut impl Write,
) -> Result<u8> {
    let id = IdentityNumber::parse(&args.id).context("cannot inspect identity number")?;
    let report = Inspection::new(&id, codec);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(0);
    }
    writeln!(out, "number:      {}", report.number)?;
    writeln!(out, "masked:      {}", report.masked)?;
    writeln!(out, "region code: {:06}", report.region_code)?;
    writeln!(out, "birth date:  {}", report.birth_date.format("%Y-%m-%d"))?;
    writeln!(out, "sequence:    {:03}", report.sequence)?;
    writeln!(out, "check code:  {}", report.checksum)?;
    writeln!(out, "packed:      {} ({:#018x})", report.packed, report.packed)?;
    writeln!(
        out,
        "encoded:     {} ({:#018x}, cipher {})",
        report.encoded, report.encoded, report.cipher
    )?;
    Ok(0)
}

/// Execute `idcodec format`.
pub fn run_format(args: &FormatArgs, out: &mut impl Write) -> Result<u8> {
    let id = IdentityNumber::format(args.region, args.year, args.month, args.day, args.sequence)
        .context("cannot format identity number")?;
    tracing::info!(id = %id, "formatted");
    writeln!(out, "{}", id.as_str())?;
    Ok(0)
}

/// Execute `idcodec checksum`.
pub fn run_checksum(args: &ChecksumArgs, out: &mut impl Write) -> Result<u8> {
    let number = append_check_code(args.digits.trim()).context("cannot compute check code")?;
    let code = number.chars().last().unwrap_or_default();
    writeln!(out, "check code: {code}")?;
    writeln!(out, "number:     {number}")?;
    Ok(0)
}
