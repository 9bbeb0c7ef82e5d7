//! # idcodec CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idcodec_cli::cipher::{build_codec, resolve_config, CipherArgs};
use idcodec_cli::encode::{run_decode, run_encode, DecodeArgs, EncodeArgs};
use idcodec_cli::inspect::{
    run_checksum, run_format, run_inspect, ChecksumArgs, FormatArgs, InspectArgs,
};
use idcodec_cli::keygen::{run_keygen, KeygenArgs};
use idcodec_crypto::codecs::DynCodec;

/// idcodec: identity numbers as compact, optionally encrypted 64-bit integers.
#[derive(Parser, Debug)]
#[command(name = "idcodec", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML cipher configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    cipher: CipherArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode an identity number into a 64-bit integer.
    Encode(EncodeArgs),

    /// Decode a 64-bit integer back into an identity number.
    Decode(DecodeArgs),

    /// Show the fields, packed value and encoded value of a number.
    Inspect(InspectArgs),

    /// Build an identity number from its fields.
    Format(FormatArgs),

    /// Compute the check code of a 17-digit body.
    Checksum(ChecksumArgs),

    /// Generate a random cipher key.
    Keygen(KeygenArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "idcodec starting");

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let codec = || -> Result<DynCodec> {
        let config = resolve_config(cli.config.as_deref(), &cli.cipher)?;
        tracing::debug!(?config, "cipher configuration");
        build_codec(&config)
    };

    let mut out = std::io::stdout().lock();
    match &cli.command {
        Commands::Encode(args) => run_encode(args, &codec()?, &mut out),
        Commands::Decode(args) => run_decode(args, &codec()?, &mut out),
        Commands::Inspect(args) => run_inspect(args, &codec()?, &mut out),
        Commands::Format(args) => run_format(args, &mut out),
        Commands::Checksum(args) => run_checksum(args, &mut out),
        Commands::Keygen(args) => run_keygen(args, cli.cipher.cipher, &mut out),
    }
}
