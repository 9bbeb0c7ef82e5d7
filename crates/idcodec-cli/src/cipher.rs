//! # Cipher Selection
//!
//! Resolves the global `--cipher` / `--key` flags, an optional `--config`
//! YAML file and the `IDCODEC_*` environment variables into a ready codec.
//! Flags beat the file, the file beats the environment.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use idcodec_crypto::codecs::{self, DynCodec};
use idcodec_crypto::{CipherConfig, CipherKind, ConfigLayer};

/// Global cipher flags shared by every subcommand.
#[derive(Args, Clone, Default)]
pub struct CipherArgs {
    /// Cipher applied to packed values: none, speck64 or xor.
    #[arg(long, global = true, value_name = "NAME")]
    pub cipher: Option<CipherKind>,

    /// Hex-encoded key (16 bytes for speck64, 8 bytes for xor).
    #[arg(long, global = true, value_name = "HEX")]
    pub key: Option<String>,
}

impl std::fmt::Debug for CipherArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherArgs")
            .field("cipher", &self.cipher)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CipherArgs {
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            cipher: self.cipher,
            key: self.key.clone(),
            ..ConfigLayer::default()
        }
    }
}

/// Resolve the effective configuration from the process environment.
pub fn resolve_config(config_path: Option<&Path>, flags: &CipherArgs) -> Result<CipherConfig> {
    let env = ConfigLayer::from_env().context("invalid IDCODEC_* environment variable")?;
    resolve_layers(env, config_path, flags)
}

/// Resolve from an explicit environment layer.
pub fn resolve_layers(
    env: ConfigLayer,
    config_path: Option<&Path>,
    flags: &CipherArgs,
) -> Result<CipherConfig> {
    let file = match config_path {
        Some(path) => ConfigLayer::from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => ConfigLayer::default(),
    };
    let config = env.overlay(file).overlay(flags.layer()).resolve()?;
    Ok(config)
}

/// Build the codec for a resolved configuration.
pub fn build_codec(config: &CipherConfig) -> Result<DynCodec> {
    codecs::from_config(config).with_context(|| format!("cannot build {} cipher", config.cipher))
}
