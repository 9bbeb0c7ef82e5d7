//! Cipher configuration.
//!
//! A [`CipherConfig`] names the cipher the codec applies to packed values
//! and carries its key material as hex. It is assembled from up to three
//! [`ConfigLayer`]s, highest precedence first:
//!
//! 1. explicit command-line flags,
//! 2. a YAML file,
//! 3. environment variables (`IDCODEC_CIPHER`, `IDCODEC_KEY`,
//!    `IDCODEC_ROUNDS`, `IDCODEC_ALPHA`, `IDCODEC_BETA`).
//!
//! ```yaml
//! cipher: speck64
//! key: 000102030405060708090a0b0c0d0e0f
//! rounds: 27
//! ```
//!
//! Custom `Debug` implementations redact the key.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::speck::SpeckParams;

/// Environment variable selecting the cipher.
pub const ENV_CIPHER: &str = "IDCODEC_CIPHER";
/// Environment variable holding the hex key.
pub const ENV_KEY: &str = "IDCODEC_KEY";
/// Environment variable overriding the SPECK64 round count.
pub const ENV_ROUNDS: &str = "IDCODEC_ROUNDS";
/// Environment variable overriding the SPECK64 alpha rotation.
pub const ENV_ALPHA: &str = "IDCODEC_ALPHA";
/// Environment variable overriding the SPECK64 beta rotation.
pub const ENV_BETA: &str = "IDCODEC_BETA";

/// Which cipher the codec applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    /// Packed values are emitted unencrypted.
    #[default]
    None,
    /// SPECK64 block cipher.
    Speck64,
    /// XOR with a 64-bit key.
    Xor,
}

impl CipherKind {
    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Speck64 => "speck64",
            Self::Xor => "xor",
        }
    }

    /// Whether this cipher needs key material.
    pub fn requires_key(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Self::None),
            "speck64" | "speck" => Ok(Self::Speck64),
            "xor" => Ok(Self::Xor),
            other => Err(ConfigError::UnknownCipher(other.to_string())),
        }
    }
}

/// Fully resolved cipher configuration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CipherConfig {
    /// Selected cipher.
    pub cipher: CipherKind,
    /// Hex-encoded key. Required unless `cipher` is `none`.
    pub key: Option<String>,
    /// SPECK64 parameters. Ignored by other ciphers.
    pub params: SpeckParams,
}

impl fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherConfig")
            .field("cipher", &self.cipher)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("params", &self.params)
            .finish()
    }
}

impl CipherConfig {
    /// Resolve configuration from environment variables alone.
    ///
    /// # Errors
    ///
    /// See [`ConfigLayer::from_env`] and [`ConfigLayer::resolve`].
    pub fn from_env() -> Result<Self, ConfigError> {
        ConfigLayer::from_env()?.resolve()
    }

    /// Resolve configuration from a YAML file alone.
    ///
    /// # Errors
    ///
    /// See [`ConfigLayer::from_file`] and [`ConfigLayer::resolve`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        ConfigLayer::from_file(path)?.resolve()
    }
}

/// One source of configuration. Unset fields defer to lower layers.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    /// Cipher selection.
    pub cipher: Option<CipherKind>,
    /// Hex key.
    pub key: Option<String>,
    /// SPECK64 round count.
    pub rounds: Option<u32>,
    /// SPECK64 alpha rotation.
    pub alpha: Option<u32>,
    /// SPECK64 beta rotation.
    pub beta: Option<u32>,
}

impl fmt::Debug for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLayer")
            .field("cipher", &self.cipher)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("rounds", &self.rounds)
            .field("alpha", &self.alpha)
            .field("beta", &self.beta)
            .finish()
    }
}

impl ConfigLayer {
    /// Parse a layer from YAML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Yaml`] on malformed YAML or unknown fields.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Yaml {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Yaml`]
    /// if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layer = Self::from_yaml_str(&text, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded cipher config file");
        Ok(layer)
    }

    /// Read the `IDCODEC_*` environment variables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownCipher`] or [`ConfigError::InvalidNumber`] for
    /// unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a layer from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// As [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let number = |name: &'static str| -> Result<Option<u32>, ConfigError> {
            get(name)
                .map(|v| {
                    v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                        name,
                        value: v.clone(),
                    })
                })
                .transpose()
        };
        Ok(Self {
            cipher: get(ENV_CIPHER).map(|v| v.parse()).transpose()?,
            key: get(ENV_KEY),
            rounds: number(ENV_ROUNDS)?,
            alpha: number(ENV_ALPHA)?,
            beta: number(ENV_BETA)?,
        })
    }

    /// Combine with a higher-precedence layer: fields set in `higher` win.
    pub fn overlay(self, higher: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            cipher: higher.cipher.or(self.cipher),
            key: higher.key.or(self.key),
            rounds: higher.rounds.or(self.rounds),
            alpha: higher.alpha.or(self.alpha),
            beta: higher.beta.or(self.beta),
        }
    }

    /// Fill defaults and check that a keyed cipher has a key.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingKey`] if the selected cipher needs a key and
    /// none was given.
    pub fn resolve(self) -> Result<CipherConfig, ConfigError> {
        let cipher = self.cipher.unwrap_or_default();
        if cipher.requires_key() && self.key.is_none() {
            return Err(ConfigError::MissingKey(cipher));
        }
        let defaults = SpeckParams::STANDARD;
        let config = CipherConfig {
            cipher,
            key: self.key,
            params: SpeckParams {
                rounds: self.rounds.unwrap_or(defaults.rounds),
                alpha: self.alpha.unwrap_or(defaults.alpha),
                beta: self.beta.unwrap_or(defaults.beta),
            },
        };
        tracing::debug!(
            cipher = %config.cipher,
            has_key = config.key.is_some(),
            rounds = config.params.rounds,
            "resolved cipher config"
        );
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Cipher name not recognized.
    #[error("unknown cipher {0:?} (expected none, speck64 or xor)")]
    UnknownCipher(String),
    /// A numeric setting could not be parsed.
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        /// Variable or field name.
        name: &'static str,
        /// The rejected text.
        value: String,
    },
    /// A keyed cipher was selected without key material.
    #[error("cipher {0} requires a key (set --key, `key:` in the config file, or IDCODEC_KEY)")]
    MissingKey(CipherKind),
    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid YAML for this schema.
    #[error("invalid config in {origin}: {reason}")]
    Yaml {
        /// Where the YAML came from.
        origin: String,
        /// Parser message.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_layers_resolve_to_plain() {
        let config = ConfigLayer::default().resolve().unwrap();
        assert_eq!(config.cipher, CipherKind::None);
        assert_eq!(config.params, SpeckParams::STANDARD);
        assert!(config.key.is_none());
    }

    #[test]
    fn env_layer_reads_all_variables() {
        let layer = ConfigLayer::from_lookup(lookup(&[
            (ENV_CIPHER, "SPECK64"),
            (ENV_KEY, "00112233445566778899aabbccddeeff"),
            (ENV_ROUNDS, "32"),
            (ENV_ALPHA, "7"),
            (ENV_BETA, " 2 "),
        ]))
        .unwrap();
        let config = layer.resolve().unwrap();
        assert_eq!(config.cipher, CipherKind::Speck64);
        assert_eq!(config.params, SpeckParams { rounds: 32, alpha: 7, beta: 2 });
    }

    #[test]
    fn empty_env_values_are_unset() {
        let layer = ConfigLayer::from_lookup(lookup(&[(ENV_CIPHER, ""), (ENV_ROUNDS, "  ")])).unwrap();
        assert_eq!(layer, ConfigLayer::default());
    }

    #[test]
    fn bad_env_values_are_reported() {
        let err = ConfigLayer::from_lookup(lookup(&[(ENV_ROUNDS, "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: ENV_ROUNDS, .. }));

        let err = ConfigLayer::from_lookup(lookup(&[(ENV_CIPHER, "aes")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCipher(_)));
    }

    #[test]
    fn higher_layer_wins_field_by_field() {
        let env = ConfigLayer {
            cipher: Some(CipherKind::Xor),
            key: Some("0102030405060708".to_string()),
            rounds: Some(20),
            ..ConfigLayer::default()
        };
        let flags = ConfigLayer {
            cipher: Some(CipherKind::Speck64),
            key: Some("000102030405060708090a0b0c0d0e0f".to_string()),
            ..ConfigLayer::default()
        };
        let config = env.overlay(flags).resolve().unwrap();
        assert_eq!(config.cipher, CipherKind::Speck64);
        assert_eq!(config.key.as_deref(), Some("000102030405060708090a0b0c0d0e0f"));
        assert_eq!(config.params.rounds, 20);
    }

    #[test]
    fn keyed_cipher_without_key_fails() {
        let layer = ConfigLayer {
            cipher: Some(CipherKind::Speck64),
            ..ConfigLayer::default()
        };
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::MissingKey(CipherKind::Speck64))
        ));
    }

    #[test]
    fn yaml_file_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cipher: xor\nkey: \"0807060504030201\"").unwrap();
        let config = CipherConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cipher, CipherKind::Xor);
        assert_eq!(config.key.as_deref(), Some("0807060504030201"));
    }

    #[test]
    fn yaml_rejects_unknown_fields() {
        let err = ConfigLayer::from_yaml_str("cipher: none\nmode: fast\n", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLayer::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn debug_redacts_key() {
        let config = CipherConfig {
            cipher: CipherKind::Xor,
            key: Some("deadbeefdeadbeef".to_string()),
            params: SpeckParams::STANDARD,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("deadbeef"));

        let layer = ConfigLayer {
            key: Some("deadbeefdeadbeef".to_string()),
            ..ConfigLayer::default()
        };
        assert!(!format!("{layer:?}").contains("deadbeef"));
    }

    #[test]
    fn cipher_kind_names() {
        assert_eq!("plain".parse::<CipherKind>().unwrap(), CipherKind::None);
        assert_eq!("Speck".parse::<CipherKind>().unwrap(), CipherKind::Speck64);
        assert_eq!(CipherKind::Xor.to_string(), "xor");
        assert!(!CipherKind::None.requires_key());
    }
}
