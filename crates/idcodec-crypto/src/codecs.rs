//! Ready-made [`IdentityCodec`]s for each supported cipher.

use idcodec_core::{Cipher, CipherError, IdentityCodec, NoCipher};

use crate::config::{CipherConfig, CipherKind};
use crate::key;
use crate::speck::Speck64;
use crate::xor::XorCipher;

/// A codec whose cipher is chosen at runtime.
pub type DynCodec = IdentityCodec<Box<dyn Cipher>>;

/// Bit-field packing only, no encryption.
pub fn plain() -> IdentityCodec<NoCipher> {
    IdentityCodec::plain()
}

/// SPECK64/128 from 32-bit key words.
///
/// # Errors
///
/// [`CipherError::InvalidKey`] for fewer than two key words.
pub fn speck64(key: &[u32]) -> Result<IdentityCodec<Speck64>, CipherError> {
    Ok(IdentityCodec::new(Speck64::new(key)?))
}

/// SPECK64/128 from a little-endian byte key.
///
/// # Errors
///
/// [`CipherError::InvalidKey`] for keys shorter than 8 bytes or not a
/// multiple of 4 bytes.
pub fn speck64_from_bytes(key: &[u8]) -> Result<IdentityCodec<Speck64>, CipherError> {
    Ok(IdentityCodec::new(Speck64::from_bytes(key)?))
}

/// XOR whitening with a 64-bit key.
pub fn xor(key: u64) -> IdentityCodec<XorCipher> {
    IdentityCodec::new(XorCipher::new(key))
}

/// Build the codec described by `config`.
///
/// # Errors
///
/// - [`CipherError::InvalidKey`] if a keyed cipher has no key, the key is
///   not valid hex, or it has the wrong length for the cipher.
/// - [`CipherError::InvalidParameters`] for unusable SPECK64 parameters.
pub fn from_config(config: &CipherConfig) -> Result<DynCodec, CipherError> {
    let cipher: Box<dyn Cipher> = match config.cipher {
        CipherKind::None => Box::new(NoCipher),
        CipherKind::Speck64 => {
            let bytes = key_bytes(config)?;
            Box::new(Speck64::from_bytes_with_params(&bytes, config.params)?)
        }
        CipherKind::Xor => {
            let bytes = key_bytes(config)?;
            Box::new(XorCipher::from_bytes(&bytes)?)
        }
    };
    tracing::debug!(cipher = cipher.name(), "codec ready");
    Ok(IdentityCodec::new(cipher))
}

fn key_bytes(config: &CipherConfig) -> Result<zeroize::Zeroizing<Vec<u8>>, CipherError> {
    let hex = config.key.as_deref().ok_or_else(|| CipherError::InvalidKey {
        reason: format!("cipher {} requires a key", config.cipher),
    })?;
    key::bytes_from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speck::SpeckParams;
    use idcodec_core::ErrorKind;

    const ID: &str = "11010519491231002X";

    fn config(cipher: CipherKind, key: Option<&str>) -> CipherConfig {
        CipherConfig {
            cipher,
            key: key.map(str::to_string),
            params: SpeckParams::STANDARD,
        }
    }

    #[test]
    fn plain_value_is_the_raw_layout() {
        assert_eq!(plain().encode_str(ID).unwrap(), 7_566_369_655_062_561);
    }

    #[test]
    fn speck_byte_and_word_codecs_agree() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let a = speck64_from_bytes(&bytes).unwrap();
        let b = speck64(&[0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c]).unwrap();
        let value = a.encode_str(ID).unwrap();
        assert_eq!(value, 9_583_134_876_398_791_589);
        assert_eq!(b.encode_str(ID).unwrap(), value);
    }

    #[test]
    fn config_selects_cipher() {
        let codec = from_config(&config(
            CipherKind::Speck64,
            Some("000102030405060708090a0b0c0d0e0f"),
        ))
        .unwrap();
        assert_eq!(codec.cipher().name(), "speck64");
        assert_eq!(codec.encode_str(ID).unwrap(), 9_583_134_876_398_791_589);

        let codec = from_config(&config(CipherKind::None, None)).unwrap();
        assert_eq!(codec.encode_str(ID).unwrap(), 7_566_369_655_062_561);

        let codec = from_config(&config(CipherKind::Xor, Some("0100000000000000"))).unwrap();
        assert_eq!(codec.encode_str(ID).unwrap(), 7_566_369_655_062_561 ^ 1);
    }

    #[test]
    fn config_without_key_is_rejected() {
        let err = from_config(&config(CipherKind::Xor, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[test]
    fn config_with_wrong_key_length_is_rejected() {
        let err = from_config(&config(CipherKind::Speck64, Some("0011"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        let err = from_config(&config(CipherKind::Xor, Some("00112233"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }

    #[test]
    fn config_with_zero_rounds_is_rejected() {
        let mut cfg = config(CipherKind::Speck64, Some("000102030405060708090a0b0c0d0e0f"));
        cfg.params.rounds = 0;
        let err = from_config(&cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn config_with_excessive_rounds_is_rejected() {
        let env = crate::config::ConfigLayer::from_lookup(|name| match name {
            "IDCODEC_CIPHER" => Some("speck64".to_string()),
            "IDCODEC_KEY" => Some("000102030405060708090a0b0c0d0e0f".to_string()),
            "IDCODEC_ROUNDS" => Some(u32::MAX.to_string()),
            _ => None,
        })
        .unwrap();
        let err = from_config(&env.resolve().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn dyn_codec_debug_hides_key() {
        let codec = from_config(&config(
            CipherKind::Speck64,
            Some("000102030405060708090a0b0c0d0e0f"),
        ))
        .unwrap();
        let debug = format!("{codec:?}");
        assert!(debug.contains("[REDACTED]"), "{debug}");
    }
}
