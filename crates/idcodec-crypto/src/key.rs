//! Key material: hex encoding, byte-to-word conversion and generation.
//!
//! Byte keys are read as consecutive little-endian 32-bit words, so the
//! 16-byte key `00 01 02 .. 0f` becomes `[0x03020100, 0x07060504,
//! 0x0b0a0908, 0x0f0e0d0c]`.

use idcodec_core::CipherError;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// Bytes in the standard 128-bit key.
pub const STANDARD_KEY_BYTES: usize = 16;

/// Smallest accepted byte key: two 32-bit words.
pub const MIN_KEY_BYTES: usize = 8;

/// Converts a byte key into little-endian 32-bit words.
///
/// # Errors
///
/// [`CipherError::InvalidKey`] if the key is shorter than 8 bytes or its
/// length is not a multiple of 4.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Zeroizing<Vec<u32>>, CipherError> {
    if bytes.len() < MIN_KEY_BYTES {
        return Err(CipherError::InvalidKey {
            reason: format!(
                "key must be at least {MIN_KEY_BYTES} bytes, got {}",
                bytes.len()
            ),
        });
    }
    if bytes.len() % 4 != 0 {
        return Err(CipherError::InvalidKey {
            reason: format!(
                "key length must be a multiple of 4 bytes, got {}",
                bytes.len()
            ),
        });
    }
    Ok(Zeroizing::new(
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    ))
}

/// Decodes a hex string (case-insensitive, optional `0x` prefix) into bytes.
///
/// # Errors
///
/// [`CipherError::InvalidKey`] for odd length or non-hex characters. The
/// error never echoes the key text.
pub fn bytes_from_hex(hex: &str) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    let hex = hex.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    if !hex.is_ascii() {
        return Err(CipherError::InvalidKey {
            reason: "key hex must be ASCII".to_string(),
        });
    }
    if hex.len() % 2 != 0 {
        return Err(CipherError::InvalidKey {
            reason: "key hex must have even length".to_string(),
        });
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| CipherError::InvalidKey {
                reason: format!("invalid hex digit at position {i}"),
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(Zeroizing::new(bytes))
}

/// Encodes bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Draws a fresh 128-bit key from the operating system RNG.
pub fn generate_key() -> Zeroizing<[u8; STANDARD_KEY_BYTES]> {
    let mut key = Zeroizing::new([0u8; STANDARD_KEY_BYTES]);
    OsRng.fill_bytes(&mut key[..]);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use idcodec_core::ErrorKind;

    #[test]
    fn words_are_little_endian() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let words = words_from_bytes(&bytes).unwrap();
        assert_eq!(
            words.as_slice(),
            &[0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c]
        );
    }

    #[test]
    fn two_word_key_is_accepted() {
        assert_eq!(words_from_bytes(&[0xff; 8]).unwrap().len(), 2);
    }

    #[test]
    fn short_or_ragged_keys_are_rejected() {
        for len in [0, 4, 7, 9, 15, 17] {
            let err = words_from_bytes(&vec![0u8; len]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidKey, "len {len}");
        }
    }

    #[test]
    fn hex_round_trip() {
        let bytes = bytes_from_hex("0x000102030405060708090A0b0c0d0e0f").unwrap();
        assert_eq!(bytes.as_slice(), (0u8..16).collect::<Vec<_>>().as_slice());
        assert_eq!(to_hex(&bytes), "000102030405060708090a0b0c0d0e0f");
    }

    #[test]
    fn bad_hex_is_rejected_without_echo() {
        let err = bytes_from_hex("secretzz").unwrap_err();
        assert!(!format!("{err}").contains("secret"));
        assert!(bytes_from_hex("abc").is_err());
        assert!(bytes_from_hex("\u{00e9}\u{00e9}").is_err());
    }

    #[test]
    fn generated_keys_differ() {
        let a = generate_key();
        let b = generate_key();
        assert_ne!(*a, *b);
    }
}
