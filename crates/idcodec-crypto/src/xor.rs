//! XOR whitening: `encrypt(v) = decrypt(v) = v ^ key`.
//!
//! Hides the bit-field structure from casual inspection but offers no
//! cryptographic strength: two known plaintext/ciphertext pairs reveal the
//! key. Prefer [`Speck64`](crate::Speck64) wherever the packed values leave
//! a trusted boundary.

use idcodec_core::{Cipher, CipherError};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// XOR with a fixed 64-bit key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct XorCipher {
    key: u64,
}

impl XorCipher {
    /// Wrap a 64-bit key.
    pub fn new(key: u64) -> Self {
        Self { key }
    }

    /// Build from exactly 8 bytes, read little-endian.
    ///
    /// # Errors
    ///
    /// [`CipherError::InvalidKey`] unless `key` is 8 bytes long.
    pub fn from_bytes(key: &[u8]) -> Result<Self, CipherError> {
        let bytes: [u8; 8] = key.try_into().map_err(|_| CipherError::InvalidKey {
            reason: format!("xor key must be 8 bytes, got {}", key.len()),
        })?;
        Ok(Self::new(u64::from_le_bytes(bytes)))
    }
}

impl Cipher for XorCipher {
    fn encrypt(&self, plaintext: u64) -> u64 {
        plaintext ^ self.key
    }

    fn decrypt(&self, ciphertext: u64) -> u64 {
        ciphertext ^ self.key
    }

    fn name(&self) -> &'static str {
        "xor"
    }
}

impl std::fmt::Debug for XorCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XorCipher").field("key", &"[REDACTED]").finish()
    }
}
