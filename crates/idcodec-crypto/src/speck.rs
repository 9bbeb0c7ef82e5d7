//! # SPECK64 Block Cipher
//!
//! A 64-bit ARX Feistel cipher over two 32-bit words. With the standard
//! parameters (27 rounds, rotations 8 and 3, four key words) this is
//! SPECK64/128 and reproduces the published test vector.
//!
//! The packed identity number is split into `high = v >> 32` and
//! `low = v & 0xFFFF_FFFF`; each round applies
//!
//! ```text
//! high = (high >>> alpha) + low  ^ k
//! low  = (low  <<< beta)         ^ high
//! ```
//!
//! with wrapping addition. Decryption runs the inverse rounds with the
//! round keys in reverse order.
//!
//! ## Key hygiene
//!
//! Round keys are zeroized when the cipher is dropped and never appear in
//! `Debug` output or log events.

use idcodec_core::{Cipher, CipherError};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::key;

/// Round count, rotation amounts and key size of a SPECK64 instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeckParams {
    /// Number of rounds, `1..=MAX_ROUNDS`.
    pub rounds: u32,
    /// Right rotation applied to `high` each round.
    pub alpha: u32,
    /// Left rotation applied to `low` each round.
    pub beta: u32,
}

impl SpeckParams {
    /// SPECK64/128: 27 rounds, alpha 8, beta 3.
    pub const STANDARD: Self = Self {
        rounds: 27,
        alpha: 8,
        beta: 3,
    };

    /// Upper bound on `rounds`; each round stores one key word.
    pub const MAX_ROUNDS: u32 = 1024;

    fn validate(&self) -> Result<(), CipherError> {
        if !(1..=Self::MAX_ROUNDS).contains(&self.rounds) {
            return Err(CipherError::InvalidParameters {
                reason: format!(
                    "rounds must be between 1 and {}, got {}",
                    Self::MAX_ROUNDS,
                    self.rounds
                ),
            });
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if value >= u32::BITS {
                return Err(CipherError::InvalidParameters {
                    reason: format!("{name} rotation {value} must be below {}", u32::BITS),
                });
            }
        }
        Ok(())
    }
}

impl Default for SpeckParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// SPECK64 with an expanded, immutable key schedule.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Speck64 {
    round_keys: Vec<u32>,
    alpha: u32,
    beta: u32,
}

impl Speck64 {
    /// Build SPECK64/128 from four 32-bit key words.
    ///
    /// # Errors
    ///
    /// [`CipherError::InvalidKey`] if fewer than two key words are given.
    pub fn new(key: &[u32]) -> Result<Self, CipherError> {
        Self::with_params(key, SpeckParams::STANDARD)
    }

    /// Build a cipher from key words and explicit parameters.
    ///
    /// The last key word seeds the first round key; the remaining words
    /// form the rotating schedule buffer.
    ///
    /// # Errors
    ///
    /// - [`CipherError::InvalidKey`] if fewer than two key words are given.
    /// - [`CipherError::InvalidParameters`] if `rounds` is zero or above
    ///   [`SpeckParams::MAX_ROUNDS`], or a rotation is 32 or more.
    pub fn with_params(key: &[u32], params: SpeckParams) -> Result<Self, CipherError> {
        params.validate()?;
        let Some((&seed, words)) = key.split_last().filter(|(_, words)| !words.is_empty()) else {
            return Err(CipherError::InvalidKey {
                reason: format!("key must have at least 2 words, got {}", key.len()),
            });
        };

        let SpeckParams {
            rounds,
            alpha,
            beta,
        } = params;
        let mut schedule = Zeroizing::new(words.to_vec());
        let mut round_keys = Vec::with_capacity(rounds as usize);
        round_keys.push(seed);
        let mut k = seed;
        for i in 0..rounds - 1 {
            let slot = &mut schedule[i as usize % words.len()];
            *slot = slot.rotate_right(alpha).wrapping_add(k) ^ i;
            k = k.rotate_left(beta) ^ *slot;
            round_keys.push(k);
        }

        tracing::debug!(rounds, alpha, beta, key_words = key.len(), "speck64 key schedule expanded");
        Ok(Self {
            round_keys,
            alpha,
            beta,
        })
    }

    /// Build SPECK64/128 from a byte key read as little-endian words.
    ///
    /// A 16-byte key and the equivalent four words produce identical round
    /// keys.
    ///
    /// # Errors
    ///
    /// [`CipherError::InvalidKey`] if the key is shorter than 8 bytes or not
    /// a multiple of 4 bytes.
    pub fn from_bytes(key: &[u8]) -> Result<Self, CipherError> {
        Self::from_bytes_with_params(key, SpeckParams::STANDARD)
    }

    /// Build a cipher from a byte key and explicit parameters.
    ///
    /// # Errors
    ///
    /// As [`from_bytes`](Self::from_bytes) and
    /// [`with_params`](Self::with_params).
    pub fn from_bytes_with_params(key: &[u8], params: SpeckParams) -> Result<Self, CipherError> {
        let words = key::words_from_bytes(key)?;
        Self::with_params(&words, params)
    }

    /// Number of rounds.
    pub fn rounds(&self) -> usize {
        self.round_keys.len()
    }

    #[cfg(test)]
    fn round_keys(&self) -> &[u32] {
        &self.round_keys
    }
}

impl Cipher for Speck64 {
    fn encrypt(&self, plaintext: u64) -> u64 {
        let (mut high, mut low) = split(plaintext);
        for &k in &self.round_keys {
            high = high.rotate_right(self.alpha).wrapping_add(low) ^ k;
            low = low.rotate_left(self.beta) ^ high;
        }
        join(high, low)
    }

    fn decrypt(&self, ciphertext: u64) -> u64 {
        let (mut high, mut low) = split(ciphertext);
        for &k in self.round_keys.iter().rev() {
            low = (low ^ high).rotate_right(self.beta);
            high = (high ^ k).wrapping_sub(low).rotate_left(self.alpha);
        }
        join(high, low)
    }

    fn name(&self) -> &'static str {
        "speck64"
    }
}

impl std::fmt::Debug for Speck64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Speck64")
            .field("rounds", &self.round_keys.len())
            .field("alpha", &self.alpha)
            .field("beta", &self.beta)
            .field("round_keys", &"[REDACTED]")
            .finish()
    }
}

fn split(v: u64) -> (u32, u32) {
    ((v >> 32) as u32, v as u32)
}

fn join(high: u32, low: u32) -> u64 {
    u64::from(high) << 32 | u64::from(low)
}
