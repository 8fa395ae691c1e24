//! BIP-39 mnemonic generation, validation, and seed derivation.
//!
//! A phrase encodes entropy plus a checksum; the 512-bit seed is derived
//! from it with PBKDF2-HMAC-SHA512 (2048 iterations, no passphrase) per
//! the BIP-39 standard. Validation is a pure function of the word
//! sequence; an invalid phrase never produces a seed.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::WalletError;

/// Entropy strength of a generated phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// 128 bits of entropy, 12 words.
    Bits128,
    /// 256 bits of entropy, 24 words.
    Bits256,
}

impl Strength {
    /// Entropy length in bytes.
    pub fn entropy_len(&self) -> usize {
        match self {
            Strength::Bits128 => 16,
            Strength::Bits256 => 32,
        }
    }

    /// Number of words in a phrase of this strength.
    pub fn word_count(&self) -> usize {
        match self {
            Strength::Bits128 => 12,
            Strength::Bits256 => 24,
        }
    }
}

/// The 512-bit master seed derived from a mnemonic phrase.
///
/// Zeroized on drop; `Debug` is redacted. A seed is only ever obtained
/// from a validated phrase — it is derived, never independently stored.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; 64],
}

impl Seed {
    /// Wrap raw seed bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// Get the raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }
}

impl Clone for Seed {
    fn clone(&self) -> Self {
        Self { bytes: self.bytes }
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed").field("bytes", &"[REDACTED]").finish()
    }
}

/// Generate a fresh phrase from the OS cryptographic RNG.
pub fn generate(strength: Strength) -> Zeroizing<String> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_len()]);
    rand::rngs::OsRng.fill_bytes(entropy.as_mut_slice());
    let m = Mnemonic::from_entropy_in(Language::English, &entropy)
        .expect("16 or 32 bytes of entropy always produces a valid mnemonic");
    Zeroizing::new(m.to_string())
}

/// Whether a phrase passes checksum validation. Pure, no side effects.
pub fn validate(phrase: &str) -> bool {
    let normalized = Zeroizing::new(normalize(phrase));
    Mnemonic::parse_in(Language::English, normalized.as_str()).is_ok()
}

/// Validate a phrase and derive its 512-bit seed.
///
/// Fails closed: an invalid phrase never produces a seed.
pub fn to_seed(phrase: &str) -> Result<Seed, WalletError> {
    let normalized = Zeroizing::new(normalize(phrase));
    let m = Mnemonic::parse_in(Language::English, normalized.as_str())
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(Seed::from_bytes(m.to_seed("")))
}

/// Collapse whitespace and lowercase a phrase before parsing.
pub(crate) fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Standard BIP-39 test phrase (all-zero 128-bit entropy).
    const TEST_PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn generate_128_yields_12_words() {
        let phrase = generate(Strength::Bits128);
        assert_eq!(phrase.split_whitespace().count(), 12);
        assert!(validate(&phrase));
    }

    #[test]
    fn generate_256_yields_24_words() {
        let phrase = generate(Strength::Bits256);
        assert_eq!(phrase.split_whitespace().count(), 24);
        assert!(validate(&phrase));
    }

    #[test]
    fn generate_twice_differs() {
        let p1 = generate(Strength::Bits128);
        let p2 = generate(Strength::Bits128);
        assert_ne!(*p1, *p2);
    }

    #[test]
    fn known_vector_seed() {
        // Empty passphrase seed for the all-zero-entropy phrase.
        let seed = to_seed(TEST_PHRASE).unwrap();
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn seed_is_deterministic() {
        let s1 = to_seed(TEST_PHRASE).unwrap();
        let s2 = to_seed(TEST_PHRASE).unwrap();
        assert_eq!(s1.as_bytes(), s2.as_bytes());
    }

    #[test]
    fn invalid_phrase_rejected() {
        assert!(!validate("invalid mnemonic phrase test"));
        let err = to_seed("invalid mnemonic phrase test").unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic(_)));
    }

    #[test]
    fn bad_checksum_rejected() {
        // Valid words, wrong final word for the checksum.
        let mut words = vec!["abandon"; 11];
        words.push("zoo");
        assert!(!validate(&words.join(" ")));
    }

    #[test]
    fn whitespace_and_case_normalized() {
        let messy = format!("  {}  ", TEST_PHRASE.to_uppercase().replace(' ', "   "));
        let seed = to_seed(&messy).unwrap();
        assert_eq!(
            seed.as_bytes(),
            to_seed(TEST_PHRASE).unwrap().as_bytes()
        );
    }

    #[test]
    fn seed_debug_hides_bytes() {
        let seed = to_seed(TEST_PHRASE).unwrap();
        let debug = format!("{seed:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("5eb00b"));
    }

    #[test]
    fn strength_accessors() {
        assert_eq!(Strength::Bits128.entropy_len(), 16);
        assert_eq!(Strength::Bits128.word_count(), 12);
        assert_eq!(Strength::Bits256.entropy_len(), 32);
        assert_eq!(Strength::Bits256.word_count(), 24);
    }
}
