//! Typed key material produced by the derivation engine.
//!
//! Secret bytes are zeroized on drop so key material does not linger in
//! freed memory, and their `Debug` output is redacted.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::chain::ChainType;

/// A 32-byte secret key, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
    bytes: [u8; 32],
}

impl SecretBytes {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the raw secret bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBytes")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A key pair derived for one `(chain, account index)` slot.
///
/// The private key is exclusively owned by the caller that requested the
/// derivation; the engine never retains derived pairs. Address encoding is
/// the chain adapter's job — this type carries raw key material only.
#[derive(Debug, Clone)]
pub struct DerivedKeyPair {
    /// Compressed SEC1 public key (33 bytes).
    pub public_key: Vec<u8>,
    /// Private scalar, zeroized on drop.
    pub private_key: SecretBytes,
    /// The BIP-44 path this pair was derived at.
    pub derivation_path: String,
    /// Which chain the pair is intended for.
    pub chain: ChainType,
    /// Account index within the chain.
    pub account_index: u32,
}

impl DerivedKeyPair {
    /// Hex encoding of the public key, for display and adapter input.
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_debug_hides_bytes() {
        let secret = SecretBytes::from_bytes([0xAB; 32]);
        let debug = format!("{secret:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("ab"));
    }

    #[test]
    fn secret_roundtrip() {
        let bytes = [7u8; 32];
        let secret = SecretBytes::from_bytes(bytes);
        assert_eq!(secret.as_bytes(), &bytes);
    }

    #[test]
    fn keypair_debug_redacts_private_key() {
        let pair = DerivedKeyPair {
            public_key: vec![0x02; 33],
            private_key: SecretBytes::from_bytes([0xCD; 32]),
            derivation_path: "m/44'/60'/0'/0/0".to_string(),
            chain: ChainType::Eth,
            account_index: 0,
        };
        let debug = format!("{pair:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("cd"));
    }

    #[test]
    fn public_key_hex() {
        let pair = DerivedKeyPair {
            public_key: vec![0x02, 0xFF],
            private_key: SecretBytes::from_bytes([0u8; 32]),
            derivation_path: String::new(),
            chain: ChainType::Btc,
            account_index: 0,
        };
        assert_eq!(pair.public_key_hex(), "02ff");
    }
}
