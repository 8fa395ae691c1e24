//! Wallet error types.

use thiserror::Error;

/// Errors that can occur in wallet operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The phrase failed BIP-39 checksum validation.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// An operation requires a seed that is not currently held.
    #[error("wallet not initialized")]
    NotInitialized,

    /// A BIP-32 derivation step could not produce a valid key.
    #[error("key derivation: {0}")]
    KeyDerivation(String),

    /// Keyfile import failed. Deliberately does not distinguish a wrong
    /// password from a corrupted document.
    #[error("invalid password or corrupted keyfile")]
    InvalidPasswordOrCorruptKeyfile,

    /// Keyfile (de)serialization failure.
    #[error("serialization: {0}")]
    Serialization(String),
}
