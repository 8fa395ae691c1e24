//! # vela-wallet — HD key management for the Vela wallet.
//!
//! Turns a single BIP-39 phrase into per-chain signing keys and manages
//! its encrypted-at-rest backup. Secret state lives only inside a
//! [`WalletSession`] and is scrubbed on teardown.
//!
//! # Modules
//!
//! - [`error`] — `WalletError` enum
//! - [`mnemonic`] — phrase generation/validation, 512-bit seed derivation
//! - [`derivation`] — BIP-44 path construction and BIP-32 key derivation
//! - [`keyfile`] — password-encrypted keyfile codec
//! - [`session`] — lifecycle-managed owner of the in-memory secrets

pub mod derivation;
pub mod error;
pub mod keyfile;
pub mod mnemonic;
pub mod session;

// Re-exports for convenient access
pub use derivation::DerivationConfig;
pub use error::WalletError;
pub use keyfile::{KeyfileAccount, KeyfileDocument};
pub use mnemonic::{Seed, Strength};
pub use session::WalletSession;
