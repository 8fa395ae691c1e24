//! # vela-core — shared kernel types for the Vela wallet.
//!
//! Holds the closed set of supported chain tags, the network selector,
//! the typed key material produced by the derivation engine, and the
//! external chain-adapter capability that the surrounding application
//! implements per chain.
//!
//! # Modules
//!
//! - [`chain`] — `ChainType`, `Network`
//! - [`keys`] — `SecretBytes`, `DerivedKeyPair`
//! - [`adapter`] — `ChainAdapter` capability trait and its value types

pub mod adapter;
pub mod chain;
pub mod keys;

// Re-exports for convenient access
pub use adapter::{AdapterError, ChainAdapter, SendParams, Token, TransactionRecord, TxStatus};
pub use chain::{ChainParseError, ChainType, Network};
pub use keys::{DerivedKeyPair, SecretBytes};
