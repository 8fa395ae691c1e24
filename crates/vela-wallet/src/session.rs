//! Wallet session: the single owner of in-memory secret state.
//!
//! A [`WalletSession`] holds the mnemonic phrase and master seed for one
//! open wallet and exposes the mnemonic engine, derivation unit, and
//! keyfile codec behind one lifecycle-managed object. Mutating
//! operations take `&mut self` and read-only derivation takes `&self`,
//! so exclusivity between them is enforced by the borrow checker; a
//! caller that needs to share a session wraps it in its own lock.
//!
//! Secrets are overwritten in place by [`WalletSession::clear`], and the
//! wrappers also zeroize on drop, so an aborted teardown path still
//! scrubs the memory.

use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

use vela_core::{ChainType, DerivedKeyPair};

use crate::derivation::{self, DerivationConfig};
use crate::error::WalletError;
use crate::keyfile::{self, KeyfileAccount, KeyfileDocument};
use crate::mnemonic::{self, Seed, Strength};

struct SessionSecrets {
    phrase: Zeroizing<String>,
    seed: Seed,
}

/// A lifecycle-managed wallet holding mnemonic and seed in memory only.
pub struct WalletSession {
    secrets: Option<SessionSecrets>,
    derivation: DerivationConfig,
}

impl WalletSession {
    /// Create an empty session with default derivation settings.
    pub fn new() -> Self {
        Self::with_config(DerivationConfig::new())
    }

    /// Create an empty session with custom coin-type overrides.
    pub fn with_config(derivation: DerivationConfig) -> Self {
        Self {
            secrets: None,
            derivation,
        }
    }

    /// Whether the session currently holds a seed.
    pub fn is_initialized(&self) -> bool {
        self.secrets.is_some()
    }

    /// Generate a fresh wallet, replacing any held secret state.
    ///
    /// Returns the new phrase so the caller can present it for backup.
    pub fn generate_new(&mut self, strength: Strength) -> Zeroizing<String> {
        self.clear();
        let phrase = mnemonic::generate(strength);
        let seed = mnemonic::to_seed(&phrase)
            .expect("freshly generated phrase always carries a valid checksum");
        self.secrets = Some(SessionSecrets {
            phrase: phrase.clone(),
            seed,
        });
        info!(words = strength.word_count(), "wallet generated");
        phrase
    }

    /// Restore a wallet from an existing phrase, replacing held state.
    pub fn restore_from(&mut self, phrase: &str) -> Result<(), WalletError> {
        let seed = mnemonic::to_seed(phrase)?;
        self.clear();
        self.secrets = Some(SessionSecrets {
            phrase: Zeroizing::new(mnemonic::normalize(phrase)),
            seed,
        });
        info!("wallet restored from mnemonic");
        Ok(())
    }

    /// Derive the key pair for `(chain, account index)`.
    ///
    /// The returned pair is owned by the caller; the session retains no
    /// copy of derived material.
    pub fn derive_account(
        &self,
        chain: ChainType,
        account_index: u32,
    ) -> Result<DerivedKeyPair, WalletError> {
        let secrets = self.secrets.as_ref().ok_or(WalletError::NotInitialized)?;
        derivation::derive(&secrets.seed, chain, account_index, &self.derivation)
    }

    /// Export the held phrase as an encrypted keyfile document.
    ///
    /// The account list in the envelope is empty; the session does not
    /// persist derived accounts. Use
    /// [`WalletSession::export_keyfile_with_accounts`] to record them.
    pub fn export_keyfile(&self, password: &str) -> Result<KeyfileDocument, WalletError> {
        self.export_keyfile_with_accounts(password, BTreeMap::new())
    }

    /// Export the held phrase with a caller-supplied account list.
    pub fn export_keyfile_with_accounts(
        &self,
        password: &str,
        accounts: BTreeMap<ChainType, Vec<KeyfileAccount>>,
    ) -> Result<KeyfileDocument, WalletError> {
        let secrets = self.secrets.as_ref().ok_or(WalletError::NotInitialized)?;
        let document = keyfile::export(&secrets.phrase, password, accounts);
        info!(id = %document.id, "keyfile exported");
        Ok(document)
    }

    /// Import a keyfile document, replacing any held secret state.
    pub fn import_keyfile(
        &mut self,
        document: &KeyfileDocument,
        password: &str,
    ) -> Result<(), WalletError> {
        let phrase = keyfile::import(document, password)?;
        let seed = mnemonic::to_seed(&phrase)?;
        self.clear();
        self.secrets = Some(SessionSecrets { phrase, seed });
        info!(id = %document.id, "keyfile imported");
        Ok(())
    }

    /// The held phrase, for backup display. `None` once cleared.
    pub fn current_mnemonic(&self) -> Option<&str> {
        self.secrets.as_ref().map(|s| s.phrase.as_str())
    }

    /// Overwrite and drop the held secrets. Idempotent.
    pub fn clear(&mut self) {
        if let Some(mut secrets) = self.secrets.take() {
            secrets.phrase.zeroize();
            secrets.seed.zeroize();
            debug!("wallet session cleared");
        }
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
