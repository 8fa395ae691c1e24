//! BIP-32/BIP-44 key derivation from the master seed.
//!
//! All chains derive uniformly over secp256k1 along
//! `m/44'/{coin}'/0'/0/{index}`; the chain tag only selects the coin
//! type. The unit returns raw key material — address encoding belongs to
//! the chain adapter, and nothing here assumes a particular encoding.

use bip32::{DerivationPath, XPrv};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::collections::HashMap;

use vela_core::{ChainType, DerivedKeyPair, SecretBytes};

use crate::error::WalletError;
use crate::mnemonic::Seed;

/// Per-chain coin-type overrides for the BIP-44 path.
///
/// The default table is the SLIP-0044 assignment carried by
/// [`ChainType::coin_type`]; deployments can remap individual chains.
#[derive(Debug, Clone, Default)]
pub struct DerivationConfig {
    coin_types: HashMap<ChainType, u32>,
}

impl DerivationConfig {
    /// Empty config: every chain uses its default coin type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the coin type used for one chain.
    pub fn set_coin_type(&mut self, chain: ChainType, coin_type: u32) {
        self.coin_types.insert(chain, coin_type);
    }

    /// Effective coin type for a chain.
    pub fn coin_type(&self, chain: ChainType) -> u32 {
        self.coin_types
            .get(&chain)
            .copied()
            .unwrap_or_else(|| chain.coin_type())
    }
}

/// The derivation path for a `(chain, account index)` slot.
///
/// Deterministic: identical inputs always yield the identical string.
pub fn path_for(chain: ChainType, account_index: u32, config: &DerivationConfig) -> String {
    format!("m/44'/{}'/0'/0/{}", config.coin_type(chain), account_index)
}

/// Walk the BIP-32 path from the seed-rooted master node to the leaf pair.
///
/// A hardened step that cannot produce a valid private key is
/// cryptographically negligible but surfaces as
/// [`WalletError::KeyDerivation`] rather than being ignored.
pub fn derive(
    seed: &Seed,
    chain: ChainType,
    account_index: u32,
    config: &DerivationConfig,
) -> Result<DerivedKeyPair, WalletError> {
    let path_str = path_for(chain, account_index, config);
    let path: DerivationPath = path_str
        .parse()
        .map_err(|e| WalletError::KeyDerivation(format!("invalid path {path_str}: {e}")))?;

    let xprv = XPrv::derive_from_path(seed.as_bytes(), &path)
        .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;

    let signing_key = xprv.private_key();
    let public_key = signing_key
        .verifying_key()
        .to_encoded_point(true)
        .as_bytes()
        .to_vec();
    let private_key = SecretBytes::from_bytes(signing_key.to_bytes().into());

    Ok(DerivedKeyPair {
        public_key,
        private_key,
        derivation_path: path_str,
        chain,
        account_index,
    })
}
