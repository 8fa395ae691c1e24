//! Chain-adapter capability consumed by the wallet core.
//!
//! The core produces raw key material; everything chain-specific —
//! address encoding, balance queries, transaction building, signing,
//! broadcast, fee estimation — lives behind this trait and is implemented
//! per chain by the surrounding application. The core depends only on the
//! signature.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::ChainType;
use crate::keys::DerivedKeyPair;

/// Error surface for adapter implementations.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("network: {0}")]
    Network(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("{0}")]
    Other(String),
}

/// A token balance held by an address (ERC-20, TRC-20, SPL, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub contract_address: String,
    /// Balance in the token's smallest unit, as a decimal string.
    pub balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "chainType")]
    pub chain: ChainType,
}

/// Status of a broadcast transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

/// One entry in an address's transaction history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub from: String,
    pub to: String,
    /// Transferred amount in the chain's smallest unit, as a decimal string.
    pub value: String,
    #[serde(rename = "chainType")]
    pub chain: ChainType,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub status: TxStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
}

/// Parameters for building and sending a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendParams {
    pub to: String,
    /// Amount in the chain's smallest unit, as a decimal string.
    pub amount: String,
    #[serde(rename = "chainType")]
    pub chain: ChainType,
    /// Token contract address for ERC-20/TRC-20/SPL transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
}

/// Per-chain capability implemented outside this workspace.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// The chain this adapter serves.
    fn chain(&self) -> ChainType;

    /// Encode a derived key pair into the chain's address format.
    fn generate_address(&self, keys: &DerivedKeyPair) -> Result<String, AdapterError>;

    /// Native-coin balance of an address, smallest unit, decimal string.
    async fn get_balance(&self, address: &str) -> Result<String, AdapterError>;

    /// Token balances held by an address.
    async fn get_tokens(&self, address: &str) -> Result<Vec<Token>, AdapterError>;

    /// Build, sign, and broadcast a transfer.
    async fn send_transaction(
        &self,
        params: &SendParams,
        keys: &DerivedKeyPair,
    ) -> Result<TransactionRecord, AdapterError>;

    /// Recent transactions involving an address, newest first.
    async fn get_transaction_history(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, AdapterError>;

    /// Whether a string is a well-formed address for this chain.
    fn validate_address(&self, address: &str) -> bool;

    /// Estimated fee for a transfer, smallest unit, decimal string.
    async fn estimate_fee(&self, params: &SendParams) -> Result<String, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_serde_uses_original_field_names() {
        let token = Token {
            symbol: "USDT".to_string(),
            name: "Tether".to_string(),
            decimals: 6,
            contract_address: "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(),
            balance: "1000000".to_string(),
            logo: None,
            chain: ChainType::Eth,
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["contractAddress"], token.contract_address);
        assert_eq!(json["chainType"], "ETH");
        assert!(json.get("logo").is_none());
    }

    #[test]
    fn tx_status_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&TxStatus::Pending).unwrap(), "\"pending\"");
        let back: TxStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(back, TxStatus::Confirmed);
    }

    #[test]
    fn send_params_roundtrip() {
        let params = SendParams {
            to: "0xabc".to_string(),
            amount: "42".to_string(),
            chain: ChainType::Trx,
            token: Some("TContract".to_string()),
            gas_limit: None,
            gas_price: None,
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: SendParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to, params.to);
        assert_eq!(back.chain, ChainType::Trx);
        assert_eq!(back.token.as_deref(), Some("TContract"));
    }
}
