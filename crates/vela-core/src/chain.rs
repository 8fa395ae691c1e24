//! Chain tags and network selection.
//!
//! The supported chain set is closed and small, so chains are a plain
//! tagged enumeration and per-chain behaviour is dispatched over it
//! rather than through runtime type checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A supported blockchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChainType {
    /// Bitcoin.
    #[serde(rename = "BTC")]
    Btc,
    /// Ethereum.
    #[serde(rename = "ETH")]
    Eth,
    /// Tron.
    #[serde(rename = "TRX")]
    Trx,
    /// Solana.
    #[serde(rename = "SOL")]
    Sol,
}

impl ChainType {
    /// All supported chains, in canonical order.
    pub const ALL: [ChainType; 4] = [
        ChainType::Btc,
        ChainType::Eth,
        ChainType::Trx,
        ChainType::Sol,
    ];

    /// Ticker symbol for this chain.
    pub fn symbol(&self) -> &'static str {
        match self {
            ChainType::Btc => "BTC",
            ChainType::Eth => "ETH",
            ChainType::Trx => "TRX",
            ChainType::Sol => "SOL",
        }
    }

    /// Default BIP-44 coin type (SLIP-0044 registry).
    pub fn coin_type(&self) -> u32 {
        match self {
            ChainType::Btc => 0,
            ChainType::Eth => 60,
            ChainType::Trx => 195,
            ChainType::Sol => 501,
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown chain symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown chain: {0}")]
pub struct ChainParseError(pub String);

impl FromStr for ChainType {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BTC" => Ok(ChainType::Btc),
            "ETH" => Ok(ChainType::Eth),
            "TRX" => Ok(ChainType::Trx),
            "SOL" => Ok(ChainType::Sol),
            _ => Err(ChainParseError(s.to_string())),
        }
    }
}

/// Which network the wallet talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Lowercase name, matching configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
