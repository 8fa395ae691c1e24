//! Endpoint configuration tables.
//!
//! Candidate endpoints are keyed by network, then chain. The built-in
//! defaults cover all four chains on both networks; deployments replace
//! or extend them with a JSON document of the same shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use vela_core::{ChainType, Network};

use crate::error::RpcError;

/// Static description of one candidate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    pub name: String,
    pub url: String,
    /// Lower is preferred.
    pub priority: u32,
    /// Requests per second the provider allows. Informational.
    #[serde(default)]
    pub rate_limit: u32,
}

/// Candidate endpoint tables for both networks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcConfig {
    #[serde(default)]
    pub mainnet: HashMap<ChainType, Vec<EndpointConfig>>,
    #[serde(default)]
    pub testnet: HashMap<ChainType, Vec<EndpointConfig>>,
}

impl RpcConfig {
    /// Built-in default endpoints for all supported chains.
    pub fn defaults() -> Self {
        fn entry(name: &str, url: &str, priority: u32, rate_limit: u32) -> EndpointConfig {
            EndpointConfig {
                name: name.to_string(),
                url: url.to_string(),
                priority,
                rate_limit,
            }
        }

        let mut mainnet = HashMap::new();
        mainnet.insert(
            ChainType::Btc,
            vec![entry("Blockstream", "https://blockstream.info/api", 1, 10)],
        );
        mainnet.insert(
            ChainType::Eth,
            vec![entry("Cloudflare", "https://cloudflare-eth.com", 1, 100)],
        );
        mainnet.insert(
            ChainType::Sol,
            vec![entry(
                "Solana Mainnet",
                "https://api.mainnet-beta.solana.com",
                1,
                100,
            )],
        );
        mainnet.insert(
            ChainType::Trx,
            vec![entry("TronGrid", "https://api.trongrid.io", 1, 100)],
        );

        let mut testnet = HashMap::new();
        testnet.insert(
            ChainType::Btc,
            vec![entry(
                "Blockstream Testnet",
                "https://blockstream.info/testnet/api",
                1,
                10,
            )],
        );
        testnet.insert(
            ChainType::Eth,
            vec![entry("Sepolia", "https://rpc.ankr.com/eth_sepolia", 1, 50)],
        );
        testnet.insert(
            ChainType::Sol,
            vec![entry("Solana Devnet", "https://api.devnet.solana.com", 1, 100)],
        );
        testnet.insert(
            ChainType::Trx,
            vec![entry("Shasta", "https://api.shasta.trongrid.io", 1, 100)],
        );

        Self { mainnet, testnet }
    }

    /// Parse a configuration document from JSON.
    pub fn from_json(json: &str) -> Result<Self, RpcError> {
        serde_json::from_str(json).map_err(|e| RpcError::InvalidConfig(e.to_string()))
    }

    /// The candidate table for one network.
    pub fn for_network(&self, network: Network) -> &HashMap<ChainType, Vec<EndpointConfig>> {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_chains_on_both_networks() {
        let config = RpcConfig::defaults();
        for chain in ChainType::ALL {
            assert!(
                !config.mainnet.get(&chain).unwrap().is_empty(),
                "missing mainnet defaults for {chain}"
            );
            assert!(
                !config.testnet.get(&chain).unwrap().is_empty(),
                "missing testnet defaults for {chain}"
            );
        }
    }

    #[test]
    fn for_network_selects_table() {
        let config = RpcConfig::defaults();
        let eth_main = &config.for_network(Network::Mainnet)[&ChainType::Eth][0];
        let eth_test = &config.for_network(Network::Testnet)[&ChainType::Eth][0];
        assert_eq!(eth_main.url, "https://cloudflare-eth.com");
        assert_eq!(eth_test.name, "Sepolia");
    }

    #[test]
    fn from_json_parses_config_shape() {
        let json = r#"{
            "mainnet": {
                "ETH": [
                    {"name": "Primary", "url": "https://rpc.example.com", "priority": 1, "rateLimit": 25},
                    {"name": "Backup", "url": "https://rpc2.example.com", "priority": 2}
                ]
            }
        }"#;
        let config = RpcConfig::from_json(json).unwrap();
        let eth = &config.mainnet[&ChainType::Eth];
        assert_eq!(eth.len(), 2);
        assert_eq!(eth[0].rate_limit, 25);
        // rateLimit defaults to 0 when omitted.
        assert_eq!(eth[1].rate_limit, 0);
        assert!(config.testnet.is_empty());
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = RpcConfig::from_json("{oops").unwrap_err();
        assert!(matches!(err, RpcError::InvalidConfig(_)));
    }

    #[test]
    fn config_json_roundtrip() {
        let config = RpcConfig::defaults();
        let json = serde_json::to_string(&config).unwrap();
        let back = RpcConfig::from_json(&json).unwrap();
        assert_eq!(back.mainnet[&ChainType::Btc], config.mainnet[&ChainType::Btc]);
    }
}
