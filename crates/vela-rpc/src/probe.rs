//! Endpoint liveness probes.
//!
//! A probe is the cheapest chain-specific request that proves a node is
//! alive: latest block height or a health endpoint. The trait seam lets
//! the failover controller be driven by scripted probes in tests.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use thiserror::Error;

use vela_core::ChainType;

/// Upper bound on a single probe request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a probe failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// No response within [`PROBE_TIMEOUT`]. Counts as a failed probe.
    #[error("probe timed out")]
    Timeout,

    #[error("http: {0}")]
    Http(String),

    #[error("unexpected status: {0}")]
    BadStatus(u16),
}

/// Chain-aware endpoint liveness check returning the measured latency.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, chain: ChainType, url: &str) -> Result<Duration, ProbeError>;
}

/// Production probe issuing the per-chain liveness request over HTTP.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn probe(&self, chain: ChainType, url: &str) -> Result<Duration, ProbeError> {
        let started = Instant::now();
        let base = url.trim_end_matches('/');

        let response = match chain {
            ChainType::Eth => {
                self.client
                    .post(base)
                    .json(&serde_json::json!({
                        "jsonrpc": "2.0",
                        "id": 1,
                        "method": "eth_blockNumber",
                        "params": [],
                    }))
                    .send()
                    .await
            }
            ChainType::Sol => {
                self.client
                    .post(base)
                    .json(&serde_json::json!({
                        "jsonrpc": "2.0",
                        "id": 1,
                        "method": "getHealth",
                    }))
                    .send()
                    .await
            }
            ChainType::Btc => self.client.get(format!("{base}/blocks/tip/height")).send().await,
            ChainType::Trx => self.client.get(format!("{base}/wallet/getnowblock")).send().await,
        };

        match response {
            Ok(resp) if resp.status().is_success() => Ok(started.elapsed()),
            Ok(resp) => Err(ProbeError::BadStatus(resp.status().as_u16())),
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout),
            Err(e) => Err(ProbeError::Http(e.to_string())),
        }
    }
}
