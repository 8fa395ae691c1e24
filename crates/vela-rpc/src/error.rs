//! RPC registry error types.

use thiserror::Error;
use vela_core::ChainType;

/// Errors surfaced by the endpoint registry and failover controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// No endpoint pool is configured for the requested chain.
    #[error("no RPC endpoint configured for {0}")]
    NoEndpointConfigured(ChainType),

    /// A failover cycle probed every candidate and none responded.
    /// Non-fatal: logged and retried on the next cycle.
    #[error("all RPC endpoints exhausted for {0}")]
    AllEndpointsExhausted(ChainType),

    /// The endpoint configuration could not be parsed.
    #[error("invalid endpoint configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_endpoint() {
        let e = RpcError::NoEndpointConfigured(ChainType::Sol);
        assert_eq!(e.to_string(), "no RPC endpoint configured for SOL");
    }

    #[test]
    fn display_exhausted() {
        let e = RpcError::AllEndpointsExhausted(ChainType::Eth);
        assert_eq!(e.to_string(), "all RPC endpoints exhausted for ETH");
    }

    #[test]
    fn clone_and_eq() {
        let e1 = RpcError::InvalidConfig("bad json".into());
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }
}
