//! Live endpoint records.
//!
//! An [`RpcEndpoint`] combines the static candidate description with the
//! health state the failover controller maintains: failure count, last
//! failure time, and a smoothed response-time average.

use std::time::{Duration, Instant};

use crate::config::EndpointConfig;

/// EMA weight for new latency samples.
pub const LATENCY_EMA_ALPHA: f64 = 0.3;

/// One endpoint in a chain's pool, with live health state.
#[derive(Debug, Clone)]
pub struct RpcEndpoint {
    pub name: String,
    pub url: String,
    /// Lower is preferred.
    pub priority: u32,
    /// Requests per second the provider allows. Informational.
    pub rate_limit: u32,
    /// Consecutive failures observed on this endpoint while active.
    pub failure_count: u32,
    /// Smoothed probe latency in milliseconds.
    pub avg_response_time_ms: u64,
    pub is_healthy: bool,
    pub last_failure_at: Option<Instant>,
}

impl RpcEndpoint {
    /// Create a live record from its static configuration.
    pub fn from_config(config: &EndpointConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            priority: config.priority,
            rate_limit: config.rate_limit,
            failure_count: 0,
            avg_response_time_ms: 0,
            is_healthy: true,
            last_failure_at: None,
        }
    }

    /// Record a failed call or probe.
    pub fn record_failure(&mut self) {
        self.failure_count = self.failure_count.saturating_add(1);
        self.last_failure_at = Some(Instant::now());
        self.is_healthy = false;
    }

    /// Record a successful probe and fold its latency into the average.
    pub fn record_success(&mut self, latency: Duration) {
        let sample = latency.as_millis() as u64;
        self.avg_response_time_ms = if self.avg_response_time_ms == 0 {
            sample
        } else {
            (LATENCY_EMA_ALPHA * sample as f64
                + (1.0 - LATENCY_EMA_ALPHA) * self.avg_response_time_ms as f64) as u64
        };
        self.is_healthy = true;
    }

    /// Reset the failure counter and mark the endpoint healthy.
    pub fn reset(&mut self) {
        self.failure_count = 0;
        self.last_failure_at = None;
        self.is_healthy = true;
    }
}
