//! Endpoint health registry and failover controller.
//!
//! [`RpcManager`] tracks, per chain, a prioritized pool of candidate
//! endpoints and the one currently selected for use. Two sources mutate
//! the same per-chain entry: caller-reported failures from failed chain
//! adapter calls, and the periodic health loop. Each chain's state lives
//! behind its own lock (never held across an await) and failover cycles
//! are serialized by a per-chain async gate, so chains never block each
//! other and concurrent reports cannot lose updates.
//!
//! Failover never blocks callers on success: if no alternative responds,
//! the current selection keeps the job with its counter cleared and the
//! next cycle retries.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use vela_core::{ChainType, Network};

use crate::config::{EndpointConfig, RpcConfig};
use crate::endpoint::RpcEndpoint;
use crate::error::RpcError;
use crate::probe::{HealthProbe, HttpProbe};

/// Consecutive failures on the active endpoint before failover starts.
pub const MAX_FAILURES: u32 = 3;

/// Cadence of the periodic health loop.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// How long after the last failure a successful probe may clear the
/// failure counter in place.
pub const FAILURE_RESET_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Failover controller state for one chain, derived for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainStatus {
    Healthy,
    Degraded,
    FailingOver,
    /// Every candidate failed the last failover cycle. Not sticky; the
    /// next cycle retries.
    Exhausted,
}

/// Read-only per-chain snapshot for observability.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcStats {
    pub chain: ChainType,
    pub name: String,
    pub url: String,
    pub failure_count: u32,
    pub avg_response_time_ms: u64,
    pub is_healthy: bool,
    pub status: ChainStatus,
}

struct ChainState {
    pool: Vec<RpcEndpoint>,
    /// Index into `pool` of the active selection.
    active: Option<usize>,
    failing_over: bool,
    exhausted: bool,
}

impl ChainState {
    fn active_endpoint(&self) -> Option<&RpcEndpoint> {
        self.active.map(|i| &self.pool[i])
    }

    fn active_endpoint_mut(&mut self) -> Option<&mut RpcEndpoint> {
        self.active.map(|i| &mut self.pool[i])
    }

    /// Select the best-priority candidate if nothing is selected yet.
    /// First pool member wins a priority tie.
    fn ensure_active(&mut self) {
        if self.active.is_none() {
            if let Some(best) = self.pool.iter().map(|e| e.priority).min() {
                self.active = self.pool.iter().position(|e| e.priority == best);
            }
        }
    }

    /// Candidates ordered by priority (stable for equal priorities).
    fn sorted_candidates(&self) -> Vec<RpcEndpoint> {
        let mut candidates = self.pool.clone();
        candidates.sort_by_key(|e| e.priority);
        candidates
    }

    /// Make the endpoint with `url` the active selection, reset its
    /// failure state, and fold in the probe latency that vouched for it.
    fn switch_to(&mut self, url: &str, latency: Duration) {
        if let Some(index) = self.pool.iter().position(|e| e.url == url) {
            self.pool[index].reset();
            self.pool[index].record_success(latency);
            self.active = Some(index);
        }
    }
}

struct ChainEntry {
    state: Mutex<ChainState>,
    /// Serializes failover cycles for this chain.
    failover_gate: tokio::sync::Mutex<()>,
}

/// Process-wide registry of endpoint pools and active selections.
pub struct RpcManager {
    network: Network,
    chains: HashMap<ChainType, ChainEntry>,
    probe: Arc<dyn HealthProbe>,
}

impl RpcManager {
    /// Build a manager probing over HTTP.
    pub fn new(config: &RpcConfig, network: Network) -> Self {
        Self::with_probe(config, network, Arc::new(HttpProbe::new()))
    }

    /// Build a manager with a caller-supplied probe implementation.
    pub fn with_probe(
        config: &RpcConfig,
        network: Network,
        probe: Arc<dyn HealthProbe>,
    ) -> Self {
        let table = config.for_network(network);
        let mut chains = HashMap::new();
        for chain in ChainType::ALL {
            let pool = table
                .get(&chain)
                .map(|candidates| candidates.iter().map(RpcEndpoint::from_config).collect())
                .unwrap_or_default();
            let mut state = ChainState {
                pool,
                active: None,
                failing_over: false,
                exhausted: false,
            };
            state.ensure_active();
            chains.insert(
                chain,
                ChainEntry {
                    state: Mutex::new(state),
                    failover_gate: tokio::sync::Mutex::new(()),
                },
            );
        }
        Self {
            network,
            chains,
            probe,
        }
    }

    /// The network this registry serves.
    pub fn network(&self) -> Network {
        self.network
    }

    /// URL of the active endpoint for a chain.
    pub fn active_url(&self, chain: ChainType) -> Result<String, RpcError> {
        let mut state = self.chains[&chain].state.lock();
        state.ensure_active();
        state
            .active_endpoint()
            .map(|e| e.url.clone())
            .ok_or(RpcError::NoEndpointConfigured(chain))
    }

    /// All candidates for a chain, ordered by priority.
    pub fn candidates(&self, chain: ChainType) -> Vec<RpcEndpoint> {
        self.chains[&chain].state.lock().sorted_candidates()
    }

    /// Manually pin the active endpoint to a pool member.
    ///
    /// Returns `false` if `url` is not in the chain's pool. A successful
    /// pin resets the endpoint's failure state.
    pub fn set_endpoint(&self, chain: ChainType, url: &str) -> bool {
        let mut state = self.chains[&chain].state.lock();
        let Some(index) = state.pool.iter().position(|e| e.url == url) else {
            return false;
        };
        state.pool[index].reset();
        state.active = Some(index);
        state.exhausted = false;
        info!(%chain, endpoint = %state.pool[index].name, url, "rpc_endpoint: manually pinned");
        true
    }

    /// Append a candidate to a chain's pool.
    ///
    /// Does not affect the current active selection; a chain whose pool
    /// was empty picks it up on the next `active_url` read.
    pub fn add_custom_endpoint(&self, chain: ChainType, config: &EndpointConfig) {
        let mut state = self.chains[&chain].state.lock();
        state.pool.push(RpcEndpoint::from_config(config));
        debug!(%chain, endpoint = %config.name, url = %config.url, "rpc_endpoint: custom endpoint added");
    }

    /// Record a failed call against the chain's active endpoint.
    ///
    /// At [`MAX_FAILURES`] the controller switches to the next healthy
    /// candidate. The error detail is logged, never rethrown.
    pub async fn report_failure(&self, chain: ChainType, error: &str) {
        let should_fail_over = {
            let mut state = self.chains[&chain].state.lock();
            let Some(active) = state.active_endpoint_mut() else {
                return;
            };
            active.record_failure();
            warn!(
                %chain,
                endpoint = %active.name,
                failures = active.failure_count,
                error,
                "rpc_failure: reported"
            );
            active.failure_count >= MAX_FAILURES
        };

        if should_fail_over {
            if let Err(e) = self.fail_over(chain).await {
                warn!(%chain, error = %e, "rpc_failover: pool exhausted this cycle");
            }
        }
    }

    /// Probe candidates round-robin, starting after the current
    /// endpoint's position, and switch to the first that responds.
    async fn fail_over(&self, chain: ChainType) -> Result<(), RpcError> {
        let entry = &self.chains[&chain];
        let _gate = entry.failover_gate.lock().await;

        let (candidates, current_url) = {
            let mut state = entry.state.lock();
            let Some(active) = state.active_endpoint() else {
                return Ok(());
            };
            // A cycle that finished while we waited on the gate already
            // cleared the counter.
            if active.failure_count < MAX_FAILURES {
                return Ok(());
            }
            let current_url = active.url.clone();
            if state.pool.len() <= 1 {
                if let Some(active) = state.active_endpoint_mut() {
                    active.failure_count = 0;
                }
                warn!(%chain, "rpc_failover: no alternative endpoints, keeping current selection");
                return Ok(());
            }
            state.failing_over = true;
            (state.sorted_candidates(), current_url)
        };

        let start = candidates
            .iter()
            .position(|e| e.url == current_url)
            .map(|i| i + 1)
            .unwrap_or(0);

        for offset in 0..candidates.len() {
            let candidate = &candidates[(start + offset) % candidates.len()];
            match self.probe.probe(chain, &candidate.url).await {
                Ok(latency) => {
                    let mut state = entry.state.lock();
                    state.switch_to(&candidate.url, latency);
                    state.failing_over = false;
                    state.exhausted = false;
                    info!(
                        %chain,
                        endpoint = %candidate.name,
                        url = %candidate.url,
                        "rpc_failover: switched endpoint"
                    );
                    return Ok(());
                }
                Err(e) => {
                    debug!(
                        %chain,
                        endpoint = %candidate.name,
                        error = %e,
                        "rpc_failover: candidate probe failed"
                    );
                }
            }
        }

        // Every candidate failed. Keep the selection with a cleared
        // counter and let the next cycle retry; callers are not starved
        // waiting for failover to succeed.
        let mut state = entry.state.lock();
        state.failing_over = false;
        state.exhausted = true;
        if let Some(active) = state.active_endpoint_mut() {
            active.failure_count = 0;
        }
        Err(RpcError::AllEndpointsExhausted(chain))
    }

    /// Probe every chain's active endpoint once.
    ///
    /// A failed probe counts as a reported failure. A successful probe
    /// folds the latency into the average and clears the failure counter
    /// in place once the reset window has elapsed — recovery without a
    /// forced switch.
    pub async fn run_health_checks(&self) {
        for chain in ChainType::ALL {
            let target = {
                let mut state = self.chains[&chain].state.lock();
                state.ensure_active();
                state.active_endpoint().map(|e| e.url.clone())
            };
            let Some(url) = target else {
                continue;
            };

            match self.probe.probe(chain, &url).await {
                Ok(latency) => {
                    let mut state = self.chains[&chain].state.lock();
                    state.exhausted = false;
                    if let Some(active) = state.active_endpoint_mut() {
                        if active.url == url {
                            active.record_success(latency);
                            let recovered = active.failure_count > 0
                                && active
                                    .last_failure_at
                                    .map(|at| at.elapsed() >= FAILURE_RESET_WINDOW)
                                    .unwrap_or(true);
                            if recovered {
                                active.failure_count = 0;
                                active.last_failure_at = None;
                                info!(
                                    %chain,
                                    endpoint = %active.name,
                                    "rpc_health: failure count reset after recovery"
                                );
                            }
                        }
                    }
                }
                Err(e) => {
                    debug!(%chain, url = %url, error = %e, "rpc_health: probe failed");
                    self.report_failure(chain, &e.to_string()).await;
                }
            }
        }
    }

    /// Spawn the periodic health loop. Returns a handle that stops it.
    pub fn spawn_health_loop(self: &Arc<Self>) -> HealthLoopHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(HEALTH_CHECK_INTERVAL);
            // interval fires immediately; consume the first tick so the
            // loop probes on the steady cadence.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        debug!("rpc_health: loop shutting down");
                        break;
                    }
                    _ = ticker.tick() => manager.run_health_checks().await,
                }
            }
        });
        HealthLoopHandle { shutdown_tx, task }
    }

    /// Per-chain observability snapshot. Read-only.
    pub fn stats(&self) -> Vec<RpcStats> {
        let mut stats = Vec::new();
        for chain in ChainType::ALL {
            let mut state = self.chains[&chain].state.lock();
            state.ensure_active();
            let (failing_over, exhausted) = (state.failing_over, state.exhausted);
            let Some(active) = state.active_endpoint() else {
                continue;
            };
            let status = if failing_over {
                ChainStatus::FailingOver
            } else if exhausted {
                ChainStatus::Exhausted
            } else if active.failure_count == 0 {
                ChainStatus::Healthy
            } else {
                ChainStatus::Degraded
            };
            stats.push(RpcStats {
                chain,
                name: active.name.clone(),
                url: active.url.clone(),
                failure_count: active.failure_count,
                avg_response_time_ms: active.avg_response_time_ms,
                is_healthy: active.is_healthy,
                status,
            });
        }
        stats
    }
}

/// Handle to the spawned health loop.
pub struct HealthLoopHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl HealthLoopHandle {
    /// Stop the loop. Any in-flight probe is abandoned, not awaited.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
    }
}
