use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use ::time::{format_description::well_known, OffsetDateTime};

use crate::config::ProbeConfig;
use crate::probe::{self, Prober};
use crate::types::{HostStatus, ProbeResults};

/// Thread-safe sink for completed records.
///
/// Appends are serialized by the mutex; arrival order is completion order,
/// which carries no meaning and is not preserved for display.
#[derive(Clone, Default)]
pub struct ResultCollector {
    entries: Arc<Mutex<Vec<HostStatus>>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize a record and append it. The completion timestamp is the
    /// only mutation after the probe stages.
    pub async fn record(&self, mut rec: HostStatus) {
        rec.completed_at = now_rfc3339();
        self.entries.lock().await.push(rec);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn take_hosts(&self) -> Vec<HostStatus> {
        let mut guard = self.entries.lock().await;
        std::mem::take(&mut *guard)
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Three-stage concurrent probing pipeline: ping, then HTTP on the first
/// configured port, then HTTP on the second, with unreachable hosts routed
/// straight to the collector after the ping stage.
///
/// Stages are connected by unbounded channels and each stage runs every
/// admitted item as its own task, so there is no per-stage concurrency cap
/// and no cross-item ordering. Per item, stage order is strict.
pub struct Pipeline {
    cfg: ProbeConfig,
    prober: Arc<dyn Prober>,
}

impl Pipeline {
    pub fn new(cfg: ProbeConfig, prober: Arc<dyn Prober>) -> Self {
        Self { cfg, prober }
    }

    /// Push every address through the pipeline and block until the last
    /// record has landed in the collector. An empty input is a valid run
    /// with empty results.
    pub async fn run(&self, addresses: Vec<String>) -> Result<ProbeResults> {
        let collector = ResultCollector::new();
        let (ping_tx, ping_rx) = mpsc::unbounded_channel::<HostStatus>();
        let (p80_tx, p80_rx) = mpsc::unbounded_channel::<HostStatus>();
        let (p8080_tx, p8080_rx) = mpsc::unbounded_channel::<HostStatus>();

        // Ping stage: consume the attempt budget, then route on the result.
        // Unreachable hosts bypass both HTTP stages; their port flags stay
        // false and no HTTP probe is ever issued for them.
        let ping_stage = {
            let prober = self.prober.clone();
            let cfg = self.cfg;
            let collector = collector.clone();
            tokio::spawn(run_stage(ping_rx, move |rec| {
                let prober = prober.clone();
                let collector = collector.clone();
                let p80_tx = p80_tx.clone();
                async move {
                    let rec = probe::check_reachability(&*prober, &cfg, rec).await;
                    if rec.reachable {
                        let _ = p80_tx.send(rec);
                    } else {
                        collector.record(rec).await;
                    }
                }
            }))
        };

        // First HTTP stage: single GET, no retry, result recorded whatever
        // the outcome, then hand off to the second port unconditionally.
        let p80_stage = {
            let prober = self.prober.clone();
            let cfg = self.cfg;
            tokio::spawn(run_stage(p80_rx, move |mut rec| {
                let prober = prober.clone();
                let p8080_tx = p8080_tx.clone();
                async move {
                    rec.port80_open = prober
                        .http_get(&rec.address, cfg.http_ports[0], cfg.http_timeout)
                        .await;
                    let _ = p8080_tx.send(rec);
                }
            }))
        };

        // Second HTTP stage, terminal for reachable hosts.
        let p8080_stage = {
            let prober = self.prober.clone();
            let cfg = self.cfg;
            let collector = collector.clone();
            tokio::spawn(run_stage(p8080_rx, move |mut rec| {
                let prober = prober.clone();
                let collector = collector.clone();
                async move {
                    rec.port8080_open = prober
                        .http_get(&rec.address, cfg.http_ports[1], cfg.http_timeout)
                        .await;
                    collector.record(rec).await;
                }
            }))
        };

        for address in addresses {
            let _ = ping_tx.send(HostStatus::new(address));
        }
        drop(ping_tx);

        ping_stage.await?;
        p80_stage.await?;
        p8080_stage.await?;

        Ok(ProbeResults::from_hosts(collector.take_hosts().await))
    }
}

/// One pipeline stage: spawn a task per received item, then drain the set.
///
/// Dropping the handler (and the downstream sender it owns) only after the
/// receiver closes AND every in-flight task has finished gives wait-group
/// completion semantics: downstream sees its channel close exactly when this
/// stage has nothing more to emit, with no race between the last item and
/// the completion signal.
async fn run_stage<F, Fut>(mut rx: UnboundedReceiver<HostStatus>, handler: F)
where
    F: Fn(HostStatus) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut inflight = JoinSet::new();
    while let Some(rec) = rx.recv().await {
        inflight.spawn(handler(rec));
    }
    while inflight.join_next().await.is_some() {}
}
