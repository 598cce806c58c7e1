use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time;

use crate::config::ProbeConfig;
use crate::types::HostStatus;

/// Network operations the pipeline depends on, behind a trait so tests can
/// substitute a deterministic mock network.
///
/// Both operations return plain booleans: a timeout, a refused connection,
/// or an address that fails to resolve is a routine negative outcome here,
/// never an error.
#[async_trait]
pub trait Prober: Send + Sync {
    /// One ping attempt against `address`, bounded by `timeout`.
    async fn ping(&self, address: &str, timeout: Duration) -> bool;

    /// One HTTP GET against `address:port`, bounded by `timeout`. True only
    /// for a 2xx or 3xx final status.
    async fn http_get(&self, address: &str, port: u16, timeout: Duration) -> bool;
}

/// Real prober: ICMP echo via surge-ping, HTTP via a shared reqwest client.
///
/// The client's connection pool is safe for concurrent use and lives for the
/// whole run; it is dropped once after the run completes.
pub struct NetProber {
    http: reqwest::Client,
}

impl NetProber {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
        })
    }
}

#[async_trait]
impl Prober for NetProber {
    async fn ping(&self, address: &str, timeout: Duration) -> bool {
        // An unparseable address burns the attempt like any other failure;
        // there is deliberately no fast-fail path for hard errors.
        let ip: IpAddr = match address.parse() {
            Ok(ip) => ip,
            Err(_) => return false,
        };
        let payload = [0u8; 56];
        matches!(
            time::timeout(timeout, surge_ping::ping(ip, &payload)).await,
            Ok(Ok(_))
        )
    }

    async fn http_get(&self, address: &str, port: u16, timeout: Duration) -> bool {
        let url = format!("http://{}:{}/", bracket_if_v6(address), port);
        match self.http.get(&url).timeout(timeout).send().await {
            Ok(resp) => resp.status().is_success() || resp.status().is_redirection(),
            Err(_) => false,
        }
    }
}

/// IPv6 literals need brackets in a URL authority.
fn bracket_if_v6(address: &str) -> String {
    if address.contains(':') {
        format!("[{address}]")
    } else {
        address.to_string()
    }
}

/// Run the ping attempt budget for one record.
///
/// Attempts are sequential; the counter advances once per attempt whatever
/// the outcome, and the loop stops at the first success. A record that
/// exhausts the budget comes back with `reachable` still false.
pub async fn check_reachability(
    prober: &dyn Prober,
    cfg: &ProbeConfig,
    mut record: HostStatus,
) -> HostStatus {
    while record.ping_attempts < cfg.max_ping_attempts {
        record.ping_attempts += 1;
        if prober.ping(&record.address, cfg.ping_timeout).await {
            record.reachable = true;
            return record;
        }
    }
    record
}
