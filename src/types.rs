use serde::{Deserialize, Serialize};

/// Status record for one probed address.
///
/// Created when the address enters the pipeline, filled in stage by stage,
/// and read-only once it lands in the collector. The port flags are only
/// meaningful when `reachable` is true; unreachable hosts keep them false
/// because no HTTP probe is ever issued for them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostStatus {
    pub address: String,
    pub reachable: bool,
    /// Ping attempts consumed, counting failures and hard errors alike.
    pub ping_attempts: u32,
    pub port80_open: bool,
    pub port8080_open: bool,
    /// RFC3339 UTC timestamp, stamped when the record reaches the collector.
    pub completed_at: String,
}

impl HostStatus {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reachable: false,
            ping_attempts: 0,
            port80_open: false,
            port8080_open: false,
            completed_at: String::new(),
        }
    }
}

/// Final result set plus aggregate counts, available once a run completes.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProbeResults {
    pub total: u64,
    pub reachable_count: u64,
    pub port80_open_count: u64,
    pub port8080_open_count: u64,
    pub hosts: Vec<HostStatus>,
}

impl ProbeResults {
    /// Compute aggregate counts over a set of completed records.
    pub fn from_hosts(hosts: Vec<HostStatus>) -> Self {
        let total = hosts.len() as u64;
        let reachable_count = hosts.iter().filter(|h| h.reachable).count() as u64;
        let port80_open_count = hosts.iter().filter(|h| h.port80_open).count() as u64;
        let port8080_open_count = hosts.iter().filter(|h| h.port8080_open).count() as u64;
        Self {
            total,
            reachable_count,
            port80_open_count,
            port8080_open_count,
            hosts,
        }
    }
}
