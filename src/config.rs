use std::time::Duration;

/// Default number of ping attempts before a host is declared unreachable.
pub const MAX_PING_ATTEMPTS: u32 = 5;
/// Default per-attempt ping timeout in milliseconds.
pub const PING_TIMEOUT_MS: u64 = 1000;
/// Default HTTP probe timeout in milliseconds.
pub const HTTP_TIMEOUT_MS: u64 = 2000;
/// Default probed TCP ports.
pub const HTTP_PORTS: [u16; 2] = [80, 8080];

/// Tunable knobs for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct ProbeConfig {
    pub max_ping_attempts: u32,
    pub ping_timeout: Duration,
    pub http_timeout: Duration,
    pub http_ports: [u16; 2],
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_ping_attempts: MAX_PING_ATTEMPTS,
            ping_timeout: Duration::from_millis(PING_TIMEOUT_MS),
            http_timeout: Duration::from_millis(HTTP_TIMEOUT_MS),
            http_ports: HTTP_PORTS,
        }
    }
}
