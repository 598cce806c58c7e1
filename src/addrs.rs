use anyhow::{Context, Result};
use std::fs;
use std::net::IpAddr;
use std::path::Path;

/// Parse an address-list file content into validated IP address strings.
///
/// Supported formats per line:
/// - a single IPv4 or IPv6 address: `10.0.0.1`
/// - comments: everything after `#` is ignored
/// - whitespace and blank lines are ignored
///
/// Lines that are not valid IP addresses are skipped rather than rejected,
/// so a list with stray junk still yields its usable entries.
pub fn parse_addrs_str(s: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw_line in s.lines() {
        let line = raw_line.split('#').next().map(str::trim).unwrap_or("");
        if line.is_empty() {
            continue;
        }
        if line.parse::<IpAddr>().is_ok() {
            out.push(line.to_string());
        }
    }
    out
}

/// Load an address list from a file path. Errors if the file cannot be read;
/// this is the only fatal failure the pipeline's caller sees.
pub fn load_addrs_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("failed to read address file: {}", path.as_ref().display()))?;
    Ok(parse_addrs_str(&content))
}
