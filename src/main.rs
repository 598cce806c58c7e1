use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use ping_sweep_rs::config::{self, ProbeConfig};
use ping_sweep_rs::pipeline::Pipeline;
use ping_sweep_rs::probe::NetProber;
use ping_sweep_rs::types::ProbeResults;
use ping_sweep_rs::addrs;

/// ping-sweep-rs — Concurrent ping + HTTP liveness prober for IP address lists.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ping-sweep-rs",
    version,
    about = "Ping a list of IP addresses and probe reachable ones for HTTP on two ports.",
    long_about = None
)]
struct Cli {
    /// Path to the address list file (one IP per line, `#` comments allowed).
    addrs: PathBuf,

    /// Ping attempts per host before declaring it unreachable.
    #[arg(long = "max-pings", default_value_t = config::MAX_PING_ATTEMPTS)]
    max_pings: u32,

    /// Per-attempt ping timeout in milliseconds.
    #[arg(long = "ping-timeout-ms", default_value_t = config::PING_TIMEOUT_MS)]
    ping_timeout_ms: u64,

    /// HTTP probe timeout in milliseconds.
    #[arg(long = "http-timeout-ms", default_value_t = config::HTTP_TIMEOUT_MS)]
    http_timeout_ms: u64,

    /// The two TCP ports probed for HTTP on reachable hosts.
    #[arg(long = "http-ports", num_args = 2, default_values_t = config::HTTP_PORTS)]
    http_ports: Vec<u16>,

    /// Write results as pretty JSON to this path (optional).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = ProbeConfig {
        max_ping_attempts: cli.max_pings,
        ping_timeout: Duration::from_millis(cli.ping_timeout_ms),
        http_timeout: Duration::from_millis(cli.http_timeout_ms),
        http_ports: [cli.http_ports[0], cli.http_ports[1]],
    };

    println!("ping-sweep-rs configuration:");
    println!("  addrs           : {}", cli.addrs.display());
    println!("  max_pings       : {}", cfg.max_ping_attempts);
    println!("  ping_timeout_ms : {}", cli.ping_timeout_ms);
    println!("  http_timeout_ms : {}", cli.http_timeout_ms);
    println!("  http_ports      : {:?}", cfg.http_ports);

    let addresses = addrs::load_addrs_from_path(&cli.addrs)?;
    println!("Loaded {} address(es)", addresses.len());

    let prober = Arc::new(NetProber::new()?);
    let pipeline = Pipeline::new(cfg, prober);
    let results = pipeline.run(addresses).await?;

    print_summary(&results, cfg.http_ports);

    if let Some(path) = cli.output.as_deref() {
        if let Err(e) = write_results_json(path, &results) {
            eprintln!("Failed to write JSON to {}: {}", path.display(), e);
        } else {
            println!("Wrote JSON results to {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(results: &ProbeResults, ports: [u16; 2]) {
    if results.hosts.is_empty() {
        println!("\nNo addresses were processed.");
        return;
    }

    let mut addr_w = "address".len();
    for h in &results.hosts {
        addr_w = addr_w.max(h.address.len());
    }
    let p80_h = format!("http {}", ports[0]);
    let p8080_h = format!("http {}", ports[1]);
    let reach_w = "reachable".len();
    let ping_w = "pings".len();
    let p80_w = p80_h.len().max("closed".len());
    let p8080_w = p8080_h.len().max("closed".len());

    println!("\nSummary of probe results:");
    println!(
        "{:<addr_w$}  {:<reach_w$}  {:>ping_w$}  {:<p80_w$}  {:<p8080_w$}",
        "address",
        "reachable",
        "pings",
        p80_h,
        p8080_h,
        addr_w = addr_w,
        reach_w = reach_w,
        ping_w = ping_w,
        p80_w = p80_w,
        p8080_w = p8080_w
    );
    println!(
        "{:-<addr_w$}  {:-<reach_w$}  {:-<ping_w$}  {:-<p80_w$}  {:-<p8080_w$}",
        "",
        "",
        "",
        "",
        "",
        addr_w = addr_w,
        reach_w = reach_w,
        ping_w = ping_w,
        p80_w = p80_w,
        p8080_w = p8080_w
    );
    for h in &results.hosts {
        println!(
            "{:<addr_w$}  {:<reach_w$}  {:>ping_w$}  {:<p80_w$}  {:<p8080_w$}",
            h.address,
            if h.reachable { "yes" } else { "no" },
            h.ping_attempts,
            if h.port80_open { "open" } else { "closed" },
            if h.port8080_open { "open" } else { "closed" },
            addr_w = addr_w,
            reach_w = reach_w,
            ping_w = ping_w,
            p80_w = p80_w,
            p8080_w = p8080_w
        );
    }
    println!("\nTotal addresses processed: {}", results.total);
    println!("Total reachable: {}", results.reachable_count);
    println!("Total HTTP {} open: {}", ports[0], results.port80_open_count);
    println!("Total HTTP {} open: {}", ports[1], results.port8080_open_count);
}

fn write_results_json(path: &std::path::Path, results: &ProbeResults) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}
