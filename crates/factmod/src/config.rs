//! Command-line configuration for both binaries.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Worker server: computes modular range products for connected clients.
#[derive(Parser, Debug, Clone)]
#[command(name = "factmod-server", version, about)]
pub struct ServerConfig {
    /// TCP port to listen on.
    #[arg(short, long, env = "FACTMOD_PORT")]
    pub port: u16,

    /// Threads used to compute each request.
    #[arg(
        long = "thread-count",
        visible_alias = "tnum",
        value_parser = parse_thread_count,
        env = "FACTMOD_THREADS"
    )]
    pub thread_count: usize,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

/// Distribution client: computes k! mod m across a roster of worker servers.
#[derive(Parser, Debug, Clone)]
#[command(name = "factmod-client", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct ClientConfig {
    /// Factorial argument k.
    #[arg(short, long, env = "FACTMOD_K")]
    pub k: u64,

    /// Modulus m (at least 1).
    #[arg(
        short,
        long,
        visible_alias = "mod",
        value_parser = clap::value_parser!(u64).range(1..),
        env = "FACTMOD_MODULUS"
    )]
    pub modulus: u64,

    /// Roster file with one host:port per line.
    #[arg(short, long, env = "FACTMOD_SERVERS", required_unless_present = "local")]
    pub servers: Option<PathBuf>,

    /// Compute in this process instead of on the roster, checked against
    /// an independent local computation.
    #[arg(long)]
    pub local: bool,

    /// Threads used by --local.
    #[arg(long, default_value = "4", value_parser = parse_thread_count)]
    pub pnum: usize,

    /// Connect/send/receive timeout per server (e.g. "500ms", "5s", "1m").
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Recompute locally and cross-check the distributed result.
    #[arg(long)]
    pub verify: bool,

    /// Print a JSON summary instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Write the result value to a file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quiet mode (only output the number).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ClientConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

fn parse_thread_count(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("thread count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse a duration string like "500ms", "30s", "5m", "1h". A bare number is
/// seconds.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let bad = |_| format!("invalid duration {s:?}");
    let d = if let Some(ms) = s.strip_suffix("ms") {
        Duration::from_millis(ms.parse().map_err(bad)?)
    } else if let Some(mins) = s.strip_suffix('m') {
        Duration::from_secs(mins.parse::<u64>().map_err(bad)?.saturating_mul(60))
    } else if let Some(hours) = s.strip_suffix('h') {
        Duration::from_secs(hours.parse::<u64>().map_err(bad)?.saturating_mul(3600))
    } else if let Some(secs) = s.strip_suffix('s') {
        Duration::from_secs(secs.parse().map_err(bad)?)
    } else {
        Duration::from_secs(s.parse().map_err(bad)?)
    };
    if d.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(d)
}
