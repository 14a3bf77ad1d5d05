//! Application entry points for the server and client binaries.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use factmod_cli::output::{summary_json, write_to_file};
use factmod_cli::ui;
use factmod_core::constants::exit_codes;
use factmod_core::product::reference_factorial_mod;
use factmod_orchestration::interfaces::{DistributedResult, ResultPresenter, ShardWorker};
use factmod_orchestration::orchestrator::{
    cross_check, execute_distributed, execute_local, plan_shards,
};
use factmod_orchestration::remote::TcpShardWorker;
use factmod_orchestration::roster::load_roster;
use factmod_server::Server;

use crate::config::{ClientConfig, ServerConfig};
use crate::version::banner;

/// Install the stderr log subscriber.
pub fn init_tracing(default: Level, verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(default, verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// `--verbose` forces DEBUG. Otherwise `RUST_LOG` directives apply, and
/// `default` only when it sets none.
fn log_filter(default: Level, verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let (level, directives) = if verbose {
        (Level::DEBUG, "")
    } else {
        (default, rust_log.map_or("", str::trim))
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

/// Bind and serve until the process is terminated.
pub fn run_server(config: &ServerConfig) -> Result<()> {
    info!("{}", banner("factmod-server"));
    let server = Server::bind((config.bind, config.port), config.thread_count)
        .with_context(|| format!("cannot bind {}:{}", config.bind, config.port))?;
    let addr = server
        .local_addr()
        .context("cannot read listening address")?;

    ctrlc_handler()?;

    println!("Server listening at {addr}");
    server.serve()?;
    Ok(())
}

fn ctrlc_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        info!("interrupted, shutting down");
        std::process::exit(exit_codes::ERROR_CANCELED);
    })
    .context("cannot install Ctrl+C handler")
}

/// Compute `k! mod m`, over the roster or with `--local` in this process,
/// and report the result through `presenter`.
pub fn run_client(config: &ClientConfig, presenter: &dyn ResultPresenter) -> Result<()> {
    info!("{}", banner("factmod-client"));
    let result = if config.local {
        run_local(config)?
    } else {
        run_distributed(config, presenter)?
    };

    if config.json {
        println!("{}", summary_json(&result).context("cannot serialize result")?);
    } else {
        presenter.present_result(&result);
    }

    if config.verify && !config.local {
        verify(config, &result)?;
    }

    if let Some(ref path) = config.output {
        write_to_file(path, result.value)
            .with_context(|| format!("cannot write {}", path.display()))?;
    }

    Ok(())
}

fn run_distributed(
    config: &ClientConfig,
    presenter: &dyn ResultPresenter,
) -> Result<DistributedResult> {
    let path = config
        .servers
        .as_deref()
        .context("--servers is required without --local")?;
    let servers = load_roster(path)?;
    let workers: Vec<Arc<dyn ShardWorker>> = servers
        .into_iter()
        .map(|s| Arc::new(TcpShardWorker::new(s, config.timeout)) as Arc<dyn ShardWorker>)
        .collect();

    let names: Vec<String> = workers.iter().map(|w| w.name()).collect();
    presenter.present_plan(&names, &plan_shards(config.k, workers.len()));

    Ok(execute_distributed(&workers, config.k, config.modulus)?)
}

/// Threaded local computation, always checked against the rayon reference.
fn run_local(config: &ClientConfig) -> Result<DistributedResult> {
    let result = execute_local(config.k, config.modulus, config.pnum)?;
    let reference = reference_factorial_mod(config.k, config.modulus)?;
    cross_check(&result, reference)?;
    info!(reference, threads = config.pnum, "local result verified");
    Ok(result)
}

fn verify(config: &ClientConfig, result: &DistributedResult) -> Result<()> {
    if result.is_partial() {
        warn!("skipping verification of a partial result");
        if !config.quiet {
            ui::print_warning("verification skipped: result is partial");
        }
        return Ok(());
    }

    let reference = reference_factorial_mod(result.k, result.modulus)?;
    cross_check(result, reference)?;
    info!(reference, "distributed result verified");
    if !config.quiet && !config.json {
        ui::print_success("verified against local computation");
    }
    Ok(())
}
