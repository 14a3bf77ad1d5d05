//! CLI result presenter.

use std::io::{self, Write};

use factmod_core::range::Range;
use factmod_orchestration::interfaces::{DistributedResult, ResultPresenter};

use crate::output::{format_duration, format_number, format_range};
use crate::ui::{self, Status};

/// CLI result presenter.
///
/// Reports go to stdout, errors to stderr. The `write_*` methods render
/// into any sink.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Render the server → range assignment. Nothing in quiet mode.
    pub fn write_plan<W: Write>(
        &self,
        out: &mut W,
        servers: &[String],
        shards: &[Range],
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        writeln!(out, "{}", ui::header_line("Distribution plan"))?;
        for (index, (server, range)) in servers.iter().zip(shards).enumerate() {
            writeln!(out, "  #{index:<3} {server:<28} {}", format_range(*range))?;
        }
        Ok(())
    }

    /// Render the aggregated result. Only the value in quiet mode.
    pub fn write_result<W: Write>(&self, out: &mut W, result: &DistributedResult) -> io::Result<()> {
        if self.quiet {
            return writeln!(out, "{}", result.value);
        }

        if self.verbose || result.is_partial() {
            writeln!(out, "\nShard results:")?;
            writeln!(out, "{:-<72}", "")?;
            for shard in &result.shards {
                let status = match (&shard.outcome, shard.dispatched) {
                    (Ok(_), false) => "(not sent)".to_string(),
                    (Ok(value), true) => value.to_string(),
                    (Err(e), _) => format!("FAILED: {e}"),
                };
                writeln!(
                    out,
                    "  #{:<3} {:<28} {:>10}  {}",
                    shard.index,
                    shard.server,
                    format_duration(shard.duration),
                    status,
                )?;
            }
        }

        writeln!(out, "Duration: {}", format_duration(result.duration))?;
        let line = if result.is_partial() {
            ui::status_line(
                Status::Warn,
                &format!(
                    "only {}/{} servers responded, result is partial",
                    result.succeeded, result.total
                ),
            )
        } else {
            ui::status_line(
                Status::Ok,
                &format!("{}/{} servers responded", result.succeeded, result.total),
            )
        };
        writeln!(out, "{line}")?;
        writeln!(
            out,
            "{}! mod {} = {}",
            format_number(result.k),
            format_number(result.modulus),
            result.value
        )
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_plan(&self, servers: &[String], shards: &[Range]) {
        let _ = self.write_plan(&mut io::stdout().lock(), servers, shards);
    }

    fn present_result(&self, result: &DistributedResult) {
        let _ = self.write_result(&mut io::stdout().lock(), result);
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}
