//! Output reporting
//!
//! The engine talks to a [`Reporter`]; the console implementation lays text
//! out with a [`PlainFormatter`] and writes it to any `io::Write`, flushing
//! after every call so progress dots show up while probes are in flight.

mod formatter;

pub use formatter::{OutputFormatter, PlainFormatter};

use crate::{
    config::ConfigWarning,
    error::{AppError, Result},
    models::{ProbeConfig, RunSummary},
    types::Verdict,
};
use std::io::{self, Write};

/// Sink for everything the engine wants shown to the user
pub trait Reporter {
    /// Per-port banner
    fn banner(&mut self, config: &ProbeConfig, host_address: &str) -> Result<()>;

    /// A cycle is starting
    fn cycle_start(&mut self, cycle: u32) -> Result<()>;

    /// Report a cycle mean and return the verdict it implies
    fn report(&mut self, time_ms: f64, config: &ProbeConfig, host_address: &str) -> Result<Verdict>;

    /// Wall-clock time of the port pass that just ended
    fn port_elapsed(&mut self, elapsed_ms: u64) -> Result<()>;

    /// Final statistics
    fn summary(&mut self, config: &ProbeConfig, host_address: &str, summary: &RunSummary) -> Result<()>;

    /// Resolution failed; the dial is attempted anyway
    fn resolve_failure(&mut self, error: &AppError, host: &str, port: &str) -> Result<()>;

    /// A connect failed and the rest of the port is skipped
    fn connect_failure(&mut self, error: &AppError, port: &str, host: &str) -> Result<()>;

    /// Closing a probe connection failed
    fn close_failure(&mut self, error: &AppError) -> Result<()>;
}

/// Reporter writing the classic text layout to a writer
pub struct ConsoleReporter<W: Write> {
    writer: W,
    formatter: PlainFormatter,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Create a reporter over an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            formatter: PlainFormatter::new(),
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// An argument value replaced by its default
    pub fn warning(&mut self, warning: &ConfigWarning) -> Result<()> {
        let text = self.formatter.format_warning(warning)?;
        self.emit(&text)
    }

    /// Write preformatted text and flush
    pub fn emit(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn banner(&mut self, config: &ProbeConfig, host_address: &str) -> Result<()> {
        let text = self.formatter.format_banner(
            &config.host_name,
            host_address,
            config.port_count(),
            config.ops_per_cycle_all_ports(),
        )?;
        self.emit(&text)
    }

    fn cycle_start(&mut self, cycle: u32) -> Result<()> {
        let text = self.formatter.format_cycle_start(cycle)?;
        self.emit(&text)
    }

    fn report(&mut self, time_ms: f64, config: &ProbeConfig, host_address: &str) -> Result<Verdict> {
        let text = self.formatter.format_cycle_report(
            time_ms,
            config.ops_per_cycle_all_ports(),
            &config.host_name,
            host_address,
        )?;
        self.emit(&text)?;
        Ok(Verdict::from_time(time_ms))
    }

    fn port_elapsed(&mut self, elapsed_ms: u64) -> Result<()> {
        let text = self.formatter.format_port_elapsed(elapsed_ms)?;
        self.emit(&text)
    }

    fn summary(&mut self, config: &ProbeConfig, host_address: &str, summary: &RunSummary) -> Result<()> {
        let text = self.formatter.format_summary(&config.host_name, host_address, summary)?;
        self.emit(&text)
    }

    fn resolve_failure(&mut self, error: &AppError, host: &str, port: &str) -> Result<()> {
        let text = self.formatter.format_resolve_failure(error, host, port)?;
        self.emit(&text)
    }

    fn connect_failure(&mut self, error: &AppError, port: &str, host: &str) -> Result<()> {
        let text = self.formatter.format_connect_failure(error, port, host)?;
        self.emit(&text)
    }

    fn close_failure(&mut self, error: &AppError) -> Result<()> {
        let text = self.formatter.format_close_failure(error)?;
        self.emit(&text)
    }
}
