//! Text layout of everything zing prints on standard output
//!
//! Formatting is kept pure (string in, string out) so the exact layout can be
//! tested without a terminal. Writing is the reporter's job.

use crate::{
    config::ConfigWarning,
    error::{AppError, Result},
    models::RunSummary,
    types::Verdict,
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Per-port banner
    fn format_banner(&self, host: &str, address: &str, port_count: usize, ops_per_cycle: u64) -> Result<String>;

    /// Opening of a cycle line, printed before its ops run
    fn format_cycle_start(&self, cycle: u32) -> Result<String>;

    /// Remainder of a cycle line carrying the verdict
    fn format_cycle_report(&self, time_ms: f64, ops_per_cycle: u64, host: &str, address: &str) -> Result<String>;

    /// Wall-clock time of one port pass
    fn format_port_elapsed(&self, elapsed_ms: u64) -> Result<String>;

    /// Final run summary
    fn format_summary(&self, host: &str, address: &str, summary: &RunSummary) -> Result<String>;

    /// A connection failure that aborts the current port
    fn format_connect_failure(&self, error: &AppError, port: &str, host: &str) -> Result<String>;

    /// A failed resolution (the run continues)
    fn format_resolve_failure(&self, error: &AppError, host: &str, port: &str) -> Result<String>;

    /// A failed connection teardown (the run continues)
    fn format_close_failure(&self, error: &AppError) -> Result<String>;

    /// An argument value replaced by its default
    fn format_warning(&self, warning: &ConfigWarning) -> Result<String>;
}

/// Plain text formatter producing the classic zing layout
#[derive(Debug, Default, Clone)]
pub struct PlainFormatter;

impl PlainFormatter {
    /// Create a new plain formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, host: &str, address: &str, port_count: usize, ops_per_cycle: u64) -> Result<String> {
        Ok(format!(
            "ZING: {} ({}): {} ports used, {} ops per cycle\n",
            host, address, port_count, ops_per_cycle
        ))
    }

    fn format_cycle_start(&self, cycle: u32) -> Result<String> {
        Ok(format!("#{} .", cycle))
    }

    fn format_cycle_report(&self, time_ms: f64, ops_per_cycle: u64, host: &str, address: &str) -> Result<String> {
        let mut output = String::new();

        write!(output, ".. {} ops to {} ({}): ", ops_per_cycle, host, address)
            .map_err(|e| AppError::io(format!("Failed to format cycle report: {}", e)))?;

        let verdict = match Verdict::from_time(time_ms) {
            Verdict::Active => writeln!(output, "Active time = {:.3} ms", time_ms),
            Verdict::Absent => writeln!(output, "Absent!"),
        };
        verdict.map_err(|e| AppError::io(format!("Failed to format cycle report: {}", e)))?;

        Ok(output)
    }

    fn format_port_elapsed(&self, elapsed_ms: u64) -> Result<String> {
        Ok(format!("Total time: {} ms\n", elapsed_ms))
    }

    fn format_summary(&self, host: &str, address: &str, summary: &RunSummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "\n--- zing summary for {}/{} ---", host, address)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "{} total ops used; total time: {} ms",
            summary.total_ops, summary.total_elapsed_ms
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        write!(
            output,
            "total-time min/avg/max/stddev = {:.3}/{:.3}/{:.3}/{:.3} ms\n\n",
            summary.min, summary.mean, summary.max, summary.stddev
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        Ok(output)
    }

    fn format_connect_failure(&self, error: &AppError, port: &str, host: &str) -> Result<String> {
        Ok(format!(
            "\n\nError: {}!\n\nError: Unable to connect to port: {}; continue to next port on host: '{}'...\n\n",
            error.message(),
            port,
            host
        ))
    }

    fn format_resolve_failure(&self, error: &AppError, host: &str, port: &str) -> Result<String> {
        Ok(format!(
            "\nError: {}\n\nUnable to resolve {}:{}; attempting connection anyway...\n\n",
            error.message(),
            host,
            port
        ))
    }

    fn format_close_failure(&self, error: &AppError) -> Result<String> {
        Ok(format!("Error: {}\n\nContinuing zing utility...\n\n", error.message()))
    }

    fn format_warning(&self, warning: &ConfigWarning) -> Result<String> {
        Ok(format!(
            "\nError: {}\n\nUsing default value of {} for {} param.\n\n",
            warning.reason, warning.default_value, warning.flag
        ))
    }
}
