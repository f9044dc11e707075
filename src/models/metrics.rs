//! Probe samples, run state and summary data models

use crate::error::AppError;
use crate::stats::Summary;
use serde::{Deserialize, Serialize};

/// Elapsed-time sentinel recorded for a failed connect
pub const FAILED_ELAPSED_MS: f64 = -1.0;

/// One connect attempt
#[derive(Debug)]
pub struct ProbeSample {
    /// Time to establish the connection, or `-1.0` on failure
    pub elapsed_ms: f64,

    /// Whether the connection was established
    pub succeeded: bool,

    /// Connect error for a failed sample, close error for a successful one
    pub error: Option<AppError>,
}

impl ProbeSample {
    /// Create a successful sample
    pub fn success(elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            succeeded: true,
            error: None,
        }
    }

    /// Create a successful sample whose teardown failed
    pub fn success_with_close_error(elapsed_ms: f64, error: AppError) -> Self {
        Self {
            elapsed_ms,
            succeeded: true,
            error: Some(error),
        }
    }

    /// Create a failed sample
    pub fn failed(error: AppError) -> Self {
        Self {
            elapsed_ms: FAILED_ELAPSED_MS,
            succeeded: false,
            error: Some(error),
        }
    }
}

/// What happened to a single port during the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    pub port: String,
    pub completed_cycles: u32,
    pub aborted: bool,
    pub elapsed_ms: u64,
    /// Cycle means stored while this port was being probed
    pub cycle_means: Vec<f64>,
}

/// Mutable state of one probe run, owned by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunContext {
    /// Per-cycle means, indexed by cycle; overwritten on every port pass
    cycle_records: Vec<f64>,
    /// Address shown in banners and the summary
    pub host_address: String,
    /// Wall-clock time of the last processed port's cycle loop
    pub total_elapsed_ms: u64,
    /// History of every port pass
    pub ports: Vec<PortRecord>,
}

impl RunContext {
    /// Create storage for `cycles` cycle means, zero-filled
    pub fn new(cycles: u32, host_address: impl Into<String>) -> Self {
        Self {
            cycle_records: vec![0.0; cycles as usize],
            host_address: host_address.into(),
            total_elapsed_ms: 0,
            ports: Vec::new(),
        }
    }

    /// Back-fill the display address unless one is already set
    pub fn note_resolved_address(&mut self, address: impl Into<String>) -> bool {
        if self.host_address.is_empty() {
            self.host_address = address.into();
            true
        } else {
            false
        }
    }

    /// Store a cycle mean at a zero-based cycle index
    pub fn record_cycle(&mut self, index: usize, mean: f64) {
        if let Some(slot) = self.cycle_records.get_mut(index) {
            *slot = mean;
        }
        if let Some(current) = self.ports.last_mut() {
            current.completed_cycles += 1;
            current.cycle_means.push(mean);
        }
    }

    /// Open the record for a new port pass
    pub fn begin_port(&mut self, port: &str) {
        self.ports.push(PortRecord {
            port: port.to_string(),
            completed_cycles: 0,
            aborted: false,
            elapsed_ms: 0,
            cycle_means: Vec::new(),
        });
    }

    /// Close the current port pass
    pub fn finish_port(&mut self, elapsed_ms: u64, aborted: bool) {
        self.total_elapsed_ms = elapsed_ms;
        if let Some(current) = self.ports.last_mut() {
            current.elapsed_ms = elapsed_ms;
            current.aborted = aborted;
        }
    }

    /// Current cycle storage
    pub fn cycle_records(&self) -> &[f64] {
        &self.cycle_records
    }
}

/// Final statistics of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
    /// `port_count * ops_per_cycle * cycles`
    pub total_ops: u64,
    /// Elapsed time of the last processed port
    pub total_elapsed_ms: u64,
}

impl RunSummary {
    /// Combine cycle statistics with the run totals
    pub fn new(stats: Summary, total_ops: u64, total_elapsed_ms: u64) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            stddev: stats.stddev,
            total_ops,
            total_elapsed_ms,
        }
    }
}
