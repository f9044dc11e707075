//! Zing - zero-packet ping
//!
//! Checks whether a host is reachable, and how quickly, by timing TCP
//! connection establishment to one or more ports instead of sending ICMP
//! echo requests. Probes run in cycles of several connect operations per
//! port and are summarised into min/avg/max/stddev statistics.

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod prober;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{ProbeConfig, ProbeSample, RunContext, RunSummary};
pub use executor::{ProbeEngine, RunOutcome};
pub use stats::{StatisticsAggregator, Summary};
pub use output::{ConsoleReporter, Reporter};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_HOST_NAME: &str = "localhost";
    pub const DEFAULT_HOST_ADDRESS: &str = "127.0.0.1";
    pub const DEFAULT_PORTS: &str = "80,443";
    pub const DEFAULT_CYCLES: u32 = 4;
    pub const DEFAULT_OPS_PER_CYCLE: u32 = 4;
    pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
}
