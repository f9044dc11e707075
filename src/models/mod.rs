//! Data models and structures for zing

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::ProbeConfig;
pub use metrics::{ProbeSample, PortRecord, RunContext, RunSummary};
