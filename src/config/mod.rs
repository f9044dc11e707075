//! Configuration management module
//!
//! Layering: compile-time `defaults` -> parsed `Cli` -> [`ConfigParser`]
//! (bad values fall back to defaults with a warning) -> `ProbeConfig::validate`.

pub mod parser;
pub mod validation;

// Re-export main functionality
pub use parser::{display_config_summary, load_config, ConfigParser, ConfigWarning, LoadedConfig};
pub use validation::ConfigValidator;

// Re-export from models for convenience
pub use crate::models::ProbeConfig;

// Additional comprehensive tests in separate module
#[cfg(test)]
mod comprehensive_tests;
