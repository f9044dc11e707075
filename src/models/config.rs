//! Probe configuration data model and validation

use crate::types::{AddressFamily, AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters driving a probe run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Target host name or literal address
    #[serde(default = "default_host_name")]
    pub host_name: String,

    /// Preset textual address; empty means "fill in from the first resolution"
    #[serde(default = "default_host_address")]
    pub host_address: String,

    /// Ports to probe, in order, duplicates allowed
    #[serde(default = "default_ports")]
    pub ports: Vec<String>,

    /// Connect attempts per cycle
    #[serde(default = "default_ops_per_cycle")]
    pub ops_per_cycle: u32,

    /// Number of measurement cycles per port
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// Address family for resolution and dialing
    #[serde(default)]
    pub address_family: AddressFamily,

    /// Per-connect deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Enable debug logging on stderr
    #[serde(default)]
    pub debug: bool,

    /// Colorize log and error output
    #[serde(default)]
    pub enable_color: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host_name: default_host_name(),
            host_address: default_host_address(),
            ports: default_ports(),
            ops_per_cycle: default_ops_per_cycle(),
            cycles: default_cycles(),
            address_family: AddressFamily::default(),
            timeout_ms: default_timeout_ms(),
            debug: false,
            enable_color: false,
        }
    }
}

impl ProbeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-connect deadline; a timeout of 0 dials without one
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Number of ports in the run
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Ops per cycle across the whole port list, as shown in banners
    pub fn ops_per_cycle_all_ports(&self) -> u64 {
        u64::from(self.ops_per_cycle) * self.port_count() as u64
    }

    /// Total connect operations a full run would perform
    pub fn total_ops(&self) -> u64 {
        self.ops_per_cycle_all_ports() * u64::from(self.cycles)
    }

    /// Validate the configuration invariants
    pub fn validate(&self) -> Result<()> {
        if self.host_name.is_empty() {
            return Err(AppError::config("Host name cannot be empty"));
        }

        if self.ports.is_empty() {
            return Err(AppError::config("Port list cannot be empty"));
        }

        if self.ports.iter().any(|p| p.is_empty()) {
            return Err(AppError::config("Port entries cannot be empty"));
        }

        if self.ops_per_cycle == 0 {
            return Err(AppError::config("Ops per cycle must be greater than 0"));
        }

        if self.cycles == 0 {
            return Err(AppError::config("Cycle count must be greater than 0"));
        }

        Ok(())
    }
}

/// Split a comma-separated port list, keeping order and duplicates
pub fn split_ports(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Default value functions for serde
fn default_host_name() -> String {
    crate::defaults::DEFAULT_HOST_NAME.to_string()
}

fn default_host_address() -> String {
    crate::defaults::DEFAULT_HOST_ADDRESS.to_string()
}

fn default_ports() -> Vec<String> {
    split_ports(crate::defaults::DEFAULT_PORTS)
}

fn default_ops_per_cycle() -> u32 {
    crate::defaults::DEFAULT_OPS_PER_CYCLE
}

fn default_cycles() -> u32 {
    crate::defaults::DEFAULT_CYCLES
}

fn default_timeout_ms() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProbeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ports, vec!["80", "443"]);
        assert_eq!(config.cycles, 4);
        assert_eq!(config.ops_per_cycle, 4);
        assert_eq!(config.timeout_ms, 3000);
        assert_eq!(config.host_name, "localhost");
        assert_eq!(config.host_address, "127.0.0.1");
        assert_eq!(config.address_family, AddressFamily::Auto);
    }

    #[test]
    fn test_empty_ports_invalid() {
        let config = ProbeConfig { ports: vec![], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_counts_invalid() {
        let config = ProbeConfig { cycles: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ProbeConfig { ops_per_cycle: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_means_no_deadline() {
        let config = ProbeConfig { timeout_ms: 0, ..Default::default() };
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), None);

        let config = ProbeConfig { timeout_ms: 1, ..Default::default() };
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));
    }

    #[test]
    fn test_op_totals() {
        let config = ProbeConfig {
            ports: split_ports("80,443,8080"),
            ops_per_cycle: 2,
            cycles: 5,
            ..Default::default()
        };
        assert_eq!(config.port_count(), 3);
        assert_eq!(config.ops_per_cycle_all_ports(), 6);
        assert_eq!(config.total_ops(), 30);
    }

    #[test]
    fn test_split_ports_keeps_order_and_duplicates() {
        assert_eq!(split_ports("443,80,443"), vec!["443", "80", "443"]);
        assert_eq!(split_ports(" 22 , 80 "), vec!["22", "80"]);
        assert!(split_ports(",,").is_empty());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ProbeConfig = serde_json::from_str(r#"{"host_name": "example.com"}"#).unwrap();
        assert_eq!(config.host_name, "example.com");
        assert_eq!(config.ports, vec!["80", "443"]);
        assert!(config.validate().is_ok());
    }
}
