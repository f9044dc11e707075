//! Configuration parsing from CLI arguments

use crate::{
    cli::Cli,
    config::validation::ConfigValidator,
    error::Result,
    models::ProbeConfig,
    types::AddressFamily,
};
use serde::Serialize;

/// A flag value that was rejected and replaced by its default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    /// Flag as typed on the command line (`-c`, `-op`, ...)
    pub flag: &'static str,
    /// Why the value was rejected
    pub reason: String,
    /// The default used instead
    pub default_value: String,
}

/// Configuration plus the warnings raised while building it
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ProbeConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Builds a [`ProbeConfig`] from parsed CLI arguments
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<LoadedConfig> {
        let mut config = ProbeConfig::default();
        let mut warnings = Vec::new();

        self.apply_cli_overrides(&mut config, &mut warnings);

        config.validate()?;

        Ok(LoadedConfig { config, warnings })
    }

    fn apply_cli_overrides(&self, config: &mut ProbeConfig, warnings: &mut Vec<ConfigWarning>) {
        if let Some(host) = self.cli.host() {
            config.host_name = host.to_string();
            config.host_address.clear();
        }

        config.address_family = if self.cli.ipv6 {
            AddressFamily::Ipv6
        } else if self.cli.ipv4 {
            AddressFamily::Ipv4
        } else {
            AddressFamily::Auto
        };

        if let Some(raw) = &self.cli.count {
            match ConfigValidator::parse_count(raw, 1) {
                Ok(cycles) => config.cycles = cycles,
                Err(reason) => warnings.push(ConfigWarning {
                    flag: "-c",
                    reason,
                    default_value: crate::defaults::DEFAULT_CYCLES.to_string(),
                }),
            }
        }

        if let Some(raw) = &self.cli.ops {
            match ConfigValidator::parse_count(raw, 1) {
                Ok(ops) => config.ops_per_cycle = ops,
                Err(reason) => warnings.push(ConfigWarning {
                    flag: "-op",
                    reason,
                    default_value: crate::defaults::DEFAULT_OPS_PER_CYCLE.to_string(),
                }),
            }
        }

        if let Some(raw) = &self.cli.ports {
            match ConfigValidator::parse_ports(raw) {
                Ok(ports) => config.ports = ports,
                Err(reason) => warnings.push(ConfigWarning {
                    flag: "-p",
                    reason,
                    default_value: crate::defaults::DEFAULT_PORTS.to_string(),
                }),
            }
        }

        if let Some(raw) = &self.cli.timeout {
            match ConfigValidator::parse_timeout_ms(raw) {
                Ok(timeout_ms) => config.timeout_ms = timeout_ms,
                Err(reason) => warnings.push(ConfigWarning {
                    flag: "-t",
                    reason,
                    default_value: crate::defaults::DEFAULT_TIMEOUT_MS.to_string(),
                }),
            }
        }

        config.debug = self.cli.debug;
        config.enable_color = self.cli.use_colors();
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<LoadedConfig> {
    ConfigParser::new(cli).parse()
}

/// One-line description of the configuration for debug logs
pub fn display_config_summary(config: &ProbeConfig) -> String {
    format!(
        "host={} address={} ports={} cycles={} ops={} timeout={}ms family={}",
        config.host_name,
        if config.host_address.is_empty() { "-" } else { config.host_address.as_str() },
        config.ports.join(","),
        config.cycles,
        config.ops_per_cycle,
        config.timeout_ms,
        config.address_family.label()
    )
}
