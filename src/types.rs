//! Type definitions and aliases

use std::net::SocketAddr;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Address family used for both resolution and dialing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AddressFamily {
    /// Whatever the resolver returns first, IPv4 preferred
    #[default]
    Auto,
    /// IPv4 only (`-4`)
    Ipv4,
    /// IPv6 only (`-6`)
    Ipv6,
}

impl AddressFamily {
    /// Check whether an address belongs to this family
    pub fn accepts(&self, addr: &SocketAddr) -> bool {
        match self {
            AddressFamily::Auto => true,
            AddressFamily::Ipv4 => addr.is_ipv4(),
            AddressFamily::Ipv6 => addr.is_ipv6(),
        }
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            AddressFamily::Auto => "auto",
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        }
    }
}

/// Reachability verdict for a reported cycle time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Every op in the cycle connected
    Active,
    /// The reported time was negative: the host is gone
    Absent,
}

impl Verdict {
    /// Classify a reported cycle time
    pub fn from_time(time_ms: f64) -> Self {
        if time_ms >= 0.0 {
            Self::Active
        } else {
            Self::Absent
        }
    }
}

/// What the prober dials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    /// Address produced by the resolver
    Resolved(SocketAddr),
    /// Resolution failed up front; the prober resolves again at dial time
    Unresolved { host: String, port: String },
}

impl ProbeTarget {
    /// `host:port` form, with IPv6 literals bracketed
    pub fn host_port(host: &str, port: &str) -> String {
        if host.parse::<std::net::Ipv6Addr>().is_ok() {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        }
    }
}

impl std::fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeTarget::Resolved(addr) => write!(f, "{}", addr),
            ProbeTarget::Unresolved { host, port } => write!(f, "{}", Self::host_port(host, port)),
        }
    }
}
