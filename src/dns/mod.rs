//! Host name resolution
//!
//! The engine only needs "host + port + family -> socket address"; this module
//! puts that behind the [`Resolver`] trait and provides a trust-dns backed
//! implementation that reads the system resolver configuration.

use crate::{
    error::{AppError, Result},
    types::{AddressFamily, ProbeTarget},
};
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use trust_dns_resolver::{
    config::{LookupIpStrategy, ResolverConfig, ResolverOpts},
    system_conf,
    TokioAsyncResolver,
};

/// Maps a host and port to a socket address of the requested family
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `host:port`, returning the first address of `family`
    async fn resolve(&self, host: &str, port: &str, family: AddressFamily) -> Result<SocketAddr>;
}

/// Resolver backed by the system DNS configuration
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl SystemResolver {
    /// Create a resolver for the given family, falling back to the built-in
    /// upstream configuration when the system one cannot be read
    pub fn new(family: AddressFamily) -> Self {
        let (config, mut opts) = system_conf::read_system_conf()
            .unwrap_or_else(|_| (ResolverConfig::default(), ResolverOpts::default()));

        opts.ip_strategy = Self::lookup_strategy(family);

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }

    /// Lookup strategy matching the address family
    pub fn lookup_strategy(family: AddressFamily) -> LookupIpStrategy {
        match family {
            AddressFamily::Auto => LookupIpStrategy::Ipv4thenIpv6,
            AddressFamily::Ipv4 => LookupIpStrategy::Ipv4Only,
            AddressFamily::Ipv6 => LookupIpStrategy::Ipv6Only,
        }
    }
}

/// Parse a port token
pub fn parse_port(port: &str) -> Result<u16> {
    port.trim()
        .parse::<u16>()
        .map_err(|e| AppError::dns_resolution(format!("invalid port {:?}: {}", port, e)))
}

/// Pick the first address of the family from a resolver answer
pub fn select_address<I>(host: &str, addrs: I, family: AddressFamily) -> Result<SocketAddr>
where
    I: IntoIterator<Item = SocketAddr>,
{
    addrs
        .into_iter()
        .find(|addr| family.accepts(addr))
        .ok_or_else(|| {
            AppError::dns_resolution(format!(
                "no suitable {} address found for {}",
                family.label(),
                host
            ))
        })
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str, port: &str, family: AddressFamily) -> Result<SocketAddr> {
        let port_number = parse_port(port)?;

        if let Ok(ip) = host.parse::<IpAddr>() {
            return select_address(host, [SocketAddr::new(ip, port_number)], family);
        }

        let response = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| {
                AppError::dns_resolution(format!(
                    "lookup {} failed: {}",
                    ProbeTarget::host_port(host, port),
                    e
                ))
            })?;

        select_address(
            host,
            response.iter().map(|ip| SocketAddr::new(ip, port_number)),
            family,
        )
    }
}
