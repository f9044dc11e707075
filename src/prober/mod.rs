//! TCP connect probing
//!
//! A probe is one connection attempt: dial, measure time to establishment,
//! close. Failures never propagate as `Err`; they come back inside the
//! [`ProbeSample`].

use crate::{
    error::AppError,
    models::ProbeSample,
    types::{AddressFamily, ProbeTarget},
};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::{io::AsyncWriteExt, net::TcpStream, time::timeout};

/// One connect-and-measure operation
#[async_trait]
pub trait Prober: Send + Sync {
    /// Dial `target` once, bounded by `deadline` when one is given
    async fn probe(&self, target: &ProbeTarget, family: AddressFamily, deadline: Option<Duration>) -> ProbeSample;
}

/// Prober dialing real TCP connections through tokio
#[derive(Debug, Default, Clone)]
pub struct TcpProber;

impl TcpProber {
    /// Create a new TCP prober
    pub fn new() -> Self {
        Self
    }

    async fn connect(target: &ProbeTarget, family: AddressFamily) -> Result<TcpStream, AppError> {
        match target {
            ProbeTarget::Resolved(addr) => TcpStream::connect(addr)
                .await
                .map_err(|e| dial_error(target, e)),
            ProbeTarget::Unresolved { host, port } => {
                let host_port = ProbeTarget::host_port(host, port);
                let candidates = tokio::net::lookup_host(host_port.as_str())
                    .await
                    .map_err(|e| AppError::dns_resolution(format!("dial tcp {}: {}", host_port, e)))?;

                let addr = candidates
                    .into_iter()
                    .find(|addr| family.accepts(addr))
                    .ok_or_else(|| {
                        AppError::dns_resolution(format!(
                            "dial tcp {}: no suitable {} address",
                            host_port,
                            family.label()
                        ))
                    })?;

                TcpStream::connect(addr).await.map_err(|e| dial_error(target, e))
            }
        }
    }
}

/// Wrap a dial failure, keeping the category implied by the I/O error kind
fn dial_error(target: &ProbeTarget, error: std::io::Error) -> AppError {
    let message = format!("dial tcp {}: {}", target, error);
    match AppError::from(error) {
        AppError::Timeout(_) => AppError::timeout(message),
        AppError::Network(_) => AppError::network(message),
        _ => AppError::io(message),
    }
}

/// Milliseconds with sub-millisecond precision
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, target: &ProbeTarget, family: AddressFamily, deadline: Option<Duration>) -> ProbeSample {
        let start = Instant::now();

        let dial = Self::connect(target, family);
        let outcome = match deadline {
            Some(deadline) => timeout(deadline, dial).await,
            None => Ok(dial.await),
        };

        let mut stream = match outcome {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return ProbeSample::failed(e),
            Err(_) => {
                return ProbeSample::failed(AppError::timeout(format!(
                    "dial tcp {}: i/o timeout",
                    target
                )))
            }
        };

        let elapsed = elapsed_ms(start);

        match stream.shutdown().await {
            Ok(()) => ProbeSample::success(elapsed),
            Err(e) => ProbeSample::success_with_close_error(
                elapsed,
                AppError::io(format!("close tcp {}: {}", target, e)),
            ),
        }
    }
}
