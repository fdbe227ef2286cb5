//! Connect-with-timeout probe for a single port
//!
//! A port that refuses, times out, or is unreachable is a normal result,
//! not an error, so the probe surface is a plain bool.

use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// A single-port reachability check. Implementations must be safe to share
/// across workers; tests inject deterministic fakes through this trait.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe one port on the target. Returns `true` only if a connection
    /// was accepted within the probe's timeout.
    async fn probe(&self, target: IpAddr, port: u16) -> bool;
}

/// TCP connect probe with a fixed per-connection timeout
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, target: IpAddr, port: u16) -> bool {
        let addr = SocketAddr::new(target, port);

        match tokio::time::timeout(self.timeout, tokio::net::TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                // Connection accepted - the socket is not kept open
                drop(stream);
                true
            }
            Ok(Err(_)) => false, // Refused or unreachable
            Err(_) => false,     // Timeout
        }
    }
}
