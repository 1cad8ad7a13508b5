//! Private connectivity check
//!
//! Resolves the Bedrock service hostname and classifies the address as
//! private (a VPC interface endpoint is in use) or public. The check is
//! advisory: every failure is logged and reported as "not private".

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Hostname of the Bedrock control plane in `region`
pub fn service_hostname(region: &str) -> String {
    format!("bedrock.{}.amazonaws.com", region)
}

/// A hostname together with the IPv4 address it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub hostname: String,
    pub address: Ipv4Addr,
}

/// Which address blocks count as private
///
/// `Literal` keeps the historical third clause `192.0.0.0/16`. `Rfc1918`
/// replaces it with `192.168.0.0/16`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivateRanges {
    #[default]
    Literal,
    Rfc1918,
}

/// Classify a dotted-quad address as private
///
/// Private means `10.x.x.x`, `172.16.x.x` through `172.31.x.x`, or the third
/// block selected by `ranges`.
pub fn is_private_address(address: Ipv4Addr, ranges: PrivateRanges) -> bool {
    match (address.octets(), ranges) {
        ([10, ..], _) => true,
        ([172, second, ..], _) => (16..=31).contains(&second),
        ([192, 0, ..], PrivateRanges::Literal) => true,
        ([192, 168, ..], PrivateRanges::Rfc1918) => true,
        _ => false,
    }
}

/// Hostname to IPv4 resolution
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve_ipv4(&self, hostname: &str) -> AppResult<Ipv4Addr>;
}

/// Resolver backed by the operating system via `tokio::net::lookup_host`
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve_ipv4(&self, hostname: &str) -> AppResult<Ipv4Addr> {
        first_ipv4_within(
            hostname,
            self.timeout,
            tokio::net::lookup_host((hostname, 443)),
        )
        .await
    }
}

/// Await `lookup` for at most `timeout` and take its first IPv4 address
async fn first_ipv4_within<F, I>(
    hostname: &str,
    timeout: Duration,
    lookup: F,
) -> AppResult<Ipv4Addr>
where
    F: Future<Output = io::Result<I>>,
    I: Iterator<Item = SocketAddr>,
{
    let addrs = tokio::time::timeout(timeout, lookup)
        .await
        .map_err(|_| {
            AppError::Network(format!(
                "resolving {} timed out after {:?}",
                hostname, timeout
            ))
        })?
        .map_err(|e| AppError::Network(format!("failed to resolve {}: {}", hostname, e)))?;

    addrs
        .filter_map(|addr| match addr.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| AppError::Network(format!("{} has no IPv4 address", hostname)))
}

/// Heuristic check that traffic to the service stays on a private network
pub struct ConnectivityCheck<'a> {
    resolver: &'a dyn Resolver,
    hostname: String,
    ranges: PrivateRanges,
}

impl<'a> ConnectivityCheck<'a> {
    pub fn new(resolver: &'a dyn Resolver, hostname: impl Into<String>) -> Self {
        Self {
            resolver,
            hostname: hostname.into(),
            ranges: PrivateRanges::default(),
        }
    }

    pub fn with_ranges(mut self, ranges: PrivateRanges) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Resolve the hostname without classifying it
    pub async fn resolve(&self) -> AppResult<ResolvedEndpoint> {
        let address = self.resolver.resolve_ipv4(&self.hostname).await?;
        Ok(ResolvedEndpoint {
            hostname: self.hostname.clone(),
            address,
        })
    }

    /// Returns true when the hostname resolves to a private address
    ///
    /// Never fails: resolution errors are logged and reported as `false`.
    pub async fn verify(&self) -> bool {
        let endpoint = match self.resolve().await {
            Ok(endpoint) => endpoint,
            Err(e) => {
                tracing::error!(
                    hostname = %self.hostname,
                    error = %e,
                    "Error verifying private connection"
                );
                return false;
            }
        };

        let private = is_private_address(endpoint.address, self.ranges);
        if private {
            tracing::info!(
                hostname = %endpoint.hostname,
                address = %endpoint.address,
                "Verified private connection. Endpoint {} resolved to private IP: {}",
                endpoint.hostname,
                endpoint.address
            );
        } else {
            tracing::warn!(
                hostname = %endpoint.hostname,
                address = %endpoint.address,
                "Public IP detected: {}. Traffic might not be using VPC endpoints!",
                endpoint.address
            );
        }
        private
    }
}
