//! Forward DNS resolution for non-literal hosts.
//!
//! The relay only ever needs A records: the query protocol is IPv4-only, and
//! clients submitting a hostname get it swapped for the first resolved
//! address. Resolution sits behind the [`HostResolver`] trait so the HTTP
//! layer can be exercised without touching the network.

use crate::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;
use trust_dns_resolver::TokioAsyncResolver;

/// `DynHostResolver` is a type alias for a [`HostResolver`] shared by all
/// request-handling tasks through an [`Arc`].
#[allow(clippy::module_name_repetitions)]
pub type DynHostResolver = Arc<dyn HostResolver + Send + Sync>;

/// An async trait describing forward resolution of a hostname to its A
/// records, in the order the resolver returned them.
#[async_trait::async_trait]
pub trait HostResolver {
    async fn lookup_v4(&self, host: &str) -> Result<Vec<Ipv4Addr>, Error>;
}

/// [`HostResolver`] backed by trust-dns using the system's resolver
/// configuration, the same servers `dig` would ask.
#[allow(clippy::module_name_repetitions)]
pub struct DnsHostResolver {
    resolver: TokioAsyncResolver,
}

impl DnsHostResolver {
    pub fn from_system_conf() -> Result<Self, Error> {
        Ok(Self {
            resolver: TokioAsyncResolver::tokio_from_system_conf()?,
        })
    }
}

#[async_trait::async_trait]
impl HostResolver for DnsHostResolver {
    async fn lookup_v4(&self, host: &str) -> Result<Vec<Ipv4Addr>, Error> {
        let lookup = self.resolver.ipv4_lookup(host).await?;
        Ok(lookup.iter().copied().collect())
    }
}
