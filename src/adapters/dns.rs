use crate::domain::ports::MxResolver;
use crate::utils::error::Result;
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// MX lookups against the system's configured DNS servers.
pub struct DnsMxResolver {
    resolver: TokioAsyncResolver,
}

impl DnsMxResolver {
    /// Uses the system resolver configuration when readable, otherwise the
    /// library defaults.
    pub fn from_system() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            tracing::warn!("Could not read system resolver config ({}), using defaults", e);
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }
}

#[async_trait]
impl MxResolver for DnsMxResolver {
    async fn has_mx(&self, domain: &str) -> Result<bool> {
        // NXDOMAIN and "no records" both surface as Err from the resolver;
        // the caller treats either the same as an empty answer.
        let lookup = self.resolver.mx_lookup(domain).await?;
        Ok(lookup.iter().next().is_some())
    }
}
