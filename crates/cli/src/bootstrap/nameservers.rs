use pinpoint_dns_domain::{Config, NameServer};
use std::net::SocketAddr;
use tracing::{debug, info, warn};

/// Turn the configured nameserver list into socket addresses, keeping the
/// listed order. Hostname entries are looked up once here.
pub async fn resolve_nameservers(config: &Config) -> anyhow::Result<Vec<SocketAddr>> {
    let entries = config.parsed_nameservers()?;
    let mut resolved = Vec::with_capacity(entries.len());

    for entry in &entries {
        resolved.push(resolve_one(entry).await?);
    }

    if resolved.is_empty() {
        warn!("No nameservers configured, queries without an override will get SERVFAIL");
    } else {
        info!(count = resolved.len(), "Upstream nameservers resolved");
    }

    Ok(resolved)
}

async fn resolve_one(entry: &NameServer) -> anyhow::Result<SocketAddr> {
    if let Some(addr) = entry.socket_addr() {
        return Ok(addr);
    }

    let Some((hostname, port)) = entry.unresolved_parts() else {
        anyhow::bail!("Nameserver '{}' has no address", entry);
    };

    let addr = tokio::net::lookup_host((hostname, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve nameserver '{}': {}", entry, e))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Nameserver '{}' resolved to no addresses", entry))?;

    debug!(nameserver = %entry, addr = %addr, "Nameserver hostname resolved");
    Ok(addr)
}
