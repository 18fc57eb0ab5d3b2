use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Default DNS port, implied when a nameserver entry carries no port.
pub const DNS_PORT: u16 = 53;

/// An upstream nameserver entry that may or may not be resolved to an IP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameServer {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl NameServer {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            NameServer::Resolved(addr) => Some(*addr),
            NameServer::Unresolved { .. } => None,
        }
    }

    /// Returns (hostname, port) if this entry still needs a lookup.
    pub fn unresolved_parts(&self) -> Option<(&str, u16)> {
        match self {
            NameServer::Unresolved { hostname, port } => Some((hostname, *port)),
            NameServer::Resolved(_) => None,
        }
    }
}

impl fmt::Display for NameServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameServer::Resolved(addr) => write!(f, "{}", addr),
            NameServer::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port = match rest.strip_prefix(':') {
            Some(port_str) => port_str.parse::<u16>().ok()?,
            None if rest.is_empty() => DNS_PORT,
            None => return None,
        };
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

fn is_valid_hostname(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 253
        && host
            .trim_end_matches('.')
            .split('.')
            .all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && label
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
}

impl FromStr for NameServer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty nameserver address".to_string());
        }

        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(NameServer::Resolved(addr));
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(NameServer::Resolved(SocketAddr::new(ip, DNS_PORT)));
        }

        let (host, port) = parse_host_port(s).unwrap_or((s, DNS_PORT));
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(NameServer::Resolved(SocketAddr::new(ip, port)));
        }
        if !is_valid_hostname(host) {
            return Err(format!("Invalid address '{}'", s));
        }

        Ok(NameServer::Unresolved {
            hostname: host.into(),
            port,
        })
    }
}
