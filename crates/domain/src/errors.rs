use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Invalid target '{target}' for {record_type} record: {reason}")]
    InvalidRecordTarget {
        record_type: String,
        target: String,
        reason: String,
    },

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Invalid DNS response from {server}: {reason}")]
    InvalidDnsResponse { server: String, reason: String },

    #[error("Upstream {server} answered {rcode}")]
    UpstreamRcode { server: String, rcode: String },

    #[error("No upstream servers configured")]
    NoUpstreamServers,

    #[error("All upstream servers failed")]
    AllUpstreamsFailed,

    #[error("Forwarding deadline of {0}ms exceeded")]
    ForwardDeadlineExceeded(u64),
}

impl DomainError {
    /// Status label used in query logs.
    pub fn status(&self) -> &'static str {
        match self {
            Self::TransportTimeout { .. } => "TIMEOUT",
            Self::UpstreamRcode { .. } => "UPSTREAM_RCODE",
            Self::ForwardDeadlineExceeded(_) => "DEADLINE",
            Self::NoUpstreamServers | Self::AllUpstreamsFailed => "SERVFAIL",
            _ => "ERROR",
        }
    }
}
