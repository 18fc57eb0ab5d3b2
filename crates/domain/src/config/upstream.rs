use serde::Deserialize;
use std::time::Duration;

/// How forwarded queries are spread over the configured nameservers.
///
/// Both strategies honour declaration order: a nameserver's answer is only
/// used once every nameserver listed before it has failed.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamStrategy {
    /// Try one nameserver at a time, in listed order.
    #[default]
    Failover,

    /// Query every nameserver at once, keep the earliest-listed success.
    Parallel,
}

impl UpstreamStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failover => "failover",
            Self::Parallel => "parallel",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub strategy: UpstreamStrategy,

    /// Timeout of a single exchange with one nameserver.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Optional bound on the whole forwarding step, across all nameservers.
    #[serde(default)]
    pub forward_deadline_ms: Option<u64>,
}

impl UpstreamConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn forward_deadline(&self) -> Option<Duration> {
        self.forward_deadline_ms.map(Duration::from_millis)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            strategy: UpstreamStrategy::default(),
            query_timeout_ms: default_query_timeout_ms(),
            forward_deadline_ms: None,
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2000
}
