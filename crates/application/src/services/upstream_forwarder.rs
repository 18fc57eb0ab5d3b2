use crate::ports::UpstreamExchange;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use hickory_proto::op::{Message, ResponseCode};
use pinpoint_dns_domain::config::UpstreamStrategy;
use pinpoint_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A successful upstream answer.
#[derive(Debug, Clone)]
pub struct Forwarded {
    pub response: Message,
    pub server: SocketAddr,
    /// Index of `server` in the configured nameserver list
    pub position: usize,
    pub latency_ms: u64,
}

/// Relays queries no override answers to the configured nameservers.
///
/// Nameservers are preferred in listed order whatever the strategy. A
/// response whose code is not NOERROR counts as a failure of that
/// nameserver, never as a final answer.
pub struct UpstreamForwarder {
    exchange: Arc<dyn UpstreamExchange>,
    nameservers: Arc<[SocketAddr]>,
    strategy: UpstreamStrategy,
    deadline: Option<Duration>,
}

impl UpstreamForwarder {
    pub fn new(exchange: Arc<dyn UpstreamExchange>, nameservers: Vec<SocketAddr>) -> Self {
        Self {
            exchange,
            nameservers: nameservers.into(),
            strategy: UpstreamStrategy::Failover,
            deadline: None,
        }
    }

    pub fn with_strategy(mut self, strategy: UpstreamStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Bound the whole forwarding step, across every nameserver attempt.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn nameservers(&self) -> &[SocketAddr] {
        &self.nameservers
    }

    pub fn strategy(&self) -> UpstreamStrategy {
        self.strategy
    }

    pub async fn forward(&self, request: &Message) -> Result<Forwarded, DomainError> {
        if self.nameservers.is_empty() {
            return Err(DomainError::NoUpstreamServers);
        }

        let attempts = async {
            match self.strategy {
                UpstreamStrategy::Failover => self.forward_sequential(request).await,
                UpstreamStrategy::Parallel => self.forward_parallel(request).await,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, attempts)
                .await
                .map_err(|_| DomainError::ForwardDeadlineExceeded(deadline.as_millis() as u64))?,
            None => attempts.await,
        }
    }

    async fn forward_sequential(&self, request: &Message) -> Result<Forwarded, DomainError> {
        debug!(strategy = "failover", servers = self.nameservers.len(), "Trying sequentially");

        for (position, server) in self.nameservers.iter().enumerate() {
            match self.attempt(position, *server, request).await {
                Ok(forwarded) => return Ok(forwarded),
                Err(e) => {
                    debug!(server = %server, error = %e, position, "Failing over");
                }
            }
        }

        warn!(servers = self.nameservers.len(), "All upstream servers failed");
        Err(DomainError::AllUpstreamsFailed)
    }

    /// Race every nameserver but only accept a response once all
    /// nameservers listed before it have failed.
    async fn forward_parallel(&self, request: &Message) -> Result<Forwarded, DomainError> {
        debug!(strategy = "parallel", servers = self.nameservers.len(), "Racing all upstreams");

        let mut in_flight: FuturesUnordered<_> = self
            .nameservers
            .iter()
            .enumerate()
            .map(|(position, server)| async move {
                (position, self.attempt(position, *server, request).await)
            })
            .collect();

        let mut settled: Vec<Option<Result<Forwarded, DomainError>>> =
            (0..self.nameservers.len()).map(|_| None).collect();
        let mut preferred = 0;

        while let Some((position, result)) = in_flight.next().await {
            settled[position] = Some(result);

            while preferred < settled.len() {
                match settled[preferred].take() {
                    Some(Ok(forwarded)) => return Ok(forwarded),
                    Some(Err(e)) => {
                        debug!(server = %self.nameservers[preferred], error = %e, position = preferred, "Upstream failed");
                        preferred += 1;
                    }
                    None => break,
                }
            }
        }

        warn!(servers = self.nameservers.len(), "All upstream servers failed");
        Err(DomainError::AllUpstreamsFailed)
    }

    async fn attempt(
        &self,
        position: usize,
        server: SocketAddr,
        request: &Message,
    ) -> Result<Forwarded, DomainError> {
        let start = Instant::now();
        let mut response = self.exchange.exchange(server, request).await?;

        let rcode = response.response_code();
        if rcode != ResponseCode::NoError {
            return Err(DomainError::UpstreamRcode {
                server: server.to_string(),
                rcode: rcode.to_string(),
            });
        }

        response.set_id(request.id());
        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(server = %server, latency_ms, position, answers = response.answers().len(), "Server responded");

        Ok(Forwarded {
            response,
            server,
            position,
            latency_ms,
        })
    }
}
