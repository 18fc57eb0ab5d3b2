use crate::dns::forwarding::ResponseParser;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use hickory_proto::op::Message;
use pinpoint_dns_application::ports::UpstreamExchange;
use pinpoint_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Sends a request to one nameserver over UDP and waits a bounded time for
/// its reply.
pub struct UdpExchange {
    query_timeout: Duration,
}

impl UdpExchange {
    pub fn new(query_timeout: Duration) -> Self {
        Self { query_timeout }
    }
}

#[async_trait]
impl UpstreamExchange for UdpExchange {
    async fn exchange(
        &self,
        server: SocketAddr,
        request: &Message,
    ) -> Result<Message, DomainError> {
        let query_bytes = request.to_vec().map_err(|e| DomainError::Transport {
            server: server.to_string(),
            reason: format!("failed to encode request: {}", e),
        })?;

        let transport = UdpTransport::new(server);
        let response = transport.send(&query_bytes, self.query_timeout).await?;
        debug!(
            server = %server,
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "Upstream exchange complete"
        );

        ResponseParser::parse(&response.bytes, request.id(), server)
    }
}
