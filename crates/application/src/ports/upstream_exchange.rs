use async_trait::async_trait;
use hickory_proto::op::Message;
use pinpoint_dns_domain::DomainError;
use std::net::SocketAddr;

#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    /// Perform a single query/response round trip with `server`.
    ///
    /// Implementations bound the exchange with their own timeout and must
    /// not retry. Any response that decodes and belongs to `request` is
    /// returned, whatever its response code.
    async fn exchange(&self, server: SocketAddr, request: &Message)
        -> Result<Message, DomainError>;
}
