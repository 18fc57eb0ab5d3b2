use hickory_proto::op::{Message, MessageType};
use pinpoint_dns_domain::DomainError;
use std::net::SocketAddr;
use tracing::debug;

/// Decodes and checks an upstream reply before it is relayed.
pub struct ResponseParser;

impl ResponseParser {
    /// Accepts `response_bytes` only if they decode, carry `request_id` and
    /// have the QR bit set.
    pub fn parse(
        response_bytes: &[u8],
        request_id: u16,
        server: SocketAddr,
    ) -> Result<Message, DomainError> {
        let invalid = |reason: String| DomainError::InvalidDnsResponse {
            server: server.to_string(),
            reason,
        };

        let message = Message::from_vec(response_bytes)
            .map_err(|e| invalid(format!("failed to decode: {}", e)))?;

        if message.id() != request_id {
            return Err(invalid(format!(
                "ID mismatch: expected {:#06x}, got {:#06x}",
                request_id,
                message.id()
            )));
        }

        if message.message_type() != MessageType::Response {
            return Err(invalid("QR bit not set".to_string()));
        }

        debug!(
            server = %server,
            rcode = %message.response_code(),
            answers = message.answers().len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(message)
    }
}
