use hickory_proto::op::{Message, OpCode, ResponseCode};
use pinpoint_dns_application::services::MessageBuilder;
use pinpoint_dns_application::use_cases::ResolveQueryUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Fixed DNS header length (RFC 1035 §4.1.1)
const HEADER_LEN: usize = 12;

/// QR flag in the first flags byte
const QR_BIT: u8 = 0x80;

/// Turns request datagrams into reply datagrams.
///
/// `None` means the datagram is dropped without a reply.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_datagram(&self, bytes: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        if bytes.len() < HEADER_LEN {
            debug!(client = %client, len = bytes.len(), "Datagram shorter than a DNS header, dropping");
            return None;
        }

        if bytes[2] & QR_BIT != 0 {
            debug!(client = %client, "Datagram is a response, dropping");
            return None;
        }

        let request = match Message::from_vec(bytes) {
            Ok(request) => request,
            Err(e) => {
                let id = u16::from_be_bytes([bytes[0], bytes[1]]);
                warn!(client = %client, id, error = %e, "Malformed DNS request");
                return Self::encode(&MessageBuilder::error_for_id(id, ResponseCode::FormErr));
            }
        };

        if request.op_code() != OpCode::Query {
            debug!(client = %client, op_code = ?request.op_code(), "Unsupported opcode");
            return Self::encode(&MessageBuilder::error_reply(&request, ResponseCode::NotImp));
        }

        let start = Instant::now();
        let resolution = self.use_case.execute(&request).await;
        info!(
            client = %client,
            id = request.id(),
            status = resolution.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "DNS query answered"
        );

        let response = resolution.into_response();
        match response.to_vec() {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(client = %client, id = request.id(), error = %e, "Failed to encode response");
                Self::encode(&MessageBuilder::server_failure(&request))
            }
        }
    }

    fn encode(message: &Message) -> Option<Vec<u8>> {
        match message.to_vec() {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(id = message.id(), error = %e, "Failed to encode error response");
                None
            }
        }
    }
}
