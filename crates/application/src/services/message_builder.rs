//! Reply construction shared by the local-answer, forwarding and error paths.

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};

/// Builds reply messages linked to the request they answer
pub struct MessageBuilder;

impl MessageBuilder {
    /// Empty NOERROR reply mirroring `request`
    ///
    /// Copies the ID, opcode, RD and CD flags and the question section, sets
    /// QR and RA.
    pub fn reply_to(request: &Message) -> Message {
        let mut reply = Message::new();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_checking_disabled(request.checking_disabled())
            .set_recursion_available(true)
            .set_response_code(ResponseCode::NoError);
        reply.add_queries(request.queries().iter().cloned());
        reply
    }

    /// Reply to `request` carrying only a response code
    pub fn error_reply(request: &Message, code: ResponseCode) -> Message {
        let mut reply = Self::reply_to(request);
        reply.set_response_code(code);
        reply
    }

    /// SERVFAIL reply to `request`
    pub fn server_failure(request: &Message) -> Message {
        Self::error_reply(request, ResponseCode::ServFail)
    }

    /// Error reply for a request that could not be decoded past its ID
    pub fn error_for_id(id: u16, code: ResponseCode) -> Message {
        let mut reply = Message::new();
        reply
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_recursion_available(true)
            .set_response_code(code);
        reply
    }
}
