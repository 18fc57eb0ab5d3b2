#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use pinpoint_dns_application::ports::UpstreamExchange;
use pinpoint_dns_domain::{DomainError, OverrideRecord};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted behaviour of one mock nameserver.
#[derive(Debug, Clone)]
pub enum Reply {
    /// NOERROR with a single A record
    Answer(Ipv4Addr),
    /// Response carrying only this code
    Rcode(ResponseCode),
    /// Transport timeout
    Timeout,
    /// Wait, then behave as the inner reply
    Delayed(Duration, Box<Reply>),
}

pub struct MockExchange {
    replies: HashMap<SocketAddr, Reply>,
    calls: Mutex<Vec<SocketAddr>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, server: SocketAddr, reply: Reply) -> Self {
        self.replies.insert(server, reply);
        self
    }

    pub fn calls(&self) -> Vec<SocketAddr> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(request: &Message, reply: &Reply) -> Result<Message, DomainError> {
        match reply {
            Reply::Answer(ip) => {
                let mut response = response_to(request, ResponseCode::NoError);
                let name = request.queries()[0].name().clone();
                response.add_answer(Record::from_rdata(name, 300, RData::A(A(*ip))));
                Ok(response)
            }
            Reply::Rcode(code) => Ok(response_to(request, *code)),
            Reply::Timeout => Err(DomainError::TransportTimeout {
                server: "mock".to_string(),
            }),
            Reply::Delayed(_, inner) => Self::respond(request, inner),
        }
    }
}

#[async_trait]
impl UpstreamExchange for MockExchange {
    async fn exchange(
        &self,
        server: SocketAddr,
        request: &Message,
    ) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push(server);

        let reply = self.replies.get(&server).cloned().unwrap_or(Reply::Timeout);
        if let Reply::Delayed(delay, _) = &reply {
            tokio::time::sleep(*delay).await;
        }
        Self::respond(request, &reply)
    }
}

pub fn response_to(request: &Message, code: ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_response_code(code);
    response.add_queries(request.queries().iter().cloned());
    response
}

pub fn query_message(id: u16, questions: &[(&str, RecordType)]) -> Message {
    let mut msg = Message::new();
    msg.set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    for (name, qtype) in questions {
        msg.add_query(Query::query(Name::from_ascii(name).unwrap(), *qtype));
    }
    msg
}

pub fn ns(addr: &str) -> SocketAddr {
    addr.parse().unwrap()
}

pub fn record(rt: &str, target: &str, values: &[&str], ttl: u32) -> OverrideRecord {
    OverrideRecord::new(
        rt,
        target,
        values.iter().map(|v| v.to_string()).collect(),
        ttl,
    )
}

pub fn first_a(message: &Message) -> Option<Ipv4Addr> {
    message.answers().iter().find_map(|r| match r.data() {
        RData::A(a) => Some(a.0),
        _ => None,
    })
}
