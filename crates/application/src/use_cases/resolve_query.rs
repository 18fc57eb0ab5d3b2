use crate::services::{
    AnswerSection, AnswerSynthesizer, MessageBuilder, RecordMatcher, UpstreamForwarder,
};
use hickory_proto::op::Message;
use pinpoint_dns_domain::{DomainError, OverrideRecord, OverrideType};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of resolving one request.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Answered authoritatively from an override record
    Local {
        response: Message,
        record_type: OverrideType,
    },
    /// Relayed from the first upstream nameserver that succeeded
    Forwarded {
        response: Message,
        server: SocketAddr,
    },
    /// No override matched and forwarding failed
    ServerFailure {
        response: Message,
        error: DomainError,
    },
}

impl Resolution {
    pub fn response(&self) -> &Message {
        match self {
            Resolution::Local { response, .. }
            | Resolution::Forwarded { response, .. }
            | Resolution::ServerFailure { response, .. } => response,
        }
    }

    pub fn into_response(self) -> Message {
        match self {
            Resolution::Local { response, .. }
            | Resolution::Forwarded { response, .. }
            | Resolution::ServerFailure { response, .. } => response,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Resolution::Local { .. } => "LOCAL",
            Resolution::Forwarded { .. } => "FORWARDED",
            Resolution::ServerFailure { error, .. } => error.status(),
        }
    }
}

/// Decides how a request is answered: from an override, from upstream, or
/// with SERVFAIL.
///
/// Holds an immutable snapshot of the override records; concurrent calls
/// share it without locking.
pub struct ResolveQueryUseCase {
    records: Arc<[OverrideRecord]>,
    forwarder: Arc<UpstreamForwarder>,
}

impl ResolveQueryUseCase {
    pub fn new(records: impl Into<Arc<[OverrideRecord]>>, forwarder: Arc<UpstreamForwarder>) -> Self {
        Self {
            records: records.into(),
            forwarder,
        }
    }

    pub fn records(&self) -> &[OverrideRecord] {
        &self.records
    }

    pub async fn execute(&self, request: &Message) -> Resolution {
        if let Some((response, record_type)) = self.answer_locally(request) {
            return Resolution::Local {
                response,
                record_type,
            };
        }

        info!(id = request.id(), "Forwarding DNS query");

        match self.forwarder.forward(request).await {
            Ok(forwarded) => {
                for answer in forwarded.response.answers() {
                    debug!(server = %forwarded.server, answer = %answer, "Answer from upstream");
                }
                Resolution::Forwarded {
                    response: forwarded.response,
                    server: forwarded.server,
                }
            }
            Err(error) => {
                warn!(id = request.id(), error = %error, "Failure to forward request");
                Resolution::ServerFailure {
                    response: MessageBuilder::server_failure(request),
                    error,
                }
            }
        }
    }

    /// Authoritative reply from the first question an override answers.
    ///
    /// Questions are tried in order and only the first answered one gets a
    /// record; the rest of the message is not evaluated. An override whose
    /// answer cannot be built is logged and treated as non-matching.
    pub fn answer_locally(&self, request: &Message) -> Option<(Message, OverrideType)> {
        for question in request.queries() {
            info!(domain = %question.name(), record_type = %question.query_type(), "DNS query");

            for record in RecordMatcher::candidates(question, &self.records) {
                let answer = match AnswerSynthesizer::synthesize(record, question) {
                    Ok(answer) => answer,
                    Err(e) => {
                        warn!(domain = %question.name(), error = %e, "Override not usable, skipping");
                        continue;
                    }
                };

                info!(
                    domain = %question.name(),
                    target = %record.target,
                    record_type = %record.record_type,
                    "Resolve DNS query from override"
                );

                let mut response = MessageBuilder::reply_to(request);
                response.set_authoritative(true);
                match answer.section {
                    AnswerSection::Answer => response.add_answer(answer.record),
                    AnswerSection::Authority => response.add_name_server(answer.record),
                };
                return Some((response, record.record_type.clone()));
            }
        }
        None
    }
}
