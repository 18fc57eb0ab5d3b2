use hickory_proto::op::Query;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};
use pinpoint_dns_domain::{DomainError, OverrideRecord, OverrideType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Longest payload a single TXT character-string can carry.
const MAX_TXT_SEGMENT: usize = 255;

/// Message section a synthesized record belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSection {
    Answer,
    Authority,
}

#[derive(Debug, Clone)]
pub struct SynthesizedAnswer {
    pub record: Record,
    pub section: AnswerSection,
}

/// Builds the resource record an override promises.
pub struct AnswerSynthesizer;

impl AnswerSynthesizer {
    /// Build one record for `question` from `record`.
    ///
    /// The record carries the question's name and class and the override's
    /// TTL. NS answers go in the authority section, everything else in the
    /// answer section.
    pub fn synthesize(
        record: &OverrideRecord,
        question: &Query,
    ) -> Result<SynthesizedAnswer, DomainError> {
        let (rdata, section) = match &record.record_type {
            OverrideType::A => {
                let ip = Ipv4Addr::from_str(&record.target)
                    .map_err(|e| invalid_target(record, e))?;
                (RData::A(A(ip)), AnswerSection::Answer)
            }
            OverrideType::AAAA => {
                let ip = Ipv6Addr::from_str(&record.target)
                    .map_err(|e| invalid_target(record, e))?;
                (RData::AAAA(AAAA(ip)), AnswerSection::Answer)
            }
            OverrideType::CNAME => (
                RData::CNAME(CNAME(target_name(record)?)),
                AnswerSection::Answer,
            ),
            OverrideType::SRV => (
                RData::SRV(SRV::new(
                    record.priority,
                    record.weight,
                    record.port,
                    target_name(record)?,
                )),
                AnswerSection::Answer,
            ),
            OverrideType::TXT => {
                if record.target.len() > MAX_TXT_SEGMENT {
                    return Err(invalid_target(
                        record,
                        format!("longer than {} bytes", MAX_TXT_SEGMENT),
                    ));
                }
                (
                    RData::TXT(TXT::new(vec![record.target.clone()])),
                    AnswerSection::Answer,
                )
            }
            OverrideType::MX => (
                RData::MX(MX::new(record.preference, target_name(record)?)),
                AnswerSection::Answer,
            ),
            OverrideType::NS => (RData::NS(NS(target_name(record)?)), AnswerSection::Authority),
            OverrideType::Unsupported(raw) => {
                return Err(DomainError::UnsupportedRecordType(raw.clone()));
            }
        };

        let mut answer = Record::from_rdata(question.name().clone(), record.ttl, rdata);
        answer.set_dns_class(question.query_class());

        Ok(SynthesizedAnswer {
            record: answer,
            section,
        })
    }
}

fn target_name(record: &OverrideRecord) -> Result<Name, DomainError> {
    Name::from_ascii(&record.target).map_err(|e| invalid_target(record, e))
}

fn invalid_target(record: &OverrideRecord, reason: impl ToString) -> DomainError {
    DomainError::InvalidRecordTarget {
        record_type: record.record_type.to_string(),
        target: record.target.clone(),
        reason: reason.to_string(),
    }
}
