//! Mapping between `pinpoint_dns_domain::OverrideType` and `hickory_proto::rr::RecordType`

use hickory_proto::rr::RecordType as HickoryRecordType;
use pinpoint_dns_domain::OverrideType;

/// Bidirectional mapper between override and hickory record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert an override type into the hickory type it answers.
    ///
    /// Returns `None` for unsupported types.
    pub fn to_hickory(record_type: &OverrideType) -> Option<HickoryRecordType> {
        match record_type {
            OverrideType::A => Some(HickoryRecordType::A),
            OverrideType::AAAA => Some(HickoryRecordType::AAAA),
            OverrideType::CNAME => Some(HickoryRecordType::CNAME),
            OverrideType::SRV => Some(HickoryRecordType::SRV),
            OverrideType::TXT => Some(HickoryRecordType::TXT),
            OverrideType::MX => Some(HickoryRecordType::MX),
            OverrideType::NS => Some(HickoryRecordType::NS),
            OverrideType::Unsupported(_) => None,
        }
    }

    /// Convert a requested query type into the override type it would match.
    ///
    /// Types outside the supported set keep their textual form, so an
    /// override declared with the same (unsupported) name still compares
    /// equal and can be reported.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> OverrideType {
        match hickory_type {
            HickoryRecordType::A => OverrideType::A,
            HickoryRecordType::AAAA => OverrideType::AAAA,
            HickoryRecordType::CNAME => OverrideType::CNAME,
            HickoryRecordType::SRV => OverrideType::SRV,
            HickoryRecordType::TXT => OverrideType::TXT,
            HickoryRecordType::MX => OverrideType::MX,
            HickoryRecordType::NS => OverrideType::NS,
            other => OverrideType::Unsupported(other.to_string()),
        }
    }
}
