use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::Query;
use pinpoint_dns_domain::OverrideRecord;
use tracing::{debug, warn};

/// Finds the override records that answer a question.
pub struct RecordMatcher;

impl RecordMatcher {
    /// First override record answering `question`, if any.
    pub fn find<'a>(question: &Query, records: &'a [OverrideRecord]) -> Option<&'a OverrideRecord> {
        Self::candidates(question, records).next()
    }

    /// Every override record answering `question`, in declaration order.
    ///
    /// A record answers when its type equals the requested type and the
    /// question name ends with one of its values. Records of an unsupported
    /// type are skipped with a warning even when their values match.
    pub fn candidates<'a>(
        question: &Query,
        records: &'a [OverrideRecord],
    ) -> impl Iterator<Item = &'a OverrideRecord> + 'a {
        let name = question.name().to_ascii();
        let wanted = RecordTypeMapper::from_hickory(question.query_type());

        records.iter().filter(move |record| {
            if record.record_type != wanted {
                return false;
            }
            let Some(value) = record.matching_value(&name) else {
                return false;
            };
            if !record.record_type.is_supported() {
                warn!(
                    domain = %name,
                    record_type = %record.record_type,
                    value = %value,
                    "Unknown record type, override skipped"
                );
                return false;
            }
            debug!(domain = %name, value = %value, target = %record.target, "Override matched");
            true
        })
    }
}
