pub mod answer_synthesizer;
pub mod message_builder;
pub mod record_matcher;
pub mod record_type_map;
pub mod upstream_forwarder;

pub use answer_synthesizer::{AnswerSection, AnswerSynthesizer, SynthesizedAnswer};
pub use message_builder::MessageBuilder;
pub use record_matcher::RecordMatcher;
pub use record_type_map::RecordTypeMapper;
pub use upstream_forwarder::{Forwarded, UpstreamForwarder};
