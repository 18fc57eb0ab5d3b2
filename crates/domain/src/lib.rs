//! Pinpoint DNS Domain Layer
pub mod config;
pub mod errors;
pub mod nameserver;
pub mod override_record;
pub mod override_type;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use nameserver::NameServer;
pub use override_record::OverrideRecord;
pub use override_type::OverrideType;
