mod config;
mod logging;
mod nameservers;
mod signals;

pub use config::{load_config, unsupported_record_types};
pub use logging::init_logging;
pub use nameservers::resolve_nameservers;
pub use signals::watch_shutdown_signals;
