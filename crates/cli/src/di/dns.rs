use crate::bootstrap::unsupported_record_types;
use pinpoint_dns_application::services::UpstreamForwarder;
use pinpoint_dns_application::use_cases::ResolveQueryUseCase;
use pinpoint_dns_domain::Config;
use pinpoint_dns_infrastructure::dns::{DnsServerHandler, UdpExchange};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub use_case: Arc<ResolveQueryUseCase>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config, nameservers: Vec<SocketAddr>) -> Self {
        for record_type in unsupported_record_types(config) {
            warn!(record_type = %record_type, "Override record type is not supported and will never match");
        }

        let exchange = Arc::new(UdpExchange::new(config.upstream.query_timeout()));
        let forwarder = UpstreamForwarder::new(exchange, nameservers)
            .with_strategy(config.upstream.strategy)
            .with_deadline(config.upstream.forward_deadline());

        info!(
            nameservers = ?forwarder.nameservers(),
            strategy = forwarder.strategy().as_str(),
            query_timeout_ms = config.upstream.query_timeout_ms,
            "DNS services initialized"
        );

        let use_case = Arc::new(ResolveQueryUseCase::new(
            config.records.clone(),
            Arc::new(forwarder),
        ));
        let handler = DnsServerHandler::new(use_case.clone());

        Self { use_case, handler }
    }
}
