pub mod exchange;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use exchange::UdpExchange;
pub use server::DnsServerHandler;
