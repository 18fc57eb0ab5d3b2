//! Pinpoint DNS infrastructure: network adapters for the application ports
//! and the wire-level request handler.
pub mod dns;
