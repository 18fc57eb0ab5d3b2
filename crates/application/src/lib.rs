//! Pinpoint DNS Application Layer
//!
//! The query-resolution decision engine: override matching, answer
//! synthesis and upstream forwarding, behind the [`ports`] it needs from
//! the outside world.
pub mod ports;
pub mod services;
pub mod use_cases;
