//! # REST surface
//!
//! Thin HTTP layer over the tour service: routing, envelopes, and
//! status-code mapping. No decision logic lives here.

pub mod config;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use response::{ListBody, SingleBody};
pub use server::RestServer;
