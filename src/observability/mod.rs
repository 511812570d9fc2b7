//! Observability: structured logging.
//!
//! Logging is read-only with respect to execution: the service core never
//! logs, and the only call sites are the query-timing hook and server boot.

pub mod logger;

pub use logger::{Logger, Severity};
