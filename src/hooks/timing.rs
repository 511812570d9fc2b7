//! Query timing for find-family operations.

use std::time::Instant;

use serde_json::Value;

use crate::observability::{Logger, Severity};

use super::FindObserver;

/// After-find hook: log how long the operation took.
///
/// Results pass through untouched; this is the only place in the pipeline
/// that logs.
pub struct QueryTimer;

impl FindObserver for QueryTimer {
    fn observe(&self, operation: &str, results: &[Value], started: Instant) {
        let duration_ms = started.elapsed().as_millis().to_string();
        let count = results.len().to_string();
        Logger::log(
            Severity::Info,
            "query_completed",
            &[
                ("operation", operation),
                ("duration_ms", &duration_ms),
                ("results", &count),
            ],
        );
    }
}
