//! Creation timestamp for the save path.

use chrono::Utc;
use serde_json::Value;

use super::{DocumentHook, HookResult};

/// Before-save hook: set `createdAt` once, at first persistence.
///
/// Saves of an already-persisted document carry the original timestamp and
/// keep it.
pub struct CreatedAtHook;

impl DocumentHook for CreatedAtHook {
    fn run(&self, document: &mut Value) -> HookResult {
        if document.get("createdAt").is_some() {
            return Ok(());
        }
        if let Some(doc) = document.as_object_mut() {
            doc.insert(
                "createdAt".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
        Ok(())
    }
}
