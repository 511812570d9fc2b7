//! Visibility narrowing for find-family queries.

use serde_json::{json, Map, Value};

use crate::query::QueryDescriptor;

use super::{HookResult, QueryHook};

/// Before-find hook that hides documents carrying a marker value.
///
/// The injected clause is ANDed with the caller's filter, so an explicit
/// caller filter on the same field narrows further instead of widening
/// visibility back.
pub struct VisibilityHook {
    field: String,
    hidden: Value,
}

impl VisibilityHook {
    /// Hide documents where `field == true` (e.g. `secretTour`).
    pub fn hide_flagged(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            hidden: Value::Bool(true),
        }
    }

    /// Hide documents where `field == false` (e.g. `active` on user-like
    /// resources).
    pub fn hide_unflagged(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            hidden: Value::Bool(false),
        }
    }
}

impl QueryHook for VisibilityHook {
    fn run(&self, query: &mut QueryDescriptor) -> HookResult {
        let mut clause = Map::new();
        clause.insert(self.field.clone(), json!({"$ne": self.hidden}));
        query.and_filter(clause);
        Ok(())
    }
}
