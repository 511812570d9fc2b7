//! # Document Lifecycle Hooks
//!
//! Explicit ordered hook lists run around save and find-family operations.
//! A hook either proceeds (`Ok`) or vetoes the whole operation (`Err`),
//! exactly once; a veto aborts the mutation with nothing persisted.
//!
//! Registration is an explicit (phase, operation pattern, action) triple
//! held in a [`HookSet`] and run by the service, not attached to a schema
//! behind the scenes.

pub mod slug;
pub mod timestamps;
pub mod timing;
pub mod visibility;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;

use crate::query::QueryDescriptor;

/// Hook failure; vetoes the operation it runs in
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type HookResult = Result<(), HookError>;

/// Phase relative to the store call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

/// Which operations a hook attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPattern {
    /// The literal `save` operation (create and update paths)
    Save,
    /// Any operation whose name begins with `find`
    FindFamily,
}

impl OperationPattern {
    /// Whether an operation name matches this pattern
    pub fn matches(&self, operation: &str) -> bool {
        match self {
            Self::Save => operation == "save",
            Self::FindFamily => operation.starts_with("find"),
        }
    }
}

/// Transforms a document in flight around a save
pub trait DocumentHook: Send + Sync {
    fn run(&self, document: &mut Value) -> HookResult;
}

/// Narrows or inspects a query before it reaches the store
pub trait QueryHook: Send + Sync {
    fn run(&self, query: &mut QueryDescriptor) -> HookResult;
}

/// Observes results after a find-family operation completes.
///
/// Observers get a shared reference only: they may record timing or counts
/// but cannot alter the result shape.
pub trait FindObserver: Send + Sync {
    fn observe(&self, operation: &str, results: &[Value], started: Instant);
}

/// Ordered hook registrations for one resource
#[derive(Default, Clone)]
pub struct HookSet {
    before_save: Vec<Arc<dyn DocumentHook>>,
    after_save: Vec<Arc<dyn DocumentHook>>,
    before_find: Vec<Arc<dyn QueryHook>>,
    after_find: Vec<Arc<dyn FindObserver>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document hook on the save pattern
    pub fn on_save(mut self, phase: Phase, hook: impl DocumentHook + 'static) -> Self {
        match phase {
            Phase::Before => self.before_save.push(Arc::new(hook)),
            Phase::After => self.after_save.push(Arc::new(hook)),
        }
        self
    }

    /// Register a query hook ahead of every find-family operation
    pub fn before_find(mut self, hook: impl QueryHook + 'static) -> Self {
        self.before_find.push(Arc::new(hook));
        self
    }

    /// Register an observer behind every find-family operation
    pub fn after_find(mut self, hook: impl FindObserver + 'static) -> Self {
        self.after_find.push(Arc::new(hook));
        self
    }

    /// Run before-save hooks in registration order; the first veto aborts.
    pub fn run_before_save(&self, operation: &str, document: &mut Value) -> HookResult {
        if !OperationPattern::Save.matches(operation) {
            return Ok(());
        }
        for hook in &self.before_save {
            hook.run(document)?;
        }
        Ok(())
    }

    /// Run after-save hooks in registration order.
    pub fn run_after_save(&self, operation: &str, document: &mut Value) -> HookResult {
        if !OperationPattern::Save.matches(operation) {
            return Ok(());
        }
        for hook in &self.after_save {
            hook.run(document)?;
        }
        Ok(())
    }

    /// Run before-find hooks in registration order.
    ///
    /// These run before the descriptor reaches the store, so an injected
    /// clause cannot be defeated by a caller-supplied filter.
    pub fn run_before_find(&self, operation: &str, query: &mut QueryDescriptor) -> HookResult {
        if !OperationPattern::FindFamily.matches(operation) {
            return Ok(());
        }
        for hook in &self.before_find {
            hook.run(query)?;
        }
        Ok(())
    }

    /// Run after-find observers in registration order.
    pub fn run_after_find(&self, operation: &str, results: &[Value], started: Instant) {
        if !OperationPattern::FindFamily.matches(operation) {
            return;
        }
        for hook in &self.after_find {
            hook.observe(operation, results, started);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TagHook {
        tag: &'static str,
    }

    impl DocumentHook for TagHook {
        fn run(&self, document: &mut Value) -> HookResult {
            if let Some(Value::String(trail)) = document.get_mut("trail") {
                trail.push_str(self.tag);
            }
            Ok(())
        }
    }

    struct VetoHook;

    impl DocumentHook for VetoHook {
        fn run(&self, _document: &mut Value) -> HookResult {
            Err(HookError::new("vetoed"))
        }
    }

    #[test]
    fn test_operation_pattern_matching() {
        assert!(OperationPattern::Save.matches("save"));
        assert!(!OperationPattern::Save.matches("find"));

        assert!(OperationPattern::FindFamily.matches("find"));
        assert!(OperationPattern::FindFamily.matches("findById"));
        assert!(OperationPattern::FindFamily.matches("findByIdAndUpdate"));
        assert!(!OperationPattern::FindFamily.matches("save"));
        assert!(!OperationPattern::FindFamily.matches("count"));
    }

    #[test]
    fn test_before_save_runs_in_registration_order() {
        let hooks = HookSet::new()
            .on_save(Phase::Before, TagHook { tag: "a" })
            .on_save(Phase::Before, TagHook { tag: "b" });
        let mut document = json!({"trail": ""});

        hooks.run_before_save("save", &mut document).unwrap();

        assert_eq!(document["trail"], "ab");
    }

    #[test]
    fn test_veto_stops_the_chain() {
        let hooks = HookSet::new()
            .on_save(Phase::Before, TagHook { tag: "a" })
            .on_save(Phase::Before, VetoHook)
            .on_save(Phase::Before, TagHook { tag: "b" });
        let mut document = json!({"trail": ""});

        let result = hooks.run_before_save("save", &mut document);

        assert!(result.is_err());
        // The hook behind the veto never ran
        assert_eq!(document["trail"], "a");
    }

    #[test]
    fn test_save_hooks_skip_find_operations() {
        let hooks = HookSet::new().on_save(Phase::Before, VetoHook);
        let mut document = json!({});

        assert!(hooks.run_before_save("findById", &mut document).is_ok());
    }

    #[test]
    fn test_after_find_observer_sees_results() {
        struct Counter(Arc<AtomicUsize>);
        impl FindObserver for Counter {
            fn observe(&self, _operation: &str, results: &[Value], _started: Instant) {
                self.0.store(results.len(), Ordering::SeqCst);
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let hooks = HookSet::new().after_find(Counter(seen.clone()));

        hooks.run_after_find("find", &[json!({}), json!({})], Instant::now());

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
