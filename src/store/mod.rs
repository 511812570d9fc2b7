//! # Resource Store
//!
//! Generic document-store capability consumed by the service core, plus the
//! in-memory implementation that backs the standalone server and the test
//! suite. A production deployment swaps a real engine in behind the same
//! trait.

pub mod eval;
pub mod memory;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::query::QueryDescriptor;

pub use memory::InMemoryStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Uniqueness violation on a field
    #[error("duplicate value for unique field: {0}")]
    Duplicate(String),

    /// Filter document the engine cannot evaluate
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Unexpected engine failure
    #[error("store error: {0}")]
    Internal(String),
}

/// Generic find/create/update/delete capability over JSON documents.
///
/// The store executes translated queries verbatim; all policy (defaults,
/// visibility narrowing, hooks) happens before a descriptor arrives here.
pub trait ResourceStore: Send + Sync {
    /// Execute a translated query: filter, sort, skip/limit, projection.
    fn find(&self, query: &QueryDescriptor) -> StoreResult<Vec<Value>>;

    /// Count documents matching a filter, ignoring pagination.
    fn count(&self, filter: &Map<String, Value>) -> StoreResult<u64>;

    /// Persist a new document; the store assigns `_id` and `__v`.
    fn create(&self, document: Value) -> StoreResult<Value>;

    /// Fetch one document by id, unfiltered and unprojected.
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Value>>;

    /// Replace the fields of the identified document, preserving `_id` and
    /// `__v`. Returns the updated document.
    fn update_by_id(&self, id: &str, document: &Value) -> StoreResult<Option<Value>>;

    /// Remove the identified document. Returns whether anything was
    /// removed.
    fn delete_by_id(&self, id: &str) -> StoreResult<bool>;
}
