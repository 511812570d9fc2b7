//! # Query Translator
//!
//! Composes the operator rewriter and the parameter normalizer into one
//! query descriptor.

use serde_json::{Map, Value};

use super::params::{self, RawParameters};

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

impl SortKey {
    /// Ascending order on a field
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    /// Descending order on a field
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }
}

/// Field projection for returned documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Return only the named fields
    Include(Vec<String>),
    /// Return everything except the named fields
    Exclude(Vec<String>),
}

/// A validated store query built from one request's parameters.
///
/// `skip = (page - 1) * limit`; `explicit_page` is set only when the caller
/// supplied `page` itself, which is the sole trigger for the out-of-range
/// check on list queries.
#[derive(Debug, Clone)]
pub struct QueryDescriptor {
    pub filter: Map<String, Value>,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub skip: u64,
    pub limit: u64,
    pub explicit_page: Option<u64>,
}

impl QueryDescriptor {
    /// AND an extra clause into the filter.
    ///
    /// The clause lands in a `$and` conjunction next to the caller's
    /// entries, so a caller key with the same field name narrows further
    /// instead of being overridden.
    pub fn and_filter(&mut self, clause: Map<String, Value>) {
        if clause.is_empty() {
            return;
        }
        let clauses = self
            .filter
            .entry("$and")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = clauses {
            list.push(Value::Object(clause));
        }
    }
}

/// Build a query descriptor from one raw request-parameter map.
///
/// Deterministic and side-effect free; the descriptor is not executed here
/// and the input map is left intact.
pub fn translate(raw: &RawParameters) -> QueryDescriptor {
    let pagination = params::derive_pagination(raw);

    QueryDescriptor {
        filter: params::extract_filter(raw),
        sort: params::derive_sort(raw),
        projection: params::derive_projection(raw),
        skip: pagination.skip,
        limit: pagination.limit,
        explicit_page: pagination.explicit_page.then_some(pagination.page),
    }
}
